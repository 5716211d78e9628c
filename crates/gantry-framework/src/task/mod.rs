mod store;
mod submitter;

use std::fmt;

use serde::{Deserialize, Serialize};
pub use store::{MemoryTaskStore, TaskStore};
pub use submitter::TaskSubmitter;

use crate::id::TaskId;
use crate::proto::mesos;

/// A user-submitted command and the framework's view of its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub command: String,
    pub state: TaskState,
}

impl Task {
    pub fn new(id: TaskId, command: String) -> Self {
        Self {
            id,
            command,
            state: TaskState::Pending,
        }
    }
}

/// The task lifecycle as tracked by the framework.
/// Tasks only move forward through
/// `PENDING -> STARTING -> RUNNING -> (FINISHED | FAILED)`,
/// although any of the intermediate states may be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskState {
    Pending,
    Starting,
    Running,
    Failed,
    Finished,
}

impl TaskState {
    fn rank(&self) -> u8 {
        match self {
            TaskState::Pending => 0,
            TaskState::Starting => 1,
            TaskState::Running => 2,
            TaskState::Failed | TaskState::Finished => 3,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Failed | TaskState::Finished)
    }

    /// Returns whether the task may move from this state to `next`.
    /// Re-entering the same state is allowed so that redelivered updates are harmless.
    pub fn can_transition_to(&self, next: TaskState) -> bool {
        *self == next || next.rank() > self.rank()
    }

    /// Maps a state reported by the master to the framework's task state.
    pub fn from_remote(state: mesos::TaskState) -> Self {
        match state {
            mesos::TaskState::TaskStaging | mesos::TaskState::TaskStarting => TaskState::Starting,
            mesos::TaskState::TaskRunning => TaskState::Running,
            mesos::TaskState::TaskFinished => TaskState::Finished,
            mesos::TaskState::TaskFailed
            | mesos::TaskState::TaskKilled
            | mesos::TaskState::TaskLost
            | mesos::TaskState::TaskError => TaskState::Failed,
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskState::Pending => write!(f, "PENDING"),
            TaskState::Starting => write!(f, "STARTING"),
            TaskState::Running => write!(f, "RUNNING"),
            TaskState::Failed => write!(f, "FAILED"),
            TaskState::Finished => write!(f, "FINISHED"),
        }
    }
}
