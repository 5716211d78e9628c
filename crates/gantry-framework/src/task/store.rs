use std::sync::Mutex;

use indexmap::IndexMap;

use crate::error::{SchedulerError, SchedulerResult};
use crate::id::TaskId;
use crate::task::{Task, TaskState};

/// Bookkeeping for submitted tasks.
/// Implementations synchronize access internally, and no lock is held
/// beyond a single read or update.
pub trait TaskStore: Send + Sync {
    fn add(&self, task: Task) -> SchedulerResult<()>;

    fn get(&self, task_id: &TaskId) -> SchedulerResult<Task>;

    /// Returns the IDs of all tasks in insertion order.
    fn list_ids(&self) -> SchedulerResult<Vec<TaskId>>;

    /// Returns all tasks in insertion order.
    fn list(&self) -> SchedulerResult<Vec<Task>>;

    /// Moves the task to the given state and returns the previous state.
    fn set_state(&self, task_id: &TaskId, state: TaskState) -> SchedulerResult<TaskState>;

    /// Returns the IDs of tasks in the given state in insertion order.
    fn list_ids_in_state(&self, state: TaskState) -> SchedulerResult<Vec<TaskId>> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|task| task.state == state)
            .map(|task| task.id)
            .collect())
    }
}

#[derive(Debug, Default)]
pub struct MemoryTaskStore {
    tasks: Mutex<IndexMap<TaskId, Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TaskStore for MemoryTaskStore {
    fn add(&self, task: Task) -> SchedulerResult<()> {
        let mut tasks = self.tasks.lock()?;
        if tasks.contains_key(&task.id) {
            return Err(SchedulerError::invalid(format!(
                "task already exists: {}",
                task.id
            )));
        }
        tasks.insert(task.id.clone(), task);
        Ok(())
    }

    fn get(&self, task_id: &TaskId) -> SchedulerResult<Task> {
        self.tasks
            .lock()?
            .get(task_id)
            .cloned()
            .ok_or_else(|| SchedulerError::TaskNotFound(task_id.clone()))
    }

    fn list_ids(&self) -> SchedulerResult<Vec<TaskId>> {
        Ok(self.tasks.lock()?.keys().cloned().collect())
    }

    fn list(&self) -> SchedulerResult<Vec<Task>> {
        Ok(self.tasks.lock()?.values().cloned().collect())
    }

    fn set_state(&self, task_id: &TaskId, state: TaskState) -> SchedulerResult<TaskState> {
        let mut tasks = self.tasks.lock()?;
        let Some(task) = tasks.get_mut(task_id) else {
            return Err(SchedulerError::TaskNotFound(task_id.clone()));
        };
        let previous = task.state;
        if !previous.can_transition_to(state) {
            return Err(SchedulerError::InvalidTransition {
                task_id: task_id.clone(),
                from: previous,
                to: state,
            });
        }
        task.state = state;
        Ok(previous)
    }
}
