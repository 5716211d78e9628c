use std::sync::{Arc, Mutex};

use log::info;
use tokio::sync::Notify;

use crate::error::{SchedulerError, SchedulerResult};
use crate::id::{TaskId, TaskIdGenerator};
use crate::task::{Task, TaskStore};

/// The entry point for new work.
/// Each submission is stored as a pending task and wakes up the scheduling loop.
pub struct TaskSubmitter {
    store: Arc<dyn TaskStore>,
    task_id_generator: Mutex<TaskIdGenerator>,
    notify: Arc<Notify>,
}

impl TaskSubmitter {
    pub fn new(store: Arc<dyn TaskStore>, notify: Arc<Notify>) -> Self {
        Self {
            store,
            task_id_generator: Mutex::new(TaskIdGenerator::new()),
            notify,
        }
    }

    pub fn store(&self) -> &Arc<dyn TaskStore> {
        &self.store
    }

    pub fn submit(&self, command: impl Into<String>) -> SchedulerResult<TaskId> {
        let command = command.into();
        if command.trim().is_empty() {
            return Err(SchedulerError::invalid("command must not be empty"));
        }
        let task_id = self.task_id_generator.lock()?.next()?;
        self.store.add(Task::new(task_id.clone(), command))?;
        info!("task {task_id} submitted");
        self.notify.notify_one();
        Ok(task_id)
    }
}
