use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::mpsc;

use crate::driver::DriverHandle;
use crate::error::{SchedulerError, SchedulerResult};
use crate::event::StatusUpdate;
use crate::task::{TaskState, TaskStore};

/// Applies status updates to the task store and acknowledges them to the master.
pub struct Acknowledger {
    store: Arc<dyn TaskStore>,
    driver: DriverHandle,
    updates: mpsc::Receiver<StatusUpdate>,
}

impl Acknowledger {
    pub fn new(
        store: Arc<dyn TaskStore>,
        driver: DriverHandle,
        updates: mpsc::Receiver<StatusUpdate>,
    ) -> Self {
        Self {
            store,
            driver,
            updates,
        }
    }

    /// Runs until the driver stops producing updates.
    /// A failed acknowledgment stops the acknowledger.
    pub async fn run(mut self) -> SchedulerResult<()> {
        while let Some(update) = self.updates.recv().await {
            self.handle_update(update).await?;
        }
        info!("acknowledger: stopped");
        Ok(())
    }

    async fn handle_update(&self, update: StatusUpdate) -> SchedulerResult<()> {
        let task_id = update.task_id.clone();
        let state = TaskState::from_remote(update.state);
        match self.store.set_state(&task_id, state) {
            Ok(previous) if previous == state => {
                debug!("acknowledger: task {task_id} is already {state}");
            }
            Ok(_) => match state {
                TaskState::Running => info!("acknowledger: task {task_id} is running"),
                TaskState::Finished => info!("acknowledger: task {task_id} is complete"),
                TaskState::Failed => warn!(
                    "acknowledger: task {task_id} failed to complete ({}): {}",
                    update.state.as_str_name(),
                    update.message.as_deref().unwrap_or_default()
                ),
                TaskState::Pending | TaskState::Starting => {
                    debug!("acknowledger: task {task_id} is {state}")
                }
            },
            Err(SchedulerError::TaskNotFound(_)) => {
                warn!("acknowledger: ignoring update for unknown task {task_id}");
                return Ok(());
            }
            Err(e @ SchedulerError::InvalidTransition { .. }) => {
                warn!("acknowledger: ignoring state change: {e}");
            }
            Err(e) => return Err(e),
        }
        self.driver.acknowledge(update).await
    }
}
