use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::{mpsc, watch, Notify};
use tokio::time::{self, MissedTickBehavior};

use crate::driver::DriverHandle;
use crate::error::{SchedulerError, SchedulerResult};
use crate::event::Offer;
use crate::id::TaskId;
use crate::shutdown::wait_for_shutdown;
use crate::task::{TaskState, TaskStore};

enum Flow {
    Continue,
    Stop,
}

/// Matches pending tasks with offers and launches them through the driver.
///
/// Offers are accepted greedily: the next offer is used for the next pending
/// task regardless of its resources, and each offer is used for at most one launch.
pub struct SchedulingLoop {
    store: Arc<dyn TaskStore>,
    driver: DriverHandle,
    offers: mpsc::Receiver<Offer>,
    notify: Arc<Notify>,
    poll_interval: Duration,
    shutdown: watch::Receiver<bool>,
}

impl SchedulingLoop {
    pub fn new(
        store: Arc<dyn TaskStore>,
        driver: DriverHandle,
        offers: mpsc::Receiver<Offer>,
        notify: Arc<Notify>,
        poll_interval: Duration,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            store,
            driver,
            offers,
            notify,
            poll_interval,
            shutdown,
        }
    }

    /// Runs until shutdown is requested or the driver stops producing offers.
    pub async fn run(mut self) -> SchedulerResult<()> {
        let mut shutdown = self.shutdown.clone();
        let mut interval = time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                _ = interval.tick() => {}
                _ = self.notify.notified() => {}
                _ = wait_for_shutdown(&mut shutdown) => break,
            }
            if let Flow::Stop = self.schedule_pending(&mut shutdown).await? {
                break;
            }
        }
        info!("scheduler: stopped");
        Ok(())
    }

    async fn schedule_pending(
        &mut self,
        shutdown: &mut watch::Receiver<bool>,
    ) -> SchedulerResult<Flow> {
        for task_id in self.store.list_ids_in_state(TaskState::Pending)? {
            let task = self.store.get(&task_id)?;
            if task.state != TaskState::Pending {
                continue;
            }
            debug!("scheduler: waiting for an offer for task {task_id}");
            let offer = tokio::select! {
                offer = self.offers.recv() => match offer {
                    Some(x) => x,
                    None => return Ok(Flow::Stop),
                },
                _ = wait_for_shutdown(shutdown) => return Ok(Flow::Stop),
            };
            if let Flow::Stop = self.launch(task_id, task.command, offer).await? {
                return Ok(Flow::Stop);
            }
        }
        Ok(Flow::Continue)
    }

    async fn launch(
        &self,
        task_id: TaskId,
        command: String,
        offer: Offer,
    ) -> SchedulerResult<Flow> {
        let offer_id = offer.id.clone();
        match self.driver.launch(task_id.clone(), command, offer).await {
            Ok(()) => {}
            Err(SchedulerError::ChannelClosed(_)) => {
                warn!("scheduler: task {task_id} remains pending since the driver has stopped");
                return Ok(Flow::Stop);
            }
            Err(e) => {
                warn!(
                    "scheduler: task {task_id} remains pending after failing to launch with offer {offer_id}: {e}"
                );
                return Ok(Flow::Continue);
            }
        }
        match self.store.set_state(&task_id, TaskState::Starting) {
            Ok(_) => info!("scheduler: task {task_id} is starting with offer {offer_id}"),
            // A status update may be applied before the launch completes.
            Err(SchedulerError::InvalidTransition { from, .. }) => {
                debug!("scheduler: task {task_id} is already {from}");
            }
            Err(e) => return Err(e),
        }
        Ok(Flow::Continue)
    }
}
