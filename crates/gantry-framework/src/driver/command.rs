use tokio::sync::{mpsc, oneshot};

use crate::error::SchedulerResult;
use crate::event::{Offer, StatusUpdate};
use crate::id::TaskId;

/// Work queued to the driver by other workers.
/// The driver reports the outcome on the `result` channel.
#[derive(Debug)]
pub enum DriverCommand {
    Launch {
        task_id: TaskId,
        command: String,
        offer: Offer,
        result: oneshot::Sender<SchedulerResult<()>>,
    },
    Acknowledge {
        update: StatusUpdate,
        result: oneshot::Sender<SchedulerResult<()>>,
    },
}

#[derive(Debug, Clone)]
pub struct DriverHandle {
    sender: mpsc::Sender<DriverCommand>,
}

impl DriverHandle {
    pub(crate) fn new(sender: mpsc::Sender<DriverCommand>) -> Self {
        Self { sender }
    }

    /// Launches the command as a task using all resources of the offer.
    pub async fn launch(
        &self,
        task_id: TaskId,
        command: String,
        offer: Offer,
    ) -> SchedulerResult<()> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(DriverCommand::Launch {
                task_id,
                command,
                offer,
                result: tx,
            })
            .await?;
        rx.await?
    }

    pub async fn acknowledge(&self, update: StatusUpdate) -> SchedulerResult<()> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(DriverCommand::Acknowledge { update, result: tx })
            .await?;
        rx.await?
    }
}
