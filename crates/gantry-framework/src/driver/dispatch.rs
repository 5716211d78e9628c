use log::{debug, error, info, warn};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use crate::error::SchedulerResult;
use crate::event::{MasterEvent, Offer, StatusUpdate};
use crate::id::FrameworkId;

/// Routes master events to the workers that consume them.
/// The dispatcher never waits for a consumer. Offers and updates that cannot be
/// admitted right away are dropped, so the master eventually rescinds such offers
/// and redelivers such updates.
pub struct EventDispatcher {
    offers: mpsc::Sender<Offer>,
    updates: mpsc::Sender<StatusUpdate>,
}

impl EventDispatcher {
    pub fn new(offers: mpsc::Sender<Offer>, updates: mpsc::Sender<StatusUpdate>) -> Self {
        Self { offers, updates }
    }

    pub fn dispatch(
        &self,
        event: MasterEvent,
        framework_id: Option<&FrameworkId>,
    ) -> SchedulerResult<()> {
        match event {
            MasterEvent::Registered { framework_id } => {
                info!("received REGISTERED event for framework {framework_id}");
            }
            MasterEvent::Reregistered { framework_id } => {
                info!("received REREGISTERED event for framework {framework_id}");
            }
            MasterEvent::Offers { offers } => {
                for offer in offers {
                    self.admit_offer(Offer::from(offer), framework_id);
                }
            }
            MasterEvent::Rescind { offer_id } => {
                info!("offer {offer_id} rescinded");
            }
            MasterEvent::Update { update } => match StatusUpdate::try_from(update) {
                Ok(update) => self.admit_update(update, framework_id),
                Err(e) => warn!("ignoring status update: {e}"),
            },
            MasterEvent::Message { slave_id, data } => {
                info!(
                    "received message of {} bytes from agent {slave_id}",
                    data.len()
                );
            }
            MasterEvent::Failure { slave_id, status } => {
                let slave_id = slave_id
                    .map(|x| x.to_string())
                    .unwrap_or_else(|| "<unknown>".to_string());
                info!("received failure for agent {slave_id} with status {status:?}");
            }
            MasterEvent::Error { message } => {
                error!("received error from the master: {message}");
            }
        }
        Ok(())
    }

    fn admit_offer(&self, offer: Offer, framework_id: Option<&FrameworkId>) {
        if framework_id != Some(&offer.framework_id) {
            warn!(
                "ignoring offer {} for unexpected framework {}",
                offer.id, offer.framework_id
            );
            return;
        }
        let offer_id = offer.id.clone();
        match self.offers.try_send(offer) {
            Ok(()) => debug!("offer {offer_id} admitted"),
            Err(TrySendError::Full(_)) => {
                warn!("ignoring offer {offer_id} since there is no capacity for it");
            }
            Err(TrySendError::Closed(_)) => {
                warn!("ignoring offer {offer_id} since the scheduler has stopped");
            }
        }
    }

    /// Status updates carry no framework ID, so an update is only accepted
    /// once the framework has an identity that the master addressed it to.
    fn admit_update(&self, update: StatusUpdate, framework_id: Option<&FrameworkId>) {
        let task_id = update.task_id.clone();
        let state = update.state.as_str_name();
        if framework_id.is_none() {
            warn!("ignoring status update {state} for task {task_id} before registration");
            return;
        }
        match self.updates.try_send(update) {
            Ok(()) => debug!("status update {state} for task {task_id} admitted"),
            Err(TrySendError::Full(_)) => {
                warn!("ignoring status update {state} for task {task_id} since there is no capacity for it");
            }
            Err(TrySendError::Closed(_)) => {
                warn!("ignoring status update {state} for task {task_id} since the acknowledger has stopped");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::id::{OfferId, SlaveId, TaskId};
    use crate::proto::{mesos, scheduler};

    fn offer(id: &str, framework_id: &str) -> mesos::Offer {
        mesos::Offer {
            id: mesos::OfferId {
                value: id.to_string(),
            },
            framework_id: mesos::FrameworkId {
                value: framework_id.to_string(),
            },
            slave_id: mesos::SlaveId {
                value: "S1".to_string(),
            },
            hostname: "agent-1".to_string(),
            ..Default::default()
        }
    }

    fn update(state: i32) -> scheduler::event::Update {
        scheduler::event::Update {
            uuid: b"t1".to_vec(),
            status: mesos::TaskStatus {
                task_id: mesos::TaskId {
                    value: "task-1".to_string(),
                },
                state,
                slave_id: Some(mesos::SlaveId {
                    value: "S1".to_string(),
                }),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_dispatch_offers_over_capacity() {
        let (offer_tx, mut offer_rx) = mpsc::channel(2);
        let (update_tx, _update_rx) = mpsc::channel(1);
        let dispatcher = EventDispatcher::new(offer_tx, update_tx);
        let framework_id = FrameworkId::from("F1");
        let event = MasterEvent::Offers {
            offers: vec![offer("O1", "F1"), offer("O2", "F1"), offer("O3", "F1")],
        };
        dispatcher.dispatch(event, Some(&framework_id)).unwrap();

        assert_eq!(offer_rx.try_recv().unwrap().id, OfferId::from("O1"));
        assert_eq!(offer_rx.try_recv().unwrap().id, OfferId::from("O2"));
        assert!(offer_rx.try_recv().is_err());
    }

    #[test]
    fn test_dispatch_offer_for_other_framework() {
        let (offer_tx, mut offer_rx) = mpsc::channel(4);
        let (update_tx, _update_rx) = mpsc::channel(1);
        let dispatcher = EventDispatcher::new(offer_tx, update_tx);
        let framework_id = FrameworkId::from("F1");
        let event = MasterEvent::Offers {
            offers: vec![offer("O1", "F2"), offer("O2", "F1")],
        };
        dispatcher.dispatch(event, Some(&framework_id)).unwrap();

        assert_eq!(offer_rx.try_recv().unwrap().id, OfferId::from("O2"));
        assert!(offer_rx.try_recv().is_err());
    }

    #[test]
    fn test_dispatch_offer_without_scheduler() {
        let (offer_tx, offer_rx) = mpsc::channel(4);
        drop(offer_rx);
        let (update_tx, _update_rx) = mpsc::channel(1);
        let dispatcher = EventDispatcher::new(offer_tx, update_tx);
        let event = MasterEvent::Offers {
            offers: vec![offer("O1", "F1")],
        };
        assert!(dispatcher
            .dispatch(event, Some(&FrameworkId::from("F1")))
            .is_ok());
    }

    #[test]
    fn test_dispatch_update() {
        let (offer_tx, _offer_rx) = mpsc::channel(1);
        let (update_tx, mut update_rx) = mpsc::channel(1);
        let dispatcher = EventDispatcher::new(offer_tx, update_tx);
        let framework_id = FrameworkId::from("F1");

        let event = MasterEvent::Update {
            update: update(mesos::TaskState::TaskRunning as i32),
        };
        dispatcher.dispatch(event, Some(&framework_id)).unwrap();
        // The channel is full, so the second update is dropped.
        let event = MasterEvent::Update {
            update: update(mesos::TaskState::TaskFinished as i32),
        };
        dispatcher.dispatch(event, Some(&framework_id)).unwrap();

        let received = update_rx.try_recv().unwrap();
        assert_eq!(received.task_id, TaskId::from("task-1"));
        assert_eq!(received.slave_id, SlaveId::from("S1"));
        assert_eq!(received.state, mesos::TaskState::TaskRunning);
        assert_eq!(received.ack_token, b"t1".to_vec());
        assert!(update_rx.try_recv().is_err());
    }

    #[test]
    fn test_dispatch_update_before_registration() {
        let (offer_tx, _offer_rx) = mpsc::channel(1);
        let (update_tx, mut update_rx) = mpsc::channel(1);
        let dispatcher = EventDispatcher::new(offer_tx, update_tx);
        let event = MasterEvent::Update {
            update: update(mesos::TaskState::TaskRunning as i32),
        };
        dispatcher.dispatch(event, None).unwrap();
        assert!(update_rx.try_recv().is_err());
    }

    #[test]
    fn test_dispatch_update_with_unknown_state() {
        let (offer_tx, _offer_rx) = mpsc::channel(1);
        let (update_tx, mut update_rx) = mpsc::channel(1);
        let dispatcher = EventDispatcher::new(offer_tx, update_tx);
        let event = MasterEvent::Update { update: update(99) };
        dispatcher
            .dispatch(event, Some(&FrameworkId::from("F1")))
            .unwrap();
        assert!(update_rx.try_recv().is_err());
    }

    #[test]
    fn test_dispatch_informational_events() {
        let (offer_tx, mut offer_rx) = mpsc::channel(1);
        let (update_tx, mut update_rx) = mpsc::channel(1);
        let dispatcher = EventDispatcher::new(offer_tx, update_tx);
        let events = [
            MasterEvent::Rescind {
                offer_id: OfferId::from("O1"),
            },
            MasterEvent::Message {
                slave_id: SlaveId::from("S1"),
                data: b"hello".to_vec(),
            },
            MasterEvent::Failure {
                slave_id: None,
                status: Some(1),
            },
            MasterEvent::Error {
                message: "framework removed".to_string(),
            },
        ];
        for event in events {
            dispatcher
                .dispatch(event, Some(&FrameworkId::from("F1")))
                .unwrap();
        }
        assert!(offer_rx.try_recv().is_err());
        assert!(update_rx.try_recv().is_err());
    }
}
