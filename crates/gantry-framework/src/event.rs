use std::fmt;

use crate::error::{SchedulerError, SchedulerResult};
use crate::id::{FrameworkId, OfferId, SlaveId, TaskId};
use crate::proto::{mesos, scheduler};

/// A resource lease granted to the framework by the master.
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    pub id: OfferId,
    pub framework_id: FrameworkId,
    pub slave_id: SlaveId,
    pub hostname: String,
    pub resources: Vec<mesos::Resource>,
}

impl From<mesos::Offer> for Offer {
    fn from(offer: mesos::Offer) -> Self {
        Self {
            id: offer.id.into(),
            framework_id: offer.framework_id.into(),
            slave_id: offer.slave_id.into(),
            hostname: offer.hostname,
            resources: offer.resources,
        }
    }
}

/// A task state change reported by the master that must be acknowledged.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub task_id: TaskId,
    pub slave_id: SlaveId,
    pub state: mesos::TaskState,
    pub message: Option<String>,
    /// The opaque token that must be echoed back verbatim in the acknowledgment.
    pub ack_token: Vec<u8>,
}

impl TryFrom<scheduler::event::Update> for StatusUpdate {
    type Error = SchedulerError;

    fn try_from(update: scheduler::event::Update) -> SchedulerResult<Self> {
        let scheduler::event::Update { uuid, status } = update;
        let state = mesos::TaskState::try_from(status.state).map_err(|_| {
            SchedulerError::protocol(format!(
                "unknown state {} for task {}",
                status.state, status.task_id.value
            ))
        })?;
        let Some(slave_id) = status.slave_id else {
            return Err(SchedulerError::protocol(format!(
                "missing agent for task {}",
                status.task_id.value
            )));
        };
        Ok(Self {
            task_id: status.task_id.into(),
            slave_id: slave_id.into(),
            state,
            message: status.message,
            ack_token: uuid,
        })
    }
}

/// An event received from the master, classified by its type tag.
#[derive(Debug, Clone, PartialEq)]
pub enum MasterEvent {
    Registered {
        framework_id: FrameworkId,
    },
    Reregistered {
        framework_id: FrameworkId,
    },
    Offers {
        offers: Vec<mesos::Offer>,
    },
    Rescind {
        offer_id: OfferId,
    },
    Update {
        update: scheduler::event::Update,
    },
    Message {
        slave_id: SlaveId,
        data: Vec<u8>,
    },
    Failure {
        slave_id: Option<SlaveId>,
        status: Option<i32>,
    },
    Error {
        message: String,
    },
}

impl MasterEvent {
    pub fn name(&self) -> &'static str {
        let event_type = match self {
            MasterEvent::Registered { .. } => scheduler::event::Type::Registered,
            MasterEvent::Reregistered { .. } => scheduler::event::Type::Reregistered,
            MasterEvent::Offers { .. } => scheduler::event::Type::Offers,
            MasterEvent::Rescind { .. } => scheduler::event::Type::Rescind,
            MasterEvent::Update { .. } => scheduler::event::Type::Update,
            MasterEvent::Message { .. } => scheduler::event::Type::Message,
            MasterEvent::Failure { .. } => scheduler::event::Type::Failure,
            MasterEvent::Error { .. } => scheduler::event::Type::Error,
        };
        event_type.as_str_name()
    }
}

impl fmt::Display for MasterEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn missing_payload(event_type: scheduler::event::Type) -> SchedulerError {
    SchedulerError::protocol(format!(
        "missing payload for {} event",
        event_type.as_str_name()
    ))
}

impl TryFrom<scheduler::Event> for MasterEvent {
    type Error = SchedulerError;

    fn try_from(event: scheduler::Event) -> SchedulerResult<Self> {
        use scheduler::event::Type;

        let event_type = Type::try_from(event.r#type).map_err(|_| {
            SchedulerError::protocol(format!("unknown event type: {}", event.r#type))
        })?;
        let event = match event_type {
            Type::Registered => {
                let registered = event.registered.ok_or_else(|| missing_payload(event_type))?;
                MasterEvent::Registered {
                    framework_id: registered.framework_id.into(),
                }
            }
            Type::Reregistered => {
                let reregistered = event
                    .reregistered
                    .ok_or_else(|| missing_payload(event_type))?;
                MasterEvent::Reregistered {
                    framework_id: reregistered.framework_id.into(),
                }
            }
            Type::Offers => {
                let offers = event.offers.ok_or_else(|| missing_payload(event_type))?;
                MasterEvent::Offers {
                    offers: offers.offers,
                }
            }
            Type::Rescind => {
                let rescind = event.rescind.ok_or_else(|| missing_payload(event_type))?;
                MasterEvent::Rescind {
                    offer_id: rescind.offer_id.into(),
                }
            }
            Type::Update => {
                let update = event.update.ok_or_else(|| missing_payload(event_type))?;
                MasterEvent::Update { update }
            }
            Type::Message => {
                let message = event.message.ok_or_else(|| missing_payload(event_type))?;
                MasterEvent::Message {
                    slave_id: message.slave_id.into(),
                    data: message.data,
                }
            }
            Type::Failure => {
                let failure = event.failure.ok_or_else(|| missing_payload(event_type))?;
                MasterEvent::Failure {
                    slave_id: failure.slave_id.map(SlaveId::from),
                    status: failure.status,
                }
            }
            Type::Error => {
                let error = event.error.ok_or_else(|| missing_payload(event_type))?;
                MasterEvent::Error {
                    message: error.message,
                }
            }
        };
        Ok(event)
    }
}
