use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SchedulerError, SchedulerResult};
use crate::proto::mesos;

macro_rules! define_id_type {
    ($name:ident, $proto:ty) => {
        /// An opaque identifier.
        #[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl From<$proto> for $name {
            fn from(id: $proto) -> Self {
                Self(id.value)
            }
        }

        impl From<&$name> for $proto {
            fn from(id: &$name) -> Self {
                Self {
                    value: id.0.clone(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id_type!(FrameworkId, mesos::FrameworkId);
define_id_type!(OfferId, mesos::OfferId);
define_id_type!(SlaveId, mesos::SlaveId);
define_id_type!(TaskId, mesos::TaskId);

/// Generates framework-assigned task IDs of the form `task-<n>`.
#[derive(Debug)]
pub struct TaskIdGenerator {
    next_value: u64,
}

impl Default for TaskIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskIdGenerator {
    pub fn new() -> Self {
        Self { next_value: 1 }
    }

    pub fn next(&mut self) -> SchedulerResult<TaskId> {
        let value = self.next_value;
        self.next_value = value
            .checked_add(1)
            .ok_or_else(|| SchedulerError::internal("task ID overflow"))?;
        Ok(TaskId(format!("task-{value}")))
    }
}
