//! Messages of the `mesos` protobuf package used by the scheduler protocol.
//! Field numbers follow the master's published `mesos.proto` (proto2).

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct FrameworkId {
    #[prost(string, required, tag = "1")]
    pub value: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct OfferId {
    #[prost(string, required, tag = "1")]
    pub value: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct SlaveId {
    #[prost(string, required, tag = "1")]
    pub value: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct TaskId {
    #[prost(string, required, tag = "1")]
    pub value: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct ExecutorId {
    #[prost(string, required, tag = "1")]
    pub value: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct FrameworkInfo {
    #[prost(string, required, tag = "1")]
    pub user: ::prost::alloc::string::String,
    #[prost(string, required, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub id: ::core::option::Option<FrameworkId>,
    #[prost(double, optional, tag = "4")]
    pub failover_timeout: ::core::option::Option<f64>,
    #[prost(bool, optional, tag = "5")]
    pub checkpoint: ::core::option::Option<bool>,
    #[prost(string, optional, tag = "6")]
    pub role: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "7")]
    pub hostname: ::core::option::Option<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct MasterInfo {
    #[prost(string, required, tag = "1")]
    pub id: ::prost::alloc::string::String,
    #[prost(uint32, required, tag = "2")]
    pub ip: u32,
    #[prost(uint32, required, tag = "3")]
    pub port: u32,
    #[prost(string, optional, tag = "4")]
    pub pid: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "5")]
    pub hostname: ::core::option::Option<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CommandInfo {
    #[prost(string, optional, tag = "3")]
    pub value: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(string, optional, tag = "5")]
    pub user: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(bool, optional, tag = "6")]
    pub shell: ::core::option::Option<bool>,
    #[prost(string, repeated, tag = "7")]
    pub arguments: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Value {}

/// Nested message and enum types in `Value`.
pub mod value {
    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Scalar {
        #[prost(double, required, tag = "1")]
        pub value: f64,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Range {
        #[prost(uint64, required, tag = "1")]
        pub begin: u64,
        #[prost(uint64, required, tag = "2")]
        pub end: u64,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Ranges {
        #[prost(message, repeated, tag = "1")]
        pub range: ::prost::alloc::vec::Vec<Range>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Set {
        #[prost(string, repeated, tag = "1")]
        pub item: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Text {
        #[prost(string, required, tag = "1")]
        pub value: ::prost::alloc::string::String,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Type {
        Scalar = 0,
        Ranges = 1,
        Set = 2,
        Text = 3,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Resource {
    #[prost(string, required, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(enumeration = "value::Type", required, tag = "2")]
    pub r#type: i32,
    #[prost(message, optional, tag = "3")]
    pub scalar: ::core::option::Option<value::Scalar>,
    #[prost(message, optional, tag = "4")]
    pub ranges: ::core::option::Option<value::Ranges>,
    #[prost(message, optional, tag = "5")]
    pub set: ::core::option::Option<value::Set>,
    #[prost(string, optional, tag = "6")]
    pub role: ::core::option::Option<::prost::alloc::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Attribute {
    #[prost(string, required, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(enumeration = "value::Type", required, tag = "2")]
    pub r#type: i32,
    #[prost(message, optional, tag = "3")]
    pub scalar: ::core::option::Option<value::Scalar>,
    #[prost(message, optional, tag = "4")]
    pub ranges: ::core::option::Option<value::Ranges>,
    #[prost(message, optional, tag = "6")]
    pub set: ::core::option::Option<value::Set>,
    #[prost(message, optional, tag = "5")]
    pub text: ::core::option::Option<value::Text>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Offer {
    #[prost(message, required, tag = "1")]
    pub id: OfferId,
    #[prost(message, required, tag = "2")]
    pub framework_id: FrameworkId,
    #[prost(message, required, tag = "3")]
    pub slave_id: SlaveId,
    #[prost(string, required, tag = "4")]
    pub hostname: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "5")]
    pub resources: ::prost::alloc::vec::Vec<Resource>,
    #[prost(message, repeated, tag = "6")]
    pub executor_ids: ::prost::alloc::vec::Vec<ExecutorId>,
    #[prost(message, repeated, tag = "7")]
    pub attributes: ::prost::alloc::vec::Vec<Attribute>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TaskInfo {
    #[prost(string, required, tag = "1")]
    pub name: ::prost::alloc::string::String,
    #[prost(message, required, tag = "2")]
    pub task_id: TaskId,
    #[prost(message, required, tag = "3")]
    pub slave_id: SlaveId,
    #[prost(message, repeated, tag = "4")]
    pub resources: ::prost::alloc::vec::Vec<Resource>,
    #[prost(bytes = "vec", optional, tag = "6")]
    pub data: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(message, optional, tag = "7")]
    pub command: ::core::option::Option<CommandInfo>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TaskStatus {
    #[prost(message, required, tag = "1")]
    pub task_id: TaskId,
    #[prost(enumeration = "TaskState", required, tag = "2")]
    pub state: i32,
    #[prost(bytes = "vec", optional, tag = "3")]
    pub data: ::core::option::Option<::prost::alloc::vec::Vec<u8>>,
    #[prost(string, optional, tag = "4")]
    pub message: ::core::option::Option<::prost::alloc::string::String>,
    #[prost(message, optional, tag = "5")]
    pub slave_id: ::core::option::Option<SlaveId>,
    #[prost(double, optional, tag = "6")]
    pub timestamp: ::core::option::Option<f64>,
    #[prost(message, optional, tag = "7")]
    pub executor_id: ::core::option::Option<ExecutorId>,
    #[prost(bool, optional, tag = "8")]
    pub healthy: ::core::option::Option<bool>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Filters {
    #[prost(double, optional, tag = "1")]
    pub refuse_seconds: ::core::option::Option<f64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum TaskState {
    TaskStarting = 0,
    TaskRunning = 1,
    TaskFinished = 2,
    TaskFailed = 3,
    TaskKilled = 4,
    TaskLost = 5,
    TaskStaging = 6,
    TaskError = 7,
}

impl TaskState {
    /// The name of the value as it appears in the protobuf definition.
    pub fn as_str_name(&self) -> &'static str {
        match self {
            TaskState::TaskStarting => "TASK_STARTING",
            TaskState::TaskRunning => "TASK_RUNNING",
            TaskState::TaskFinished => "TASK_FINISHED",
            TaskState::TaskFailed => "TASK_FAILED",
            TaskState::TaskKilled => "TASK_KILLED",
            TaskState::TaskLost => "TASK_LOST",
            TaskState::TaskStaging => "TASK_STAGING",
            TaskState::TaskError => "TASK_ERROR",
        }
    }
}
