//! Messages of the `mesos.scheduler` protobuf package.
//! Field numbers follow the master's published `scheduler.proto` (proto2).

use super::mesos;

/// A message sent from the master to the framework.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Event {
    #[prost(enumeration = "event::Type", required, tag = "1")]
    pub r#type: i32,
    #[prost(message, optional, tag = "2")]
    pub registered: ::core::option::Option<event::Registered>,
    #[prost(message, optional, tag = "3")]
    pub reregistered: ::core::option::Option<event::Reregistered>,
    #[prost(message, optional, tag = "4")]
    pub offers: ::core::option::Option<event::Offers>,
    #[prost(message, optional, tag = "5")]
    pub rescind: ::core::option::Option<event::Rescind>,
    #[prost(message, optional, tag = "6")]
    pub update: ::core::option::Option<event::Update>,
    #[prost(message, optional, tag = "7")]
    pub message: ::core::option::Option<event::Message>,
    #[prost(message, optional, tag = "8")]
    pub failure: ::core::option::Option<event::Failure>,
    #[prost(message, optional, tag = "9")]
    pub error: ::core::option::Option<event::Error>,
}

/// Nested message and enum types in `Event`.
pub mod event {
    use super::mesos;

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Registered {
        #[prost(message, required, tag = "1")]
        pub framework_id: mesos::FrameworkId,
        #[prost(message, optional, tag = "2")]
        pub master_info: ::core::option::Option<mesos::MasterInfo>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Reregistered {
        #[prost(message, required, tag = "1")]
        pub framework_id: mesos::FrameworkId,
        #[prost(message, optional, tag = "2")]
        pub master_info: ::core::option::Option<mesos::MasterInfo>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Offers {
        #[prost(message, repeated, tag = "1")]
        pub offers: ::prost::alloc::vec::Vec<mesos::Offer>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Rescind {
        #[prost(message, required, tag = "1")]
        pub offer_id: mesos::OfferId,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Update {
        #[prost(bytes = "vec", required, tag = "1")]
        pub uuid: ::prost::alloc::vec::Vec<u8>,
        #[prost(message, required, tag = "2")]
        pub status: mesos::TaskStatus,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Message {
        #[prost(message, required, tag = "1")]
        pub slave_id: mesos::SlaveId,
        #[prost(message, required, tag = "2")]
        pub executor_id: mesos::ExecutorId,
        #[prost(bytes = "vec", required, tag = "3")]
        pub data: ::prost::alloc::vec::Vec<u8>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Failure {
        #[prost(message, optional, tag = "1")]
        pub slave_id: ::core::option::Option<mesos::SlaveId>,
        #[prost(message, optional, tag = "2")]
        pub executor_id: ::core::option::Option<mesos::ExecutorId>,
        #[prost(int32, optional, tag = "3")]
        pub status: ::core::option::Option<i32>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Error {
        #[prost(string, required, tag = "1")]
        pub message: ::prost::alloc::string::String,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Type {
        Registered = 1,
        Reregistered = 2,
        Offers = 3,
        Rescind = 4,
        Update = 5,
        Message = 6,
        Failure = 7,
        Error = 8,
    }

    impl Type {
        /// The name of the value as it appears in the protobuf definition.
        pub fn as_str_name(&self) -> &'static str {
            match self {
                Type::Registered => "REGISTERED",
                Type::Reregistered => "REREGISTERED",
                Type::Offers => "OFFERS",
                Type::Rescind => "RESCIND",
                Type::Update => "UPDATE",
                Type::Message => "MESSAGE",
                Type::Failure => "FAILURE",
                Type::Error => "ERROR",
            }
        }
    }
}

/// A message sent from the framework to the master.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Call {
    #[prost(message, required, tag = "1")]
    pub framework_info: mesos::FrameworkInfo,
    #[prost(enumeration = "call::Type", required, tag = "2")]
    pub r#type: i32,
    #[prost(message, optional, tag = "5")]
    pub launch: ::core::option::Option<call::Launch>,
    #[prost(message, optional, tag = "7")]
    pub acknowledge: ::core::option::Option<call::Acknowledge>,
}

/// Nested message and enum types in `Call`.
pub mod call {
    use super::mesos;

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Launch {
        #[prost(message, repeated, tag = "1")]
        pub task_infos: ::prost::alloc::vec::Vec<mesos::TaskInfo>,
        #[prost(message, repeated, tag = "2")]
        pub offer_ids: ::prost::alloc::vec::Vec<mesos::OfferId>,
        #[prost(message, optional, tag = "3")]
        pub filters: ::core::option::Option<mesos::Filters>,
    }

    #[derive(Clone, PartialEq, ::prost::Message)]
    pub struct Acknowledge {
        #[prost(message, required, tag = "1")]
        pub slave_id: mesos::SlaveId,
        #[prost(message, required, tag = "2")]
        pub task_id: mesos::TaskId,
        #[prost(bytes = "vec", required, tag = "3")]
        pub uuid: ::prost::alloc::vec::Vec<u8>,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Type {
        Register = 1,
        Reregister = 2,
        Unregister = 3,
        Request = 4,
        Decline = 5,
        Revive = 6,
        Launch = 7,
        Kill = 8,
        Acknowledge = 9,
        Reconcile = 10,
        Message = 11,
    }

    impl Type {
        /// The name of the value as it appears in the protobuf definition.
        pub fn as_str_name(&self) -> &'static str {
            match self {
                Type::Register => "REGISTER",
                Type::Reregister => "REREGISTER",
                Type::Unregister => "UNREGISTER",
                Type::Request => "REQUEST",
                Type::Decline => "DECLINE",
                Type::Revive => "REVIVE",
                Type::Launch => "LAUNCH",
                Type::Kill => "KILL",
                Type::Acknowledge => "ACKNOWLEDGE",
                Type::Reconcile => "RECONCILE",
                Type::Message => "MESSAGE",
            }
        }
    }
}
