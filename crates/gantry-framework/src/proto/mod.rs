//! Protobuf messages of the master's scheduler protocol.
//! The messages are maintained by hand in the same shape that `prost-build`
//! generates, so that building the crate does not require `protoc`.

#[allow(clippy::all)]
pub mod mesos;
#[allow(clippy::all)]
pub mod scheduler;
