pub mod ack;
pub mod api;
pub mod codec;
pub mod driver;
pub mod entrypoint;
pub mod error;
pub mod event;
pub mod id;
pub mod proto;
pub mod scheduling;
pub mod shutdown;
pub mod task;
pub mod transport;
