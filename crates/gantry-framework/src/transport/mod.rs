mod http;
mod server;

use async_trait::async_trait;
pub use http::{HttpTransport, HttpTransportOptions};
pub use server::EventServer;
use tokio::sync::mpsc;

use crate::error::SchedulerResult;
use crate::proto::scheduler;

/// A message received from the master, or the reason it could not be decoded.
pub type InboundEvent = SchedulerResult<scheduler::Event>;

/// The connection between the driver and the master.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Starts receiving inbound messages in the background.
    /// Events are queued to the given channel in receipt order.
    /// A message that cannot be decoded is queued as an error.
    async fn listen(&mut self, events: mpsc::Sender<InboundEvent>) -> SchedulerResult<()>;

    /// Succeeds once the inbound listener is serving requests.
    async fn check_health(&self) -> SchedulerResult<()>;

    async fn send(&self, call: scheduler::Call) -> SchedulerResult<()>;

    /// Stops the inbound listener.
    async fn shutdown(&mut self) -> SchedulerResult<()>;
}
