mod builder;
mod monitor;
mod retry;

pub use builder::ServerBuilder;
pub use monitor::ServerMonitor;
pub use retry::RetryStrategy;
