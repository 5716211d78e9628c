mod call;
mod command;
mod dispatch;
mod machine;
mod options;
mod state;

pub use command::{DriverCommand, DriverHandle};
pub use dispatch::EventDispatcher;
pub use machine::{Driver, DriverChannels};
pub use options::DriverOptions;
pub use state::DriverState;
