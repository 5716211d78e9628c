use crate::driver::DriverCommand;
use crate::error::SchedulerError;
use crate::proto::scheduler;

/// A state of the driver.
/// Each state performs one unit of work when stepped, and then yields the next state.
#[derive(Debug)]
pub enum DriverState {
    /// Starts the inbound listener and waits until it is healthy.
    Init,
    /// Registers the framework with the master.
    Register,
    /// Waits for the next heartbeat tick, command, inbound event, or shutdown.
    Ready,
    /// Records the liveness of the driver.
    Heartbeat,
    /// Sends the call for a command from another worker and replies with the result.
    Command(DriverCommand),
    /// Validates an inbound event and routes it to the worker that consumes it.
    Dispatch(scheduler::Event),
    /// Records the error that stops the driver.
    Error(SchedulerError),
    /// Shuts down the transport and ends the run.
    Stop,
}

impl DriverState {
    pub fn name(&self) -> &'static str {
        match self {
            DriverState::Init => "init",
            DriverState::Register => "register",
            DriverState::Ready => "ready",
            DriverState::Heartbeat => "heartbeat",
            DriverState::Command(_) => "command",
            DriverState::Dispatch(_) => "dispatch",
            DriverState::Error(_) => "error",
            DriverState::Stop => "stop",
        }
    }
}
