use std::sync::PoisonError;

use gantry_common::error::CommonError;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinError;

use crate::id::TaskId;

pub type SchedulerResult<T> = Result<T, SchedulerError>;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    #[error("invalid transition for task {task_id}: {from} -> {to}")]
    InvalidTransition {
        task_id: TaskId,
        from: crate::task::TaskState,
        to: crate::task::TaskState,
    },
    #[error("protocol error: {0}")]
    ProtocolError(String),
    #[error("error decoding message: {0}")]
    DecodeError(#[from] prost::DecodeError),
    #[error("transport error: {0}")]
    TransportError(String),
    #[error("error in HTTP client: {0}")]
    HttpClientError(#[from] reqwest::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("server error: {0}")]
    ServerError(#[from] CommonError),
    #[error("channel closed: {0}")]
    ChannelClosed(String),
    #[error("internal error: {0}")]
    InternalError(String),
}

impl SchedulerError {
    pub fn invalid(message: impl Into<String>) -> Self {
        SchedulerError::InvalidArgument(message.into())
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        SchedulerError::ProtocolError(message.into())
    }

    pub fn transport(message: impl Into<String>) -> Self {
        SchedulerError::TransportError(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        SchedulerError::InternalError(message.into())
    }
}

impl From<JoinError> for SchedulerError {
    fn from(error: JoinError) -> Self {
        SchedulerError::InternalError(error.to_string())
    }
}

impl<T> From<PoisonError<T>> for SchedulerError {
    fn from(error: PoisonError<T>) -> Self {
        SchedulerError::InternalError(error.to_string())
    }
}

impl<T> From<mpsc::error::SendError<T>> for SchedulerError {
    fn from(error: mpsc::error::SendError<T>) -> Self {
        SchedulerError::ChannelClosed(error.to_string())
    }
}

impl From<oneshot::error::RecvError> for SchedulerError {
    fn from(error: oneshot::error::RecvError) -> Self {
        SchedulerError::ChannelClosed(error.to_string())
    }
}
