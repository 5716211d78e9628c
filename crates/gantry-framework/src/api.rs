//! The HTTP API for submitting and inspecting tasks.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::error;
use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;
use crate::id::TaskId;
use crate::task::{Task, TaskSubmitter};

pub fn router(submitter: Arc<TaskSubmitter>) -> Router {
    Router::new()
        .route("/tasks", get(list_tasks).post(submit_task))
        .route("/tasks/{id}", get(get_task))
        .with_state(submitter)
}

#[derive(Debug, Deserialize)]
pub struct SubmitTaskRequest {
    pub command: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitTaskResponse {
    pub id: TaskId,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

struct ApiError(SchedulerError);

impl From<SchedulerError> for ApiError {
    fn from(error: SchedulerError) -> Self {
        Self(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SchedulerError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            SchedulerError::TaskNotFound(_) => StatusCode::NOT_FOUND,
            e => {
                error!("api: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let body = ErrorResponse {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

async fn submit_task(
    State(submitter): State<Arc<TaskSubmitter>>,
    Json(request): Json<SubmitTaskRequest>,
) -> Result<(StatusCode, Json<SubmitTaskResponse>), ApiError> {
    let id = submitter.submit(request.command)?;
    Ok((StatusCode::CREATED, Json(SubmitTaskResponse { id })))
}

async fn list_tasks(
    State(submitter): State<Arc<TaskSubmitter>>,
) -> Result<Json<Vec<Task>>, ApiError> {
    Ok(Json(submitter.store().list()?))
}

async fn get_task(
    State(submitter): State<Arc<TaskSubmitter>>,
    Path(id): Path<String>,
) -> Result<Json<Task>, ApiError> {
    Ok(Json(submitter.store().get(&TaskId::from(id))?))
}
