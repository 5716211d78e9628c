use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use log::{debug, error, warn};
use tokio::sync::mpsc;

use crate::codec;
use crate::transport::InboundEvent;

#[derive(Clone)]
struct EventServerState {
    events: mpsc::Sender<InboundEvent>,
}

/// The HTTP surface that receives messages addressed to the framework process.
/// A body that cannot be decoded is rejected, and the decoding error is
/// forwarded to the driver since the master connection can no longer be trusted.
pub struct EventServer {
    process_name: String,
    events: mpsc::Sender<InboundEvent>,
}

impl EventServer {
    pub fn new(process_name: impl Into<String>, events: mpsc::Sender<InboundEvent>) -> Self {
        Self {
            process_name: process_name.into(),
            events,
        }
    }

    pub fn into_router(self) -> Router {
        Router::new()
            .route(
                &format!("/{}/{{message}}", self.process_name),
                post(handle_message),
            )
            .with_state(EventServerState {
                events: self.events,
            })
    }
}

async fn handle_message(
    State(state): State<EventServerState>,
    Path(message): Path<String>,
    body: Bytes,
) -> StatusCode {
    if message != codec::EVENT_MESSAGE_NAME {
        warn!("ignoring unsupported message: {message}");
        return StatusCode::NOT_FOUND;
    }
    let event = codec::decode_event(&message, &body);
    let status = match &event {
        Ok(event) => {
            debug!("received event of type {}", event.r#type);
            StatusCode::ACCEPTED
        }
        Err(e) => {
            error!("failed to decode inbound message: {e}");
            StatusCode::BAD_REQUEST
        }
    };
    match state.events.send(event).await {
        Ok(()) => status,
        Err(_) => {
            warn!("dropping inbound message since the driver has stopped");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
