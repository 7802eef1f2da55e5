use super::state::AppState;
use crate::events::{TransportState, WireEvent};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct IngestResponse {
    #[serde(rename = "type")]
    pub event_type: String,
    pub delivered: usize,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub group_id: Uuid,
    pub expanded: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    #[serde(rename = "type")]
    pub message_type: String,
    pub text: String,
    pub sink: String,
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub text: String,
}

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /session/status
/// Connection status, failure message and counters
pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.session.stats()))
}

/// GET /session/transcript
/// Rendered conversation so far
pub async fn get_transcript(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.session.transcript()))
}

/// GET /session/events
/// Grouped event log
pub async fn get_events(State(state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.session.event_groups()))
}

/// POST /session/events
/// Publish one wire event on the bus
pub async fn ingest_event(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let wire = match WireEvent::from_slice(&body) {
        Ok(wire) => wire,
        Err(e) => {
            warn!("Rejected event: {:#}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("{:#}", e),
                }),
            )
                .into_response();
        }
    };

    let event = wire.into_event();
    let delivered = state.bus.publish(&event);
    debug!("Ingested {} ({} handlers)", event.type_name(), delivered);

    (
        StatusCode::ACCEPTED,
        Json(IngestResponse {
            event_type: event.type_name().to_string(),
            delivered,
        }),
    )
        .into_response()
}

/// POST /session/events/:group_id/toggle
/// Expand or collapse an event group
pub async fn toggle_group(
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.session.toggle_group(group_id) {
        Some(expanded) => (
            StatusCode::OK,
            Json(ToggleResponse { group_id, expanded }),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: format!("Event group {} not found", group_id),
            }),
        )
            .into_response(),
    }
}

/// POST /session/messages
/// Send typed text to the bot as a `custom-message`
pub async fn send_message(
    State(state): State<AppState>,
    Json(request): Json<SendMessageRequest>,
) -> Response {
    let text = request.text.trim();
    if text.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Message text is empty");
    }

    let transport = state.session.stats().transport_state;
    if transport != TransportState::Ready {
        let error = format!("Transport is {}, not ready", transport);
        return error_response(StatusCode::CONFLICT, error);
    }

    let sink = match state.outbound.as_ref() {
        Some(sink) => sink,
        None => {
            return error_response(StatusCode::SERVICE_UNAVAILABLE, "No outbound link to the bot")
        }
    };

    let message = WireEvent::custom_message(text);
    let message_type = message.event_type.clone();
    if let Err(e) = sink.send(message).await {
        warn!("Failed to send message via {}: {:#}", sink.name(), e);
        return error_response(StatusCode::BAD_GATEWAY, format!("{:#}", e));
    }

    info!("Sent {} via {} ({} chars)", message_type, sink.name(), text.chars().count());
    (
        StatusCode::ACCEPTED,
        Json(SendMessageResponse {
            message_type,
            text: text.to_string(),
            sink: sink.name().to_string(),
        }),
    )
        .into_response()
}

/// POST /session/reset
/// Clear transcript and event log
pub async fn reset_session(State(state): State<AppState>) -> impl IntoResponse {
    state.session.reset();
    StatusCode::NO_CONTENT
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
