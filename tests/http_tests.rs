// Integration tests for the HTTP API
//
// Requests go straight to the router with `oneshot`; no socket is bound.

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;
use voicelink::{create_router, AppState, ChannelMessageSink};

const CONNECT: [&str; 3] = [
    r#"{"type":"transportStateChanged","data":"initializing"}"#,
    r#"{"type":"transportStateChanged","data":"connecting"}"#,
    r#"{"type":"transportStateChanged","data":"ready"}"#,
];

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<&str>,
) -> Result<(StatusCode, Value)> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(match body {
            Some(body) => Body::from(body.to_string()),
            None => Body::empty(),
        })?;

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    Ok((status, json))
}

#[tokio::test]
async fn test_health() -> Result<()> {
    let app = create_router(AppState::default());
    let (status, _) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn test_ingest_builds_transcript() -> Result<()> {
    let app = create_router(AppState::default());

    for body in CONNECT.into_iter().chain([
        r#"{"type":"userTranscript","data":{"text":"hi","final":false}}"#,
        r#"{"type":"userTranscript","data":{"text":"hi bot","final":true}}"#,
        r#"{"type":"botTtsText","data":{"text":"Hello!"}}"#,
    ]) {
        let (status, json) = send(&app, "POST", "/session/events", Some(body)).await?;
        assert_eq!(status, StatusCode::ACCEPTED);
        assert_eq!(json["delivered"], 1);
    }

    let (status, transcript) = send(&app, "GET", "/session/transcript", None).await?;
    assert_eq!(status, StatusCode::OK);
    let messages = transcript.as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["speaker"], "user");
    assert_eq!(messages[0]["text"], "hi bot");
    assert_eq!(messages[1]["prefix"], "BOT <");
    assert_eq!(messages[1]["pending"], true);

    let (_, status_json) = send(&app, "GET", "/session/status", None).await?;
    assert_eq!(status_json["transport_state"], "ready");
    assert_eq!(status_json["status"], "connected");
    assert_eq!(status_json["message_count"], 2);
    Ok(())
}

#[tokio::test]
async fn test_invalid_event_is_rejected() -> Result<()> {
    let app = create_router(AppState::default());
    let (status, json) = send(&app, "POST", "/session/events", Some("{not json")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
    Ok(())
}

#[tokio::test]
async fn test_toggle_and_reset() -> Result<()> {
    let app = create_router(AppState::default());
    for _ in 0..3 {
        send(&app, "POST", "/session/events", Some(r#"{"type":"botReady","data":{}}"#)).await?;
    }

    let (_, groups) = send(&app, "GET", "/session/events", None).await?;
    let group = &groups.as_array().unwrap()[0];
    assert_eq!(group["count"], 3);
    assert_eq!(group["expanded"], false);
    let id = group["id"].as_str().unwrap().to_string();

    let (status, toggled) =
        send(&app, "POST", &format!("/session/events/{}/toggle", id), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(toggled["expanded"], true);

    let (_, groups) = send(&app, "GET", "/session/events", None).await?;
    assert_eq!(groups[0]["entries"].as_array().unwrap().len(), 3);

    let (status, _) = send(&app, "POST", "/session/reset", None).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) =
        send(&app, "POST", &format!("/session/events/{}/toggle", id), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, groups) = send(&app, "GET", "/session/events", None).await?;
    assert!(groups.as_array().unwrap().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_send_message_reaches_sink_trimmed() -> Result<()> {
    let (sink, mut outbound) = ChannelMessageSink::new(8);
    let app = create_router(AppState::default().with_outbound(Arc::new(sink)));
    for body in CONNECT {
        send(&app, "POST", "/session/events", Some(body)).await?;
    }

    let (status, json) = send(
        &app,
        "POST",
        "/session/messages",
        Some(r#"{"text":"  turn the lights off  "}"#),
    )
    .await?;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(json["type"], "custom-message");
    assert_eq!(json["text"], "turn the lights off");
    assert_eq!(json["sink"], "channel");

    let message = outbound.recv().await.unwrap();
    assert_eq!(message.event_type, "custom-message");
    assert_eq!(message.data["text"], "turn the lights off");
    Ok(())
}

#[tokio::test]
async fn test_send_message_rejects_blank_text() -> Result<()> {
    let (sink, mut outbound) = ChannelMessageSink::new(8);
    let app = create_router(AppState::default().with_outbound(Arc::new(sink)));
    for body in CONNECT {
        send(&app, "POST", "/session/events", Some(body)).await?;
    }

    let (status, json) =
        send(&app, "POST", "/session/messages", Some(r#"{"text":" \n\t "}"#)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].is_string());
    assert!(outbound.try_recv().is_err());
    Ok(())
}

#[tokio::test]
async fn test_send_message_requires_ready_transport() -> Result<()> {
    let (sink, mut outbound) = ChannelMessageSink::new(8);
    let app = create_router(AppState::default().with_outbound(Arc::new(sink)));

    let body = Some(r#"{"text":"hello?"}"#);
    let (status, _) = send(&app, "POST", "/session/messages", body).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    // Still connecting
    for event in &CONNECT[..2] {
        send(&app, "POST", "/session/events", Some(*event)).await?;
    }
    let (status, _) = send(&app, "POST", "/session/messages", body).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    assert!(outbound.try_recv().is_err());
    Ok(())
}

#[tokio::test]
async fn test_send_message_without_outbound_link() -> Result<()> {
    let app = create_router(AppState::default());
    for body in CONNECT {
        send(&app, "POST", "/session/events", Some(body)).await?;
    }

    let (status, _) =
        send(&app, "POST", "/session/messages", Some(r#"{"text":"hello"}"#)).await?;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    Ok(())
}

#[tokio::test]
async fn test_send_message_with_closed_sink() -> Result<()> {
    let (sink, outbound) = ChannelMessageSink::new(1);
    drop(outbound);
    let app = create_router(AppState::default().with_outbound(Arc::new(sink)));
    for body in CONNECT {
        send(&app, "POST", "/session/events", Some(body)).await?;
    }

    let (status, json) =
        send(&app, "POST", "/session/messages", Some(r#"{"text":"hello"}"#)).await?;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["error"].is_string());
    Ok(())
}
