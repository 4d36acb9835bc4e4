// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! HTTP Relay Endpoints
//!
//! - `GET /healthz` liveness check
//! - `POST /notify` and `POST /log` forward a message to the sink
//!
//! Other methods on the notify paths get `405` with an empty body.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use crate::message::NotifyRequest;
use crate::sink::NotificationSink;

/// Shared state for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub sink: Arc<dyn NotificationSink>,
}

/// Creates the relay router.
pub fn create_router(state: HttpState) -> Router {
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/notify", post(notify_handler))
        .route("/log", post(notify_handler))
        .with_state(state)
}

/// Health check endpoint - always returns 200 if server is running.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Logs the posted message. Undecodable bodies are logged as empty.
async fn notify_handler(State(state): State<HttpState>, body: Bytes) -> impl IntoResponse {
    let request = NotifyRequest::decode(&body);
    state.sink.info(&request.log_line());
    (StatusCode::OK, "logged")
}
