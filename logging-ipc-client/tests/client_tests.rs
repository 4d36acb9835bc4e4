// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Client tests against a local axum server.

use std::net::{SocketAddr, TcpListener as StdTcpListener};
use std::time::{Duration, Instant};

use axum::{
    body::Bytes,
    http::StatusCode,
    routing::post,
    Router,
};
use logging_ipc_client::{ClientError, NotifyClient};
use tokio::sync::mpsc;

/// Starts a server with fixed-response routes. Bodies posted to `/ok` are
/// forwarded to the returned receiver.
async fn start_server() -> (SocketAddr, mpsc::UnboundedReceiver<Bytes>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let app = Router::new()
        .route(
            "/ok",
            post(move |body: Bytes| {
                let tx = tx.clone();
                async move {
                    let _ = tx.send(body);
                    StatusCode::NO_CONTENT
                }
            }),
        )
        .route(
            "/boom",
            post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/silent", post(|| async { StatusCode::SERVICE_UNAVAILABLE }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, rx)
}

/// Runs a blocking send off the async runtime.
async fn send_blocking(url: String, message: &'static str) -> Result<(), ClientError> {
    tokio::task::spawn_blocking(move || NotifyClient::new()?.send(&url, message))
        .await
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_2xx_is_success_and_body_is_msg_json() {
    let (addr, mut rx) = start_server().await;

    send_blocking(format!("http://{}/ok", addr), "hello from tray")
        .await
        .unwrap();

    let body = rx.recv().await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, serde_json::json!({"msg": "hello from tray"}));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_500_error_includes_status_and_body() {
    let (addr, _rx) = start_server().await;

    let err = send_blocking(format!("http://{}/boom", addr), "x")
        .await
        .unwrap_err();

    assert!(!err.is_transport());
    assert_eq!(err.status(), Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
    let text = err.to_string();
    assert!(text.contains("500"), "{text}");
    assert!(text.contains("boom"), "{text}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_error_body_falls_back_to_status() {
    let (addr, _rx) = start_server().await;

    let err = send_blocking(format!("http://{}/silent", addr), "x")
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "server returned 503 Service Unavailable");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_path_is_status_error() {
    let (addr, _rx) = start_server().await;

    let err = send_blocking(format!("http://{}/missing", addr), "x")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(reqwest::StatusCode::NOT_FOUND));
}

#[test]
fn test_unreachable_endpoint_is_transport_error() {
    // Reserve a port, then free it so nothing listens there.
    let port = StdTcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();

    let client = NotifyClient::with_timeout(Duration::from_secs(2)).unwrap();
    let started = Instant::now();
    let err = client
        .send(&format!("http://127.0.0.1:{}/log", port), "x")
        .unwrap_err();

    assert!(err.is_transport());
    assert!(err.status().is_none());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn test_silent_server_times_out() {
    // Accepts connections into the backlog but never answers.
    let listener = StdTcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let client = NotifyClient::with_timeout(Duration::from_millis(300)).unwrap();
    let started = Instant::now();
    let err = client
        .send(&format!("http://{}/log", addr), "x")
        .unwrap_err();

    assert!(err.is_transport());
    assert!(err.is_timeout());
    assert!(started.elapsed() < Duration::from_secs(3));
    drop(listener);
}

#[test]
fn test_invalid_endpoint_is_transport_error() {
    let client = NotifyClient::new().unwrap();
    let err = client.send("not a url", "x").unwrap_err();
    assert!(err.is_transport());
}
