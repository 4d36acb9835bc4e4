// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Relay Integration Tests
//!
//! Real loopback relay, real HTTP client.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use logging_ipc_client::{ClientError, NotifyClient};
use logging_ipc_relay::{MemorySink, RelayAddress, RelayState, SinkLevel};

async fn start_relay() -> (SocketAddr, Arc<MemorySink>) {
    let state = RelayState::new();
    let sink = Arc::new(MemorySink::new());
    let addr = state
        .ensure_started(&RelayAddress::loopback(0), sink.clone())
        .await
        .expect("relay should bind");
    // The server task lives on; the state only guards the start.
    (addr, sink)
}

async fn send(endpoint: String, message: &'static str) -> Result<(), ClientError> {
    tokio::task::spawn_blocking(move || {
        NotifyClient::with_timeout(Duration::from_secs(3))?.send(&endpoint, message)
    })
    .await
    .unwrap()
}

fn relayed(sink: &MemorySink) -> Vec<String> {
    sink.messages(SinkLevel::Info)
        .into_iter()
        .filter(|m| m.starts_with("Desktop shortcut invoked"))
        .collect()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_client_message_reaches_sink() {
    let (addr, sink) = start_relay().await;

    send(format!("http://{}/log", addr), "  deploy finished  ")
        .await
        .unwrap();

    assert_eq!(
        relayed(&sink),
        vec!["Desktop shortcut invoked: deploy finished".to_string()]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_blank_client_message_logs_placeholder() {
    let (addr, sink) = start_relay().await;

    send(format!("http://{}/notify", addr), "   ").await.unwrap();

    assert_eq!(
        relayed(&sink),
        vec!["Desktop shortcut invoked: (empty message)".to_string()]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_path_surfaces_status() {
    let (addr, sink) = start_relay().await;

    let err = send(format!("http://{}/missing", addr), "x")
        .await
        .unwrap_err();

    assert_eq!(err.status().map(|s| s.as_u16()), Some(404));
    assert!(relayed(&sink).is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_posts_are_all_logged() {
    let (addr, sink) = start_relay().await;
    let endpoint = format!("http://{}/log", addr);

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let endpoint = endpoint.clone();
            tokio::spawn(send(endpoint, "ping"))
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(relayed(&sink).len(), 10);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_healthz_over_the_wire() {
    let (addr, _sink) = start_relay().await;

    let (status, body) = tokio::task::spawn_blocking(move || {
        let response = reqwest::blocking::get(format!("http://{}/healthz", addr)).unwrap();
        (response.status(), response.text().unwrap())
    })
    .await
    .unwrap();

    assert_eq!(status, reqwest::StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_wrong_method_on_log_is_rejected() {
    let (addr, sink) = start_relay().await;
    let url = format!("http://{}/log", addr);

    let responses = tokio::task::spawn_blocking(move || {
        let client = reqwest::blocking::Client::new();
        [client.get(&url), client.put(&url).body(r#"{"msg":"x"}"#)]
            .map(|request| {
                let response = request.send().unwrap();
                (response.status(), response.text().unwrap())
            })
    })
    .await
    .unwrap();

    for (status, body) in responses {
        assert_eq!(status, reqwest::StatusCode::METHOD_NOT_ALLOWED);
        assert!(body.is_empty(), "body: {body:?}");
    }
    assert!(relayed(&sink).is_empty());
}
