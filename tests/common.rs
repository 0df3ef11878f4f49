// ABOUTME: Shared test utilities for the watcher integration tests
// ABOUTME: Quiet logging setup plus config/client builders pointed at a mock server
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Async-IO.org
#![allow(dead_code)]

use std::sync::Once;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use box_events_agent::client::EventsClient;
use box_events_agent::config::AgentConfig;
use box_events_agent::test_utils::RecordingReporter;
use box_events_agent::watcher::EventWatcher;

/// Bearer token used by every test, matching the mock auth header matchers
pub const TEST_TOKEN: &str = "abc";

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Config pointed at a test server
pub fn test_config(events_url: &str) -> AgentConfig {
    AgentConfig {
        events_url: events_url.to_string(),
        connect_timeout_secs: 5,
    }
}

/// Client pointed at a test server, authenticated with [`TEST_TOKEN`]
pub fn test_client(events_url: &str) -> EventsClient {
    init_test_logging();
    EventsClient::new(&test_config(events_url), TEST_TOKEN.to_string())
}

/// Initialize a watcher against `server`, with the poll URL resolving to
/// `{server}/poll` and the cursor starting at `start_position`.
///
/// The discovery and cursor-init mocks are scoped to this call, so the
/// caller's own mocks never race against them.
pub async fn initialized_watcher(
    server: &MockServer,
    start_position: u64,
) -> (EventWatcher<RecordingReporter>, RecordingReporter) {
    let reporter = RecordingReporter::new();

    let watcher = {
        let _discovery = Mock::given(method("OPTIONS"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "entries": [ { "url": format!("{}/poll", server.uri()) } ]
            })))
            .mount_as_scoped(server)
            .await;

        let _cursor = Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "next_stream_position": start_position
            })))
            .mount_as_scoped(server)
            .await;

        EventWatcher::initialize(test_client(&server.uri()), reporter.clone())
            .await
            .expect("watcher initialization should succeed")
    };

    (watcher, reporter)
}
