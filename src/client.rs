// ABOUTME: Typed reqwest client for the Box events API
// ABOUTME: Endpoint discovery, cursor initialization, long poll, and incremental event fetch
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Async-IO.org

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use tracing::debug;

use crate::config::AgentConfig;
use crate::constants::endpoints;
use crate::errors::{ApiError, ApiResult};
use crate::session::StreamPosition;

/// Discovery response: list of realtime server candidates
#[derive(Debug, Deserialize)]
struct RealtimeServerList {
    #[serde(default)]
    entries: Vec<RealtimeServer>,
}

/// One realtime server candidate from the discovery response
#[derive(Debug, Deserialize)]
struct RealtimeServer {
    url: String,
}

/// Events response carrying only the cursor
#[derive(Debug, Deserialize)]
struct StreamPositionBody {
    next_stream_position: Option<StreamPosition>,
}

/// Long poll response from the realtime server
#[derive(Debug, Deserialize)]
struct PollReply {
    message: Option<String>,
}

/// Incremental events response
#[derive(Debug, Deserialize)]
struct EventListBody {
    #[serde(default)]
    entries: Vec<EventRecord>,
    next_stream_position: Option<StreamPosition>,
}

/// A single change event, reported once and not retained
#[derive(Debug, Clone, Deserialize)]
pub struct EventRecord {
    pub event_type: String,
    pub event_id: String,
}

/// Result of one incremental fetch: events in server order plus the cursor
/// to resume from
#[derive(Debug)]
pub struct EventBatch {
    pub entries: Vec<EventRecord>,
    pub next_stream_position: StreamPosition,
}

/// Client for the four Box events API calls.
///
/// One outstanding request at a time; the watcher drives every call
/// sequentially, so this client holds no mutable state.
pub struct EventsClient {
    http: Client,
    events_url: String,
    token: String,
}

impl EventsClient {
    /// Create a client for the configured events endpoint.
    ///
    /// The underlying HTTP client sets a connect timeout but no overall
    /// request timeout: the realtime server holds the long poll open until an
    /// event occurs or its own timeout elapses, and a client-side deadline
    /// shorter than that hold would force spurious reconnects.
    #[must_use]
    pub fn new(config: &AgentConfig, token: String) -> Self {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout())
            .user_agent(format!("box-events-agent/{}", crate::constants::APP_VERSION))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            http,
            events_url: config.events_url.clone(),
            token,
        }
    }

    /// Discover the realtime URL to long-poll against.
    ///
    /// The discovery call lists one or more realtime servers; the first
    /// entry's URL wins, with no ranking applied.
    pub async fn resolve_poll_url(&self) -> ApiResult<String> {
        debug!("requesting realtime server list from {}", self.events_url);

        let response = self
            .send(self.authorized(Method::OPTIONS, &self.events_url), &self.events_url)
            .await?;

        let body: RealtimeServerList = Self::decode(response, &self.events_url).await?;

        let first = body
            .entries
            .into_iter()
            .next()
            .ok_or(ApiError::NoRealtimeServers)?;

        debug!("realtime server resolved: {}", first.url);
        Ok(first.url)
    }

    /// Fetch the current stream position without consuming any events
    pub async fn initial_stream_position(&self) -> ApiResult<StreamPosition> {
        debug!("requesting initial stream position from {}", self.events_url);

        let response = self
            .send(self.authorized(Method::GET, &self.events_url), &self.events_url)
            .await?;

        let body: StreamPositionBody = Self::decode(response, &self.events_url).await?;

        body.next_stream_position
            .ok_or(ApiError::MissingStreamPosition)
    }

    /// Issue one long poll against the realtime URL.
    ///
    /// Blocks for as long as the server holds the connection. Returns the
    /// response's `message` value, or `None` if the field was absent; the
    /// watcher decides what either means.
    pub async fn long_poll(&self, poll_url: &str) -> ApiResult<Option<String>> {
        debug!("long polling {poll_url}");

        let response = self
            .send(self.authorized(Method::GET, poll_url), poll_url)
            .await?;

        let body: PollReply = Self::decode(response, poll_url).await?;
        Ok(body.message)
    }

    /// Fetch the events that occurred after the given stream position
    pub async fn fetch_events(&self, position: &StreamPosition) -> ApiResult<EventBatch> {
        debug!("fetching events since stream position {position}");

        let request = self
            .authorized(Method::GET, &self.events_url)
            .query(&[(endpoints::STREAM_POSITION_PARAM, position.to_string())]);

        let response = self.send(request, &self.events_url).await?;
        let body: EventListBody = Self::decode(response, &self.events_url).await?;

        let next_stream_position = body
            .next_stream_position
            .ok_or(ApiError::MissingStreamPosition)?;

        Ok(EventBatch {
            entries: body.entries,
            next_stream_position,
        })
    }

    /// Build a request with the bearer auth header applied
    fn authorized(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.token))
    }

    /// Send a request, mapping connection failures and non-success statuses
    async fn send(&self, request: RequestBuilder, url: &str) -> ApiResult<Response> {
        let response = request.send().await.map_err(|source| ApiError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                url: url.to_string(),
                status,
            });
        }

        Ok(response)
    }

    /// Decode a JSON response body into the expected shape
    async fn decode<T>(response: Response, url: &str) -> ApiResult<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        response.json().await.map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
