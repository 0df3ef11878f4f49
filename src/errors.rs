// ABOUTME: Error types for the Box events API surface
// ABOUTME: One ApiError enum shared by all four HTTP operations
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Async-IO.org

//! # Error Handling
//!
//! All four HTTP operations (endpoint discovery, cursor initialization, long
//! poll, event fetch) fail with the same [`ApiError`]. Whether a given
//! failure is fatal is not decided here: the watcher treats a poll-body
//! [`ApiError::Decode`] as a recoverable payload anomaly and every event-fetch
//! error as recoverable, while discovery, cursor-init, and poll transport
//! failures propagate to the driver, which sets the exit status. The library
//! never terminates the process itself.

use reqwest::StatusCode;
use thiserror::Error;

/// Result alias for Box events API operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure modes of the Box events API calls
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (connect failure, broken pipe)
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    /// The response body could not be decoded into the expected shape
    #[error("could not decode response from {url}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Discovery succeeded but listed no realtime servers
    #[error("discovery response contained no realtime server entries")]
    NoRealtimeServers,

    /// An events response was missing its `next_stream_position` field
    #[error("events response did not include a next stream position")]
    MissingStreamPosition,
}

impl ApiError {
    /// Whether this error is a payload problem rather than a transport or
    /// protocol one. The poll loop survives payload anomalies.
    #[must_use]
    pub fn is_payload_anomaly(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. } | Self::MissingStreamPosition | Self::NoRealtimeServers
        )
    }
}
