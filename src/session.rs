// ABOUTME: Polling session state: resolved realtime URL and current stream cursor
// ABOUTME: The cursor is opaque and only ever advanced by a successful event fetch
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Async-IO.org

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Opaque stream cursor issued by the events API.
///
/// Box serves `next_stream_position` as either a JSON number or a string, so
/// the token is kept in whichever form the server chose and only rendered
/// back out when building the next request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamPosition {
    /// Numeric cursor, the common case
    Number(u64),
    /// String cursor, e.g. `"now"`
    Text(String),
}

impl fmt::Display for StreamPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(position) => write!(f, "{position}"),
            Self::Text(position) => f.write_str(position),
        }
    }
}

impl From<u64> for StreamPosition {
    fn from(position: u64) -> Self {
        Self::Number(position)
    }
}

impl From<&str> for StreamPosition {
    fn from(position: &str) -> Self {
        Self::Text(position.to_string())
    }
}

/// State owned by one polling session, from initialization to process exit.
///
/// The poll URL is resolved once and reused for the whole session, including
/// after `reconnect` signals. The stream position never moves backwards.
#[derive(Debug, Clone)]
pub struct Session {
    poll_url: String,
    stream_position: StreamPosition,
}

impl Session {
    /// Create a session from a resolved poll URL and the initial cursor
    #[must_use]
    pub const fn new(poll_url: String, stream_position: StreamPosition) -> Self {
        Self {
            poll_url,
            stream_position,
        }
    }

    /// The realtime URL this session long-polls against
    #[must_use]
    pub fn poll_url(&self) -> &str {
        &self.poll_url
    }

    /// The cursor the next event fetch will start from
    #[must_use]
    pub const fn stream_position(&self) -> &StreamPosition {
        &self.stream_position
    }

    /// Replace the cursor with the one a successful fetch returned
    pub fn advance(&mut self, next: StreamPosition) {
        debug!("stream position advanced to {next}");
        self.stream_position = next;
    }
}
