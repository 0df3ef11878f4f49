// ABOUTME: Application-wide constants for the Box events watcher
// ABOUTME: Endpoint defaults, realtime message values, and user-facing error strings
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Async-IO.org

//! # Constants Module
//!
//! Fixed protocol values and the human-facing strings the agent prints.

/// Application name shown in the startup banner
pub const APP_NAME: &str = "Box Events Agent";

/// Agent version from Cargo.toml
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Endpoint defaults
pub mod endpoints {
    /// Base URL of the Box events API, overridable via `BOX_EVENTS_URL`
    pub const DEFAULT_EVENTS_URL: &str = "https://api.box.com/2.0/events";

    /// Query parameter carrying the stream cursor on incremental fetches
    pub const STREAM_POSITION_PARAM: &str = "stream_position";
}

/// Message values the realtime server is known to send
pub mod messages {
    /// At least one change occurred since the current stream position
    pub const NEW_CHANGE: &str = "new_change";

    /// The server timed the poll out and wants a fresh connection
    pub const RECONNECT: &str = "reconnect";
}

/// User-facing error strings
pub mod errors {
    /// Endpoint discovery produced no usable realtime URL
    pub const POLL_URL_UNAVAILABLE: &str = "Unable to retrieve the long polling URL";

    /// Initial cursor request did not yield a stream position
    pub const STREAM_POSITION_UNAVAILABLE: &str =
        "Unable to determine current event stream position";

    /// Incremental event fetch failed or came back empty
    pub const EVENT_LIST_UNAVAILABLE: &str = "Unable to retrieve event list";

    /// The long poll request itself failed at the transport level
    pub const POLL_FAILED: &str = "Unable to invoke long polling";

    /// The realtime server answered with an unusable payload
    pub const INVALID_REALTIME_RESPONSE: &str = "Invalid response from Box Realtime Server";

    /// Printed when the bearer token argument is missing
    pub const MISSING_TOKEN: &str =
        "You must pass the Box API developer token on the command line to this process";
}
