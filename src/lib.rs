// ABOUTME: Library entry point for the Box events watcher agent
// ABOUTME: Long-polling protocol client: discovery, cursor tracking, poll cycle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Box Events Agent
//!
//! A client for the Box events API's long-polling protocol. The agent
//! discovers a realtime endpoint, establishes an initial stream position,
//! then loops: wait on the long poll, interpret the server's signal, fetch
//! the incremental event list, advance the cursor.
//!
//! ## Architecture
//!
//! - **[`client`]**: typed reqwest surface for the four HTTP calls
//! - **[`session`]**: the resolved poll URL and the opaque stream cursor
//! - **[`watcher`]**: the wait → dispatch → fetch state machine
//! - **[`reporter`]**: collaborator that renders output for a human
//! - **[`config`]**: environment-based configuration
//!
//! ## Example
//!
//! ```rust,no_run
//! use box_events_agent::client::EventsClient;
//! use box_events_agent::config::AgentConfig;
//! use box_events_agent::reporter::ConsoleReporter;
//! use box_events_agent::watcher::EventWatcher;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AgentConfig::load()?;
//! let client = EventsClient::new(&config, "dev_token".to_string());
//! let mut watcher = EventWatcher::initialize(client, ConsoleReporter).await?;
//! watcher.run().await?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod errors;
pub mod reporter;
pub mod session;
pub mod test_utils;
pub mod watcher;
