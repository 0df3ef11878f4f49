// ABOUTME: Configuration management for the Box events watcher agent
// ABOUTME: Environment variables with defaults, validated at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

use anyhow::{Context, Result};
use std::time::Duration;

use crate::constants::endpoints;

/// Agent configuration
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Box events API base URL
    pub events_url: String,

    /// TCP connect timeout for every request, in seconds
    pub connect_timeout_secs: u64,
}

impl AgentConfig {
    /// Load configuration from environment variables and defaults
    pub fn load() -> Result<Self> {
        let config = Self {
            events_url: std::env::var("BOX_EVENTS_URL")
                .unwrap_or_else(|_| endpoints::DEFAULT_EVENTS_URL.to_string()),

            connect_timeout_secs: std::env::var("BOX_CONNECT_TIMEOUT_SECS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("BOX_CONNECT_TIMEOUT_SECS must be a valid number")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !self.events_url.starts_with("http://") && !self.events_url.starts_with("https://") {
            anyhow::bail!("Events URL must be an http(s) URL: {}", self.events_url);
        }

        if self.connect_timeout_secs == 0 {
            anyhow::bail!("Connect timeout must be greater than 0");
        }

        Ok(())
    }

    /// Get the connect timeout as a Duration
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            events_url: endpoints::DEFAULT_EVENTS_URL.to_string(),
            connect_timeout_secs: 10,
        }
    }
}
