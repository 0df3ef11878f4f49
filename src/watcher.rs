// ABOUTME: Poll-cycle state machine for the Box realtime protocol
// ABOUTME: Wait on the long poll, dispatch the signal, fetch events, advance the cursor
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Async-IO.org

//! # Event Watcher
//!
//! One watcher owns the [`EventsClient`], the [`Session`], and a
//! [`Reporter`], and drives the protocol sequentially: endpoint discovery,
//! cursor initialization, then the wait → dispatch → fetch cycle forever.
//! Payload anomalies (missing or unrecognized `message`, any event-fetch
//! failure) are reported and the loop continues; transport failures on the
//! long poll itself propagate to the caller as fatal.

use tokio::sync::watch;
use tracing::{info, warn};

use crate::client::EventsClient;
use crate::constants::{errors, messages};
use crate::errors::{ApiError, ApiResult};
use crate::reporter::Reporter;
use crate::session::Session;

/// Signal carried by one long poll response
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollSignal {
    /// Changes occurred since the current stream position
    NewChange,
    /// Re-issue the long poll against the same URL
    Reconnect,
    /// A message value this client does not recognize
    Unknown(String),
}

impl PollSignal {
    /// Map a wire `message` value to a signal
    #[must_use]
    pub fn from_message(message: &str) -> Self {
        match message {
            messages::NEW_CHANGE => Self::NewChange,
            messages::RECONNECT => Self::Reconnect,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// What one poll cycle did, for tests and observability
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// A change signal arrived, events were fetched, and the cursor advanced
    Changed { events_reported: usize },
    /// A change signal arrived but the fetch failed; the cursor is unchanged
    ChangeFetchFailed,
    /// The server asked for a fresh poll against the same URL
    Reconnect,
    /// The poll payload was missing or unrecognized; the loop continues
    Anomaly,
}

/// The long-poll state machine
pub struct EventWatcher<R: Reporter> {
    client: EventsClient,
    reporter: R,
    session: Session,
}

impl<R: Reporter> EventWatcher<R> {
    /// Resolve the realtime endpoint and the initial stream position.
    ///
    /// Both steps are fatal on failure: the error is reported once through
    /// the [`Reporter`] and propagated for the driver to act on. No poll is
    /// issued until both succeed.
    pub async fn initialize(client: EventsClient, reporter: R) -> ApiResult<Self> {
        let poll_url = match client.resolve_poll_url().await {
            Ok(url) => url,
            Err(err) => {
                reporter.error(errors::POLL_URL_UNAVAILABLE);
                return Err(err);
            }
        };
        reporter.info("Realtime URL", &poll_url);

        let stream_position = match client.initial_stream_position().await {
            Ok(position) => position,
            Err(err) => {
                reporter.error(errors::STREAM_POSITION_UNAVAILABLE);
                return Err(err);
            }
        };
        reporter.info("Stream position", &stream_position.to_string());

        Ok(Self {
            client,
            reporter,
            session: Session::new(poll_url, stream_position),
        })
    }

    /// The session state, for inspection
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Run the poll cycle until a fatal error occurs.
    ///
    /// There is no normal termination: the loop only ends when a poll
    /// transport failure propagates or the process is killed externally.
    pub async fn run(&mut self) -> ApiResult<()> {
        loop {
            self.step().await?;
        }
    }

    /// Run the poll cycle until a fatal error or a shutdown signal.
    ///
    /// A pending long poll is abandoned as soon as the signal flips; the
    /// production driver uses [`run`](Self::run) instead and relies on
    /// process termination.
    pub async fn run_until_shutdown(
        &mut self,
        mut shutdown: watch::Receiver<bool>,
    ) -> ApiResult<()> {
        while !*shutdown.borrow() {
            tokio::select! {
                outcome = self.step() => {
                    outcome?;
                }
                changed = shutdown.changed() => {
                    // Sender dropped: nobody can signal us anymore, stop.
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
        info!("shutdown requested, poll loop stopped");
        Ok(())
    }

    /// Perform one wait → dispatch transition.
    ///
    /// The returned error is always fatal; recoverable conditions surface as
    /// [`PollOutcome::Anomaly`] or [`PollOutcome::ChangeFetchFailed`].
    pub async fn step(&mut self) -> ApiResult<PollOutcome> {
        info!("invoking long poll");

        match self.client.long_poll(self.session.poll_url()).await {
            Ok(Some(message)) => Ok(self.dispatch(&message).await),
            Ok(None) => {
                self.reporter
                    .error(&format!("{} (message missing)", errors::INVALID_REALTIME_RESPONSE));
                Ok(PollOutcome::Anomaly)
            }
            Err(err) if err.is_payload_anomaly() => {
                warn!(cause = ?err, "unusable long poll payload, continuing");
                self.reporter
                    .error(&format!("{} (message missing)", errors::INVALID_REALTIME_RESPONSE));
                Ok(PollOutcome::Anomaly)
            }
            Err(err) => {
                self.reporter.error(errors::POLL_FAILED);
                Err(err)
            }
        }
    }

    /// Interpret one realtime message and perform its side effects
    async fn dispatch(&mut self, message: &str) -> PollOutcome {
        match PollSignal::from_message(message) {
            PollSignal::NewChange => {
                self.reporter.info(message, "Change detected");
                self.fetch_and_advance().await
            }
            PollSignal::Reconnect => {
                self.reporter
                    .info(message, "Connection timed-out, reconnecting...");
                PollOutcome::Reconnect
            }
            PollSignal::Unknown(raw) => {
                self.reporter
                    .error(&format!("{} ({raw})", errors::INVALID_REALTIME_RESPONSE));
                PollOutcome::Anomaly
            }
        }
    }

    /// Fetch events for the current cursor and advance it.
    ///
    /// The cursor advances whenever the fetch itself succeeded, even with an
    /// empty event list; a failed fetch leaves it untouched so the same
    /// window is retried on the next change signal.
    async fn fetch_and_advance(&mut self) -> PollOutcome {
        info!("fetching events since {}", self.session.stream_position());

        match self.client.fetch_events(self.session.stream_position()).await {
            Ok(batch) => {
                if batch.entries.is_empty() {
                    self.reporter.error(errors::EVENT_LIST_UNAVAILABLE);
                }
                for event in &batch.entries {
                    self.reporter.info(&event.event_type, &event.event_id);
                }

                let events_reported = batch.entries.len();
                self.session.advance(batch.next_stream_position);
                PollOutcome::Changed { events_reported }
            }
            Err(err) => {
                warn!(cause = ?err, "event fetch failed, stream position unchanged");
                self.reporter.error(errors::EVENT_LIST_UNAVAILABLE);
                PollOutcome::ChangeFetchFailed
            }
        }
    }
}
