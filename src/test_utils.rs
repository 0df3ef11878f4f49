// ABOUTME: Test utilities shared by unit and integration tests
// ABOUTME: Recording reporter that captures reported lines for assertions
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Async-IO.org

use std::sync::{Arc, Mutex};

use crate::reporter::Reporter;

/// One line captured by the recording reporter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportedLine {
    Error(String),
    Info { label: String, message: String },
}

/// Reporter that records every line instead of printing.
///
/// Clones share the same buffer, so tests can hand one clone to the watcher
/// and keep another to inspect afterwards.
#[derive(Debug, Default, Clone)]
pub struct RecordingReporter {
    lines: Arc<Mutex<Vec<ReportedLine>>>,
}

impl RecordingReporter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything reported so far, in order
    #[must_use]
    pub fn lines(&self) -> Vec<ReportedLine> {
        self.lines.lock().unwrap().clone()
    }

    /// The error lines reported so far, in order
    #[must_use]
    pub fn errors(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|line| match line {
                ReportedLine::Error(message) => Some(message),
                ReportedLine::Info { .. } => None,
            })
            .collect()
    }

    /// The info lines reported so far, as (label, message) pairs in order
    #[must_use]
    pub fn infos(&self) -> Vec<(String, String)> {
        self.lines()
            .into_iter()
            .filter_map(|line| match line {
                ReportedLine::Info { label, message } => Some((label, message)),
                ReportedLine::Error(_) => None,
            })
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn error(&self, message: &str) {
        self.lines
            .lock()
            .unwrap()
            .push(ReportedLine::Error(message.to_string()));
    }

    fn info(&self, label: &str, message: &str) {
        self.lines.lock().unwrap().push(ReportedLine::Info {
            label: label.to_string(),
            message: message.to_string(),
        });
    }
}
