// ABOUTME: Reporter collaborator that renders protocol output for a human
// ABOUTME: Console implementation prints Error/highlight lines; protocol logic stays decoupled
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright (c) 2025 Async-IO.org

use crate::constants::APP_NAME;

/// Sink for the human-facing lines the protocol produces.
///
/// Pure side effect, no return values: the watcher reports through this
/// trait and never formats console output itself.
pub trait Reporter {
    /// Report an error line
    fn error(&self, message: &str);

    /// Report a labeled highlight line, e.g. an event type and id
    fn info(&self, label: &str, message: &str);
}

/// Reporter that prints to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    /// Print the startup banner
    pub fn banner(&self) {
        println!("{APP_NAME}");
        println!("{}", "=".repeat(APP_NAME.len()));
        println!();
    }
}

impl Reporter for ConsoleReporter {
    fn error(&self, message: &str) {
        println!("Error: {message}");
    }

    fn info(&self, label: &str, message: &str) {
        println!("{label}: {message}");
    }
}
