// ABOUTME: Main entry point for the Box events watcher agent
// ABOUTME: Parses the bearer token, initializes the watcher, and runs the poll loop

use clap::Parser;
use tracing::{error, info};

use box_events_agent::client::EventsClient;
use box_events_agent::config::AgentConfig;
use box_events_agent::constants::errors;
use box_events_agent::errors::ApiResult;
use box_events_agent::reporter::{ConsoleReporter, Reporter};
use box_events_agent::watcher::EventWatcher;

#[derive(Parser)]
#[command(
    name = "box-events-agent",
    about = "Watch a Box account for change events over long polling"
)]
struct Cli {
    /// Box developer token used as the bearer credential
    token: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let reporter = ConsoleReporter;
    reporter.banner();

    let Some(token) = cli.token else {
        reporter.error(errors::MISSING_TOKEN);
        std::process::exit(1);
    };

    let config = match AgentConfig::load() {
        Ok(config) => config,
        Err(err) => {
            reporter.error(&format!("{err:#}"));
            std::process::exit(1);
        }
    };
    info!("events endpoint: {}", config.events_url);

    // The watcher reports the human-facing error line itself; the log line
    // carries the underlying cause, then the process exits non-zero.
    if let Err(err) = watch(&config, token, reporter).await {
        error!(cause = ?err, "fatal protocol failure, shutting down");
        std::process::exit(1);
    }
}

/// Initialize the session and run the poll loop until a fatal error
async fn watch(config: &AgentConfig, token: String, reporter: ConsoleReporter) -> ApiResult<()> {
    let client = EventsClient::new(config, token);
    let mut watcher = EventWatcher::initialize(client, reporter).await?;
    watcher.run().await
}
