//! Demo host for the cancellation client.
//!
//! Runs one invocation with the configured timeout and step plan, with
//! optional scripted caller cancellation and dispose.
//!
//! ```text
//! cancel-task                          # 5s timeout over 1s..10s steps → timed out
//! cancel-task --cancel-after-ms 2000   # → cancelled by caller
//! cancel-task --dispose-after-ms 1000  # → owner disposed
//! cancel-task --timeout-ms 100000      # → completed
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use cancel_task::config::{load_config, validate_config, AppConfig, ConfigError};
use cancel_task::lifecycle::dispose_on_ctrl_c;
use cancel_task::observability::logging::init_logging;
use cancel_task::{Cause, Client, Signal};

#[derive(Parser)]
#[command(name = "cancel-task")]
#[command(about = "Run an operation under caller, timeout and owner cancellation", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Per-call timeout in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Fire the caller signal after this many milliseconds.
    #[arg(long)]
    cancel_after_ms: Option<u64>,

    /// Dispose the client after this many milliseconds.
    #[arg(long)]
    dispose_after_ms: Option<u64>,

    /// Print the outcome as JSON.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(ms) = cli.timeout_ms {
        config.client.timeout_ms = ms;
    }
    if cli.cancel_after_ms.is_some() {
        config.demo.cancel_after_ms = cli.cancel_after_ms;
    }
    if cli.dispose_after_ms.is_some() {
        config.demo.dispose_after_ms = cli.dispose_after_ms;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability.log_level);

    tracing::info!(
        path = ?cli.config,
        timeout_ms = config.client.timeout_ms,
        cancel_after_ms = ?config.demo.cancel_after_ms,
        dispose_after_ms = ?config.demo.dispose_after_ms,
        "Configuration loaded"
    );

    let client = Arc::new(Client::from_config(&config));
    let ctrl_c = dispose_on_ctrl_c(client.clone());

    let caller = Signal::new();
    if let Some(ms) = config.demo.cancel_after_ms {
        caller.schedule_fire(Duration::from_millis(ms), Cause::External)?;
    }
    if let Some(ms) = config.demo.dispose_after_ms {
        let client = client.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(ms)).await;
            client.dispose();
        });
    }

    let outcome = client.invoke(Some(&caller)).await;
    caller.release();
    ctrl_c.abort();
    let outcome = outcome?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("{}", outcome);
    }

    client.dispose();
    Ok(())
}
