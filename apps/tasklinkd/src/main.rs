mod companion;
mod host;
mod replay;
mod session;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tasklink_protocol::ListId;
use tasklink_runtime::CommConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::companion::FixtureSource;
use crate::replay::ReplayOptions;
use crate::session::{SimulateOptions, Summary};

#[derive(Debug, Parser)]
#[command(name = "tasklinkd")]
#[command(about = "Drive the watch-side task channel against a mock companion or a transcript")]
struct Cli {
    /// JSON file with channel settings; missing fields take their defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Browse lists and tasks served by a simulated companion.
    Simulate {
        /// Fixture with the companion's lists; a built-in sample otherwise.
        #[arg(long)]
        fixture: Option<PathBuf>,
        #[arg(long, default_value_t = 200)]
        startup_ms: u64,
        #[arg(long, default_value_t = 50)]
        latency_ms: u64,
        /// Listing requests issued before the companion is ready.
        #[arg(long, default_value_t = 1)]
        early_triggers: usize,
        /// List to open; the first one otherwise.
        #[arg(long)]
        list_id: Option<i32>,
    },
    /// Dispatch a JSON-lines transcript of inbound messages.
    Replay {
        transcript: PathBuf,
        #[arg(long)]
        lists_active: bool,
        #[arg(long, requires = "list_id")]
        tasks_active: bool,
        #[arg(long)]
        list_id: Option<i32>,
    },
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
}

fn load_config(path: Option<&Path>) -> Result<CommConfig> {
    let Some(path) = path else {
        return Ok(CommConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_format);

    let config = load_config(cli.config.as_deref())?;
    info!(
        inbox_size = config.inbox_size,
        outbox_size = config.outbox_size,
        "channel configured"
    );

    let summary: Summary = match cli.command {
        Command::Simulate {
            fixture,
            startup_ms,
            latency_ms,
            early_triggers,
            list_id,
        } => {
            let source = match fixture {
                Some(path) => FixtureSource::load(&path)?,
                None => FixtureSource::sample(),
            };
            let options = SimulateOptions {
                startup: Duration::from_millis(startup_ms),
                latency: Duration::from_millis(latency_ms),
                early_triggers,
                list_id: list_id.map(ListId::new),
                ..SimulateOptions::default()
            };
            session::simulate(config, source, options).await?
        }
        Command::Replay {
            transcript,
            lists_active,
            tasks_active,
            list_id,
        } => {
            let file = File::open(&transcript)
                .with_context(|| format!("opening transcript {}", transcript.display()))?;
            let options = ReplayOptions {
                lists_active,
                tasks_active,
                list_id: list_id.map(ListId::new),
            };
            replay::replay(config, BufReader::new(file), &options)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn replay_tasks_requires_a_list() {
        assert!(Cli::try_parse_from(["tasklinkd", "replay", "t.jsonl", "--tasks-active"]).is_err());
        let cli = Cli::try_parse_from([
            "tasklinkd",
            "--log-format",
            "json",
            "replay",
            "t.jsonl",
            "--tasks-active",
            "--list-id",
            "7",
        ])
        .unwrap();
        assert!(matches!(
            cli.command,
            Command::Replay {
                list_id: Some(7),
                ..
            }
        ));
    }

    #[test]
    fn missing_config_is_the_default() {
        let config = load_config(None).unwrap();
        assert_eq!(config.outbox_size, tasklink_runtime::DEFAULT_OUTBOX_SIZE);
    }
}
