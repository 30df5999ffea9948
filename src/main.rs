mod commands;

use anyhow::{Context, Result};
use chrono::Duration;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kanban::config::MAX_DELAY_MS;
use kanban::{Board, BoardConfig, BoardSnapshot, SystemClock};

#[derive(Parser)]
#[command(name = "kanban")]
#[command(about = "An in-memory kanban board for the terminal")]
#[command(version)]
struct Cli {
    /// Load the board from a snapshot file instead of the sample board
    #[arg(long, global = true, env = "KANBAN_SEED")]
    seed: Option<PathBuf>,

    /// Start with the sample team but no tasks
    #[arg(long, global = true, conflicts_with = "seed")]
    empty: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, env = "KANBAN_LOG", default_value = "warn")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(flatten)]
    timing: TimingArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct TimingArgs {
    /// How long notifications stay in the feed
    #[arg(long, global = true, env = "KANBAN_NOTIFICATION_TTL_MS", default_value_t = 5000, value_parser = delay_ms)]
    notification_ttl_ms: i64,

    /// How many notifications the feed shows at once
    #[arg(long, global = true, env = "KANBAN_VISIBLE_NOTIFICATIONS", default_value_t = 3)]
    visible_notifications: usize,

    /// Interval between simulated team activity polls
    #[arg(long, global = true, env = "KANBAN_ACTIVITY_INTERVAL_MS", default_value_t = 5000, value_parser = delay_ms)]
    activity_interval_ms: i64,

    /// Chance that an activity poll produces an event
    #[arg(long, global = true, env = "KANBAN_ACTIVITY_PROBABILITY", default_value_t = 0.1, value_parser = probability)]
    activity_probability: f64,

    /// Interval between simulated connection polls
    #[arg(long, global = true, env = "KANBAN_CONNECTION_INTERVAL_MS", default_value_t = 10_000, value_parser = delay_ms)]
    connection_interval_ms: i64,

    /// Chance that a connection poll changes the connection status
    #[arg(long, global = true, env = "KANBAN_CONNECTION_PROBABILITY", default_value_t = 0.05, value_parser = probability)]
    connection_probability: f64,

    /// Delay before reconnecting after going offline
    #[arg(long, global = true, env = "KANBAN_RECONNECT_DELAY_MS", default_value_t = 3000, value_parser = delay_ms)]
    reconnect_delay_ms: i64,

    /// Delay between reconnecting and being live again
    #[arg(long, global = true, env = "KANBAN_CONNECTING_DELAY_MS", default_value_t = 2000, value_parser = delay_ms)]
    connecting_delay_ms: i64,
}

impl TimingArgs {
    fn to_config(&self) -> Result<BoardConfig> {
        let config = BoardConfig {
            notification_ttl: Duration::milliseconds(self.notification_ttl_ms.max(0)),
            visible_notifications: self.visible_notifications,
            activity_interval: Duration::milliseconds(self.activity_interval_ms.max(1)),
            activity_probability: self.activity_probability,
            connection_interval: Duration::milliseconds(self.connection_interval_ms.max(1)),
            connection_probability: self.connection_probability,
            reconnect_delay: Duration::milliseconds(self.reconnect_delay_ms.max(0)),
            connecting_delay: Duration::milliseconds(self.connecting_delay_ms.max(0)),
        };
        config.validate().context("Invalid timing options")?;
        Ok(config)
    }
}

fn delay_ms(s: &str) -> std::result::Result<i64, String> {
    let ms: i64 = s.parse().map_err(|e| format!("{}", e))?;
    if (0..=MAX_DELAY_MS).contains(&ms) {
        Ok(ms)
    } else {
        Err(format!("must be between 0 and {}", MAX_DELAY_MS))
    }
}

fn probability(s: &str) -> std::result::Result<f64, String> {
    let p: f64 = s.parse().map_err(|e| format!("{}", e))?;
    if (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err("must be between 0 and 1".to_string())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive session (the default)
    Shell,

    /// Print the board
    Board {
        /// Only tasks whose title, description or tags contain this text
        #[arg(short, long)]
        search: Option<String>,
        /// Only these priorities (repeatable)
        #[arg(short, long)]
        priority: Vec<String>,
        /// Only these columns (repeatable)
        #[arg(long)]
        status: Vec<String>,
    },

    /// Show task details
    Show {
        /// Task ID
        id: i64,
    },

    /// Export the board
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<String>,
        /// Format (json, markdown)
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// Watch the simulated team work in real time
    Live {
        /// Stop after this many seconds (runs until Ctrl-C otherwise)
        #[arg(long)]
        seconds: Option<u64>,
        /// Seed for reproducible simulated activity
        #[arg(long)]
        rng_seed: Option<u64>,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_writer(io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(io::stderr)))
        .init();
}

fn load_board(cli: &Cli) -> Result<Board> {
    let config = cli.timing.to_config()?;
    let clock = Box::new(SystemClock);

    if let Some(path) = &cli.seed {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
        let snapshot = BoardSnapshot::from_json(&json)
            .with_context(|| format!("Invalid snapshot {}", path.display()))?;
        return Ok(Board::from_snapshot(snapshot, clock, config)?);
    }

    if cli.empty {
        let sample = BoardSnapshot::sample()?;
        return Ok(Board::new(sample.members, sample.current_user, clock, config)?);
    }

    Ok(Board::with_sample_data(clock, config)?)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_json);

    let mut board = load_board(&cli)?;

    match cli.command {
        None | Some(Commands::Shell) => commands::shell::run(&mut board),

        Some(Commands::Board {
            search,
            priority,
            status,
        }) => {
            commands::filter::apply(&mut board, search.as_deref(), &priority, &status)?;
            commands::board::run(&board)
        }

        Some(Commands::Show { id }) => commands::show::run(&board, id),

        Some(Commands::Export { output, format }) => match format.as_str() {
            "json" => commands::export::run_json(&board, output.as_deref()),
            "markdown" | "md" => commands::export::run_markdown(&board, output.as_deref()),
            _ => anyhow::bail!("Unknown format '{}'. Use 'json' or 'markdown'", format),
        },

        Some(Commands::Live { seconds, rng_seed }) => {
            commands::live::run(&mut board, seconds, rng_seed)
        }
    }
}
