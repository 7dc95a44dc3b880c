mod config_loader;
mod input;
mod report;
mod snapshot_watcher;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use gex_core::EngineConfig;
use gex_options_manager::{evaluate_positions, TradeStats};
use gex_signals::{DecisionEngine, RetailSentiment};

use crate::config_loader::{ConfigLoader, DEFAULT_CONFIG_PATH};
use crate::report::ReportFormatter;
use crate::snapshot_watcher::SnapshotWatcher;

#[derive(Parser)]
#[command(name = "gex")]
#[command(about = "Gamma regime decision engine", long_about = None)]
struct Cli {
    /// Engine config file (TOML)
    #[arg(long, global = true, env = "GEX_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Config profile layered over the base file
    #[arg(long, global = true, env = "GEX_PROFILE")]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one market snapshot and print the recommendation
    Evaluate {
        /// Market snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,

        /// Crowd positioning hint for trap detection (bullish, bearish, neutral)
        #[arg(long)]
        sentiment: Option<RetailSentiment>,

        /// Print the full evaluation as JSON
        #[arg(long)]
        json: bool,
    },
    /// Assess open positions from a position snapshot file
    Position {
        /// Position snapshot JSON file: one snapshot or an array of tracked positions
        #[arg(long)]
        snapshot: PathBuf,

        /// Ticker to tag a bare snapshot with
        #[arg(long, default_value = "SPY")]
        ticker: String,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Re-evaluate a market snapshot every time its file changes
    Watch {
        /// Market snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,

        /// Crowd positioning hint for trap detection
        #[arg(long)]
        sentiment: Option<RetailSentiment>,
    },
    /// Summarize closed-trade P&L
    Stats {
        /// JSON array of realized P&L per trade
        #[arg(long)]
        trades: PathBuf,

        /// Print the statistics as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ConfigLoader::new(&cli.config)
        .with_profile(cli.profile.clone())
        .load()?;

    match cli.command {
        Commands::Evaluate {
            snapshot,
            sentiment,
            json,
        } => {
            run_evaluate(config, &snapshot, sentiment, json)?;
        }
        Commands::Position {
            snapshot,
            ticker,
            json,
        } => {
            run_position(&config, &snapshot, &ticker, json)?;
        }
        Commands::Watch {
            snapshot,
            sentiment,
        } => {
            run_watch(config, snapshot, sentiment).await?;
        }
        Commands::Stats { trades, json } => {
            run_stats(&trades, json)?;
        }
    }

    Ok(())
}

fn run_evaluate(
    config: EngineConfig,
    path: &Path,
    sentiment: Option<RetailSentiment>,
    json: bool,
) -> anyhow::Result<()> {
    let raw = input::read_snapshot(path)?;
    let eval = DecisionEngine::new(config)
        .evaluate(&raw, sentiment)
        .with_context(|| format!("evaluating {}", path.display()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&eval)?);
    } else {
        print!("{}", ReportFormatter::evaluation(&eval));
    }
    Ok(())
}

fn run_position(
    config: &EngineConfig,
    path: &Path,
    ticker: &str,
    json: bool,
) -> anyhow::Result<()> {
    let book = input::read_positions(path, ticker)?;
    let report = evaluate_positions(&book, &config.status);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", ReportFormatter::positions(&report));
    }
    Ok(())
}

async fn run_watch(
    config: EngineConfig,
    path: PathBuf,
    sentiment: Option<RetailSentiment>,
) -> anyhow::Result<()> {
    let engine = DecisionEngine::new(config);
    let initial = input::read_snapshot(&path)?;
    let (watcher, mut rx) = SnapshotWatcher::new(initial);

    let watch_task = tokio::spawn(async move { watcher.watch(&path).await });

    loop {
        let raw = rx.borrow_and_update().clone();
        match engine.evaluate(&raw, sentiment) {
            Ok(eval) => print!("{}", ReportFormatter::evaluation(&eval)),
            Err(e) => tracing::warn!(error = %e, "Snapshot rejected"),
        }

        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted, stopping watch");
                break;
            }
        }
    }

    // The watcher loop notices the dropped receiver and returns.
    drop(rx);
    watch_task.await??;
    Ok(())
}

fn run_stats(path: &Path, json: bool) -> anyhow::Result<()> {
    let pnls = input::read_pnls(path)?;
    let stats = TradeStats::from_pnls(&pnls);

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        print!("{}", ReportFormatter::stats(&stats));
    }
    Ok(())
}
