//! referenda-cli: Command-line evaluator for referenda decision curves.
//!
//! Evaluates approval and support curves in both directions, tabulates
//! them, and reports a track's thresholds at a point in its decision
//! period. All values are parts-per-billion.

mod config;
mod input;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use referenda_core::constants::{PERBILL, UNREACHABLE_DELAY};
use referenda_core::traits::CurveEvaluator;
use referenda_curve::{sample, CurveEngine};
use serde_json::json;

use crate::config::{Config, OutputFormat};

/// Referenda decision curve evaluator.
#[derive(Parser)]
#[command(name = "referenda-cli")]
#[command(version, about = "Evaluate referenda approval and support curves.")]
struct Cli {
    /// Emit JSON instead of text (overrides REFERENDA_OUTPUT).
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Required proportion once `x` has elapsed.
    Threshold(ThresholdArgs),
    /// Elapsed time before proportion `y` is sufficient.
    Delay(DelayArgs),
    /// Tabulate a curve over its decision period.
    Table(TableArgs),
    /// Approval and support thresholds of a track at `x`.
    Track(TrackArgs),
}

#[derive(Args)]
struct ThresholdArgs {
    /// Curve metadata JSON, or @path to a file containing it.
    #[arg(short, long)]
    curve: String,

    /// Elapsed portion of the decision period, in parts-per-billion.
    #[arg(short, long)]
    x: u128,
}

#[derive(Args)]
struct DelayArgs {
    /// Curve metadata JSON, or @path to a file containing it.
    #[arg(short, long)]
    curve: String,

    /// Approval or support level, in parts-per-billion.
    #[arg(short, long)]
    y: u128,
}

#[derive(Args)]
struct TableArgs {
    /// Curve metadata JSON, or @path to a file containing it.
    #[arg(short, long)]
    curve: String,

    /// Number of intervals (overrides REFERENDA_TABLE_POINTS).
    #[arg(short, long)]
    points: Option<u32>,

    /// Upper end of the sampled range.
    #[arg(short, long, default_value_t = PERBILL)]
    span: u128,
}

#[derive(Args)]
struct TrackArgs {
    /// Track metadata JSON file with minApproval and minSupport curves.
    #[arg(short, long)]
    file: PathBuf,

    /// Elapsed portion of the decision period, in parts-per-billion.
    #[arg(short, long)]
    x: u128,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Invalid environment configuration")?;
    let output = if cli.json {
        OutputFormat::Json
    } else {
        config.output
    };
    let engine = CurveEngine::new();

    match cli.command {
        Commands::Threshold(args) => threshold(&engine, args, output),
        Commands::Delay(args) => delay(&engine, args, output),
        Commands::Table(args) => table(args, &config, output),
        Commands::Track(args) => track(&engine, args, output),
    }
}

/// Render parts-per-billion as a percentage with seven decimals.
fn percent(parts: u128) -> String {
    format!("{}.{:07}%", parts / 10_000_000, parts % 10_000_000)
}

fn threshold(engine: &CurveEngine, args: ThresholdArgs, output: OutputFormat) -> Result<()> {
    let curve = input::load_curve(&args.curve)?;
    let y = engine.threshold(&curve, args.x).context("Threshold evaluation failed")?;

    match output {
        OutputFormat::Text => println!("{y} ({})", percent(y)),
        OutputFormat::Json => println!(
            "{}",
            json!({ "kind": curve.kind().as_str(), "x": args.x.to_string(), "threshold": y.to_string() })
        ),
    }
    Ok(())
}

fn delay(engine: &CurveEngine, args: DelayArgs, output: OutputFormat) -> Result<()> {
    let curve = input::load_curve(&args.curve)?;
    let x = engine.delay(&curve, args.y).context("Delay evaluation failed")?;
    let reachable = x != UNREACHABLE_DELAY;

    match output {
        OutputFormat::Text if reachable => println!("{x}"),
        OutputFormat::Text => println!("{x} (never reached)"),
        OutputFormat::Json => println!(
            "{}",
            json!({
                "kind": curve.kind().as_str(),
                "y": args.y.to_string(),
                "delay": x.to_string(),
                "reachable": reachable,
            })
        ),
    }
    Ok(())
}

fn table(args: TableArgs, config: &Config, output: OutputFormat) -> Result<()> {
    let curve = input::load_curve(&args.curve)?;
    let points = args.points.unwrap_or(config.table_points);
    let rows = sample(&curve, args.span, points).context("Curve tabulation failed")?;

    match output {
        OutputFormat::Text => {
            println!("{:>14}  {:>14}  {:>14}", "x", "threshold", "percent");
            for (x, y) in rows {
                println!("{x:>14}  {y:>14}  {:>14}", percent(y));
            }
        }
        OutputFormat::Json => {
            let rows: Vec<_> = rows
                .into_iter()
                .map(|(x, y)| json!({ "x": x.to_string(), "threshold": y.to_string() }))
                .collect();
            println!("{}", json!({ "kind": curve.kind().as_str(), "rows": rows }));
        }
    }
    Ok(())
}

fn track(engine: &CurveEngine, args: TrackArgs, output: OutputFormat) -> Result<()> {
    let track = input::load_track(&args.file)?;
    let approval = engine
        .threshold(&track.min_approval, args.x)
        .context("minApproval evaluation failed")?;
    let support = engine
        .threshold(&track.min_support, args.x)
        .context("minSupport evaluation failed")?;

    match output {
        OutputFormat::Text => {
            println!("approval: {approval} ({})", percent(approval));
            println!("support:  {support} ({})", percent(support));
        }
        OutputFormat::Json => println!(
            "{}",
            json!({
                "x": args.x.to_string(),
                "minApproval": approval.to_string(),
                "minSupport": support.to_string(),
            })
        ),
    }
    Ok(())
}
