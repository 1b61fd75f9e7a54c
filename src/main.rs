//! Pipeline Trace Studio CLI
//!
//! Derives plottable time series from the structured run logs of a
//! multi-stage geometry-processing pipeline.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use pipeline_trace_studio::commands::{execute_derive, validate_args, DeriveArgs};
use pipeline_trace_studio::utils::config::{RESOURCE_CHANNEL_NAMES, SCHEMA_VERSION};

/// Pipeline Trace Studio - series derivation for pipeline run logs
#[derive(Parser, Debug)]
#[command(name = "pipeline-trace")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Derive per-channel series from a run log
    Derive {
        /// Path to the JSON run log
        #[arg(short, long)]
        log: PathBuf,

        /// Output path for the JSON series document
        #[arg(short, long, default_value = "series.json")]
        output: PathBuf,

        /// Extra channel name to classify as resource-usage (repeatable)
        #[arg(long = "resource-channel")]
        resource_channels: Vec<String>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a series JSON file
    Validate {
        /// Path to series JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Derive {
            log,
            output,
            resource_channels,
            summary,
        } => {
            let args = DeriveArgs {
                log_path: log,
                output_json: output,
                resource_channels,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            // Execute derivation
            execute_derive(args)?;
        }

        Commands::Validate { file } => {
            validate_series_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a series JSON file
///
/// **Private** - internal command implementation
fn validate_series_file(file_path: PathBuf) -> Result<()> {
    use pipeline_trace_studio::output::read_series;

    println!("Validating series document: {}", file_path.display());

    let document = read_series(&file_path)?;

    println!("✓ Valid series JSON");
    println!("  Version:  {}", document.version);
    println!("  Run:      {} .. {}", document.run.run_start, document.run.run_end);
    println!("  Duration: {:.2}s", document.run.total_duration_secs);
    println!("  Channels: {}", document.channels.len());
    for channel in &document.channels {
        println!(
            "    {:<12} [{}] {} points",
            channel.channel,
            channel.class.label(),
            channel.points.len()
        );
    }

    Ok(())
}

/// Display schema information
///
/// **Private** - internal command implementation
fn display_schema(show_details: bool) {
    println!("Pipeline Trace Studio Series Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string            - Schema version (e.g., '1.0.0')");
        println!("  run: object                - Run metadata");
        println!("    run_start: string        - Earliest trace event timestamp");
        println!("    run_end: string          - Latest trace event timestamp");
        println!("    total_duration_secs: number - Run duration in seconds");
        println!("  channels: array            - One entry per channel, first-seen order");
        println!("    channel: string          - Channel name");
        println!("    class: string            - 'production_count' or 'resource_usage'");
        println!("    first_offset_secs: number - Offset of first event");
        println!("    last_offset_secs: number - Offset of last event");
        println!("    points: array            - {{offset_secs, count}} samples");
        println!("  generated_at: string       - ISO 8601 timestamp");
        println!();
        println!(
            "Default resource-usage channels: {}",
            RESOURCE_CHANNEL_NAMES.join(", ")
        );
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Pipeline Trace Studio v{}", env!("CARGO_PKG_VERSION"));
    println!("Series Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Series derivation for geometry-pipeline run logs.");
}
