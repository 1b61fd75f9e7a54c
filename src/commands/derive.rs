//! Derive command implementation.
//!
//! The derive command:
//! 1. Reads the log document from disk
//! 2. Decodes it and selects trace events
//! 3. Normalizes events to the run origin
//! 4. Groups events into per-channel series
//! 5. Writes the series document and prints statistics

use crate::aggregator::{build_run, calculate_summary, ChannelClassifier, Run};
use crate::exporter::export_series;
use crate::normalizer::normalize;
use crate::output::write_series;
use crate::parser::{decode_log, select_candidates};
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Arguments for the derive command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct DeriveArgs {
    /// Path to the log document
    pub log_path: PathBuf,

    /// Output path for the JSON series document
    pub output_json: PathBuf,

    /// Extra channel names to treat as resource-usage
    pub resource_channels: Vec<String>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for DeriveArgs {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from("run.log.json"),
            output_json: PathBuf::from("series.json"),
            resource_channels: Vec::new(),
            print_summary: false,
        }
    }
}

/// Run the full transform on a log document already in memory
///
/// **Public** - the one-shot pipeline: decode, select, normalize, group.
/// Returns a complete `Run` or the first error; never a partial result.
///
/// # Errors
/// * Decode failures (structurally invalid log)
/// * Empty-run condition (no trace events selected)
pub fn derive_run(log_text: &str, classifier: &ChannelClassifier) -> Result<Run> {
    let records = decode_log(log_text).context("Failed to decode log document")?;

    let candidates =
        select_candidates(&records).context("Failed to decode a trace message payload")?;

    let stream = normalize(candidates).context("Log contains no plottable trace events")?;

    Ok(build_run(stream, classifier))
}

/// Execute the derive command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - Derive command arguments
///
/// # Returns
/// Ok if derivation succeeds, Err with context if any step fails
///
/// # Errors
/// * Log file read failures
/// * Log decode errors
/// * Empty-run condition
/// * File write errors
pub fn execute_derive(args: DeriveArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Deriving series from log: {}", args.log_path.display());

    // Step 1: Read the log. The file is fully read before any transform
    // runs, so the source is never held open while transforming.
    info!("Step 1/5: Reading log document...");
    let log_text = std::fs::read_to_string(&args.log_path)
        .with_context(|| format!("Failed to read log file {}", args.log_path.display()))?;

    info!("Step 2/5: Decoding log entries...");
    let classifier = build_classifier(&args.resource_channels);
    let run = derive_run(&log_text, &classifier)?;

    debug!(
        "Run spans {:.3}s across {} channels",
        run.total_duration_secs(),
        run.channel_count()
    );

    info!("Step 3/5: Calculating run statistics...");
    let summary = calculate_summary(&run);
    info!("Run statistics: {}", summary.summary());

    info!("Step 4/5: Exporting channel series...");
    let document = export_series(&run);

    info!("Step 5/5: Writing output file...");
    write_series(&document, &args.output_json).context("Failed to write series document")?;

    info!("✓ Series written to: {}", args.output_json.display());

    if args.print_summary {
        println!("\n{}", "=".repeat(80));
        println!("RUN SUMMARY");
        println!("{}", "=".repeat(80));
        println!("Log:          {}", args.log_path.display());
        println!("Duration:     {:.2}s", summary.total_duration_secs);
        println!("Channels:     {}", summary.channel_count);
        println!("Trace events: {}", summary.event_count);
        println!();
        for stats in &summary.channels {
            println!(
                "  {:<12} [{}] {} events, offsets {:.2}s..{:.2}s, peak {}, final {}",
                stats.channel,
                stats.class.label(),
                stats.events,
                stats.first_offset_secs,
                stats.last_offset_secs,
                stats.peak_count,
                stats.final_count
            );
        }
        println!("{}", "=".repeat(80));
    }

    let elapsed = start_time.elapsed();
    info!("Derivation completed in {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

/// Build the channel classifier from CLI extensions
///
/// **Private** - internal helper for execute_derive
fn build_classifier(extra_resource_channels: &[String]) -> ChannelClassifier {
    let mut classifier = ChannelClassifier::new();
    for name in extra_resource_channels {
        classifier = classifier.with_resource_channel(name.clone());
    }
    classifier
}

/// Validate derive arguments
///
/// **Public** - can be called before execute_derive for early validation
///
/// # Arguments
/// * `args` - Arguments to validate
///
/// # Returns
/// Ok if arguments are valid, Err with message if not
pub fn validate_args(args: &DeriveArgs) -> Result<()> {
    if args.log_path.as_os_str().is_empty() {
        anyhow::bail!("Log path cannot be empty");
    }

    if args.output_json.as_os_str().is_empty() {
        anyhow::bail!("Output path cannot be empty");
    }

    for name in &args.resource_channels {
        if name.trim().is_empty() {
            anyhow::bail!("Resource channel names cannot be empty");
        }
    }

    Ok(())
}
