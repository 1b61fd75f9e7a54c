//! Projection of a `Run` into the versioned series document.
//!
//! A pure read projection: series are copied out in aggregator order,
//! never reordered, and the run metadata is computed once from the run's
//! own bounds.

use crate::aggregator::Run;
use crate::parser::schema::{ChannelSeriesOut, RunMetadata, SeriesDocument};
use crate::utils::config::SCHEMA_VERSION;
use chrono::Utc;
use log::debug;

/// Export a run as a series document
///
/// **Public** - main entry point for export
///
/// # Arguments
/// * `run` - Aggregated run to project
///
/// # Returns
/// Series document ready for JSON serialization; channel order and
/// per-channel point order match the aggregator output exactly
pub fn export_series(run: &Run) -> SeriesDocument {
    debug!("Exporting {} channel series", run.channel_count());

    let channels = run
        .channels()
        .map(|series| ChannelSeriesOut {
            channel: series.channel.clone(),
            class: series.class,
            first_offset_secs: series.first_offset().unwrap_or(0.0),
            last_offset_secs: series.last_offset().unwrap_or(0.0),
            points: series.points.clone(),
        })
        .collect();

    SeriesDocument {
        version: SCHEMA_VERSION.to_string(),
        run: RunMetadata {
            run_start: run.run_start,
            run_end: run.run_end,
            total_duration_secs: run.total_duration_secs(),
        },
        channels,
        generated_at: Utc::now().to_rfc3339(),
    }
}
