//! Summary statistics over an aggregated run.
//!
//! These are the numbers worth knowing before looking at any plot: how long
//! the run took, how many events each channel emitted, and where each
//! counter ended up.

use super::channels::Run;
use crate::parser::schema::ChannelClass;
use log::debug;

/// Per-channel statistics
#[derive(Debug, Clone)]
pub struct ChannelStats {
    /// Channel name
    pub channel: String,

    /// Channel classification
    pub class: ChannelClass,

    /// Number of events on this channel
    pub events: usize,

    /// Offset of the first event
    pub first_offset_secs: f64,

    /// Offset of the last event
    pub last_offset_secs: f64,

    /// Largest counter value seen
    pub peak_count: u64,

    /// Counter value of the last event
    pub final_count: u64,
}

/// Run-level statistics
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Total run duration in seconds
    pub total_duration_secs: f64,

    /// Number of channels
    pub channel_count: usize,

    /// Total number of events across all channels
    pub event_count: usize,

    /// Per-channel statistics, in first-seen order
    pub channels: Vec<ChannelStats>,
}

impl RunSummary {
    /// Get human-readable summary
    ///
    /// **Public** - for logging and debugging
    pub fn summary(&self) -> String {
        format!(
            "Duration: {:.2}s | Channels: {} | Events: {}",
            self.total_duration_secs, self.channel_count, self.event_count
        )
    }
}

/// Calculate summary statistics for a run
///
/// **Public** - provides summary statistics
///
/// # Arguments
/// * `run` - Aggregated run
///
/// # Returns
/// Statistics about the run and each of its channels
pub fn calculate_summary(run: &Run) -> RunSummary {
    debug!("Calculating summary over {} channels", run.channel_count());

    let channels = run
        .channels()
        .map(|series| ChannelStats {
            channel: series.channel.clone(),
            class: series.class,
            events: series.len(),
            first_offset_secs: series.first_offset().unwrap_or(0.0),
            last_offset_secs: series.last_offset().unwrap_or(0.0),
            peak_count: series.peak_count(),
            final_count: series.final_count(),
        })
        .collect();

    RunSummary {
        total_duration_secs: run.total_duration_secs(),
        channel_count: run.channel_count(),
        event_count: run.event_count(),
        channels,
    }
}
