//! Output JSON schema definitions for derived series data.
//!
//! This module defines the structure of JSON files we write to disk.
//! Schema is versioned to allow future evolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Top-level series document written to JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesDocument {
    /// Schema version for compatibility checking
    pub version: String,

    /// Metadata of the run the series were derived from
    pub run: RunMetadata,

    /// One series per channel, in first-seen order
    pub channels: Vec<ChannelSeriesOut>,

    /// Timestamp when this document was generated
    pub generated_at: String,
}

/// Metadata describing the span of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    /// Earliest timestamp among the selected trace events
    pub run_start: DateTime<Utc>,

    /// Latest timestamp among the selected trace events
    pub run_end: DateTime<Utc>,

    /// Total run duration in seconds (`run_end - run_start`)
    pub total_duration_secs: f64,
}

/// Class of a channel: what its counter values mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelClass {
    /// Pipeline stage throughput (number of objects produced)
    ProductionCount,
    /// Memory sampler (bytes in use)
    ResourceUsage,
}

impl ChannelClass {
    /// Short label for summaries and logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::ProductionCount => "production",
            Self::ResourceUsage => "resource",
        }
    }
}

/// One `(offset, count)` sample within a channel series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Elapsed seconds since run start
    pub offset_secs: f64,

    /// Counter value at this offset
    pub count: u64,
}

/// Exported series for one channel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelSeriesOut {
    /// Channel name (e.g., "crop", "reconstruct", "heap")
    pub channel: String,

    /// Channel classification
    pub class: ChannelClass,

    /// Offset of the channel's first event
    pub first_offset_secs: f64,

    /// Offset of the channel's last event
    pub last_offset_secs: f64,

    /// Samples in original log order
    pub points: Vec<SeriesPoint>,
}
