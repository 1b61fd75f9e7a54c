//! Stable grouping of normalized events into per-channel series.
//!
//! Grouping preserves per-channel input order exactly: each channel keeps
//! the offsets at which it emitted events, nothing is resampled or
//! interpolated, and channels appear in first-seen order.

use crate::normalizer::NormalizedStream;
use crate::parser::schema::{ChannelClass, SeriesPoint};
use crate::utils::config::RESOURCE_CHANNEL_NAMES;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use log::debug;
use std::collections::BTreeSet;

/// Maps channel names to their class
///
/// **Public** - configuration point: new resource channels are a config
/// change, not a code change. Unlisted channels are production-count.
#[derive(Debug, Clone)]
pub struct ChannelClassifier {
    resource_channels: BTreeSet<String>,
}

impl ChannelClassifier {
    /// Create a classifier with the default resource-channel set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a channel name to the resource-usage class
    pub fn with_resource_channel(mut self, name: impl Into<String>) -> Self {
        self.resource_channels.insert(name.into());
        self
    }

    /// Classify a channel by name
    pub fn classify(&self, channel: &str) -> ChannelClass {
        if self.resource_channels.contains(channel) {
            ChannelClass::ResourceUsage
        } else {
            ChannelClass::ProductionCount
        }
    }
}

impl Default for ChannelClassifier {
    fn default() -> Self {
        Self {
            resource_channels: RESOURCE_CHANNEL_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Time-ordered samples of one channel
#[derive(Debug, Clone)]
pub struct ChannelSeries {
    /// Channel name
    pub channel: String,

    /// Channel classification
    pub class: ChannelClass,

    /// Samples in original log order
    pub points: Vec<SeriesPoint>,
}

impl ChannelSeries {
    fn new(channel: String, class: ChannelClass) -> Self {
        Self {
            channel,
            class,
            points: Vec::new(),
        }
    }

    /// Offset of the first event, if any
    pub fn first_offset(&self) -> Option<f64> {
        self.points.first().map(|p| p.offset_secs)
    }

    /// Offset of the last event, if any
    pub fn last_offset(&self) -> Option<f64> {
        self.points.last().map(|p| p.offset_secs)
    }

    /// Largest counter value seen on this channel
    pub fn peak_count(&self) -> u64 {
        self.points.iter().map(|p| p.count).max().unwrap_or(0)
    }

    /// Counter value of the last event
    pub fn final_count(&self) -> u64 {
        self.points.last().map(|p| p.count).unwrap_or(0)
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True when the series holds no samples
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The complete, immutable result of processing one log document
///
/// Owns its channel series exclusively; nothing mutates a series after
/// construction.
#[derive(Debug, Clone)]
pub struct Run {
    /// Earliest timestamp among the selected trace events
    pub run_start: DateTime<Utc>,

    /// Latest timestamp among the selected trace events
    pub run_end: DateTime<Utc>,

    channels: IndexMap<String, ChannelSeries>,
}

impl Run {
    /// Total run duration in seconds
    pub fn total_duration_secs(&self) -> f64 {
        crate::normalizer::offset_seconds(self.run_start, self.run_end)
    }

    /// All channel series, in first-seen order
    pub fn channels(&self) -> impl Iterator<Item = &ChannelSeries> {
        self.channels.values()
    }

    /// Series for one channel, if present
    pub fn channel(&self, name: &str) -> Option<&ChannelSeries> {
        self.channels.get(name)
    }

    /// Production-count channels only
    pub fn production_channels(&self) -> impl Iterator<Item = &ChannelSeries> {
        self.channels()
            .filter(|s| s.class == ChannelClass::ProductionCount)
    }

    /// Resource-usage channels only
    pub fn resource_channels(&self) -> impl Iterator<Item = &ChannelSeries> {
        self.channels()
            .filter(|s| s.class == ChannelClass::ResourceUsage)
    }

    /// Number of channels
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Total number of events across all channels
    pub fn event_count(&self) -> usize {
        self.channels().map(|s| s.len()).sum()
    }
}

/// Group a normalized stream into per-channel series
///
/// **Public** - main entry point for aggregation
///
/// # Arguments
/// * `stream` - Normalized events in original log order
/// * `classifier` - Channel name to class mapping
///
/// # Returns
/// An immutable `Run` with channels keyed by name in first-seen order
pub fn build_run(stream: NormalizedStream, classifier: &ChannelClassifier) -> Run {
    let mut channels: IndexMap<String, ChannelSeries> = IndexMap::new();

    for event in stream.events {
        let series = channels.entry(event.channel.clone()).or_insert_with(|| {
            ChannelSeries::new(event.channel.clone(), classifier.classify(&event.channel))
        });

        series.points.push(SeriesPoint {
            offset_secs: event.offset_secs,
            count: event.count,
        });
    }

    debug!("Grouped events into {} channels", channels.len());

    Run {
        run_start: stream.run_start,
        run_end: stream.run_end,
        channels,
    }
}
