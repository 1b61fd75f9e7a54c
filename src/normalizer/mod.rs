//! Normalization of trace events to a common time origin.
//!
//! The decoder yields events with absolute timestamps; this module computes
//! the run origin (earliest timestamp among the selected events) and rebases
//! every event to an offset in seconds from that origin.

use crate::parser::CandidateEvent;
use crate::utils::error::NormalizeError;
use chrono::{DateTime, Utc};
use log::debug;

/// A trace event rebased to the run origin
#[derive(Debug, Clone)]
pub struct TraceEvent {
    /// Channel the counter belongs to
    pub channel: String,

    /// Counter value
    pub count: u64,

    /// Absolute timestamp
    pub time: DateTime<Utc>,

    /// Elapsed seconds since run start, always >= 0
    pub offset_secs: f64,
}

/// The full event stream rebased to a common origin
#[derive(Debug, Clone)]
pub struct NormalizedStream {
    /// Earliest timestamp among the events
    pub run_start: DateTime<Utc>,

    /// Latest timestamp among the events
    pub run_end: DateTime<Utc>,

    /// Events in original log order
    pub events: Vec<TraceEvent>,
}

/// Normalize candidate events against the earliest observed timestamp
///
/// **Public** - main entry point for normalization
///
/// Input order is preserved exactly; events are never re-sorted, so ties in
/// the timestamp order keep their original positions.
///
/// # Arguments
/// * `candidates` - Selected trace events in original log order
///
/// # Returns
/// The stream with `run_start`, `run_end` and per-event offsets filled in
///
/// # Errors
/// * `NormalizeError::EmptyRun` - No candidates were selected; callers must
///   treat this as a distinct reportable state, not compute over nothing
pub fn normalize(candidates: Vec<CandidateEvent>) -> Result<NormalizedStream, NormalizeError> {
    // min()/max() return the first of equal elements, keeping ties stable
    let run_start = candidates
        .iter()
        .map(|c| c.time)
        .min()
        .ok_or(NormalizeError::EmptyRun)?;
    let run_end = candidates
        .iter()
        .map(|c| c.time)
        .max()
        .unwrap_or(run_start);

    debug!(
        "Normalizing {} events, run spans {:.3}s",
        candidates.len(),
        offset_seconds(run_start, run_end)
    );

    let events = candidates
        .into_iter()
        .map(|c| TraceEvent {
            offset_secs: offset_seconds(run_start, c.time),
            channel: c.channel,
            count: c.count,
            time: c.time,
        })
        .collect();

    Ok(NormalizedStream {
        run_start,
        run_end,
        events,
    })
}

/// Elapsed seconds between two timestamps, with sub-second precision
///
/// **Public** - shared with the exporter for duration computation
pub fn offset_seconds(start: DateTime<Utc>, time: DateTime<Utc>) -> f64 {
    let delta = time.signed_duration_since(start);
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        // Microsecond count overflows i64 only past ~292k years
        None => delta.num_seconds() as f64,
    }
}
