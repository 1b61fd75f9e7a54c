//! Main decoder for pipeline run logs.
//!
//! Parses the JSON log document written by the pipeline's file sink into
//! typed records, then selects the trace-level entries whose message text
//! is an embedded counter payload.

use crate::utils::config::NAIVE_TIMESTAMP_FORMATS;
use crate::utils::error::ParseError;
use chrono::{DateTime, NaiveDateTime, Utc};
use log::{debug, warn};
use serde::Deserialize;

/// Severity level of a log entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Trace,
    Debug,
    Info,
    Warning,
    Error,
    Critical,
    /// Levels emitted by newer producers; never trace, so always filtered
    Unknown,
}

impl std::str::FromStr for LogLevel {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "off" => Self::Off,
            "trace" => Self::Trace,
            "debug" => Self::Debug,
            "info" => Self::Info,
            "warning" | "warn" => Self::Warning,
            "error" | "err" => Self::Error,
            "critical" => Self::Critical,
            _ => Self::Unknown,
        })
    }
}

/// Log entry exactly as found in the document
#[derive(Debug, Clone, Deserialize)]
struct RawLogRecord {
    time: String,
    level: String,
    name: String,
    message: String,
}

/// Log document: ordered entries under a `log` field
#[derive(Debug, Deserialize)]
struct RawLogDocument {
    log: Vec<RawLogRecord>,
}

/// One decoded log entry
#[derive(Debug, Clone)]
pub struct LogRecord {
    /// Absolute timestamp; monotonicity across the stream is not guaranteed
    pub time: DateTime<Utc>,

    /// Severity level; only trace-level entries carry counter payloads
    pub level: LogLevel,

    /// Source name of the entry (the sink name for file-sink producers)
    pub name: String,

    /// Message text; for trace entries, may be an embedded JSON object
    pub message: String,
}

/// Embedded counter payload of a trace-level message
///
/// Extra payload fields are tolerated and ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct TracePayload {
    /// Channel override; the outer record's `name` is the sink, not the stage
    #[serde(default)]
    pub name: Option<String>,

    /// Current counter value (objects produced, or bytes for memory samplers)
    pub count: u64,
}

/// Result of classifying a message text
#[derive(Debug, Clone)]
pub enum MessagePayload {
    /// Message text is an embedded JSON counter object
    Structured(TracePayload),

    /// Free-form human-readable text
    PlainText,
}

/// A trace event candidate selected from the log, in input order
#[derive(Debug, Clone)]
pub struct CandidateEvent {
    /// Channel the counter belongs to
    pub channel: String,

    /// Counter value
    pub count: u64,

    /// Absolute timestamp inherited from the log entry
    pub time: DateTime<Utc>,
}

/// Decode a complete log document
///
/// **Public** - main entry point for log decoding
///
/// # Arguments
/// * `text` - Full text of the log document (a JSON object with a `log` array)
///
/// # Returns
/// All log entries, decoded and in original order
///
/// # Errors
/// * `ParseError::JsonError` - Document is not valid JSON or entries are
///   missing required fields
/// * `ParseError::InvalidTimestamp` - An entry's `time` field is not in any
///   accepted format
pub fn decode_log(text: &str) -> Result<Vec<LogRecord>, ParseError> {
    let raw: RawLogDocument = serde_json::from_str(text)?;

    debug!("Decoding {} log entries", raw.log.len());

    let mut records = Vec::with_capacity(raw.log.len());
    for (index, entry) in raw.log.into_iter().enumerate() {
        let time = parse_timestamp(&entry.time).ok_or_else(|| ParseError::InvalidTimestamp {
            index,
            value: entry.time.clone(),
        })?;

        // Unknown level names are tolerated; they can never be trace
        let level = entry.level.parse().unwrap_or(LogLevel::Unknown);

        records.push(LogRecord {
            time,
            level,
            name: entry.name,
            message: entry.message,
        });
    }

    Ok(records)
}

/// Select the trace-level counter events from decoded records
///
/// **Public** - second decoding stage, feeds the normalizer
///
/// Non-trace entries and trace entries with plain-text messages are
/// excluded silently; that is normal operation, not an error. A trace
/// message that starts with `{` but does not decode as a counter payload
/// is a structural error: the producer promised a payload and broke it.
///
/// # Returns
/// Candidate events in original log order
///
/// # Errors
/// * `ParseError::InvalidPayload` - Structured-looking message failed to decode
pub fn select_candidates(records: &[LogRecord]) -> Result<Vec<CandidateEvent>, ParseError> {
    let mut candidates = Vec::new();

    for (index, record) in records.iter().enumerate() {
        if record.level != LogLevel::Trace {
            continue;
        }

        match classify_message(&record.message) {
            Ok(MessagePayload::Structured(payload)) => {
                // The payload's own name wins over the outer sink name
                let channel = payload.name.unwrap_or_else(|| record.name.clone());
                candidates.push(CandidateEvent {
                    channel,
                    count: payload.count,
                    time: record.time,
                });
            }
            Ok(MessagePayload::PlainText) => {
                debug!("Skipping plain-text trace entry {}", index);
            }
            Err(e) => {
                warn!("Trace entry {} has a malformed payload: {}", index, e);
                return Err(ParseError::InvalidPayload {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    debug!("Selected {} trace events", candidates.len());

    Ok(candidates)
}

/// Classify a message text as structured payload or plain text
///
/// **Public** - tagged decode step; the decision is made on the first
/// non-whitespace character, the decode on the full text
pub fn classify_message(message: &str) -> Result<MessagePayload, serde_json::Error> {
    if !message.trim_start().starts_with('{') {
        return Ok(MessagePayload::PlainText);
    }

    let payload: TracePayload = serde_json::from_str(message)?;
    Ok(MessagePayload::Structured(payload))
}

/// Parse a timestamp in any accepted format
///
/// **Public** - RFC 3339 first, then the naive formats (assumed UTC)
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_TIMESTAMP_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }

    None
}
