//! Log decoding and schema definitions.
//!
//! This module handles:
//! - Parsing the JSON log document
//! - Classifying and decoding trace message payloads
//! - Selecting trace-level counter events
//! - Defining the output series schema

pub mod log_record;
pub mod schema;

// Re-export main types
pub use log_record::{
    classify_message, decode_log, parse_timestamp, select_candidates, CandidateEvent, LogLevel,
    LogRecord, MessagePayload, TracePayload,
};
pub use schema::{ChannelClass, ChannelSeriesOut, RunMetadata, SeriesDocument, SeriesPoint};
