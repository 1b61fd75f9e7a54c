//! Configuration and constants for the CLI.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Channel names that carry memory samples rather than produced-object counts.
// Every channel not listed here defaults to the production-count class.
pub const RESOURCE_CHANNEL_NAMES: &[&str] = &["heap", "rss"];

// Timestamp formats accepted in log entries, tried after RFC 3339.
// Naive timestamps are interpreted as UTC.
pub const NAIVE_TIMESTAMP_FORMATS: &[&str] =
    &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
