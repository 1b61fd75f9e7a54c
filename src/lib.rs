//! Pipeline Trace Studio
//!
//! Trace-series derivation and run statistics for the run logs of a
//! multi-stage geometry-processing pipeline.
//!
//! This crate provides the core implementation for the
//! `pipeline-trace` CLI tool: it decodes a structured JSON run log,
//! selects the trace-level counter events, rebases them to a common
//! time origin and groups them into per-channel series ready for
//! plotting or storage.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install pipeline-trace-studio
//! pipeline-trace --help
//! ```

pub mod aggregator;
pub mod commands;
pub mod exporter;
pub mod normalizer;
pub mod output;
pub mod parser;
pub mod utils;
