//! Output writers for derived series data.
//!
//! This module handles writing series documents to disk as JSON.

pub mod json;

// Re-export main functions
pub use json::{read_series, write_series};
