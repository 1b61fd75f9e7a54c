//! JSON series document writer.
//!
//! Writes SeriesDocument structs to JSON files with proper formatting.

use crate::parser::schema::SeriesDocument;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Write a series document to a JSON file
///
/// **Public** - main entry point for JSON output
///
/// # Arguments
/// * `document` - Series data to write
/// * `output_path` - Path to output JSON file
///
/// # Returns
/// Ok if file written successfully
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::SerializationFailed` - JSON serialization error
/// * `OutputError::InvalidPath` - Path cannot be created or is invalid
pub fn write_series(
    document: &SeriesDocument,
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing series document to: {}", output_path.display());

    // Validate path
    validate_output_path(output_path)?;

    // Create parent directories if needed
    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, document).map_err(OutputError::SerializationFailed)?;

    info!(
        "Series document written successfully ({} bytes)",
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Read a series document from a JSON file
///
/// **Public** - useful for validation and testing
///
/// # Errors
/// * `OutputError::WriteFailed` - File read error (reusing WriteFailed for I/O)
/// * `OutputError::SerializationFailed` - JSON parse error
pub fn read_series(input_path: impl AsRef<Path>) -> Result<SeriesDocument, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading series document from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;

    let document: SeriesDocument =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Series document loaded: version {}, {} channels",
        document.version,
        document.channels.len()
    );

    Ok(document)
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    // Check if we're trying to overwrite a directory
    if path.exists() && path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::schema::{ChannelClass, ChannelSeriesOut, RunMetadata, SeriesPoint};
    use chrono::{TimeZone, Utc};
    use tempfile::NamedTempFile;

    fn create_test_document() -> SeriesDocument {
        SeriesDocument {
            version: "1.0.0".to_string(),
            run: RunMetadata {
                run_start: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
                run_end: Utc.timestamp_opt(1_700_000_010, 0).unwrap(),
                total_duration_secs: 10.0,
            },
            channels: vec![ChannelSeriesOut {
                channel: "crop".to_string(),
                class: ChannelClass::ProductionCount,
                first_offset_secs: 0.0,
                last_offset_secs: 10.0,
                points: vec![
                    SeriesPoint {
                        offset_secs: 0.0,
                        count: 1,
                    },
                    SeriesPoint {
                        offset_secs: 10.0,
                        count: 7,
                    },
                ],
            }],
            generated_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_write_and_read_series() {
        let document = create_test_document();
        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        write_series(&document, path).unwrap();

        let loaded = read_series(path).unwrap();

        assert_eq!(loaded.version, document.version);
        assert_eq!(loaded.run.total_duration_secs, 10.0);
        assert_eq!(loaded.channels.len(), 1);
        assert_eq!(loaded.channels[0].points, document.channels[0].points);
    }

    #[test]
    fn test_validate_output_path_empty() {
        let result = validate_output_path(Path::new(""));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_path_directory() {
        // Try to write to a directory path
        let temp_dir = tempfile::tempdir().unwrap();
        let result = validate_output_path(temp_dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("nested/dirs/series.json");

        let document = create_test_document();
        write_series(&document, &nested_path).unwrap();

        assert!(nested_path.exists());
    }
}
