//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod derive;

// Re-export main command functions
pub use derive::{derive_run, execute_derive, validate_args, DeriveArgs};
