//! Error types for bindery-hierarchy.

use thiserror::Error;

/// Result type for hierarchy-table operations.
pub type Result<T> = std::result::Result<T, HierarchyError>;

/// Errors that can occur while loading a hierarchy file.
#[derive(Error, Debug)]
pub enum HierarchyError {
    /// Failed to read the hierarchy file.
    #[error("Failed to read hierarchy file: {0}")]
    Io(#[from] std::io::Error),

    /// A line did not match the entry grammar.
    #[error("Malformed hierarchy entry at line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}
