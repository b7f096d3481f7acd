//! Error types for the converter.
//!
//! Domain-level leniency (bad entities, odd markup, out-of-order markers) never
//! surfaces here; these variants cover file naming, XML and I/O failures only.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the converter library.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// Source file name does not carry a title number.
    #[error("Invalid source file name: '{0}'. Expected gov.ga.ocga.2018.title.<digits>.xml")]
    InvalidSourceFileName(String),

    /// Title number outside the accepted range.
    #[error("Invalid title number: {0}. Expected a positive integer")]
    InvalidTitleNumber(u32),

    /// Source XML could not be parsed.
    #[error("XML parsing failed")]
    XmlParse(#[from] roxmltree::Error),

    /// Source directory is missing or not a directory.
    #[error("Source directory does not exist: {}", .0.display())]
    SourceDirectory(PathBuf),

    /// Output directory could not be created.
    #[error("Cannot create output directory {}", .path.display())]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a single source file failed.
    #[error("Failed to read {}", .path.display())]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error.
    #[error("IO error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, ConverterError>;

/// Render an error together with every underlying cause, outermost first.
///
/// Variants that wrap a cause keep it out of their own message, so each
/// cause appears exactly once. Used when a title fails so the log line
/// carries the whole chain.
#[must_use]
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        rendered.push_str(": caused by: ");
        rendered.push_str(&cause.to_string());
        current = cause.source();
    }
    rendered
}
