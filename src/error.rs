//! Error taxonomy for the alerting engine.
//!
//! Only data-access and lookup failures are errors. A value outside its
//! optimal or tolerable band is a classification result, never an error.

use std::path::PathBuf;

use thiserror::Error;

// ---

/// Failure to produce the reading sequence. No partial result is returned.
#[derive(Error, Debug)]
pub enum LoadError {
    // ---
    /// The source file is absent or cannot be opened.
    #[error("failed to read reading source '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source is not well-formed CSV or a row does not fit the schema.
    #[error("malformed reading source: {0}")]
    Malformed(#[from] csv::Error),

    /// The header row lacks one or more canonical columns.
    #[error("reading source is missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<&'static str>),

    /// A metric is `NaN` or infinite.
    #[error("row {row}: column '{column}' is not a finite number: {value}")]
    NonFinite {
        row: usize,
        column: &'static str,
        value: f64,
    },

    /// A row's `time` field does not match the fixed timestamp format.
    #[error(transparent)]
    Timestamp(#[from] TimestampParseError),
}

/// A `time` value that does not satisfy `YYYY-MM-DDTHH:MM:SS.sssZ`.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("row {row}: invalid timestamp '{value}': {source}")]
pub struct TimestampParseError {
    /// 1-based data row number (header excluded).
    pub row: usize,
    pub value: String,
    #[source]
    pub source: chrono::ParseError,
}

/// Lookup of a parameter that is not registered in the catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown parameter '{0}'")]
pub struct UnknownParameter(pub String);
