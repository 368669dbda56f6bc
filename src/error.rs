//! Error types for the symdel library.

use std::io;

use thiserror::Error;

/// Errors surfaced by dictionary loading and lookup entry points.
///
/// Absent corrections, empty vocabularies and out-of-range inputs are not
/// errors; those cases produce an empty suggestion list instead.
#[derive(Error, Debug)]
pub enum SymdelError {
    /// I/O failure while streaming a corpus or frequency file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A lookup was requested with parameters the index cannot honor,
    /// e.g. an edit distance above the one the deletes were built for.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SymdelError>;
