//! Error types for ocreval library.

use thiserror::Error;

/// Result type alias for ocreval operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building trees or scoring them.
#[derive(Error, Debug)]
pub enum Error {
    /// A node lacks geometry or text and cannot derive it from its children.
    #[error("Malformed {kind} node: {reason}")]
    MalformedNode {
        /// Kind of the offending node
        kind: String,
        /// What is missing or invalid
        reason: String,
    },

    /// Page dimensions cannot be used for normalization.
    #[error("Page {page} has invalid size {width}x{height}")]
    InvalidPageSize {
        /// 1-indexed page number
        page: u32,
        /// Declared page width
        width: f64,
        /// Declared page height
        height: f64,
    },

    /// A page metric has a zero denominator.
    #[error("Average {metric} is undefined for page {page}")]
    DegenerateInput {
        /// 1-indexed page number
        page: u32,
        /// Name of the undefined metric
        metric: &'static str,
    },

    /// Reference and candidate documents have different page counts.
    #[error("Page count mismatch: reference has {reference} pages, candidate has {candidate}")]
    PageCountMismatch {
        /// Reference page count
        reference: usize,
        /// Candidate page count
        candidate: usize,
    },

    /// The IOU acceptance threshold is outside `[0, 1]`.
    #[error("Invalid IOU threshold: {0} (expected a value in [0, 1])")]
    InvalidThreshold(f64),

    /// Error decoding a document tree from JSON.
    #[error("JSON decoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error while formatting a report.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Create a `MalformedNode` error.
    pub(crate) fn malformed(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedNode {
            kind: kind.into(),
            reason: reason.into(),
        }
    }
}
