use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdealRankError {
    /// Malformed input: wrong column count, unparseable cell, bad header.
    #[error("Format error at line {line}: {reason}")]
    Format { line: u64, reason: String },

    #[error("Duplicate candidate identifier '{candidate}' at line {line}")]
    DuplicateKey { candidate: String, line: u64 },

    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// A column with no present value, so no ideal can be derived for it.
    #[error("Insufficient data: attribute column {column} has no values")]
    InsufficientData { column: usize },

    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IdealRankError {
    pub fn format(line: u64, reason: impl Into<String>) -> Self {
        Self::Format { line, reason: reason.into() }
    }

    pub fn dimension(expected: usize, actual: usize, what: &str) -> Self {
        Self::DimensionMismatch(format!("{what}: expected {expected}, got {actual}"))
    }
}

pub type Result<T> = std::result::Result<T, IdealRankError>;
