use crate::oracle::OracleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QtspError {
    #[error("Invalid Input: expected {expected} segment weights, got {found}")]
    InvalidInputLength { expected: usize, found: usize },

    #[error("Invalid Number: '{token}' (token {position})")]
    MalformedNumericInput { token: String, position: usize },

    #[error("Length Mismatch: {costs} segment costs but {usage} usage flags")]
    LengthMismatch { costs: usize, usage: usize },

    #[error("Invalid Pattern: {0}")]
    MalformedPattern(String),

    #[error("Oracle Failure: {0}")]
    Oracle(#[from] OracleError),

    #[error("Configuration Error: {0}")]
    Config(String),

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV Error: {0}")]
    Csv(#[from] csv::Error),
}

impl QtspError {
    /// True for errors caused by the caller's input rather than the run itself.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInputLength { .. }
                | Self::MalformedNumericInput { .. }
                | Self::MalformedPattern(_)
                | Self::Config(_)
        )
    }
}

pub type QtspResult<T> = Result<T, QtspError>;
