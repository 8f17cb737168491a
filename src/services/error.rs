// src/services/error.rs
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl AnalysisError {
    pub fn invalid(message: impl Into<String>) -> Self {
        AnalysisError::InvalidInput(message.into())
    }
}

pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;
