//! Error handling for the HR interviewer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterviewerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Text extraction error: {0}")]
    Extraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("LLM request failed: {0}")]
    Llm(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Interview error: {0}")]
    Interview(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, InterviewerError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for InterviewerError {
    fn from(err: anyhow::Error) -> Self {
        InterviewerError::Interview(err.to_string())
    }
}

impl From<askama::Error> for InterviewerError {
    fn from(err: askama::Error) -> Self {
        InterviewerError::OutputFormatting(err.to_string())
    }
}

impl InterviewerError {
    /// Whether a failed LLM call is worth repeating.
    pub fn is_transient(&self) -> bool {
        match self {
            InterviewerError::Network(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            InterviewerError::Llm(msg) => msg.starts_with("HTTP 429") || msg.starts_with("HTTP 5"),
            _ => false,
        }
    }
}
