//! HR interviewer library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod interview;
pub mod llm;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{InterviewerError, Result};
