//! Candidate interviews: session state, console driver and transcripts

pub mod console;
pub mod session;
pub mod transcript;

pub use session::{InterviewSession, InterviewType, QaPair, Turn};
