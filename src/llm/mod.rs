//! LLM integration module

pub mod assessor;
pub mod client;
pub mod generator;
pub mod prompts;

pub use client::{ChatClient, ChatMessage, OpenAiClient, Role};
pub use generator::{LlmQuestionGenerator, QuestionGenerator};
