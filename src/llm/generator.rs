//! Per-chunk interview question generation

use crate::llm::client::{ChatClient, ChatMessage};
use crate::llm::prompts::{PromptTemplates, GENERATION_FAILED_PLACEHOLDER};
use log::{debug, warn};
use regex::Regex;
use std::sync::OnceLock;

/// Produces interview questions for one chunk of a document.
///
/// `count` is advisory: implementations may return more or fewer questions.
/// Failures never escape; they are reported in-line as question text.
pub trait QuestionGenerator: Send + Sync {
    fn generate(&self, chunk: &str, count: usize) -> impl std::future::Future<Output = Vec<String>> + Send;
}

/// Question generator backed by a chat-completion model
pub struct LlmQuestionGenerator<C> {
    client: C,
    templates: PromptTemplates,
}

impl<C: ChatClient> LlmQuestionGenerator<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            templates: PromptTemplates::default(),
        }
    }
}

impl<C: ChatClient> QuestionGenerator for LlmQuestionGenerator<C> {
    async fn generate(&self, chunk: &str, count: usize) -> Vec<String> {
        let messages = [
            ChatMessage::system(self.templates.render_question_system(count)),
            ChatMessage::user(self.templates.render_question_request(chunk, count)),
        ];

        debug!("Requesting {} questions from {}", count, self.client.model_name());

        match self.client.complete(&messages).await {
            Ok(text) => {
                let questions = parse_questions(&text);
                if questions.is_empty() {
                    warn!("Model returned no usable questions");
                    return vec![GENERATION_FAILED_PLACEHOLDER.to_string()];
                }
                if questions.len() != count {
                    debug!("Asked for {} questions, received {}", count, questions.len());
                }
                questions
            }
            Err(e) => {
                warn!("Failed to generate questions: {}", e);
                vec![GENERATION_FAILED_PLACEHOLDER.to_string()]
            }
        }
    }
}

fn list_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"^(?:\d{1,3}[.)]|[-*•])\s+").expect("list marker pattern is valid"))
}

/// Split a model response into questions: one per non-empty line, with any
/// leading list numbering or bullet removed.
pub fn parse_questions(response: &str) -> Vec<String> {
    response
        .lines()
        .map(str::trim)
        .map(|line| list_marker().replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}
