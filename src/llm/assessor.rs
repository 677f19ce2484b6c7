//! LLM-based assessment of a finished interview

use crate::llm::client::{ChatClient, ChatMessage, Role};
use crate::llm::prompts::PromptTemplates;
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Free-text assessment of a candidate, plus the model that wrote it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub text: String,
    pub model_used: Option<String>,
}

/// Writes HR reports from interview histories.
///
/// Without a client, or when the client fails, a fallback assessment built
/// from the transcript alone is returned.
pub struct InterviewAssessor<C> {
    client: Option<C>,
    templates: PromptTemplates,
}

impl<C: ChatClient> InterviewAssessor<C> {
    pub fn new(client: Option<C>) -> Self {
        Self {
            client,
            templates: PromptTemplates::default(),
        }
    }

    pub async fn assess(&self, history: &[ChatMessage], language: &str) -> Assessment {
        let transcript = transcript_text(history);

        let Some(client) = &self.client else {
            info!("No language model configured, writing fallback report");
            return fallback_assessment(&transcript, language);
        };

        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        let messages = [
            ChatMessage::system(self.templates.render_report_system(language, &date)),
            ChatMessage::user(format!(
                "Please provide an HR report based on the interview in {}. Interview history:\n{}",
                language, transcript
            )),
        ];

        match client.complete(&messages).await {
            Ok(text) => Assessment {
                text,
                model_used: Some(client.model_name().to_string()),
            },
            Err(e) => {
                warn!("Report generation failed, using fallback: {}", e);
                fallback_assessment(&transcript, language)
            }
        }
    }
}

fn transcript_text(history: &[ChatMessage]) -> String {
    history
        .iter()
        .filter(|m| m.role != Role::System)
        .map(|m| match m.role {
            Role::User => format!("Candidate: {}", m.content),
            _ => format!("Interviewer: {}", m.content),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn fallback_assessment(transcript: &str, language: &str) -> Assessment {
    let text = format!(
        "HR Report in {}:\nInterview Summary:\n{}\n\nAssessment:\n\
Based on the responses, the candidate's strengths, areas for improvement, and overall fit for the role have been noted. \
No model-based assessment was available for this interview.",
        language, transcript
    );
    Assessment { text, model_used: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InterviewerError, Result};

    struct FixedClient(Option<&'static str>);

    impl ChatClient for FixedClient {
        async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
            assert!(messages[1].content.contains("Candidate: I build compilers."));
            assert!(!messages[1].content.contains("review your responses"));
            self.0
                .map(str::to_string)
                .ok_or_else(|| InterviewerError::Llm("HTTP 500: boom".into()))
        }

        fn model_name(&self) -> &str {
            "fixed-model"
        }
    }

    fn history() -> Vec<ChatMessage> {
        vec![
            ChatMessage::assistant("Tell me about yourself."),
            ChatMessage::user("I build compilers."),
            ChatMessage::system("Thank you for being here. We will review your responses and provide feedback soon."),
        ]
    }

    #[tokio::test]
    async fn test_assess_uses_model_output() {
        let assessor = InterviewAssessor::new(Some(FixedClient(Some("Strong candidate."))));
        let assessment = assessor.assess(&history(), "English").await;

        assert_eq!(assessment.text, "Strong candidate.");
        assert_eq!(assessment.model_used.as_deref(), Some("fixed-model"));
    }

    #[tokio::test]
    async fn test_assess_falls_back_on_failure() {
        let assessor = InterviewAssessor::new(Some(FixedClient(None)));
        let assessment = assessor.assess(&history(), "French").await;

        assert!(assessment.text.starts_with("HR Report in French:"));
        assert!(assessment.text.contains("Candidate: I build compilers."));
        assert!(assessment.model_used.is_none());
    }

    #[tokio::test]
    async fn test_assess_without_client() {
        let assessor: InterviewAssessor<FixedClient> = InterviewAssessor::new(None);
        let assessment = assessor.assess(&history(), "English").await;
        assert!(assessment.text.contains("Interviewer: Tell me about yourself."));
    }
}
