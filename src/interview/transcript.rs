//! Saving and loading interview transcripts

use crate::error::Result;
use crate::interview::session::{pair_exchanges, QaPair};
use crate::llm::client::{ChatMessage, Role};
use crate::llm::prompts::{CLOSING_MESSAGE, GREETING_OPENING};
use anyhow::Context;
use log::info;
use std::path::{Path, PathBuf};

const INTERVIEWER_PREFIX: &str = "Interviewer: ";
const CANDIDATE_PREFIX: &str = "Candidate: ";

/// Render the non-system part of a history, one speaker line per message.
pub fn render_transcript(history: &[ChatMessage]) -> String {
    history
        .iter()
        .filter_map(|m| match m.role {
            Role::Assistant => Some(format!("{}{}", INTERVIEWER_PREFIX, m.content)),
            Role::User => Some(format!("{}{}", CANDIDATE_PREFIX, m.content)),
            Role::System => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a rendered transcript. Lines without a speaker prefix continue the
/// previous message.
pub fn parse_transcript(text: &str) -> Vec<ChatMessage> {
    let mut messages: Vec<ChatMessage> = Vec::new();

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix(INTERVIEWER_PREFIX) {
            messages.push(ChatMessage::assistant(rest));
        } else if let Some(rest) = line.strip_prefix(CANDIDATE_PREFIX) {
            messages.push(ChatMessage::user(rest));
        } else if let Some(last) = messages.last_mut() {
            last.content.push('\n');
            last.content.push_str(line);
        }
    }

    messages
}

/// Write `history` to `dir/interview_history_<timestamp>.txt`.
pub fn save_transcript(history: &[ChatMessage], dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("interview_history_{}.txt", timestamp));

    std::fs::write(&path, render_transcript(history))?;
    info!("Interview history saved at {}", path.display());
    Ok(path)
}

pub fn load_transcript(path: &Path) -> Result<Vec<ChatMessage>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read transcript {}", path.display()))?;
    Ok(parse_transcript(&text))
}

/// Pair the interview questions in a reloaded transcript with their answers.
///
/// Every interviewer line between the greeting and the closing counts as a
/// question, so a final unanswered question is kept with no answer.
pub fn transcript_exchanges(history: &[ChatMessage]) -> Vec<QaPair> {
    let questions: Vec<String> = history
        .iter()
        .filter(|m| m.role == Role::Assistant)
        .filter(|m| !m.content.starts_with(GREETING_OPENING) && m.content != CLOSING_MESSAGE)
        .map(|m| m.content.clone())
        .collect();

    pair_exchanges(history, &questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn history() -> Vec<ChatMessage> {
        vec![
            ChatMessage::assistant("Hello, I'm an AI HR assistant."),
            ChatMessage::assistant("What are your career goals?"),
            ChatMessage::user("Grow into a staff role.\nAnd mentor others."),
            ChatMessage::assistant("That's all for now. Thank you for your time!"),
            ChatMessage::system("We will review your responses."),
        ]
    }

    #[test]
    fn test_render_skips_system_messages() {
        let text = render_transcript(&history());
        assert!(text.starts_with("Interviewer: Hello"));
        assert!(text.contains("Candidate: Grow into a staff role.\nAnd mentor others."));
        assert!(!text.contains("review your responses"));
    }

    #[test]
    fn test_save_and_load_keep_multiline_answers() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("hr_interviewer");

        let path = save_transcript(&history(), &dir).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("interview_history_") && name.ends_with(".txt"));

        let loaded = load_transcript(&path).unwrap();
        assert_eq!(loaded.len(), 4);
        assert_eq!(loaded[2], ChatMessage::user("Grow into a staff role.\nAnd mentor others."));
    }

    #[test]
    fn test_load_missing_transcript_fails() {
        let temp_dir = TempDir::new().unwrap();
        assert!(load_transcript(&temp_dir.path().join("nope.txt")).is_err());
    }

    #[test]
    fn test_transcript_exchanges_skip_greeting_and_closing() {
        let pairs = transcript_exchanges(&history());
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].question, "What are your career goals?");
        assert_eq!(pairs[0].number, 1);
        assert_eq!(pairs[0].answer.as_deref(), Some("Grow into a staff role.\nAnd mentor others."));
    }

    #[test]
    fn test_transcript_exchanges_keep_unanswered_last_question() {
        let text = "Interviewer: Hello, I'm an AI HR assistant. I will ask you about 2 questions.\n\
Interviewer: Tell me about yourself.\n\
Candidate: I build payment systems.\n\
Interviewer: Why do you want this job?";

        let pairs = transcript_exchanges(&parse_transcript(text));
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[1].question, "Why do you want this job?");
        assert_eq!(pairs[1].answer, None);
    }
}
