//! Interview report data structures

use crate::interview::session::{InterviewSession, InterviewType, QaPair};
use crate::interview::transcript::transcript_exchanges;
use crate::llm::assessor::Assessment;
use crate::llm::client::ChatMessage;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Everything a formatter needs to present a finished interview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewReport {
    pub generated_at: DateTime<Local>,
    pub language: String,
    pub interview_type: Option<InterviewType>,
    pub question_count: usize,
    pub answered_count: usize,
    pub exchanges: Vec<QaPair>,
    pub assessment: String,
    pub model_used: Option<String>,
    pub generator_version: String,
}

impl InterviewReport {
    pub fn from_session(session: &InterviewSession, assessment: Assessment) -> Self {
        Self::build(
            session.exchanges(),
            Some(session.interview_type()),
            session.language(),
            assessment,
        )
    }

    /// Build a report from a transcript read back from disk.
    pub fn from_history(history: &[ChatMessage], language: &str, assessment: Assessment) -> Self {
        Self::build(transcript_exchanges(history), None, language, assessment)
    }

    fn build(
        exchanges: Vec<QaPair>,
        interview_type: Option<InterviewType>,
        language: &str,
        assessment: Assessment,
    ) -> Self {
        let answered_count = exchanges.iter().filter(|e| e.answer.is_some()).count();
        Self {
            generated_at: Local::now(),
            language: language.to_string(),
            interview_type,
            question_count: exchanges.len(),
            answered_count,
            exchanges,
            assessment: assessment.text,
            model_used: assessment.model_used,
            generator_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    pub fn completion_rate(&self) -> f32 {
        if self.question_count == 0 {
            0.0
        } else {
            self.answered_count as f32 / self.question_count as f32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_from_session_counts_answers() {
        let session = InterviewSession::standard(2, "English").start();
        let (session, _) = session.next_turn();
        let session = session.record_answer("Backend engineer for six years.");
        let (session, _) = session.next_turn();

        let assessment = Assessment {
            text: "Solid communicator.".to_string(),
            model_used: Some("gpt-4".to_string()),
        };
        let report = InterviewReport::from_session(&session, assessment);

        assert_eq!(report.question_count, 2);
        assert_eq!(report.answered_count, 1);
        assert!((report.completion_rate() - 0.5).abs() < f32::EPSILON);
        assert_eq!(report.interview_type, Some(InterviewType::Standard));
    }

    #[test]
    fn test_session_and_transcript_reports_agree() {
        use crate::interview::transcript::{parse_transcript, render_transcript};

        let session = InterviewSession::standard(3, "English").start();
        let (session, _) = session.next_turn();
        let session = session.record_answer("I lead the payments team.");
        // Input ends before the second question is answered
        let (session, _) = session.next_turn();

        let fallback = || Assessment {
            text: "Summary only.".to_string(),
            model_used: None,
        };
        let live = InterviewReport::from_session(&session, fallback());
        let reloaded = parse_transcript(&render_transcript(session.history()));
        let rebuilt = InterviewReport::from_history(&reloaded, "English", fallback());

        assert_eq!(live.question_count, 2);
        assert_eq!(rebuilt.question_count, live.question_count);
        assert_eq!(rebuilt.answered_count, live.answered_count);
        assert_eq!(rebuilt.exchanges, live.exchanges);
    }

    #[test]
    fn test_empty_report_has_zero_completion() {
        let assessment = Assessment {
            text: String::new(),
            model_used: None,
        };
        let report = InterviewReport::from_history(&[], "English", assessment);
        assert_eq!(report.completion_rate(), 0.0);
    }
}
