//! Interview session state
//!
//! A session is a plain value: every turn consumes it and returns the next
//! state, so handlers never share mutable interview state.

use crate::error::{InterviewerError, Result};
use crate::llm::client::{ChatMessage, Role};
use crate::llm::prompts::{greeting, CLOSING_MESSAGE, CONCLUSION_MESSAGE, DEFAULT_HR_QUESTIONS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewType {
    /// Built-in HR questions
    Standard,
    /// Questions generated from a reference document
    Technical,
}

impl FromStr for InterviewType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" | "hr" => Ok(InterviewType::Standard),
            "technical" | "tech" => Ok(InterviewType::Technical),
            _ => Err(format!("Invalid interview type: {}. Supported: standard, technical", s)),
        }
    }
}

impl fmt::Display for InterviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterviewType::Standard => write!(f, "Standard"),
            InterviewType::Technical => write!(f, "Technical"),
        }
    }
}

/// What the interviewer says next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Turn {
    Question { number: usize, text: String },
    Finished { closing: String },
}

/// A question together with the candidate's answer, if one was given
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub number: usize,
    pub question: String,
    pub answer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSession {
    interview_type: InterviewType,
    questions: Vec<String>,
    question_limit: usize,
    questions_asked: usize,
    language: String,
    history: Vec<ChatMessage>,
    finished: bool,
}

impl InterviewSession {
    /// A standard HR interview over the built-in question set.
    pub fn standard(question_count: usize, language: impl Into<String>) -> Self {
        let questions = DEFAULT_HR_QUESTIONS.iter().map(|q| q.to_string()).collect();
        Self::build(InterviewType::Standard, questions, question_count, language.into())
    }

    /// A technical interview over previously generated questions.
    pub fn technical(questions: Vec<String>, question_count: usize, language: impl Into<String>) -> Result<Self> {
        if questions.is_empty() {
            return Err(InterviewerError::Interview(
                "No technical questions available. Generate questions from a document first.".to_string(),
            ));
        }
        Ok(Self::build(InterviewType::Technical, questions, question_count, language.into()))
    }

    fn build(interview_type: InterviewType, questions: Vec<String>, question_count: usize, language: String) -> Self {
        let question_limit = question_count.min(questions.len());
        Self {
            interview_type,
            questions,
            question_limit,
            questions_asked: 0,
            language,
            history: Vec::new(),
            finished: false,
        }
    }

    /// Open the interview with the greeting.
    pub fn start(mut self) -> Self {
        self.history.push(ChatMessage::assistant(greeting(self.question_limit)));
        self
    }

    /// Ask the next question, or close the interview once the limit is reached.
    pub fn next_turn(mut self) -> (Self, Turn) {
        if self.finished {
            return (
                self,
                Turn::Finished {
                    closing: CLOSING_MESSAGE.to_string(),
                },
            );
        }

        if self.questions_asked >= self.question_limit {
            self.history.push(ChatMessage::assistant(CLOSING_MESSAGE));
            self.history.push(ChatMessage::system(CONCLUSION_MESSAGE));
            self.finished = true;
            return (
                self,
                Turn::Finished {
                    closing: CLOSING_MESSAGE.to_string(),
                },
            );
        }

        let text = self.questions[self.questions_asked].clone();
        self.questions_asked += 1;
        self.history.push(ChatMessage::assistant(text.clone()));

        let number = self.questions_asked;
        (self, Turn::Question { number, text })
    }

    /// Record the candidate's answer to the last question.
    pub fn record_answer(mut self, answer: &str) -> Self {
        self.history.push(ChatMessage::user(answer.trim()));
        self
    }

    pub fn interview_type(&self) -> InterviewType {
        self.interview_type
    }

    pub fn question_limit(&self) -> usize {
        self.question_limit
    }

    pub fn questions_asked(&self) -> usize {
        self.questions_asked
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Pair every asked question with the answer that followed it.
    pub fn exchanges(&self) -> Vec<QaPair> {
        let asked = &self.questions[..self.questions_asked];
        pair_exchanges(&self.history, asked)
    }
}

/// Walk a history and pair each listed question with the next user message.
pub fn pair_exchanges(history: &[ChatMessage], questions: &[String]) -> Vec<QaPair> {
    let mut pairs: Vec<QaPair> = Vec::new();

    for message in history {
        match message.role {
            Role::Assistant if questions.contains(&message.content) => pairs.push(QaPair {
                number: pairs.len() + 1,
                question: message.content.clone(),
                answer: None,
            }),
            Role::User => {
                if let Some(last) = pairs.last_mut().filter(|p| p.answer.is_none()) {
                    last.answer = Some(message.content.clone());
                }
            }
            _ => {}
        }
    }

    pairs
}
