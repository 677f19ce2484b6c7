//! Configuration management for the HR interviewer

use crate::error::{InterviewerError, Result};
use crate::interview::session::InterviewType;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub llm: LlmConfig,
    pub generation: GenerationConfig,
    pub interview: InterviewConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_backoff_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub chunk_size: usize,
    pub default_question_count: usize,
    pub questions_path: PathBuf,
    pub max_concurrent_requests: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewConfig {
    pub question_count: usize,
    pub interview_type: InterviewType,
    pub language: String,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                base_url: "https://api.openai.com".to_string(),
                model: "gpt-4".to_string(),
                api_key_env: "OPENAI_API_KEY".to_string(),
                temperature: 0.7,
                max_tokens: 750,
                timeout_secs: 60,
                max_retries: 2,
                retry_backoff_ms: 500,
            },
            generation: GenerationConfig {
                chunk_size: 2000,
                default_question_count: 5,
                questions_path: PathBuf::from("questions.json"),
                max_concurrent_requests: 1,
            },
            interview: InterviewConfig {
                question_count: 5,
                interview_type: InterviewType::Standard,
                language: "English".to_string(),
                output_dir: PathBuf::from("hr_interviewer"),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| InterviewerError::Configuration(format!("Failed to parse config: {}", e)))?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| InterviewerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("hr-interviewer")
            .join("config.toml")
    }

    /// Set a dotted key such as `generation.chunk_size`.
    ///
    /// The new value is parsed according to the type of the value it replaces,
    /// and the result must still deserialize into a valid `Config`.
    pub fn set_value(&mut self, key: &str, raw: &str) -> Result<()> {
        let mut root = toml::Value::try_from(&*self)
            .map_err(|e| InterviewerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        let mut slot = &mut root;
        for part in key.split('.') {
            slot = slot
                .get_mut(part)
                .ok_or_else(|| InterviewerError::Configuration(format!("Unknown configuration key: {}", key)))?;
        }

        let value = parse_like(slot, raw).ok_or_else(|| {
            InterviewerError::Configuration(format!(
                "Invalid value '{}' for {} (expected {})",
                raw,
                key,
                slot.type_str()
            ))
        })?;
        *slot = value;

        let updated: Config = root
            .try_into()
            .map_err(|e| InterviewerError::Configuration(format!("Invalid value for {}: {}", key, e)))?;
        *self = updated;
        Ok(())
    }
}

fn parse_like(current: &toml::Value, raw: &str) -> Option<toml::Value> {
    match current {
        toml::Value::String(_) => Some(toml::Value::String(raw.to_string())),
        toml::Value::Integer(_) => raw.parse::<i64>().ok().map(toml::Value::Integer),
        toml::Value::Float(_) => raw.parse::<f64>().ok().map(toml::Value::Float),
        toml::Value::Boolean(_) => raw.parse::<bool>().ok().map(toml::Value::Boolean),
        _ => None,
    }
}
