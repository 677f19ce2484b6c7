//! CLI interface for the HR interviewer

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "hr-interviewer")]
#[command(about = "AI-assisted HR interviews grounded in a reference document")]
#[command(long_about = "Generate interview questions from a job description or exam guide, run console interviews, and produce interview reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate interview questions from a reference document
    Generate {
        /// Path to the document (PDF, TXT, MD)
        #[arg(short, long)]
        document: PathBuf,

        /// Total number of questions to generate
        #[arg(short, long)]
        questions: Option<usize>,

        /// Where to write the questions file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Maximum characters per chunk
        #[arg(long)]
        chunk_size: Option<usize>,
    },

    /// Run an interview in the terminal
    Interview {
        /// Interview type: standard, technical
        #[arg(short = 't', long = "type")]
        interview_type: Option<String>,

        /// Number of questions to ask
        #[arg(short, long)]
        questions: Option<usize>,

        /// Questions file for technical interviews (defaults to the configured path)
        #[arg(long)]
        questions_file: Option<PathBuf>,

        /// Interview language
        #[arg(short, long)]
        language: Option<String>,

        /// Report format: console, json, markdown, html
        #[arg(short, long)]
        format: Option<String>,

        /// Skip report generation
        #[arg(long)]
        no_report: bool,
    },

    /// Inspect generated questions
    Questions {
        #[command(subcommand)]
        action: QuestionsAction,
    },

    /// Generate a report from a saved transcript
    Report {
        /// Path to an interview_history_*.txt transcript
        #[arg(short, long)]
        transcript: PathBuf,

        /// Report format: console, json, markdown, html
        #[arg(short, long)]
        format: Option<String>,

        /// Save the report to this file
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum QuestionsAction {
    /// Print the questions file
    Show {
        /// Questions file (defaults to the configured path)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "generation.chunk_size")
        key: String,

        /// Configuration value
        value: String,
    },
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate_command() {
        let cli = Cli::parse_from(["hr-interviewer", "-v", "generate", "-d", "guide.pdf", "-q", "8"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Generate { document, questions, output, chunk_size } => {
                assert_eq!(document, PathBuf::from("guide.pdf"));
                assert_eq!(questions, Some(8));
                assert!(output.is_none());
                assert!(chunk_size.is_none());
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_parse_interview_questions_file() {
        let cli = Cli::parse_from([
            "hr-interviewer",
            "interview",
            "-t",
            "technical",
            "--questions-file",
            "exam/questions.json",
        ]);
        match cli.command {
            Commands::Interview {
                interview_type,
                questions_file,
                no_report,
                ..
            } => {
                assert_eq!(interview_type.as_deref(), Some("technical"));
                assert_eq!(questions_file, Some(PathBuf::from("exam/questions.json")));
                assert!(!no_report);
            }
            _ => panic!("expected interview"),
        }
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("MD"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(Path::new("jd.PDF"), &["pdf", "txt"]).is_ok());
        assert!(validate_file_extension(Path::new("jd.docx"), &["pdf", "txt"]).is_err());
        assert!(validate_file_extension(Path::new("jd"), &["pdf"]).is_err());
    }
}
