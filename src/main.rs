//! HR interviewer: document-grounded interview questions, console interviews and reports

use clap::Parser;
use colored::Colorize;
use hr_interviewer::cli::{self, Cli, Commands, ConfigAction, QuestionsAction};
use hr_interviewer::config::{Config, OutputFormat};
use hr_interviewer::error::{InterviewerError, Result};
use hr_interviewer::input::InputManager;
use hr_interviewer::interview::console::run_console_interview;
use hr_interviewer::interview::transcript::{load_transcript, save_transcript};
use hr_interviewer::interview::{InterviewSession, InterviewType};
use hr_interviewer::llm::assessor::InterviewAssessor;
use hr_interviewer::llm::{LlmQuestionGenerator, OpenAiClient};
use hr_interviewer::output::formatter::{save_report_to_file, suggest_filename};
use hr_interviewer::output::{InterviewReport, ReportRenderer};
use hr_interviewer::processing::{GenerationOutcome, PipelineStage, QuestionPipeline, QuestionStore};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::Path;
use std::process;
use std::sync::atomic::Ordering;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if !config.output.color_output {
        colored::control::set_override(false);
    }

    // Execute command
    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Generate {
            document,
            questions,
            output,
            chunk_size,
        } => {
            cli::validate_file_extension(&document, &["pdf", "txt", "md", "markdown"])
                .map_err(|e| InterviewerError::InvalidInput(format!("Document: {}", e)))?;

            let total = questions.unwrap_or(config.generation.default_question_count);
            let destination = output.unwrap_or_else(|| config.generation.questions_path.clone());
            let chunk_size = chunk_size.unwrap_or(config.generation.chunk_size);

            println!("📄 Document: {}", document.display());
            println!("❓ Questions requested: {}", total);
            println!("✂️  Chunk size: {} characters", chunk_size);

            let client = OpenAiClient::from_config(&config.llm)?;
            println!("🤖 Model: {}", config.llm.model);

            generate_questions(client, &document, total, chunk_size, &destination, &config).await
        }

        Commands::Interview {
            interview_type,
            questions,
            questions_file,
            language,
            format,
            no_report,
        } => {
            let interview_type = match interview_type {
                Some(t) => t.parse::<InterviewType>().map_err(InterviewerError::InvalidInput)?,
                None => config.interview.interview_type,
            };
            let count = questions.unwrap_or(config.interview.question_count);
            let language = language.unwrap_or_else(|| config.interview.language.clone());
            let format = resolve_format(format.as_deref(), &config)?;

            let session = match interview_type {
                InterviewType::Standard => InterviewSession::standard(count, language.clone()),
                InterviewType::Technical => {
                    let path = questions_file.unwrap_or_else(|| config.generation.questions_path.clone());
                    let questions = QuestionStore::read_or_empty(&path)?;
                    info!("Loaded {} technical questions from {}", questions.len(), path.display());
                    InterviewSession::technical(questions, count, language.clone())?
                }
            };

            println!(
                "🎙️  {} interview, {} questions, in {}\n",
                interview_type,
                session.question_limit(),
                language
            );

            let stdin = std::io::stdin();
            let mut input = stdin.lock();
            let mut out = std::io::stdout();
            let session = run_console_interview(session, &mut input, &mut out)?;

            let transcript_path = save_transcript(session.history(), &config.interview.output_dir)?;
            println!("\n💾 Transcript saved to {}", transcript_path.display());

            if no_report {
                return Ok(());
            }

            println!("📝 Preparing report...");
            let assessor = InterviewAssessor::new(optional_client(&config));
            let assessment = assessor.assess(session.history(), &language).await;
            let report = InterviewReport::from_session(&session, assessment);

            let save_path = config.interview.output_dir.join(suggest_filename(format, true));
            emit_report(&report, format, Some(&save_path), &config)
        }

        Commands::Questions { action } => match action {
            QuestionsAction::Show { file } => {
                let path = file.unwrap_or_else(|| config.generation.questions_path.clone());
                let questions = QuestionStore::read(&path)?;

                println!("📚 {} questions in {}\n", questions.len(), path.display());
                for (i, question) in questions.iter().enumerate() {
                    println!("  {}. {}", i + 1, question);
                }
                Ok(())
            }
        },

        Commands::Report {
            transcript,
            format,
            save,
        } => {
            let format = resolve_format(format.as_deref(), &config)?;
            let history = load_transcript(&transcript)?;
            if history.is_empty() {
                return Err(InterviewerError::InvalidInput(format!(
                    "Transcript has no messages: {}",
                    transcript.display()
                )));
            }

            let language = &config.interview.language;
            let assessor = InterviewAssessor::new(optional_client(&config));
            let assessment = assessor.assess(&history, language).await;
            let report = InterviewReport::from_history(&history, language, assessment);

            emit_report(&report, format, save.as_deref(), &config)
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration ({})\n", config_path.display());
                let text = toml::to_string_pretty(&config)
                    .map_err(|e| InterviewerError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("{}", text);
                Ok(())
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save_to(config_path)?;
                println!("✅ Configuration reset successfully!");
                Ok(())
            }

            Some(ConfigAction::Set { key, value }) => {
                let mut config = config;
                config.set_value(&key, &value)?;
                config.save_to(config_path)?;
                println!("✅ Set {} = {}", key, value);
                Ok(())
            }
        },
    }
}

async fn generate_questions(
    client: OpenAiClient,
    document: &Path,
    total: usize,
    chunk_size: usize,
    destination: &Path,
    config: &Config,
) -> Result<()> {
    let progress = ProgressBar::new(0);
    let style = ProgressStyle::with_template("{spinner} [{bar:30}] {pos}/{len} {msg}")
        .map(|style| style.progress_chars("#>-"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress.set_style(style);

    let bar = progress.clone();
    let pipeline = QuestionPipeline::new(LlmQuestionGenerator::new(client), chunk_size)
        .with_concurrency(config.generation.max_concurrent_requests)
        .with_observer(move |stage| match stage {
            PipelineStage::Extracting => bar.set_message("extracting text"),
            PipelineStage::Allocating { chunks } => {
                bar.set_length(*chunks as u64);
                bar.set_message(format!("{} chunks", chunks));
            }
            PipelineStage::Requesting {
                chunk,
                total_chunks,
                count,
            } => {
                bar.set_position(*chunk as u64);
                bar.set_message(format!("chunk {}/{} ({} questions)", chunk + 1, total_chunks, count));
            }
            PipelineStage::Aggregating => bar.set_position(bar.length().unwrap_or(0)),
            _ => {}
        });

    let cancel = pipeline.cancel_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after the current chunk");
            cancel.store(true, Ordering::SeqCst);
        }
    });

    let mut input = InputManager::new();
    let outcome = pipeline.run_document(&mut input, document, total, destination).await;
    progress.finish_and_clear();

    match outcome? {
        GenerationOutcome::Persisted { questions, path } => {
            println!("\n✅ {} questions generated and saved to {}", questions.len(), path.display());
            for (i, question) in questions.iter().enumerate() {
                println!("  {}. {}", i + 1, question);
            }
        }
        GenerationOutcome::NoQuestions => {
            println!(
                "\n⚠️  No questions were produced from the document; {} left unchanged",
                destination.display()
            );
        }
        GenerationOutcome::Cancelled => {
            println!("\n⛔ Generation cancelled; {} left unchanged", destination.display());
        }
    }

    Ok(())
}

fn optional_client(config: &Config) -> Option<OpenAiClient> {
    match OpenAiClient::from_config(&config.llm) {
        Ok(client) => Some(client),
        Err(e) => {
            warn!("{} A fallback report will be written.", e);
            None
        }
    }
}

fn resolve_format(requested: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(InterviewerError::InvalidInput),
        None => Ok(config.output.format),
    }
}

fn emit_report(report: &InterviewReport, format: OutputFormat, save: Option<&Path>, config: &Config) -> Result<()> {
    let display = ReportRenderer::new(config.output.color_output).render(report, format)?;
    println!("\n{}", display);

    if let Some(path) = save {
        let plain = ReportRenderer::new(false).render(report, format)?;
        save_report_to_file(&plain, path)?;
        println!("{} {}", "📁 Report saved to".green(), path.display());
    }

    Ok(())
}
