//! Output formatters for interview reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::InterviewReport;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering interview reports
pub trait OutputFormatter {
    fn format_report(&self, report: &InterviewReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal formatter, optionally colored
pub struct ConsoleFormatter {
    use_colors: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter;

pub struct HtmlFormatter;

/// Dispatches to the formatter for a requested format
pub struct ReportRenderer {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Interview Report</title>
    <style>
        body { font-family: Arial, sans-serif; max-width: 860px; margin: 0 auto; padding: 20px; color: #333; }
        h1 { text-align: center; border-bottom: 3px solid #007acc; padding-bottom: 12px; }
        .meta { text-align: right; color: #666; }
        .exchange { margin: 16px 0; padding: 12px; border-left: 4px solid #17a2b8; background: #f8f9fa; }
        .unanswered { color: #dc3545; font-style: italic; }
        .assessment p { margin: 6px 0; }
    </style>
</head>
<body>
    <h1>Interview Report</h1>
    <p class="meta">Date: {{ generated_at }} | Language: {{ language }}{% if has_type %} | Type: {{ interview_type }}{% endif %}</p>
    <p><strong>Questions answered:</strong> {{ answered_count }} / {{ question_count }}</p>

    <h2>Interview History</h2>
    {% for ex in exchanges %}
    <div class="exchange">
        <h3>Q{{ ex.number }}. {{ ex.question }}</h3>
        {% if ex.answered %}<p>{{ ex.answer }}</p>{% else %}<p class="unanswered">No answer given</p>{% endif %}
    </div>
    {% endfor %}

    <h2>Assessment</h2>
    <div class="assessment">
        {% for paragraph in assessment_paragraphs %}<p>{{ paragraph }}</p>
        {% endfor %}
    </div>
    <p class="meta">Generated by HR Interviewer v{{ version }}{% if has_model %} using {{ model }}{% endif %}</p>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    generated_at: String,
    language: String,
    has_type: bool,
    interview_type: String,
    answered_count: usize,
    question_count: usize,
    exchanges: Vec<HtmlExchange>,
    assessment_paragraphs: Vec<String>,
    has_model: bool,
    model: String,
    version: String,
}

struct HtmlExchange {
    number: usize,
    question: String,
    answered: bool,
    answer: String,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).bold().to_string()
        } else {
            text.to_string()
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &InterviewReport) -> Result<String> {
        let mut out = String::new();

        out.push_str(&self.paint("INTERVIEW REPORT", Color::Cyan));
        out.push('\n');
        out.push_str(&"=".repeat(50));
        out.push('\n');
        out.push_str(&format!("Date: {}\n", report.generated_at.format("%Y-%m-%d %H:%M")));
        out.push_str(&format!("Language: {}\n", report.language));
        if let Some(kind) = report.interview_type {
            out.push_str(&format!("Interview type: {}\n", kind));
        }
        out.push_str(&format!(
            "Questions answered: {}/{} ({:.0}%)\n\n",
            report.answered_count,
            report.question_count,
            report.completion_rate() * 100.0
        ));

        out.push_str(&self.paint("INTERVIEW HISTORY", Color::Cyan));
        out.push('\n');
        out.push_str(&"-".repeat(20));
        out.push('\n');
        for exchange in &report.exchanges {
            out.push_str(&format!("{} {}\n", self.paint(&format!("Q{}.", exchange.number), Color::Yellow), exchange.question));
            match &exchange.answer {
                Some(answer) => out.push_str(&format!("   {}\n", answer)),
                None => out.push_str(&format!("   {}\n", self.paint("(no answer)", Color::Red))),
            }
        }
        out.push('\n');

        out.push_str(&self.paint("ASSESSMENT", Color::Cyan));
        out.push('\n');
        out.push_str(&"-".repeat(20));
        out.push('\n');
        out.push_str(&report.assessment);
        out.push_str("\n\n");

        out.push_str(&"=".repeat(50));
        out.push('\n');
        out.push_str(&format!(
            "Generated by HR Interviewer v{} ({})\n",
            report.generator_version,
            report.model_used.as_deref().unwrap_or("no model")
        ));

        Ok(out)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &InterviewReport) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)?
        } else {
            serde_json::to_string(report)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &InterviewReport) -> Result<String> {
        let mut md = String::new();

        md.push_str("# Interview Report\n\n");
        md.push_str(&format!("**Date:** {}  \n", report.generated_at.format("%Y-%m-%d")));
        md.push_str(&format!("**Language:** {}  \n", report.language));
        if let Some(kind) = report.interview_type {
            md.push_str(&format!("**Interview type:** {}  \n", kind));
        }
        md.push_str(&format!(
            "**Questions answered:** {}/{}\n\n",
            report.answered_count, report.question_count
        ));

        md.push_str("## Interview History\n\n");
        for exchange in &report.exchanges {
            md.push_str(&format!("### Q{}. {}\n\n", exchange.number, exchange.question));
            match &exchange.answer {
                Some(answer) => md.push_str(&format!("{}\n\n", answer)),
                None => md.push_str("_No answer given._\n\n"),
            }
        }

        md.push_str("## Assessment\n\n");
        md.push_str(&report.assessment);
        md.push_str("\n\n---\n");
        md.push_str(&format!("*Generated by HR Interviewer v{}*\n", report.generator_version));

        Ok(md)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &InterviewReport) -> Result<String> {
        let template = HtmlTemplate {
            generated_at: report.generated_at.format("%Y-%m-%d %H:%M").to_string(),
            language: report.language.clone(),
            has_type: report.interview_type.is_some(),
            interview_type: report.interview_type.map(|t| t.to_string()).unwrap_or_default(),
            answered_count: report.answered_count,
            question_count: report.question_count,
            exchanges: report
                .exchanges
                .iter()
                .map(|e| HtmlExchange {
                    number: e.number,
                    question: e.question.clone(),
                    answered: e.answer.is_some(),
                    answer: e.answer.clone().unwrap_or_default(),
                })
                .collect(),
            assessment_paragraphs: report
                .assessment
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
            has_model: report.model_used.is_some(),
            model: report.model_used.clone().unwrap_or_default(),
            version: report.generator_version.clone(),
        };

        Ok(template.render()?)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportRenderer {
    pub fn new(use_colors: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter,
            html_formatter: HtmlFormatter,
        }
    }

    pub fn render(&self, report: &InterviewReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Local::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("interview_report{}.{}", timestamp_suffix, extension)
}
