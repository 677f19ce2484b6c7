//! Prompt templates for question generation, interviews and reports

/// Prompt templates with `{placeholder}` substitution
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub question_system: String,
    pub question_request: String,
    pub report_system: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            question_system: QUESTION_SYSTEM_TEMPLATE.to_string(),
            question_request: QUESTION_REQUEST_TEMPLATE.to_string(),
            report_system: REPORT_SYSTEM_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    pub fn render_question_system(&self, count: usize) -> String {
        self.question_system.replace("{count}", &count.to_string())
    }

    pub fn render_question_request(&self, chunk: &str, count: usize) -> String {
        self.question_request
            .replace("{count}", &count.to_string())
            .replace("{content}", chunk)
    }

    pub fn render_report_system(&self, language: &str, date: &str) -> String {
        self.report_system
            .replace("{language}", language)
            .replace("{date}", date)
    }
}

const QUESTION_SYSTEM_TEMPLATE: &str = "You are an expert interviewer who generates concise technical interview questions. \
Produce exactly {count} interview questions, one per line. \
Do not number or enumerate the questions. Answer only with questions.";

const QUESTION_REQUEST_TEMPLATE: &str = "Based on the following content, generate {count} technical interview questions:\n{content}";

const REPORT_SYSTEM_TEMPLATE: &str = r#"You are an HR professional preparing a report in {language}.
Prepare a brief report in {language} based strictly on the interview history provided by the user.
Date: {date}

Report Structure:

Candidate Overview:
- Name (if provided)
- Position applied for (if discernible)

Assessment Summary:
- Key strengths based on the interview
- Areas of concern or further development
- Overall suitability for the role based on the responses

Candidate's Responses:
- Communication skills
- Problem-solving abilities
- Behavioral traits observed

Recommendations:
- Next steps in the hiring process
- Any specific training or development if the candidate were to be hired

Ensure all sections are concise, focused, and evidence-based.
Avoid making assumptions and base any conclusions on the facts derived from the interview."#;

/// Built-in questions for standard HR interviews
pub const DEFAULT_HR_QUESTIONS: [&str; 10] = [
    "Can you please introduce yourself and share a bit about your professional background?",
    "What are your career goals for the next few years?",
    "Why did you apply for this position, and what excites you about this role?",
    "Can you describe a challenging situation you've faced at work and how you handled it?",
    "How do you prioritize tasks when you have multiple deadlines to meet?",
    "Can you provide an example of a time when you worked in a team to achieve a common goal?",
    "What is your preferred style of communication when working with your team or manager?",
    "How do you handle constructive feedback and what's a time you've grown from it?",
    "What do you consider your greatest strengths and areas for improvement?",
    "Is there anything you'd like to ask us or share that wasn't covered in the interview?",
];

/// Placeholder used when a question request fails
pub const GENERATION_FAILED_PLACEHOLDER: &str = "An error occurred while generating questions.";

pub const CLOSING_MESSAGE: &str = "That's all for now. Thank you for your time!";

pub const CONCLUSION_MESSAGE: &str =
    "Thank you for being here. We will review your responses and provide feedback soon.";

/// Opening words of every interview greeting
pub const GREETING_OPENING: &str = "Hello, I'm an AI HR assistant.";

pub fn greeting(question_count: usize) -> String {
    format!(
        "{} I'll be conducting this interview. \
I will ask you about {} questions. \
Please answer truthfully and to the best of your ability.",
        GREETING_OPENING, question_count
    )
}
