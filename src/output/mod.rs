//! Output generation and formatting

pub mod formatter;
pub mod report;

pub use formatter::ReportRenderer;
pub use report::InterviewReport;
