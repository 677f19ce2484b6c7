//! Reference document loading

use crate::error::{InterviewerError, Result};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use log::{debug, info};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Loads job descriptions and exam guides as plain text.
///
/// Extracted documents are cached by path for the lifetime of the manager.
pub struct InputManager {
    documents: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl InputManager {
    pub fn new() -> Self {
        Self {
            documents: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Extract the text of a reference document.
    ///
    /// Fails if the file is missing, of an unsupported type, unreadable, or
    /// contains no text at all.
    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        if self.enable_cache {
            if let Some(text) = self.documents.get(path) {
                debug!("Reusing extracted text for {}", path.display());
                return Ok(text.clone());
            }
        }

        let text = load_document(path).await?;
        info!("Extracted {} characters from {}", text.chars().count(), path.display());

        if self.enable_cache {
            self.documents.insert(path.to_path_buf(), text.clone());
        }
        Ok(text)
    }

    pub fn cache_size(&self) -> usize {
        self.documents.len()
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

async fn load_document(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(InterviewerError::InvalidInput(format!(
            "Document does not exist: {}",
            path.display()
        )));
    }

    let text = match FileType::from_path(path) {
        FileType::Pdf => PdfExtractor.extract(path).await?,
        FileType::Text => PlainTextExtractor.extract(path).await?,
        FileType::Markdown => MarkdownExtractor.extract(path).await?,
        FileType::Unknown => {
            return Err(InterviewerError::UnsupportedFormat(format!(
                "Expected a PDF, text or markdown document: {}",
                path.display()
            )));
        }
    };

    if text.trim().is_empty() {
        return Err(InterviewerError::Extraction(format!(
            "The document is empty or could not be read: {}",
            path.display()
        )));
    }

    Ok(text)
}
