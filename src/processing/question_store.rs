//! Persistence of generated question lists

use crate::error::{InterviewerError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// On-disk shapes accepted when reading a questions file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum QuestionsFile {
    List(Vec<String>),
    Wrapped { questions: Vec<String> },
}

pub struct QuestionStore;

impl QuestionStore {
    /// Replace the file at `path` with `questions` as a pretty JSON array.
    ///
    /// The list is written to a sibling temporary file which is then renamed
    /// over the destination, so readers never observe a partial file.
    pub fn write(path: &Path, questions: &[String]) -> Result<()> {
        write_json(path, questions)?;
        debug!("Wrote {} questions to {}", questions.len(), path.display());
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Vec<String>> {
        let questions = match read_json::<QuestionsFile>(path)? {
            QuestionsFile::List(questions) => questions,
            QuestionsFile::Wrapped { questions } => questions,
        };
        Ok(questions)
    }

    /// Like [`QuestionStore::read`] but a missing file reads as no questions.
    pub fn read_or_empty(path: &Path) -> Result<Vec<String>> {
        if path.exists() {
            Self::read(path)
        } else {
            Ok(Vec::new())
        }
    }
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    serde_json::to_writer_pretty(&mut file, value)?;
    file.write_all(b"\n")?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| InterviewerError::Io(e.error))?;
    Ok(())
}

pub fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
