//! Document-to-questions generation pipeline
//!
//! `Extracting -> Chunking -> Allocating -> Requesting* -> Aggregating ->
//! Persisted | Failed`. Requests for different chunks are independent; the
//! final list is always ordered by chunk, then by position within the chunk.

use crate::error::Result;
use crate::input::InputManager;
use crate::llm::generator::QuestionGenerator;
use crate::processing::allocator::allocate;
use crate::processing::chunker::chunk_text;
use crate::processing::question_store::QuestionStore;
use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineStage {
    Extracting,
    Chunking,
    Allocating { chunks: usize },
    Requesting { chunk: usize, total_chunks: usize, count: usize },
    Aggregating,
    Persisted { questions: usize },
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Questions were written to `path`
    Persisted { questions: Vec<String>, path: PathBuf },
    /// Nothing to write; the destination was left untouched
    NoQuestions,
    /// The run was abandoned between chunks; nothing was written
    Cancelled,
}

type StageObserver = Box<dyn Fn(&PipelineStage) + Send + Sync>;

pub struct QuestionPipeline<G> {
    generator: G,
    chunk_size: usize,
    max_concurrent: usize,
    cancel: Arc<AtomicBool>,
    observer: Option<StageObserver>,
}

impl<G: QuestionGenerator> QuestionPipeline<G> {
    pub fn new(generator: G, chunk_size: usize) -> Self {
        Self {
            generator,
            chunk_size,
            max_concurrent: 1,
            cancel: Arc::new(AtomicBool::new(false)),
            observer: None,
        }
    }

    /// Allow up to `limit` chunk requests in flight at once.
    pub fn with_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrent = limit.max(1);
        self
    }

    pub fn with_observer(mut self, observer: impl Fn(&PipelineStage) + Send + Sync + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Share an externally owned cancellation flag.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = flag;
        self
    }

    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    fn notify(&self, stage: &PipelineStage) {
        if let Some(observer) = &self.observer {
            observer(stage);
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    /// Chunk `text`, spread `total` questions over the chunks and request
    /// them. Returns `None` if the run was cancelled.
    pub async fn collect_questions(&self, text: &str, total: usize) -> Option<Vec<String>> {
        self.notify(&PipelineStage::Chunking);
        let chunks = chunk_text(text, self.chunk_size);
        let total_chunks = chunks.len();

        let allocation = allocate(total_chunks, total);
        self.notify(&PipelineStage::Allocating { chunks: total_chunks });
        info!("Split document into {} chunks, allocation {:?}", total_chunks, allocation);

        let requests: Vec<(usize, &str, usize)> = chunks
            .iter()
            .zip(allocation)
            .enumerate()
            .filter(|(_, (_, count))| *count > 0)
            .map(|(index, (chunk, count))| (index, chunk.as_str(), count))
            .collect();

        // `buffered` yields results in request order regardless of completion order
        let per_chunk: Vec<Option<Vec<String>>> = stream::iter(requests)
            .map(|(index, chunk, count)| async move {
                if self.is_cancelled() {
                    return None;
                }
                self.notify(&PipelineStage::Requesting {
                    chunk: index,
                    total_chunks,
                    count,
                });
                debug!("Processing chunk {} of {} ({} questions)", index + 1, total_chunks, count);
                Some(self.generator.generate(chunk, count).await)
            })
            .buffered(self.max_concurrent)
            .collect()
            .await;

        self.notify(&PipelineStage::Aggregating);
        let mut questions = Vec::new();
        for result in per_chunk {
            questions.extend(result?);
        }
        Some(questions)
    }

    /// Generate questions from `text` and persist them to `destination`.
    ///
    /// The destination is only written when at least one question was
    /// produced and the run was not cancelled.
    pub async fn run(&self, text: &str, total: usize, destination: &Path) -> Result<GenerationOutcome> {
        let Some(questions) = self.collect_questions(text, total).await else {
            info!("Question generation cancelled, nothing written");
            return Ok(GenerationOutcome::Cancelled);
        };

        if questions.is_empty() {
            warn!("No questions were produced, {} left untouched", destination.display());
            return Ok(GenerationOutcome::NoQuestions);
        }

        if let Err(e) = QuestionStore::write(destination, &questions) {
            self.notify(&PipelineStage::Failed);
            return Err(e);
        }

        info!("Saved {} questions to {}", questions.len(), destination.display());
        self.notify(&PipelineStage::Persisted {
            questions: questions.len(),
        });

        Ok(GenerationOutcome::Persisted {
            questions,
            path: destination.to_path_buf(),
        })
    }

    /// Extract `document` and run the pipeline on its text.
    ///
    /// Extraction failures abort the run before any chunk is requested.
    pub async fn run_document(
        &self,
        input: &mut InputManager,
        document: &Path,
        total: usize,
        destination: &Path,
    ) -> Result<GenerationOutcome> {
        self.notify(&PipelineStage::Extracting);

        let text = match input.extract_text(document).await {
            Ok(text) => text,
            Err(e) => {
                self.notify(&PipelineStage::Failed);
                return Err(e);
            }
        };

        self.run(&text, total, destination).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;
    use tempfile::TempDir;

    /// Returns `count` questions naming the first word of the chunk
    #[derive(Default)]
    struct EchoGenerator {
        calls: Mutex<Vec<(String, usize)>>,
    }

    impl QuestionGenerator for EchoGenerator {
        async fn generate(&self, chunk: &str, count: usize) -> Vec<String> {
            self.calls.lock().unwrap().push((chunk.to_string(), count));
            let head = chunk.split(' ').next().unwrap_or_default();
            (1..=count).map(|i| format!("{} question {}?", head, i)).collect()
        }
    }

    struct SilentGenerator;

    impl QuestionGenerator for SilentGenerator {
        async fn generate(&self, _chunk: &str, _count: usize) -> Vec<String> {
            Vec::new()
        }
    }

    /// Earlier chunks answer slower than later ones
    struct SlowStartGenerator;

    impl QuestionGenerator for SlowStartGenerator {
        async fn generate(&self, chunk: &str, _count: usize) -> Vec<String> {
            let delay: u64 = chunk.trim_start_matches('w').parse().unwrap_or(0);
            tokio::time::sleep(Duration::from_millis(50 - delay * 10)).await;
            vec![format!("from {}", chunk)]
        }
    }

    /// Flags cancellation while answering the first chunk
    struct CancellingGenerator {
        flag: Arc<AtomicBool>,
    }

    impl QuestionGenerator for CancellingGenerator {
        async fn generate(&self, chunk: &str, _count: usize) -> Vec<String> {
            self.flag.store(true, Ordering::SeqCst);
            vec![format!("about {}", chunk)]
        }
    }

    // Five 5-character words; a budget of 5 gives one chunk per word
    const FIVE_CHUNKS: &str = "alpha bravo charl delta echoo";

    #[tokio::test]
    async fn test_results_follow_chunk_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("questions.json");
        let pipeline = QuestionPipeline::new(EchoGenerator::default(), 5);

        let outcome = pipeline.run(FIVE_CHUNKS, 7, &path).await.unwrap();

        let expected = vec![
            "alpha question 1?", "alpha question 2?",
            "bravo question 1?", "bravo question 2?",
            "charl question 1?", "delta question 1?", "echoo question 1?",
        ];
        assert_eq!(
            outcome,
            GenerationOutcome::Persisted {
                questions: expected.iter().map(|s| s.to_string()).collect(),
                path: path.clone(),
            }
        );
        assert_eq!(QuestionStore::read(&path).unwrap(), expected);
    }

    #[tokio::test]
    async fn test_zero_allocations_are_not_requested() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("questions.json");
        let pipeline = QuestionPipeline::new(EchoGenerator::default(), 5);

        pipeline.run(FIVE_CHUNKS, 2, &path).await.unwrap();

        let calls = pipeline.generator.calls.lock().unwrap();
        assert_eq!(*calls, vec![("alpha".to_string(), 1), ("bravo".to_string(), 1)]);
    }

    #[tokio::test]
    async fn test_empty_results_leave_destination_untouched() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("questions.json");
        std::fs::write(&path, "[\"previous question?\"]").unwrap();

        let pipeline = QuestionPipeline::new(SilentGenerator, 5);
        let outcome = pipeline.run(FIVE_CHUNKS, 5, &path).await.unwrap();

        assert_eq!(outcome, GenerationOutcome::NoQuestions);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[\"previous question?\"]");
    }

    #[tokio::test]
    async fn test_degenerate_inputs_produce_no_questions() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("questions.json");
        let pipeline = QuestionPipeline::new(EchoGenerator::default(), 5);

        assert_eq!(pipeline.run("   ", 5, &path).await.unwrap(), GenerationOutcome::NoQuestions);
        assert_eq!(pipeline.run(FIVE_CHUNKS, 0, &path).await.unwrap(), GenerationOutcome::NoQuestions);
        assert!(pipeline.generator.calls.lock().unwrap().is_empty());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_repeated_runs_write_identical_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("questions.json");
        let pipeline = QuestionPipeline::new(EchoGenerator::default(), 12);

        pipeline.run(FIVE_CHUNKS, 4, &path).await.unwrap();
        let first = std::fs::read(&path).unwrap();
        pipeline.run(FIVE_CHUNKS, 4, &path).await.unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_concurrent_requests_keep_chunk_order() {
        let pipeline = QuestionPipeline::new(SlowStartGenerator, 2).with_concurrency(4);

        let questions = pipeline.collect_questions("w0 w1 w2 w3", 4).await.unwrap();
        assert_eq!(questions, vec!["from w0", "from w1", "from w2", "from w3"]);
    }

    #[tokio::test]
    async fn test_cancellation_between_chunks_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("questions.json");
        let flag = Arc::new(AtomicBool::new(false));
        let generator = CancellingGenerator { flag: Arc::clone(&flag) };
        let pipeline = QuestionPipeline::new(generator, 5).with_cancel_flag(flag);

        let outcome = pipeline.run(FIVE_CHUNKS, 5, &path).await.unwrap();

        assert_eq!(outcome, GenerationOutcome::Cancelled);
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_stages_are_reported_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("questions.json");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);

        let pipeline = QuestionPipeline::new(EchoGenerator::default(), 11)
            .with_observer(move |stage| sink.lock().unwrap().push(stage.clone()));
        pipeline.run(FIVE_CHUNKS, 3, &path).await.unwrap();

        let stages = seen.lock().unwrap();
        assert_eq!(
            *stages,
            vec![
                PipelineStage::Chunking,
                PipelineStage::Allocating { chunks: 3 },
                PipelineStage::Requesting { chunk: 0, total_chunks: 3, count: 1 },
                PipelineStage::Requesting { chunk: 1, total_chunks: 3, count: 1 },
                PipelineStage::Requesting { chunk: 2, total_chunks: 3, count: 1 },
                PipelineStage::Aggregating,
                PipelineStage::Persisted { questions: 3 },
            ]
        );
    }

    #[tokio::test]
    async fn test_extraction_failure_aborts_before_requests() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("questions.json");
        let document = temp_dir.path().join("missing.pdf");
        let pipeline = QuestionPipeline::new(EchoGenerator::default(), 5);
        let mut input = InputManager::new();

        let result = pipeline.run_document(&mut input, &document, 3, &path).await;

        assert!(result.is_err());
        assert!(pipeline.generator.calls.lock().unwrap().is_empty());
        assert!(!path.exists());
    }
}
