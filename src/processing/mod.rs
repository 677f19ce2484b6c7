//! Question generation: chunking, allocation, requesting and persistence

pub mod allocator;
pub mod chunker;
pub mod pipeline;
pub mod question_store;

pub use pipeline::{GenerationOutcome, PipelineStage, QuestionPipeline};
pub use question_store::QuestionStore;
