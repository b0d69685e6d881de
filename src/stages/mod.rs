use thiserror::Error;

pub mod criteria_init;
pub mod evaluate;
pub mod segment;
pub mod store;
pub mod summarize;

pub use criteria_init::execute_init_criteria;
pub use evaluate::execute_evaluate;
pub use segment::execute_segment;
pub use store::execute_store;
pub use summarize::execute_summarize;

/// Error taxonomy for the pipeline stages. Every stage boundary converts
/// failures into one of these; the orchestrator decides which are fatal.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Zero exchanges extracted from the transcript; fatal
    #[error("transcript extraction failed: {0}")]
    Segmentation(String),
    /// Failure while resolving criteria; fatal
    #[error("criteria initialization failed: {0}")]
    CriteriaInit(String),
    /// No evaluations could be produced; fatal (per-criterion failures are
    /// recovered locally inside the scorer and never surface here)
    #[error("criteria evaluation failed: {0}")]
    Evaluation(String),
    /// No evaluations available to aggregate; fatal
    #[error("summary generation failed: {0}")]
    Summary(String),
    /// Persistence failure; logged, never fatal
    #[error("result storage failed: {0}")]
    Storage(String),
}
