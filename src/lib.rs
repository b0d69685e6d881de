pub mod criteria;
pub mod io;
pub mod llm;
pub mod models;
pub mod pipeline;
pub mod stages;
pub mod storage;
pub mod transcript;

pub use criteria::CriteriaTable;
pub use io::{read_transcript, render_report_text, write_report};
pub use llm::{AnthropicClient, AnthropicConfig, ModelClient, RetryConfig};
pub use models::{
    Criterion, CriterionEvaluation, EvaluationReport, EvaluationState, EvaluationStatus, Exchange,
    ReportStatus, Summary,
};
pub use pipeline::{Pipeline, PipelineConfig, Stage};
pub use stages::PipelineError;
pub use storage::{InterviewRecord, JsonFileStore, MemoryStore, StorageClient};
pub use transcript::{segment_transcript, tag_topics, topic_counts};
