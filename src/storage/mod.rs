use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::EvaluationResults;

pub mod json_store;
pub mod memory;

pub use json_store::JsonFileStore;
pub use memory::MemoryStore;

/// A stored interview record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewRecord {
    pub id: String,
    pub candidate_name: String,
    /// Lifecycle marker: uploaded, processing, evaluated
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Evaluation results once stored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<serde_json::Value>,
}

impl InterviewRecord {
    pub fn new(id: &str, candidate_name: &str) -> Self {
        let now = Utc::now();
        Self {
            id: id.to_string(),
            candidate_name: candidate_name.to_string(),
            status: "uploaded".to_string(),
            created_at: now,
            updated_at: now,
            results: None,
        }
    }
}

/// Persistence collaborator for interview records and evaluation results.
/// Failures here are non-fatal to the pipeline; the store stage logs them
/// and the run still completes from in-memory results.
pub trait StorageClient: Send + Sync {
    /// Create a new interview record, returning the stored record
    fn create_interview(&self, record: &InterviewRecord) -> Result<InterviewRecord>;
    /// Update the lifecycle status of an existing interview
    fn update_status(&self, interview_id: &str, status: &str) -> Result<()>;
    /// Fetch an interview record by id
    fn get_interview(&self, interview_id: &str) -> Result<Option<InterviewRecord>>;
    /// Attach evaluation results to an interview, creating the record if the
    /// interview was never registered
    fn store_evaluation_results(
        &self,
        interview_id: &str,
        results: &EvaluationResults,
    ) -> Result<()>;
}
