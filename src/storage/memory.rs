use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Utc;

use super::{InterviewRecord, StorageClient};
use crate::models::EvaluationResults;

/// In-memory storage backend. Used by tests and by CLI runs without a
/// persistence directory; records vanish with the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, InterviewRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageClient for MemoryStore {
    fn create_interview(&self, record: &InterviewRecord) -> Result<InterviewRecord> {
        let mut records = self.records.lock().unwrap();
        records.insert(record.id.clone(), record.clone());
        Ok(record.clone())
    }

    fn update_status(&self, interview_id: &str, status: &str) -> Result<()> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(interview_id)
            .with_context(|| format!("no interview record for id {interview_id}"))?;
        record.status = status.to_string();
        record.updated_at = Utc::now();
        Ok(())
    }

    fn get_interview(&self, interview_id: &str) -> Result<Option<InterviewRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records.get(interview_id).cloned())
    }

    fn store_evaluation_results(
        &self,
        interview_id: &str,
        results: &EvaluationResults,
    ) -> Result<()> {
        let value = serde_json::to_value(results).context("Failed to serialize results")?;
        let mut records = self.records.lock().unwrap();
        let record = records
            .entry(interview_id.to_string())
            .or_insert_with(|| InterviewRecord::new(interview_id, "Unknown Candidate"));
        record.results = Some(value);
        record.updated_at = Utc::now();
        Ok(())
    }
}
