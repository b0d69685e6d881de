use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;

use super::{InterviewRecord, StorageClient};
use crate::models::EvaluationResults;

/// Filesystem storage backend keeping one JSON record per interview id.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    fn record_path(&self, interview_id: &str) -> PathBuf {
        self.dir.join(format!("{interview_id}.json"))
    }

    fn write_record(&self, record: &InterviewRecord) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create storage directory {:?}", self.dir))?;
        let path = self.record_path(&record.id);
        let json = serde_json::to_string_pretty(record).context("Failed to serialize record")?;
        std::fs::write(&path, json).with_context(|| format!("Failed to write {path:?}"))?;
        Ok(())
    }

    fn read_record(&self, interview_id: &str) -> Result<Option<InterviewRecord>> {
        let path = self.record_path(interview_id);
        if !path.exists() {
            return Ok(None);
        }
        let content =
            std::fs::read_to_string(&path).with_context(|| format!("Failed to read {path:?}"))?;
        let record =
            serde_json::from_str(&content).with_context(|| format!("Failed to parse {path:?}"))?;
        Ok(Some(record))
    }
}

impl StorageClient for JsonFileStore {
    fn create_interview(&self, record: &InterviewRecord) -> Result<InterviewRecord> {
        self.write_record(record)?;
        Ok(record.clone())
    }

    fn update_status(&self, interview_id: &str, status: &str) -> Result<()> {
        let mut record = self
            .read_record(interview_id)?
            .with_context(|| format!("no interview record for id {interview_id}"))?;
        record.status = status.to_string();
        record.updated_at = Utc::now();
        self.write_record(&record)
    }

    fn get_interview(&self, interview_id: &str) -> Result<Option<InterviewRecord>> {
        self.read_record(interview_id)
    }

    fn store_evaluation_results(
        &self,
        interview_id: &str,
        results: &EvaluationResults,
    ) -> Result<()> {
        let mut record = self
            .read_record(interview_id)?
            .unwrap_or_else(|| InterviewRecord::new(interview_id, "Unknown Candidate"));
        record.results =
            Some(serde_json::to_value(results).context("Failed to serialize results")?);
        record.updated_at = Utc::now();
        self.write_record(&record)
    }
}
