use serde::{Deserialize, Serialize};

use super::{EvaluationState, EvaluationStatus};

/// Outcome of a pipeline run as seen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// A summary was produced
    Success,
    /// Evaluations exist but no summary was produced
    Partial,
    /// The run short-circuited with an error
    Error,
}

/// One criterion's result in the output schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionReport {
    pub criterion: String,
    pub score: f64,
    pub justification: String,
    pub supporting_quotes: Vec<String>,
}

/// The persisted portion of an evaluation result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResults {
    pub overall_score: f64,
    pub summary: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub criteria_evaluations: Vec<CriterionReport>,
}

/// Structured result returned to the caller for every run; the pipeline
/// never surfaces an uncaught error instead of one of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub status: ReportStatus,
    pub interview_id: String,
    pub candidate_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub criteria_evaluations: Vec<CriterionReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EvaluationReport {
    /// Build the caller-facing report from a finished run
    pub fn from_state(state: &EvaluationState) -> Self {
        let status = if state.status() == EvaluationStatus::Error {
            ReportStatus::Error
        } else if state.summary.is_some() {
            ReportStatus::Success
        } else {
            ReportStatus::Partial
        };

        let criteria_evaluations = state
            .evaluations
            .iter()
            .map(|e| CriterionReport {
                criterion: e.criterion_name.clone(),
                score: e.score,
                justification: e.justification.clone(),
                supporting_quotes: e.supporting_quotes.clone(),
            })
            .collect();

        Self {
            status,
            interview_id: state.interview_id.clone(),
            candidate_name: state.candidate_name.clone(),
            overall_score: state.summary.as_ref().map(|s| s.overall_score),
            summary: state.summary.as_ref().map(|s| s.summary.clone()),
            strengths: state
                .summary
                .as_ref()
                .map(|s| s.strengths.clone())
                .unwrap_or_default(),
            weaknesses: state
                .summary
                .as_ref()
                .map(|s| s.weaknesses.clone())
                .unwrap_or_default(),
            criteria_evaluations,
            error: state.error.clone(),
        }
    }

    /// The persisted subset of this report, if the run produced one
    pub fn results(&self) -> Option<EvaluationResults> {
        Some(EvaluationResults {
            overall_score: self.overall_score?,
            summary: self.summary.clone()?,
            strengths: self.strengths.clone(),
            weaknesses: self.weaknesses.clone(),
            criteria_evaluations: self.criteria_evaluations.clone(),
        })
    }
}
