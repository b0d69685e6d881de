pub mod criterion;
pub mod exchange;
pub mod report;
pub mod state;

pub use criterion::{clamp_score, Criterion, CriterionEvaluation, Summary, SCORE_MAX, SCORE_MIN};
pub use exchange::Exchange;
pub use report::{CriterionReport, EvaluationReport, EvaluationResults, ReportStatus};
pub use state::{EvaluationState, EvaluationStatus, StateError};
