use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Criterion, CriterionEvaluation, Exchange, Summary};

/// Run-level lifecycle value gating stage transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvaluationStatus {
    NotStarted,
    InProgress,
    Completed,
    Error,
}

impl EvaluationStatus {
    /// Whether this status accepts no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, EvaluationStatus::Completed | EvaluationStatus::Error)
    }

    /// Validated transition table: NotStarted -> InProgress -> Completed,
    /// with any non-terminal state allowed to jump to Error.
    fn can_transition(self, next: Self) -> bool {
        use EvaluationStatus::*;
        matches!(
            (self, next),
            (NotStarted, InProgress)
                | (InProgress, InProgress)
                | (InProgress, Completed)
                | (NotStarted, Error)
                | (InProgress, Error)
        )
    }
}

#[derive(Debug, Error)]
#[error("invalid status transition: {from:?} -> {to:?}")]
pub struct StateError {
    pub from: EvaluationStatus,
    pub to: EvaluationStatus,
}

/// State of one evaluation run, mutated in place by each pipeline stage.
///
/// Status is private so that every change goes through the validated
/// transition table; once the run reaches a terminal status the state is
/// effectively frozen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationState {
    /// ID of the interview being evaluated
    pub interview_id: String,
    /// Name of the candidate
    pub candidate_name: String,
    status: EvaluationStatus,
    /// Exchanges extracted from the transcript
    pub exchanges: Vec<Exchange>,
    /// Criteria used for evaluation (names unique)
    pub criteria: Vec<Criterion>,
    /// Evaluation results, one per criterion, in criteria order
    pub evaluations: Vec<CriterionEvaluation>,
    /// Overall summary, set by the aggregation stage
    pub summary: Option<Summary>,
    /// Error message when status is Error
    pub error: Option<String>,
}

impl EvaluationState {
    pub fn new(interview_id: &str, candidate_name: &str) -> Self {
        Self {
            interview_id: interview_id.to_string(),
            candidate_name: candidate_name.to_string(),
            status: EvaluationStatus::NotStarted,
            exchanges: Vec::new(),
            criteria: Vec::new(),
            evaluations: Vec::new(),
            summary: None,
            error: None,
        }
    }

    pub fn status(&self) -> EvaluationStatus {
        self.status
    }

    fn transition(&mut self, to: EvaluationStatus) -> Result<(), StateError> {
        if !self.status.can_transition(to) {
            return Err(StateError {
                from: self.status,
                to,
            });
        }
        self.status = to;
        Ok(())
    }

    /// Mark the run as in progress; idempotent on stage entry.
    pub fn begin(&mut self) -> Result<(), StateError> {
        self.transition(EvaluationStatus::InProgress)
    }

    /// Mark the run as completed; only valid from InProgress.
    pub fn complete(&mut self) -> Result<(), StateError> {
        self.transition(EvaluationStatus::Completed)
    }

    /// Record an error and jump to the Error status. Once the run is
    /// terminal this is a no-op so the first error message wins.
    pub fn fail(&mut self, message: &str) {
        if self.status.is_terminal() {
            return;
        }
        self.error = Some(message.to_string());
        self.status = EvaluationStatus::Error;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions() {
        let mut state = EvaluationState::new("int-1", "Jane Doe");
        assert_eq!(state.status(), EvaluationStatus::NotStarted);
        state.begin().unwrap();
        assert_eq!(state.status(), EvaluationStatus::InProgress);
        // Re-entering a stage keeps the run in progress
        state.begin().unwrap();
        state.complete().unwrap();
        assert_eq!(state.status(), EvaluationStatus::Completed);
    }

    #[test]
    fn test_completed_rejects_further_transitions() {
        let mut state = EvaluationState::new("int-1", "Jane Doe");
        state.begin().unwrap();
        state.complete().unwrap();
        assert!(state.begin().is_err());
        assert!(state.complete().is_err());
    }

    #[test]
    fn test_error_is_terminal_and_first_message_wins() {
        let mut state = EvaluationState::new("int-1", "Jane Doe");
        state.begin().unwrap();
        state.fail("first failure");
        state.fail("second failure");
        assert_eq!(state.status(), EvaluationStatus::Error);
        assert_eq!(state.error.as_deref(), Some("first failure"));
        assert!(state.begin().is_err());
    }

    #[test]
    fn test_not_started_can_fail() {
        let mut state = EvaluationState::new("int-1", "Jane Doe");
        state.fail("early abort");
        assert_eq!(state.status(), EvaluationStatus::Error);
    }

    #[test]
    fn test_completed_ignores_fail() {
        let mut state = EvaluationState::new("int-1", "Jane Doe");
        state.begin().unwrap();
        state.complete().unwrap();
        state.fail("late storage failure");
        assert_eq!(state.status(), EvaluationStatus::Completed);
        assert!(state.error.is_none());
    }
}
