use tracing::{debug, warn};

use crate::criteria::CriteriaTable;
use crate::llm::{ModelClient, RetryConfig};
use crate::models::{EvaluationReport, EvaluationState, EvaluationStatus};
use crate::stages;
use crate::storage::StorageClient;

/// One step of the orchestrator's fixed sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Segment,
    InitCriteria,
    Evaluate,
    Summarize,
    Store,
    End,
}

impl Stage {
    fn next(self) -> Stage {
        match self {
            Stage::Segment => Stage::InitCriteria,
            Stage::InitCriteria => Stage::Evaluate,
            Stage::Evaluate => Stage::Summarize,
            Stage::Summarize => Stage::Store,
            Stage::Store | Stage::End => Stage::End,
        }
    }
}

/// Pipeline configuration
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Retry/timeout policy for model calls
    pub retry: RetryConfig,
    /// Topic -> criterion collapse table
    pub criteria_table: CriteriaTable,
}

/// The stage sequencer tying segmentation, criteria resolution, scoring,
/// aggregation and storage together.
///
/// Collaborators are injected at construction; the orchestrator owns no
/// global state and each run gets its own EvaluationState. Stage failures
/// are converted into the state's error and short-circuit to End, so `run`
/// always returns a structured report and never an error.
pub struct Pipeline<M, S> {
    model: M,
    storage: S,
    config: PipelineConfig,
}

impl<M: ModelClient, S: StorageClient> Pipeline<M, S> {
    pub fn new(model: M, storage: S, config: PipelineConfig) -> Self {
        Self {
            model,
            storage,
            config,
        }
    }

    /// Run the full evaluation for one transcript.
    pub async fn run(
        &self,
        interview_id: &str,
        candidate_name: &str,
        transcript: &str,
    ) -> EvaluationReport {
        let mut state = EvaluationState::new(interview_id, candidate_name);
        let mut stage = Stage::Segment;

        while stage != Stage::End {
            debug!("entering stage {:?}", stage);

            let outcome = match stage {
                Stage::Segment => stages::execute_segment(&mut state, transcript),
                Stage::InitCriteria => {
                    stages::execute_init_criteria(&mut state, &self.config.criteria_table)
                }
                Stage::Evaluate => {
                    stages::execute_evaluate(
                        &mut state,
                        &self.model,
                        &self.config.criteria_table,
                        &self.config.retry,
                    )
                    .await
                }
                Stage::Summarize => {
                    stages::execute_summarize(&mut state, &self.model, &self.config.retry).await
                }
                Stage::Store => {
                    // Storage failures are logged and never fail the run
                    if let Err(e) = stages::execute_store(&state, &self.storage) {
                        warn!("{}", e);
                    }
                    Ok(())
                }
                Stage::End => unreachable!(),
            };

            if let Err(e) = outcome {
                warn!("stage {:?} failed: {}", stage, e);
                state.fail(&e.to_string());
            }

            stage = if stage == Stage::Store {
                Stage::End
            } else if state.status() == EvaluationStatus::Error {
                Stage::End
            } else {
                stage.next()
            };
        }

        EvaluationReport::from_state(&state)
    }
}
