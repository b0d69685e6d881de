use tracing::{info, warn};

use crate::models::{EvaluationReport, EvaluationState};
use crate::stages::PipelineError;
use crate::storage::StorageClient;

/// Interview status recorded once results are persisted
const EVALUATED_STATUS: &str = "evaluated";

/// Store stage: hand the finished results to the persistence collaborator.
///
/// Storage failures are reported but never fatal; the results are already
/// available in memory to the caller, so the run stays Completed.
pub fn execute_store<S: StorageClient>(
    state: &EvaluationState,
    storage: &S,
) -> Result<(), PipelineError> {
    info!("storing results for interview {}", state.interview_id);

    let report = EvaluationReport::from_state(state);
    let Some(results) = report.results() else {
        warn!("no results to store for interview {}", state.interview_id);
        return Ok(());
    };

    storage
        .store_evaluation_results(&state.interview_id, &results)
        .map_err(|e| PipelineError::Storage(e.to_string()))?;

    if let Err(e) = storage.update_status(&state.interview_id, EVALUATED_STATUS) {
        warn!(
            "stored results but failed to update interview status: {}",
            e
        );
    }

    info!("stored results for interview {}", state.interview_id);
    Ok(())
}
