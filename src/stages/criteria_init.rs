use tracing::info;

use crate::criteria::CriteriaTable;
use crate::models::EvaluationState;
use crate::stages::PipelineError;

/// InitCriteria stage: derive the evaluation criteria from the topics found
/// across the exchanges.
pub fn execute_init_criteria(
    state: &mut EvaluationState,
    table: &CriteriaTable,
) -> Result<(), PipelineError> {
    info!("initializing criteria for interview {}", state.interview_id);

    state
        .begin()
        .map_err(|e| PipelineError::CriteriaInit(e.to_string()))?;

    if state.exchanges.is_empty() {
        return Err(PipelineError::CriteriaInit(
            "no exchanges available for criteria resolution".to_string(),
        ));
    }

    state.criteria = table.resolve_criteria(&state.exchanges);
    info!("initialized {} criteria", state.criteria.len());
    Ok(())
}
