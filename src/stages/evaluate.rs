use tracing::{info, warn};

use crate::criteria::CriteriaTable;
use crate::llm::{
    build_evaluation_prompt, generate_with_retry, parse_evaluation, ModelClient, RetryConfig,
    EVALUATOR_SYSTEM_PROMPT,
};
use crate::models::{clamp_score, CriterionEvaluation, EvaluationState};
use crate::stages::PipelineError;

/// Confidence assigned to an evaluation the model answered successfully
const PARSED_CONFIDENCE: f64 = 0.8;

/// Evaluate stage: score each criterion with one model call against its
/// representative exchange.
///
/// Per-criterion failures (network error, timeout, missing credential,
/// unusable reply) degrade into a neutral zero-score evaluation instead of
/// aborting the run; the stage is fatal only when nothing at all could be
/// evaluated. Evaluations are appended in criteria-resolution order so
/// aggregation stays deterministic.
pub async fn execute_evaluate<M: ModelClient>(
    state: &mut EvaluationState,
    client: &M,
    table: &CriteriaTable,
    retry: &RetryConfig,
) -> Result<(), PipelineError> {
    info!("starting criteria evaluation for interview {}", state.interview_id);

    state
        .begin()
        .map_err(|e| PipelineError::Evaluation(e.to_string()))?;

    let criteria = state.criteria.clone();
    for criterion in &criteria {
        let Some(exchange) = table.representative_exchange(&state.exchanges, &criterion.name)
        else {
            warn!("criterion {} has no matching exchange, skipping", criterion.name);
            continue;
        };

        let prompt = build_evaluation_prompt(&criterion.name, &exchange.question, &exchange.answer);

        let evaluation =
            match generate_with_retry(client, EVALUATOR_SYSTEM_PROMPT, &prompt, retry).await {
                Ok(response) => {
                    let parsed = parse_evaluation(&response, &exchange.answer);
                    CriterionEvaluation {
                        criterion_name: criterion.name.clone(),
                        score: clamp_score(parsed.score),
                        justification: parsed.justification,
                        supporting_quotes: parsed.supporting_quotes,
                        confidence: PARSED_CONFIDENCE,
                    }
                }
                Err(e) => {
                    warn!("evaluation of {} failed: {}", criterion.name, e);
                    CriterionEvaluation::degraded(&criterion.name, &e.to_string())
                }
            };

        info!(
            "evaluated {}: score {:.1}",
            evaluation.criterion_name, evaluation.score
        );
        state.evaluations.push(evaluation);
    }

    if state.evaluations.is_empty() {
        return Err(PipelineError::Evaluation(
            "no evaluations could be performed on the transcript".to_string(),
        ));
    }

    info!("completed {} evaluations", state.evaluations.len());
    Ok(())
}
