use tracing::{info, warn};

use crate::llm::{build_summary_prompt, generate_with_retry, parse_summary, ModelClient, RetryConfig};
use crate::models::{CriterionEvaluation, EvaluationState, Summary};
use crate::stages::PipelineError;

/// Summarize stage: aggregate the per-criterion evaluations into one Summary.
///
/// The overall score is the unweighted mean of all criterion scores. One
/// model call produces the narrative; when the call fails or its reply
/// parses empty, strengths, weaknesses and the narrative fall back to values
/// computed from the scores. Fatal only when there is nothing to aggregate.
pub async fn execute_summarize<M: ModelClient>(
    state: &mut EvaluationState,
    client: &M,
    retry: &RetryConfig,
) -> Result<(), PipelineError> {
    info!("generating summary for interview {}", state.interview_id);

    state
        .begin()
        .map_err(|e| PipelineError::Summary(e.to_string()))?;

    if state.evaluations.is_empty() {
        return Err(PipelineError::Summary(
            "no evaluations available for summary generation".to_string(),
        ));
    }

    let overall_score =
        state.evaluations.iter().map(|e| e.score).sum::<f64>() / state.evaluations.len() as f64;

    let prompt = build_summary_prompt(&state.candidate_name, &state.evaluations);
    let response = match generate_with_retry(client, "", &prompt, retry).await {
        Ok(text) => text,
        Err(e) => {
            // Parse of the empty reply yields empty sections, so every part
            // of the summary comes from the computed fallbacks below.
            warn!("summary model call failed, using computed fallbacks: {}", e);
            String::new()
        }
    };

    let parsed = parse_summary(&response);

    let mut by_score_desc: Vec<&CriterionEvaluation> = state.evaluations.iter().collect();
    by_score_desc.sort_by(|a, b| b.score.total_cmp(&a.score));

    let strengths = if parsed.strengths.is_empty() {
        by_score_desc
            .iter()
            .take(2)
            .map(|e| format!("Strong {} skills", e.criterion_name))
            .collect()
    } else {
        parsed.strengths
    };

    let weaknesses = if parsed.weaknesses.is_empty() {
        by_score_desc
            .iter()
            .rev()
            .take(2)
            .map(|e| format!("Could improve {} skills", e.criterion_name))
            .collect()
    } else {
        parsed.weaknesses
    };

    let narrative = if parsed.narrative.is_empty() {
        let top: Vec<&str> = by_score_desc
            .iter()
            .take(2)
            .map(|e| e.criterion_name.as_str())
            .collect();
        let bottom: Vec<&str> = by_score_desc
            .iter()
            .rev()
            .take(2)
            .map(|e| e.criterion_name.as_str())
            .collect();
        format!(
            "The candidate demonstrated an overall performance level of {:.1}/10. \
             They showed strength in {} but could benefit from improvement in {}.",
            overall_score,
            top.join(", "),
            bottom.join(", ")
        )
    } else {
        parsed.narrative
    };

    state.summary = Some(Summary {
        overall_score,
        strengths,
        weaknesses,
        summary: narrative,
    });

    state
        .complete()
        .map_err(|e| PipelineError::Summary(e.to_string()))?;

    info!("generated summary with overall score {:.1}/10", overall_score);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EvaluationStatus;
    use anyhow::Result;
    use std::time::Duration;

    struct CannedModel(&'static str);

    impl ModelClient for CannedModel {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct BrokenModel;

    impl ModelClient for BrokenModel {
        async fn generate(&self, _system: &str, _user: &str) -> Result<String> {
            anyhow::bail!("no route to host")
        }
    }

    fn fast_retry() -> RetryConfig {
        RetryConfig {
            request_timeout: Duration::from_secs(1),
            max_retries: 0,
            retry_backoff: Duration::from_millis(1),
        }
    }

    fn eval(name: &str, score: f64) -> CriterionEvaluation {
        CriterionEvaluation {
            criterion_name: name.to_string(),
            score,
            justification: format!("{name} justification"),
            supporting_quotes: vec![],
            confidence: 0.8,
        }
    }

    fn scored_state() -> EvaluationState {
        let mut state = EvaluationState::new("int-1", "Jane Doe");
        state.evaluations = vec![eval("Python", 9.0), eval("SQL", 4.0), eval("Statistics", 6.5)];
        state
    }

    #[tokio::test]
    async fn test_overall_score_is_mean() {
        let mut state = scored_state();
        execute_summarize(&mut state, &CannedModel(""), &fast_retry())
            .await
            .unwrap();
        let summary = state.summary.as_ref().unwrap();
        assert!((summary.overall_score - (9.0 + 4.0 + 6.5) / 3.0).abs() < 1e-9);
        assert_eq!(state.status(), EvaluationStatus::Completed);
    }

    #[tokio::test]
    async fn test_parsed_sections_are_used() {
        let mut state = scored_state();
        let model = CannedModel(
            "Strengths:\n- Great Python\n\nWeaknesses:\n- SQL gaps\n\nSummary:\nSolid overall.",
        );
        execute_summarize(&mut state, &model, &fast_retry()).await.unwrap();
        let summary = state.summary.as_ref().unwrap();
        assert_eq!(summary.strengths, vec!["Great Python".to_string()]);
        assert_eq!(summary.weaknesses, vec!["SQL gaps".to_string()]);
        assert_eq!(summary.summary, "Solid overall.");
    }

    #[tokio::test]
    async fn test_computed_fallbacks_on_model_failure() {
        let mut state = scored_state();
        execute_summarize(&mut state, &BrokenModel, &fast_retry())
            .await
            .unwrap();
        let summary = state.summary.as_ref().unwrap();
        assert_eq!(
            summary.strengths,
            vec!["Strong Python skills".to_string(), "Strong Statistics skills".to_string()]
        );
        assert_eq!(
            summary.weaknesses,
            vec!["Could improve SQL skills".to_string(), "Could improve Statistics skills".to_string()]
        );
        assert!(summary.summary.contains("overall performance level of 6.5/10"));
        assert_eq!(state.status(), EvaluationStatus::Completed);
    }

    #[tokio::test]
    async fn test_empty_evaluations_is_fatal() {
        let mut state = EvaluationState::new("int-1", "Jane Doe");
        let err = execute_summarize(&mut state, &CannedModel(""), &fast_retry())
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Summary(_)));
    }
}
