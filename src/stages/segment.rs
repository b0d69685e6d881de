use tracing::info;

use crate::models::EvaluationState;
use crate::stages::PipelineError;
use crate::transcript::{segment_transcript, tag_topics};

/// Segment stage: split the raw transcript into exchanges and tag them.
///
/// A transcript with no recognizable speaker turns is pipeline-fatal; every
/// later stage depends on at least one exchange existing.
pub fn execute_segment(
    state: &mut EvaluationState,
    transcript: &str,
) -> Result<(), PipelineError> {
    info!("extracting exchanges for interview {}", state.interview_id);

    state
        .begin()
        .map_err(|e| PipelineError::Segmentation(e.to_string()))?;

    let mut exchanges = segment_transcript(transcript);
    tag_topics(&mut exchanges);

    if exchanges.is_empty() {
        return Err(PipelineError::Segmentation(
            "no exchanges could be extracted from the transcript".to_string(),
        ));
    }

    info!("extracted {} exchanges from transcript", exchanges.len());
    state.exchanges = exchanges;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_fills_state() {
        let mut state = EvaluationState::new("int-1", "Jane Doe");
        execute_segment(
            &mut state,
            "Interviewer: What is a list comprehension?\nCandidate: It's a concise way to create lists in Python.",
        )
        .unwrap();
        assert_eq!(state.exchanges.len(), 1);
        assert_eq!(state.exchanges[0].topics, vec!["Python"]);
        assert_eq!(state.exchanges[0].position, 1);
    }

    #[test]
    fn test_empty_transcript_is_fatal() {
        let mut state = EvaluationState::new("int-1", "Jane Doe");
        let err = execute_segment(&mut state, "").unwrap_err();
        assert!(err.to_string().contains("extraction failed"));
    }

    #[test]
    fn test_markerless_transcript_is_fatal() {
        let mut state = EvaluationState::new("int-1", "Jane Doe");
        let err = execute_segment(&mut state, "prose without any speakers").unwrap_err();
        assert!(matches!(err, PipelineError::Segmentation(_)));
    }
}
