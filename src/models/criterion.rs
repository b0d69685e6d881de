use serde::{Deserialize, Serialize};

/// Lower bound of the scoring scale
pub const SCORE_MIN: f64 = 0.0;
/// Upper bound of the scoring scale
pub const SCORE_MAX: f64 = 10.0;

/// Clamp a raw score into the valid scoring range
pub fn clamp_score(score: f64) -> f64 {
    if !score.is_finite() {
        return SCORE_MIN;
    }
    score.clamp(SCORE_MIN, SCORE_MAX)
}

/// A named skill axis the candidate is scored against
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Criterion {
    /// Name of the criterion, unique within a run
    pub name: String,
    /// Description of what is being evaluated
    pub description: String,
    /// Minimum possible score
    pub min_score: f64,
    /// Maximum possible score
    pub max_score: f64,
    /// Relative weight; carried on the model but not factored into aggregation
    pub weight: f64,
}

impl Criterion {
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            min_score: SCORE_MIN,
            max_score: SCORE_MAX,
            weight: 1.0,
        }
    }
}

/// The scored result of evaluating one criterion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriterionEvaluation {
    /// Name of the criterion being evaluated
    pub criterion_name: String,
    /// Score in [0, 10]
    pub score: f64,
    /// Justification for the assigned score
    pub justification: String,
    /// Quotes from the transcript supporting the evaluation
    pub supporting_quotes: Vec<String>,
    /// Confidence in this evaluation (0.0-1.0)
    pub confidence: f64,
}

impl CriterionEvaluation {
    /// Neutral evaluation produced when the model call or parse fails for a
    /// criterion; keeps the pipeline running on a degraded result.
    pub fn degraded(criterion_name: &str, reason: &str) -> Self {
        Self {
            criterion_name: criterion_name.to_string(),
            score: 0.0,
            justification: format!("Error during evaluation: {reason}"),
            supporting_quotes: Vec::new(),
            confidence: 0.0,
        }
    }
}

/// Aggregated overall result for a full evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Mean of all criterion scores
    pub overall_score: f64,
    /// Candidate's strengths
    pub strengths: Vec<String>,
    /// Areas for improvement
    pub weaknesses: Vec<String>,
    /// Narrative summary of the evaluation
    pub summary: String,
}
