use serde::{Deserialize, Serialize};

/// One question/answer turn extracted from an interview transcript
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exchange {
    /// The question asked by the interviewer
    pub question: String,
    /// The answer provided by the candidate
    pub answer: String,
    /// Text of the preceding question when this is a detected follow-up, else empty
    pub context: String,
    /// Technical topics covered in this exchange (never empty after tagging)
    pub topics: Vec<String>,
    /// 1-based position in the interview sequence
    pub position: usize,
    /// Whether the answer contains code examples
    pub contains_code: bool,
}

impl Exchange {
    /// Create an untagged exchange; topics, position and the code flag are
    /// filled in by the topic tagger.
    pub fn new(question: String, answer: String, context: String) -> Self {
        Self {
            question,
            answer,
            context,
            topics: Vec::new(),
            position: 0,
            contains_code: false,
        }
    }

    /// Whether this exchange is a follow-up to an earlier question
    pub fn is_follow_up(&self) -> bool {
        !self.context.is_empty()
    }
}
