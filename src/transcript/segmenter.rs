use crate::models::Exchange;

/// Speaker markers opening an interviewer turn
const INTERVIEWER_MARKERS: [&str; 2] = ["Interviewer:", "I:"];
/// Speaker markers opening a candidate turn
const CANDIDATE_MARKERS: [&str; 2] = ["Candidate:", "C:"];
/// Question openers that link an exchange back to the previous question
const FOLLOW_UP_PHRASES: [&str; 4] = ["could you", "can you", "would you", "what about"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    None,
    InQuestion,
    InAnswer,
}

/// Split raw transcript text into ordered question/answer exchanges.
///
/// A 3-state scanner over non-empty lines: an interviewer marker finalizes
/// the previous exchange (if complete) and opens a new question, a candidate
/// marker starts the answer, and any other line is appended space-joined to
/// whichever side is currently open. Topics, positions and the code flag are
/// left for the tagger.
pub fn segment_transcript(content: &str) -> Vec<Exchange> {
    let mut exchanges: Vec<Exchange> = Vec::new();
    let mut question = String::new();
    let mut answer = String::new();
    let mut context = String::new();
    let mut state = ScanState::None;

    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(text) = strip_marker(line, &INTERVIEWER_MARKERS) {
            if state == ScanState::InAnswer && !question.is_empty() && !answer.is_empty() {
                exchanges.push(Exchange::new(
                    std::mem::take(&mut question),
                    std::mem::take(&mut answer),
                    std::mem::take(&mut context),
                ));
            }

            question = text.to_string();
            answer.clear();
            context.clear();
            state = ScanState::InQuestion;

            // Follow-up questions carry the previous question as context
            if is_follow_up(&question) {
                if let Some(prev) = exchanges.last() {
                    context = prev.question.clone();
                }
            }
        } else if let Some(text) = strip_marker(line, &CANDIDATE_MARKERS) {
            answer = text.to_string();
            state = ScanState::InAnswer;
        } else {
            match state {
                ScanState::InQuestion => {
                    question.push(' ');
                    question.push_str(line);
                }
                ScanState::InAnswer => {
                    answer.push(' ');
                    answer.push_str(line);
                }
                ScanState::None => {}
            }
        }
    }

    // Flush the final exchange with the same completeness check
    if state == ScanState::InAnswer && !question.is_empty() && !answer.is_empty() {
        exchanges.push(Exchange::new(question, answer, context));
    }

    exchanges
}

fn strip_marker<'a>(line: &'a str, markers: &[&str]) -> Option<&'a str> {
    markers
        .iter()
        .find(|m| line.starts_with(**m))
        .map(|m| line[m.len()..].trim())
}

fn is_follow_up(question: &str) -> bool {
    let lowered = question.to_lowercase();
    FOLLOW_UP_PHRASES.iter().any(|p| lowered.starts_with(p))
}
