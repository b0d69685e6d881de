//! Fallback parsing of freeform model replies.
//!
//! The model gives no structural guarantee on its output, so every extractor
//! here degrades to a deterministic default instead of failing. The fallback
//! chain (score-line scan, justification markers, quote extraction, answer
//! sentence) is kept behind pure functions so it can be unit-tested with
//! literal strings.

/// Score assumed when no numeric token can be extracted
const DEFAULT_SCORE: f64 = 5.0;

const JUSTIFICATION_MARKERS: [&str; 3] = ["justification:", "explanation:", "reasoning:"];
const QUOTES_MARKER: &str = "quotes:";

/// Structured result of parsing a per-criterion evaluation reply
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEvaluation {
    pub score: f64,
    pub justification: String,
    pub supporting_quotes: Vec<String>,
}

/// Structured result of parsing a summary reply
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSummary {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub narrative: String,
}

/// Case-insensitive substring search; markers are ASCII so matching on bytes
/// always lands on a char boundary.
fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    let haystack = haystack.as_bytes();
    let needle = needle.as_bytes();
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    (0..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Parse a per-criterion evaluation reply into score, justification and
/// supporting quotes. Never fails; `answer` feeds the final quote fallback.
pub fn parse_evaluation(response: &str, answer: &str) -> ParsedEvaluation {
    ParsedEvaluation {
        score: extract_score(response),
        justification: extract_justification(response),
        supporting_quotes: extract_quotes(response, answer),
    }
}

/// First numeric token on the first line mentioning "score", defaulting to
/// 5.0 when nothing parses.
fn extract_score(response: &str) -> f64 {
    let Some(line) = response
        .lines()
        .find(|l| find_ci(l, "score").is_some())
    else {
        return DEFAULT_SCORE;
    };

    line.split_whitespace()
        .filter_map(|token| {
            let stripped: String = token
                .chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect();
            if stripped.is_empty() {
                None
            } else {
                stripped.parse::<f64>().ok()
            }
        })
        .next()
        .unwrap_or(DEFAULT_SCORE)
}

/// Text from the earliest justification marker to the next blank line, or
/// the whole response when no marker is present.
fn extract_justification(response: &str) -> String {
    let start = JUSTIFICATION_MARKERS
        .iter()
        .filter_map(|m| find_ci(response, m))
        .min();

    match start {
        Some(idx) => {
            let rest = &response[idx..];
            match rest.find("\n\n") {
                Some(end) => rest[..end].trim().to_string(),
                None => rest.trim().to_string(),
            }
        }
        None => response.trim().to_string(),
    }
}

/// Quoted substrings after the quotes marker, falling back to the following
/// non-empty lines, then to the answer's first sentence.
fn extract_quotes(response: &str, answer: &str) -> Vec<String> {
    let mut quotes: Vec<String> = Vec::new();

    if let Some(idx) = find_ci(response, QUOTES_MARKER) {
        let rest = &response[idx..];

        quotes = rest
            .split('"')
            .skip(1)
            .step_by(2)
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string)
            .collect();

        if quotes.is_empty() {
            quotes = rest
                .lines()
                .skip(1)
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect();
        }
    }

    if quotes.is_empty() && !answer.is_empty() {
        let first_sentence = answer.split('.').next().unwrap_or(answer);
        quotes.push(format!("{first_sentence}."));
    }

    quotes
}

/// Parse a summary reply into strengths, weaknesses and a narrative.
///
/// Lines are scanned for the earliest mention of "strength", of
/// "weakness"/"improvement" and of "summary" as section boundaries; bullet
/// lines between the boundaries are collected, and everything after the
/// summary marker is space-joined into the narrative. Missing sections come
/// back empty; the aggregator supplies computed defaults.
pub fn parse_summary(response: &str) -> ParsedSummary {
    let lines: Vec<&str> = response.lines().collect();

    let strengths_start = lines.iter().position(|l| find_ci(l, "strength").is_some());
    let weaknesses_start = lines
        .iter()
        .position(|l| find_ci(l, "weakness").is_some() || find_ci(l, "improvement").is_some());
    let summary_start = lines.iter().position(|l| find_ci(l, "summary").is_some());

    let strengths = collect_bullets(
        &lines,
        strengths_start,
        &[weaknesses_start, summary_start],
    );
    let weaknesses = collect_bullets(&lines, weaknesses_start, &[summary_start]);

    let narrative = match summary_start {
        Some(start) => lines[start + 1..]
            .iter()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" "),
        None => String::new(),
    };

    ParsedSummary {
        strengths,
        weaknesses,
        narrative,
    }
}

/// Bullet lines ("- ...") between a section marker and the next marker
fn collect_bullets(lines: &[&str], start: Option<usize>, stops: &[Option<usize>]) -> Vec<String> {
    let Some(start) = start else {
        return Vec::new();
    };

    let end = stops
        .iter()
        .filter_map(|s| *s)
        .filter(|&s| s > start)
        .min()
        .unwrap_or(lines.len());

    lines[start + 1..end]
        .iter()
        .map(|l| l.trim())
        .filter(|l| l.starts_with('-'))
        .map(|l| l[1..].trim().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_well_formed_evaluation() {
        let response = "\
Score: 8.5

Justification: The candidate showed a clear grasp of list comprehensions
and mentioned generator expressions unprompted.

Quotes:
- \"a concise way to create lists\"
- \"generators avoid materializing the list\"";
        let parsed = parse_evaluation(response, "irrelevant");
        assert_eq!(parsed.score, 8.5);
        assert!(parsed.justification.starts_with("Justification: The candidate"));
        assert!(parsed.justification.contains("generator expressions"));
        assert_eq!(
            parsed.supporting_quotes,
            vec![
                "a concise way to create lists".to_string(),
                "generators avoid materializing the list".to_string()
            ]
        );
    }

    #[test]
    fn test_missing_score_defaults() {
        let parsed = parse_evaluation("No numbers here at all.", "");
        assert_eq!(parsed.score, 5.0);
    }

    #[test]
    fn test_non_numeric_score_token_defaults() {
        let parsed = parse_evaluation("Score: excellent", "");
        assert_eq!(parsed.score, 5.0);
    }

    #[test]
    fn test_score_line_is_case_insensitive() {
        let parsed = parse_evaluation("Overall SCORE was 7", "");
        assert_eq!(parsed.score, 7.0);
    }

    #[test]
    fn test_missing_justification_uses_whole_response() {
        let response = "Score: 6\nA decent answer overall.";
        let parsed = parse_evaluation(response, "");
        assert_eq!(parsed.justification, response);
    }

    #[test]
    fn test_earliest_justification_marker_wins() {
        let response = "Reasoning: first section.\n\nJustification: second section.";
        let parsed = parse_evaluation(response, "");
        assert_eq!(parsed.justification, "Reasoning: first section.");
    }

    #[test]
    fn test_unquoted_lines_after_quotes_marker() {
        let response = "Score: 6\n\nQuotes:\nthe first supporting line\nthe second line";
        let parsed = parse_evaluation(response, "");
        assert_eq!(
            parsed.supporting_quotes,
            vec!["the first supporting line".to_string(), "the second line".to_string()]
        );
    }

    #[test]
    fn test_quote_fallback_to_answer_sentence() {
        let parsed = parse_evaluation(
            "Score: 6",
            "It combines rows from two tables. Inner joins drop unmatched rows.",
        );
        assert_eq!(
            parsed.supporting_quotes,
            vec!["It combines rows from two tables.".to_string()]
        );
    }

    #[test]
    fn test_no_quotes_and_empty_answer() {
        let parsed = parse_evaluation("Score: 6", "");
        assert!(parsed.supporting_quotes.is_empty());
    }

    #[test]
    fn test_well_formed_summary() {
        let response = "\
Strengths:
- Clear explanations
- Solid Python fundamentals

Areas for improvement:
- SQL depth

Summary:
A capable candidate with room to grow
on the data side.";
        let parsed = parse_summary(response);
        assert_eq!(
            parsed.strengths,
            vec!["Clear explanations".to_string(), "Solid Python fundamentals".to_string()]
        );
        assert_eq!(parsed.weaknesses, vec!["SQL depth".to_string()]);
        assert_eq!(
            parsed.narrative,
            "A capable candidate with room to grow on the data side."
        );
    }

    #[test]
    fn test_summary_with_missing_sections() {
        let parsed = parse_summary("The model rambled without any structure.");
        assert!(parsed.strengths.is_empty());
        assert!(parsed.weaknesses.is_empty());
        assert!(parsed.narrative.is_empty());
    }

    #[test]
    fn test_summary_bullets_do_not_leak_across_sections() {
        let response = "\
Strengths:
- Good communicator
Weaknesses:
- Shaky statistics
Summary:
Fine overall.";
        let parsed = parse_summary(response);
        assert_eq!(parsed.strengths, vec!["Good communicator".to_string()]);
        assert_eq!(parsed.weaknesses, vec!["Shaky statistics".to_string()]);
        assert_eq!(parsed.narrative, "Fine overall.");
    }

    #[test]
    fn test_parser_never_panics_on_weird_input() {
        for input in ["", "\"\"\"", "score:", "Quotes:\n", "- \n-\n", "Ünïcode scöre 3"] {
            let _ = parse_evaluation(input, "answer text.");
            let _ = parse_summary(input);
        }
    }
}
