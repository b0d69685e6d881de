use crate::models::Exchange;

/// Fixed topic -> keyword table used for tagging exchanges.
///
/// A topic is assigned when any keyword appears as a substring of the
/// case-folded question+answer text. Table order is fixed so tagging is
/// deterministic.
const TOPIC_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Python",
        &["python", "pandas", "numpy", "dataframe", "list", "dict", "pip", "library"],
    ),
    (
        "SQL",
        &["sql", "query", "database", "join", "table", "select", "from", "where", "group by"],
    ),
    (
        "Statistics",
        &[
            "statistics",
            "probability",
            "distribution",
            "hypothesis",
            "p-value",
            "confidence",
            "mean",
            "median",
        ],
    ),
    (
        "Machine Learning",
        &[
            "machine learning",
            "model",
            "algorithm",
            "feature",
            "train",
            "test",
            "validation",
            "accuracy",
            "precision",
            "recall",
        ],
    ),
    (
        "Deep Learning",
        &["neural", "network", "deep learning", "cnn", "rnn", "lstm", "transformer"],
    ),
    (
        "Data Engineering",
        &["data engineering", "pipeline", "etl", "spark", "hadoop", "data warehouse"],
    ),
    (
        "Communication",
        &["explain", "communicate", "team", "stakeholder", "present", "non-technical"],
    ),
];

/// Topic assigned when no keyword matches
pub const GENERAL_TOPIC: &str = "General";

/// Label each exchange with technical topics, a code-presence flag and its
/// 1-based position. Pure and deterministic: identical text always yields
/// identical tags.
pub fn tag_topics(exchanges: &mut [Exchange]) {
    for (i, exchange) in exchanges.iter_mut().enumerate() {
        exchange.position = i + 1;
        exchange.topics = detect_topics(&exchange.question, &exchange.answer);
        exchange.contains_code = detect_code(&exchange.answer);
    }
}

fn detect_topics(question: &str, answer: &str) -> Vec<String> {
    let combined = format!("{question} {answer}").to_lowercase();
    let mut topics: Vec<String> = TOPIC_KEYWORDS
        .iter()
        .filter(|(_, keywords)| keywords.iter().any(|k| combined.contains(k)))
        .map(|(topic, _)| topic.to_string())
        .collect();

    if topics.is_empty() {
        topics.push(GENERAL_TOPIC.to_string());
    }
    topics
}

fn detect_code(answer: &str) -> bool {
    answer.contains("```") || answer.lines().any(|l| l.starts_with("    "))
}

/// Count how often each topic appears across the exchanges, in first-seen
/// order. Used for transcript analysis output.
pub fn topic_counts(exchanges: &[Exchange]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for exchange in exchanges {
        for topic in &exchange.topics {
            match counts.iter_mut().find(|(name, _)| name == topic) {
                Some((_, n)) => *n += 1,
                None => counts.push((topic.clone(), 1)),
            }
        }
    }
    counts
}
