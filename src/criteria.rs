use crate::models::{Criterion, Exchange};

/// One row of the topic -> criterion collapse table
#[derive(Debug, Clone)]
pub struct TopicMapping {
    pub topic: String,
    pub criterion_name: String,
    pub criterion_description: String,
}

/// Maps the topics found in a transcript onto canonical evaluation criteria.
///
/// The collapse table is held as data rather than control flow so the
/// domain-specific aliases (Deep Learning scored as Machine Learning, Data
/// Engineering scored as Python, and so on) can be revised without touching
/// the resolution algorithm.
#[derive(Debug, Clone)]
pub struct CriteriaTable {
    mappings: Vec<TopicMapping>,
}

const DEFAULT_MAPPINGS: &[(&str, &str, &str)] = &[
    ("Python", "Python", "Python programming skills"),
    ("SQL", "SQL", "SQL database querying skills"),
    ("Statistics", "Statistics", "Statistical knowledge and applications"),
    (
        "Machine Learning",
        "Machine Learning",
        "Machine learning concepts and applications",
    ),
    (
        "Deep Learning",
        "Machine Learning",
        "Machine learning concepts and applications",
    ),
    (
        "Data Engineering",
        "Python",
        "Python programming and data engineering skills",
    ),
    ("Communication", "Communication", "Communication and explanation skills"),
    ("General", "Communication", "Communication and explanation skills"),
];

/// Criterion used when resolution produces nothing to score
const FALLBACK_CRITERION: (&str, &str) =
    ("Communication", "Communication and explanation skills");

impl Default for CriteriaTable {
    fn default() -> Self {
        Self {
            mappings: DEFAULT_MAPPINGS
                .iter()
                .map(|(topic, name, description)| TopicMapping {
                    topic: topic.to_string(),
                    criterion_name: name.to_string(),
                    criterion_description: description.to_string(),
                })
                .collect(),
        }
    }
}

impl CriteriaTable {
    /// Build a table from custom mappings
    pub fn new(mappings: Vec<TopicMapping>) -> Self {
        Self { mappings }
    }

    /// Resolve a single topic to its canonical criterion, if mapped
    pub fn resolve_topic(&self, topic: &str) -> Option<&TopicMapping> {
        self.mappings.iter().find(|m| m.topic == topic)
    }

    /// Derive the deduplicated criterion list for a set of exchanges.
    ///
    /// Exchanges are walked in order and each topic is resolved through the
    /// collapse table; the first occurrence of a criterion name wins, so the
    /// output order is deterministic. An empty result falls back to a single
    /// default Communication criterion.
    pub fn resolve_criteria(&self, exchanges: &[Exchange]) -> Vec<Criterion> {
        let mut criteria: Vec<Criterion> = Vec::new();

        for exchange in exchanges {
            for topic in &exchange.topics {
                if let Some(mapping) = self.resolve_topic(topic) {
                    if !criteria.iter().any(|c| c.name == mapping.criterion_name) {
                        criteria.push(Criterion::new(
                            &mapping.criterion_name,
                            &mapping.criterion_description,
                        ));
                    }
                }
            }
        }

        if criteria.is_empty() {
            let (name, description) = FALLBACK_CRITERION;
            criteria.push(Criterion::new(name, description));
        }

        criteria
    }

    /// First exchange (traversal order) whose topics resolve to the given
    /// criterion; the scorer evaluates the criterion against this exchange.
    pub fn representative_exchange<'a>(
        &self,
        exchanges: &'a [Exchange],
        criterion_name: &str,
    ) -> Option<&'a Exchange> {
        exchanges.iter().find(|exchange| {
            exchange.topics.iter().any(|topic| {
                self.resolve_topic(topic)
                    .is_some_and(|m| m.criterion_name == criterion_name)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Exchange;

    fn tagged(question: &str, topics: &[&str]) -> Exchange {
        let mut ex = Exchange::new(question.to_string(), "answer".to_string(), String::new());
        ex.topics = topics.iter().map(|t| t.to_string()).collect();
        ex
    }

    #[test]
    fn test_aliases_collapse() {
        let table = CriteriaTable::default();
        let exchanges = vec![
            tagged("q1", &["Deep Learning"]),
            tagged("q2", &["Machine Learning"]),
            tagged("q3", &["Data Engineering"]),
        ];
        let criteria = table.resolve_criteria(&exchanges);
        let names: Vec<&str> = criteria.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Machine Learning", "Python"]);
    }

    #[test]
    fn test_first_occurrence_order_and_dedup() {
        let table = CriteriaTable::default();
        let exchanges = vec![
            tagged("q1", &["Python"]),
            tagged("q2", &["SQL"]),
            tagged("q3", &["Python", "General"]),
        ];
        let criteria = table.resolve_criteria(&exchanges);
        let names: Vec<&str> = criteria.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Python", "SQL", "Communication"]);
    }

    #[test]
    fn test_general_maps_to_communication() {
        let table = CriteriaTable::default();
        let criteria = table.resolve_criteria(&[tagged("q", &["General"])]);
        assert_eq!(criteria.len(), 1);
        assert_eq!(criteria[0].name, "Communication");
    }

    #[test]
    fn test_unknown_topics_fall_back_to_default() {
        let table = CriteriaTable::default();
        let criteria = table.resolve_criteria(&[tagged("q", &["Quantum Gardening"])]);
        assert_eq!(criteria.len(), 1);
        assert_eq!(criteria[0].name, "Communication");
    }

    #[test]
    fn test_representative_exchange_is_first_match() {
        let table = CriteriaTable::default();
        let exchanges = vec![
            tagged("sql question", &["SQL"]),
            tagged("first ml question", &["Deep Learning"]),
            tagged("second ml question", &["Machine Learning"]),
        ];
        let rep = table
            .representative_exchange(&exchanges, "Machine Learning")
            .unwrap();
        assert_eq!(rep.question, "first ml question");
        assert!(table.representative_exchange(&exchanges, "Python").is_none());
    }
}
