use serde::{Deserialize, Serialize};

/// One course listing, mapped from a single organic search result.
/// Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub topic: String,
    pub url: String,
    pub description: String,
}

/// Aggregated discovery for a topic.
///
/// `topic` holds the normalized cache key, not the string the user typed.
/// `courses` preserves the search API's result order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discover {
    pub topic: String,
    pub description: String,
    pub url: String,
    pub courses: Vec<Course>,
}

/// Structured answer produced by the enrichment agent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Enrichment {
    pub description: String,
    pub url: String,
}
