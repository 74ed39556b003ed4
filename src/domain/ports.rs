use crate::domain::model::{Course, Discover, Enrichment};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Produces a description and reference URL for a topic via the LLM agent.
#[async_trait]
pub trait Enricher: Send + Sync {
    async fn enrich(&self, topic: &str) -> Result<Enrichment>;
}

/// Fetches course listings for a topic from the search API.
#[async_trait]
pub trait CourseSearch: Send + Sync {
    async fn courses(&self, topic: &str) -> Result<Vec<Course>>;
}

/// Persistent cache of discoveries, keyed by normalized topic.
#[async_trait]
pub trait DiscoverStore: Send + Sync {
    /// Absence is not an error: `Ok(None)` when no record matches the key.
    async fn find(&self, key: &str) -> Result<Option<Discover>>;

    async fn insert(&self, discover: &Discover) -> Result<()>;
}
