use crate::domain::model::Discover;
use crate::domain::ports::{CourseSearch, DiscoverStore, Enricher};
use crate::utils::error::Result;

/// Map a user-typed topic to its cache key: lower-case, spaces removed.
///
/// Nothing else is normalized. Punctuation and unicode forms pass through
/// untouched, so "c++" and "c + +" are the same key while "c-plus-plus" is
/// not. Accepted limitation, not a guarantee.
pub fn normalize_topic(input: &str) -> String {
    input.to_lowercase().replace(' ', "")
}

/// Composes cache lookup, enrichment and course fetch, persisting fresh
/// results. Ports are injected so tests can count collaborator calls.
pub struct DiscoverService<E, C, S> {
    enricher: E,
    search: C,
    store: S,
}

impl<E: Enricher, C: CourseSearch, S: DiscoverStore> DiscoverService<E, C, S> {
    pub fn new(enricher: E, search: C, store: S) -> Self {
        Self {
            enricher,
            search,
            store,
        }
    }

    /// Serve a topic from the cache, or enrich + fetch + persist on a miss.
    ///
    /// On a hit the stored record is returned verbatim and no collaborator
    /// is called. On a miss, enrichment runs first, then the course fetch,
    /// both sequentially; any failure aborts the run before anything is
    /// persisted. The enricher and the search both see the topic as typed;
    /// only the stored key and the returned record are normalized.
    pub async fn discover(&self, topic: &str) -> Result<Discover> {
        let key = normalize_topic(topic);

        if let Some(cached) = self.store.find(&key).await? {
            tracing::info!(topic = %key, "cache hit");
            return Ok(cached);
        }

        tracing::info!(topic = %key, "cache miss, querying collaborators");
        let enrichment = self.enricher.enrich(topic).await?;
        let courses = self.search.courses(topic).await?;

        let discover = Discover {
            topic: key,
            description: enrichment.description,
            url: enrichment.url,
            courses,
        };

        self.store.insert(&discover).await?;
        tracing::info!(topic = %discover.topic, courses = discover.courses.len(), "persisted discovery");

        Ok(discover)
    }
}
