use crate::domain::model::Course;
use crate::domain::ports::CourseSearch;
use crate::utils::error::{CompassError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct OrganicItem {
    title: String,
    link: String,
    snippet: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    organic: Vec<OrganicItem>,
}

/// Convert a raw search API payload into course records, preserving result
/// order. A payload without an `organic` array is a shape violation; an
/// empty array is a valid zero-result answer.
fn parse_organic(payload: serde_json::Value) -> Result<Vec<Course>> {
    let response: SearchResponse = serde_json::from_value(payload).map_err(|e| {
        CompassError::parse(format!("search response: {}", e))
    })?;

    Ok(response
        .organic
        .into_iter()
        .map(|item| Course {
            topic: item.title,
            url: item.link,
            description: item.snippet,
        })
        .collect())
}

/// Client for the Serper-style search API.
#[derive(Clone)]
pub struct SerperClient {
    http: Client,
    api_url: String,
    api_key: String,
}

impl SerperClient {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            http: Client::new(),
            api_url,
            api_key,
        }
    }

    /// One search round-trip. Also backs the agent's `web_search` tool.
    pub async fn search(&self, query: &str) -> Result<Vec<Course>> {
        tracing::debug!(query, "querying search API");

        let payload = self
            .http
            .post(&self.api_url)
            .header("X-API-KEY", &self.api_key)
            .json(&serde_json::json!({ "q": query }))
            .send()
            .await?
            .error_for_status()?
            .json::<serde_json::Value>()
            .await?;

        let courses = parse_organic(payload)?;
        tracing::debug!(query, count = courses.len(), "search API responded");
        Ok(courses)
    }
}

#[async_trait]
impl CourseSearch for SerperClient {
    async fn courses(&self, topic: &str) -> Result<Vec<Course>> {
        self.search(&format!("{} Courses", topic)).await
    }
}
