use crate::domain::model::{Course, Discover};
use crate::domain::ports::DiscoverStore;
use crate::utils::error::{CompassError, Result};
use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Row, SqlitePool};

/// SQLite-backed document store for cached discoveries. The course list is
/// persisted as one JSON column, keeping the row a single flat document.
///
/// `topic` carries no unique index: two concurrent first-time submissions of
/// the same topic can both insert. Lookups take the first row, so duplicate
/// documents are invisible to readers. Known gap, kept as-is.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open the pool once at startup; the handle is injected everywhere else.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS discoveries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                topic TEXT NOT NULL,
                description TEXT NOT NULL,
                url TEXT NOT NULL,
                courses TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl DiscoverStore for SqliteStore {
    async fn find(&self, key: &str) -> Result<Option<Discover>> {
        let row = sqlx::query(
            "SELECT topic, description, url, courses FROM discoveries WHERE topic = ?1 LIMIT 1",
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let courses_json: String = row.try_get("courses")?;
        let courses: Vec<Course> = serde_json::from_str(&courses_json).map_err(|e| {
            CompassError::parse(format!("stored courses for {}: {}", key, e))
        })?;

        Ok(Some(Discover {
            topic: row.try_get("topic")?,
            description: row.try_get("description")?,
            url: row.try_get("url")?,
            courses,
        }))
    }

    async fn insert(&self, discover: &Discover) -> Result<()> {
        let courses = serde_json::to_string(&discover.courses)?;

        sqlx::query(
            "INSERT INTO discoveries (topic, description, url, courses) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&discover.topic)
        .bind(&discover.description)
        .bind(&discover.url)
        .bind(courses)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // File-backed database: with an in-memory URL every pooled connection
    // would see its own empty database.
    async fn temp_store() -> (TempDir, SqliteStore) {
        let dir = TempDir::new().unwrap();
        let url = format!(
            "sqlite://{}/compass.db?mode=rwc",
            dir.path().to_str().unwrap()
        );
        let store = SqliteStore::connect(&url).await.unwrap();
        (dir, store)
    }

    fn sample_discover() -> Discover {
        Discover {
            topic: "python".to_string(),
            description: "A programming language".to_string(),
            url: "https://www.python.org/".to_string(),
            courses: vec![
                Course {
                    topic: "A".to_string(),
                    url: "u1".to_string(),
                    description: "d1".to_string(),
                },
                Course {
                    topic: "B".to_string(),
                    url: "u2".to_string(),
                    description: "d2".to_string(),
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_round_trip_preserves_fields_and_order() {
        let (_dir, store) = temp_store().await;
        let discover = sample_discover();

        store.insert(&discover).await.unwrap();
        let found = store.find("python").await.unwrap().unwrap();

        assert_eq!(found, discover);
    }

    #[tokio::test]
    async fn test_unknown_key_is_none_not_error() {
        let (_dir, store) = temp_store().await;
        assert!(store.find("unknown").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_lookup_is_exact_match_on_key() {
        let (_dir, store) = temp_store().await;
        store.insert(&sample_discover()).await.unwrap();

        // Keys are stored normalized; lookups with raw input do not match.
        assert!(store.find("Python").await.unwrap().is_none());
        assert!(store.find("python ").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_courses_column_is_a_parse_error() {
        let (_dir, store) = temp_store().await;

        sqlx::query(
            "INSERT INTO discoveries (topic, description, url, courses) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind("broken")
        .bind("desc")
        .bind("https://example.com")
        .bind("not json")
        .execute(&store.pool)
        .await
        .unwrap();

        assert!(matches!(
            store.find("broken").await,
            Err(CompassError::Parse { .. })
        ));
    }
}
