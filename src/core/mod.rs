pub mod discover;
pub mod extract;

pub use crate::domain::model::{Course, Discover, Enrichment};
pub use crate::domain::ports::{CourseSearch, DiscoverStore, Enricher};
pub use crate::utils::error::Result;
