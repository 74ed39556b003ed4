pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod server;
pub mod utils;

pub use crate::core::discover::{normalize_topic, DiscoverService};
pub use config::CliConfig;
pub use domain::model::{Course, Discover, Enrichment};
pub use utils::error::{CompassError, Result};
