// Adapters layer: concrete clients for the external collaborators
// (LLM agent, search API, document store).

pub mod agent;
pub mod serper;
pub mod store;

pub use agent::AgentEnricher;
pub use serper::SerperClient;
pub use store::SqliteStore;
