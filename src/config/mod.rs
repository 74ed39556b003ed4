use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use clap::Parser;

/// Runtime configuration. Secrets come from flags or the environment; there
/// is no config file.
#[derive(Debug, Clone, Parser)]
#[command(name = "course-compass")]
#[command(about = "Topic discovery web UI backed by an LLM agent and a search API")]
pub struct CliConfig {
    /// Address the web server binds to.
    #[arg(long, env = "COMPASS_BIND", default_value = "127.0.0.1:8080")]
    pub bind: String,

    /// Chat-completions endpoint of an OpenAI-compatible API.
    #[arg(
        long,
        env = "OPENAI_API_URL",
        default_value = "https://api.openai.com/v1/chat/completions"
    )]
    pub llm_api_url: String,

    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub llm_api_key: String,

    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-4o-mini")]
    pub llm_model: String,

    #[arg(
        long,
        env = "SERPER_API_URL",
        default_value = "https://google.serper.dev/search"
    )]
    pub serper_api_url: String,

    #[arg(long, env = "SERPER_API_KEY", hide_env_values = true)]
    pub serper_api_key: String,

    /// SQLite database holding cached discoveries.
    #[arg(long, env = "COMPASS_DB", default_value = "sqlite://compass.db?mode=rwc")]
    pub database_url: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("llm_api_url", &self.llm_api_url)?;
        validate_url("serper_api_url", &self.serper_api_url)?;
        validate_non_empty_string("llm_api_key", &self.llm_api_key)?;
        validate_non_empty_string("serper_api_key", &self.serper_api_key)?;
        validate_non_empty_string("llm_model", &self.llm_model)?;
        validate_non_empty_string("database_url", &self.database_url)?;
        Ok(())
    }
}
