use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompassError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Upstream payload error: {message}")]
    Parse { message: String },

    #[error("Agent error: {message}")]
    Agent { message: String },

    #[error("PDF extraction failed: {0}")]
    Pdf(#[from] pdf_extract::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid value {value:?} for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl CompassError {
    /// Shape violation in an upstream payload (agent output, search response,
    /// stored document).
    pub fn parse(message: impl Into<String>) -> Self {
        CompassError::Parse {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompassError>;
