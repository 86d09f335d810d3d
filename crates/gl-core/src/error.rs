use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlossaError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Dictionary not built before {operation}")]
    DictionaryNotBuilt { operation: &'static str },
    #[error("Corrupt input at char {offset}: {reason}")]
    CorruptInput { offset: usize, reason: String },
    #[error("Round-trip validation failed at char {offset}")]
    ValidationFailed { offset: usize },
    #[error("Invalid regex: {0}")]
    InvalidRegex(#[from] regex::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlossaError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Whether the error comes from misuse or bad settings rather than bad data.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::Configuration(_) | Self::DictionaryNotBuilt { .. } | Self::InvalidRegex(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, GlossaError>;
