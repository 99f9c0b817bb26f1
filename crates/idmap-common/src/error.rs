use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdMapError {
    /// A source (or every source of a resolver) cannot handle the requested type.
    #[error("{context}: unsupported identifier type '{id_type}'")]
    UnsupportedIdentifierType { context: String, id_type: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed remote response: {0}")]
    MalformedResponse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TSV parse error: {0}")]
    Tsv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl IdMapError {
    pub fn unsupported(context: impl Into<String>, id_type: impl ToString) -> Self {
        IdMapError::UnsupportedIdentifierType {
            context: context.into(),
            id_type: id_type.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IdMapError>;
