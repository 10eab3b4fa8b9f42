use thiserror::Error;

#[derive(Debug, Error)]
pub enum GresViewError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

impl From<serde_json::error::Error> for GresViewError {
    fn from(e: serde_json::error::Error) -> Self {
        Self::DeserializationError(e.to_string())
    }
}

impl From<toml::de::Error> for GresViewError {
    fn from(error: toml::de::Error) -> Self {
        Self::DeserializationError(error.to_string())
    }
}
