use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model artifact is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid model: {0}")]
    InvalidModel(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
