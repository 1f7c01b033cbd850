//! Error types for API calls

use addon_env::EnvError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Env(#[from] EnvError),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid collection name '{name}'")]
    InvalidCollection { name: String },

    #[error("Addon API error: {description}")]
    Remote { description: String },
}
