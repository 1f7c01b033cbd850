//! Error types for the addon environment

use thiserror::Error;

pub type Result<T> = std::result::Result<T, EnvError>;

#[derive(Error, Debug)]
pub enum EnvError {
    #[error("Missing environment value: {name} has not been provided by the host")]
    MissingEnvironmentValue { name: &'static str },

    #[error("Invalid API URL '{value}': {reason}")]
    InvalidApiUrl { value: String, reason: String },

    #[error("Invalid instance UUID '{value}': {reason}")]
    InvalidInstanceUuid { value: String, reason: String },

    #[error("Environment already installed for this process")]
    AlreadyInstalled,

    #[error("Invalid host handshake: {source}")]
    InvalidHandshake {
        #[from]
        source: serde_json::Error,
    },

    #[error("Unresolved placeholder in '{url}': {reason}")]
    UnresolvedPlaceholder { url: String, reason: String },
}

impl EnvError {
    /// Whether the error comes from a value the host supplied incorrectly
    /// (as opposed to misuse by addon code).
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::MissingEnvironmentValue { .. }
                | Self::InvalidApiUrl { .. }
                | Self::InvalidInstanceUuid { .. }
                | Self::InvalidHandshake { .. }
        )
    }
}
