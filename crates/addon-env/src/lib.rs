//! # Addon Env
//!
//! Typed, read-only access to the two values a host application injects
//! into every addon process:
//!
//! - the REST API base URL, a template such as
//!   `https://api.example.com/addon-api/v1/{addon-id}/`
//! - the UUID identifying this running addon instance
//!
//! The host owns both values. Build an [`Environment`] once at startup
//! (from process variables, a handshake message, or explicit strings) and
//! pass it to whatever needs it. Code that cannot be handed the object can
//! read the process-wide copy through [`global`].

pub mod api_url;
pub mod environment;
pub mod error;
pub mod global;
pub mod id;
pub mod registration;
pub mod source;
pub mod token;

pub use api_url::{ApiUrl, ADDON_ID_PLACEHOLDER};
pub use environment::Environment;
pub use error::{EnvError, Result};
pub use id::{AddonId, InstanceUuid};
pub use registration::InstallResponse;
pub use source::{HostHandshake, HostSource, ProcessEnv};
pub use token::CallToken;

/// Current crate version for compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build information for logs and diagnostics
pub const BUILD_INFO: &str = concat!(
    "Addon Env ",
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CARGO_PKG_NAME"),
    ")"
);

/// Names under which the host publishes the injected values
pub mod vars {
    pub const API_URL: &str = "API_URL";
    pub const INSTANCE_UUID: &str = "INSTANCE_UUID";
}
