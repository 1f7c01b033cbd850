//! Process-wide copy of the environment
//!
//! For code that cannot be handed an [`Environment`]. The slot is filled
//! once by [`install`] and never changes afterwards; reading it before
//! that is an integration error and fails instead of returning a default.

use crate::environment::Environment;
use crate::error::{EnvError, Result};
use crate::vars;
use std::sync::OnceLock;
use tracing::{info, warn};

static ENVIRONMENT: OnceLock<Environment> = OnceLock::new();

/// Install the process environment. Fails with
/// [`EnvError::AlreadyInstalled`] on any later call, keeping the first value.
pub fn install(env: Environment) -> Result<&'static Environment> {
    let mut stored = false;
    let installed = ENVIRONMENT.get_or_init(|| {
        stored = true;
        env
    });
    if !stored {
        warn!("Attempted to replace the installed addon environment");
        return Err(EnvError::AlreadyInstalled);
    }

    info!(api_url = installed.api_url(), "Addon environment installed");
    Ok(installed)
}

/// Load from the process variables and install.
pub fn install_from_env() -> Result<&'static Environment> {
    install(Environment::from_env()?)
}

pub fn current() -> Option<&'static Environment> {
    ENVIRONMENT.get()
}

pub fn get_api_url() -> Result<&'static str> {
    current()
        .map(Environment::api_url)
        .ok_or(EnvError::MissingEnvironmentValue {
            name: vars::API_URL,
        })
}

pub fn get_instance_uuid() -> Result<&'static str> {
    current()
        .map(Environment::instance_uuid)
        .ok_or(EnvError::MissingEnvironmentValue {
            name: vars::INSTANCE_UUID,
        })
}
