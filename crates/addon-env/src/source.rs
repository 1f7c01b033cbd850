//! Host boundary: where the injected values come from
//!
//! Hosts either launch the addon with the values set as process
//! environment variables, or send them as a JSON handshake message.

use crate::environment::Environment;
use crate::error::{EnvError, Result};
use crate::vars;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env::VarError;
use std::fmt;
use tracing::info;

/// Anything that can answer "what value did the host set for `name`?"
///
/// `Ok(None)` means the host did not set it. A value that is present but
/// unreadable is an error.
pub trait HostSource {
    fn value(&self, name: &str) -> Result<Option<String>>;
}

/// Reads the values from the process environment variables.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl HostSource for ProcessEnv {
    fn value(&self, name: &str) -> Result<Option<String>> {
        match std::env::var(name) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(raw)) => Err(unreadable(
                name,
                raw.to_string_lossy().into_owned(),
            )),
        }
    }
}

fn unreadable(name: &str, value: String) -> EnvError {
    let reason = "value is not valid UTF-8".to_string();
    match name {
        vars::INSTANCE_UUID => EnvError::InvalidInstanceUuid { value, reason },
        _ => EnvError::InvalidApiUrl { value, reason },
    }
}

impl HostSource for HashMap<String, String> {
    fn value(&self, name: &str) -> Result<Option<String>> {
        Ok(self.get(name).cloned())
    }
}

impl<S: HostSource + ?Sized> HostSource for &S {
    fn value(&self, name: &str) -> Result<Option<String>> {
        (**self).value(name)
    }
}

/// Handshake message carrying both values.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostHandshake {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub instance_uuid: Option<String>,
}

impl fmt::Debug for HostHandshake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostHandshake")
            .field("api_url", &self.api_url)
            .field(
                "instance_uuid",
                &self.instance_uuid.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl HostSource for HostHandshake {
    fn value(&self, name: &str) -> Result<Option<String>> {
        Ok(match name {
            vars::API_URL => self.api_url.clone(),
            vars::INSTANCE_UUID => self.instance_uuid.clone(),
            _ => None,
        })
    }
}

impl Environment {
    pub fn from_source(source: &impl HostSource) -> Result<Self> {
        let api_url = source
            .value(vars::API_URL)?
            .ok_or(EnvError::MissingEnvironmentValue {
                name: vars::API_URL,
            })?;
        let instance_uuid =
            source
                .value(vars::INSTANCE_UUID)?
                .ok_or(EnvError::MissingEnvironmentValue {
                    name: vars::INSTANCE_UUID,
                })?;

        let env = Self::new(api_url, instance_uuid)?;
        info!(api_url = env.api_url(), "Addon environment loaded");
        Ok(env)
    }

    /// Build from the `API_URL` and `INSTANCE_UUID` process variables.
    pub fn from_env() -> Result<Self> {
        Self::from_source(&ProcessEnv)
    }

    pub fn from_handshake(handshake: HostHandshake) -> Result<Self> {
        Self::from_source(&handshake)
    }

    pub fn from_handshake_json(json: &str) -> Result<Self> {
        let handshake: HostHandshake = serde_json::from_str(json)?;
        Self::from_handshake(handshake)
    }
}
