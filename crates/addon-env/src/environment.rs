//! The environment descriptor handed to addon code

use crate::api_url::ApiUrl;
use crate::error::{EnvError, Result};
use crate::id::{self, InstanceUuid};
use crate::source::HostHandshake;
use crate::token::CallToken;
use crate::vars;
use serde::Serialize;
use std::fmt;

/// The two values the host injects into an addon process.
///
/// Immutable once built. Construct it at startup and share it by
/// reference or `Arc`. The instance UUID doubles as the call credential,
/// so `Debug` output leaves it out.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(into = "HostHandshake")]
pub struct Environment {
    api_url: ApiUrl,
    instance_uuid: String,
    instance_id: InstanceUuid,
}

impl Environment {
    /// Validate and wrap the injected values.
    ///
    /// Empty values count as missing. Malformed values are configuration
    /// errors; they will not change for the life of the process, so callers
    /// should report them and stop rather than retry.
    pub fn new(api_url: impl Into<String>, instance_uuid: impl Into<String>) -> Result<Self> {
        let api_url = required(vars::API_URL, api_url.into())?;
        let instance_uuid = required(vars::INSTANCE_UUID, instance_uuid.into())?;

        let api_url = ApiUrl::parse(api_url)?;
        let uuid = id::parse_hyphenated(&instance_uuid).map_err(|reason| {
            EnvError::InvalidInstanceUuid {
                value: instance_uuid.clone(),
                reason,
            }
        })?;
        if uuid.is_nil() {
            return Err(EnvError::InvalidInstanceUuid {
                value: instance_uuid,
                reason: "nil UUID cannot identify an instance".to_string(),
            });
        }

        Ok(Self {
            api_url,
            instance_uuid,
            instance_id: InstanceUuid::from(uuid),
        })
    }

    /// The API base URL, exactly as injected
    pub fn api_url(&self) -> &str {
        self.api_url.as_str()
    }

    /// The instance UUID, exactly as injected
    pub fn instance_uuid(&self) -> &str {
        &self.instance_uuid
    }

    pub fn api(&self) -> &ApiUrl {
        &self.api_url
    }

    pub fn instance_id(&self) -> InstanceUuid {
        self.instance_id
    }

    pub fn call_token(&self) -> CallToken {
        CallToken::for_instance(self.instance_id)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("api_url", &self.api_url.as_str())
            .field("instance_uuid", &"<redacted>")
            .finish()
    }
}

fn required(name: &'static str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(EnvError::MissingEnvironmentValue { name });
    }
    Ok(value)
}

impl From<Environment> for HostHandshake {
    fn from(env: Environment) -> Self {
        Self {
            api_url: Some(env.api_url.into()),
            instance_uuid: Some(env.instance_uuid),
        }
    }
}
