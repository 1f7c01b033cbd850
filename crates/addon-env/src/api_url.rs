//! Templated REST API base URL

use crate::error::{EnvError, Result};
use crate::id::AddonId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use tracing::debug;
use url::Url;

/// Placeholder the host leaves in the base URL for the addon identifier
pub const ADDON_ID_PLACEHOLDER: &str = "{addon-id}";

/// API base URL exactly as the host injected it.
///
/// The string is kept verbatim: parsing it with [`Url`] would percent-encode
/// the `{addon-id}` braces, and callers must get back the injected value.
/// Validation happens once in [`ApiUrl::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ApiUrl {
    raw: String,
    placeholder: Option<Range<usize>>,
}

impl ApiUrl {
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let raw = value.into();
        let invalid = |reason: String| EnvError::InvalidApiUrl {
            value: raw.clone(),
            reason,
        };

        if raw.trim() != raw {
            return Err(invalid("surrounding whitespace".to_string()));
        }

        let url = Url::parse(&raw).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(invalid("missing host".to_string()));
        }
        if url.cannot_be_a_base() {
            return Err(invalid("URL cannot be used as a base".to_string()));
        }

        let placeholder = find_placeholder(&raw).map_err(invalid)?;
        debug!(api_url = %raw, has_placeholder = placeholder.is_some(), "API URL validated");

        Ok(Self { raw, placeholder })
    }

    /// The injected string, unchanged
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The literal placeholder token, e.g. `{addon-id}`
    pub fn placeholder(&self) -> Option<&str> {
        self.placeholder.clone().map(|range| &self.raw[range])
    }

    /// Substitute `addon_id` for the placeholder. A template without a
    /// placeholder resolves to itself; one that still holds a `{name}` token
    /// after substitution fails with [`EnvError::UnresolvedPlaceholder`].
    pub fn resolve(&self, addon_id: AddonId) -> Result<Url> {
        let resolved = match &self.placeholder {
            Some(range) => {
                let mut s = String::with_capacity(self.raw.len());
                s.push_str(&self.raw[..range.start]);
                s.push_str(&addon_id.to_string());
                s.push_str(&self.raw[range.end..]);
                s
            }
            None => self.raw.clone(),
        };

        if resolved.contains(['{', '}']) {
            return Err(EnvError::UnresolvedPlaceholder {
                url: resolved,
                reason: "template still contains a placeholder".to_string(),
            });
        }

        Url::parse(&resolved).map_err(|e| EnvError::UnresolvedPlaceholder {
            url: resolved.clone(),
            reason: e.to_string(),
        })
    }

    /// Resolve the template and append a path relative to it.
    ///
    /// The result must stay under the resolved base: absolute URLs and `..`
    /// segments that leave it are rejected, since requests to it carry the
    /// instance's call token.
    pub fn endpoint(&self, addon_id: AddonId, path: &str) -> Result<Url> {
        let mut base = self.resolve(addon_id)?;
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }

        let invalid = |reason: String| EnvError::InvalidApiUrl {
            value: path.to_string(),
            reason,
        };
        let joined = base
            .join(path.trim_start_matches('/'))
            .map_err(|e| invalid(e.to_string()))?;

        if joined.origin() != base.origin() || !joined.path().starts_with(base.path()) {
            return Err(invalid(format!("path escapes the API base {base}")));
        }
        Ok(joined)
    }
}

/// Pick the placeholder token. `{addon-id}` wins when present; otherwise a
/// single host-specific `{name}` token is used. Several candidates without
/// `{addon-id}` are ambiguous.
fn find_placeholder(raw: &str) -> std::result::Result<Option<Range<usize>>, String> {
    let mut tokens = Vec::new();
    let mut cursor = 0;
    while let Some(offset) = raw[cursor..].find(['{', '}']) {
        let start = cursor + offset;
        if raw[start..].starts_with('}') {
            return Err("unmatched '}' in URL".to_string());
        }

        let end = raw[start + 1..]
            .find('}')
            .map(|offset| start + 1 + offset + 1)
            .ok_or_else(|| "unterminated placeholder".to_string())?;

        let name = &raw[start + 1..end - 1];
        if name.is_empty() || name.contains(['{', '/']) {
            return Err(format!("malformed placeholder '{}'", &raw[start..end]));
        }

        tokens.push(start..end);
        cursor = end;
    }

    if let Some(canonical) = tokens
        .iter()
        .find(|range| &raw[(*range).clone()] == ADDON_ID_PLACEHOLDER)
    {
        return Ok(Some(canonical.clone()));
    }

    match tokens.as_slice() {
        [] => Ok(None),
        [only] => Ok(Some(only.clone())),
        _ => Err(format!(
            "{} placeholders and none is {ADDON_ID_PLACEHOLDER}",
            tokens.len()
        )),
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl TryFrom<String> for ApiUrl {
    type Error = EnvError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<ApiUrl> for String {
    fn from(value: ApiUrl) -> Self {
        value.raw
    }
}
