//! Call token sent with every request to the addon API

use crate::id::InstanceUuid;
use std::fmt;

/// `Authorization` header value identifying the calling instance.
#[derive(Clone, PartialEq, Eq)]
pub struct CallToken(String);

impl CallToken {
    pub fn for_instance(instance: InstanceUuid) -> Self {
        Self(format!("Basic {instance}"))
    }

    pub fn header_value(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CallToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CallToken(<redacted>)")
    }
}
