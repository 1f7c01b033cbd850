//! UUID-backed identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// The nil identifier, used where no value has been assigned
            pub const fn none() -> Self {
                Self(Uuid::nil())
            }

            pub fn is_none(self) -> bool {
                self.0.is_nil()
            }

            pub const fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::none()
            }
        }

        impl Deref for $name {
            type Target = Uuid;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<Uuid> for $name {
            fn eq(&self, other: &Uuid) -> bool {
                self.0 == *other
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Uuid::from_str(s).map(Self)
            }
        }
    };
}

uuid_id!(
    /// Identifies one running instance of an addon
    InstanceUuid
);

uuid_id!(
    /// Identifies an addon, substituted into the API URL template
    AddonId
);

/// Length of the hyphenated 8-4-4-4-12 form.
const HYPHENATED_LEN: usize = 36;

/// Parse a UUID that must be written in canonical hyphenated form.
///
/// `Uuid::parse_str` also accepts the simple, braced and URN forms; the
/// host contract only allows the hyphenated one.
pub(crate) fn parse_hyphenated(value: &str) -> std::result::Result<Uuid, String> {
    let uuid = Uuid::try_parse(value).map_err(|e| e.to_string())?;
    if value.len() != HYPHENATED_LEN {
        return Err(format!(
            "expected hyphenated 8-4-4-4-12 form, got {} characters",
            value.len()
        ));
    }
    Ok(uuid)
}
