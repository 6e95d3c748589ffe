//! Identity keys for jobs and triggers.
//!
//! A key is an immutable `(group, name)` pair rendered as `group.name`. Keys
//! built without a group land in [`DEFAULT_GROUP`].

use std::fmt::{self, Write as _};
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::error::ValidationError;

/// Group assigned to keys that do not name one.
pub const DEFAULT_GROUP: &str = "DEFAULT";

/// Builds a name that will not collide with other names generated for `group`.
///
/// The first eight hex characters are derived from the group so names from
/// different groups never share a prefix; the remainder is 16 random bytes.
pub fn unique_name<R: Rng + ?Sized>(group: &str, rng: &mut R) -> String {
    let digest = Sha256::digest(group.as_bytes());
    let mut random = [0u8; 16];
    rng.fill_bytes(&mut random);

    let mut name = String::with_capacity(41);
    for byte in &digest[..4] {
        let _ = write!(name, "{byte:02x}");
    }
    name.push('-');
    for byte in &random {
        let _ = write!(name, "{byte:02x}");
    }
    name
}

fn normalize_group(group: &str) -> &str {
    if group.is_empty() {
        DEFAULT_GROUP
    } else {
        group
    }
}

macro_rules! define_key {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name {
            group: String,
            name: String,
        }

        impl $name {
            /// Creates a key in the default group.
            #[must_use]
            pub fn new(name: impl Into<String>) -> Self {
                Self::with_group(name, DEFAULT_GROUP)
            }

            /// Creates a key in an explicit group. An empty group means the default group.
            #[must_use]
            pub fn with_group(name: impl Into<String>, group: impl AsRef<str>) -> Self {
                Self {
                    group: normalize_group(group.as_ref()).to_string(),
                    name: name.into(),
                }
            }

            /// Creates a key with a generated name using the thread-local RNG.
            #[must_use]
            pub fn unique(group: impl AsRef<str>) -> Self {
                Self::unique_with(group, &mut rand::rng())
            }

            /// Creates a key with a name generated from the supplied random source.
            #[must_use]
            pub fn unique_with<R: Rng + ?Sized>(group: impl AsRef<str>, rng: &mut R) -> Self {
                let group = normalize_group(group.as_ref());
                Self {
                    name: unique_name(group, rng),
                    group: group.to_string(),
                }
            }

            /// Key name.
            #[must_use]
            pub fn name(&self) -> &str {
                &self.name
            }

            /// Key group.
            #[must_use]
            pub fn group(&self) -> &str {
                &self.group
            }

            /// Rejects keys that cannot be stored.
            ///
            /// # Errors
            ///
            /// Returns [`ValidationError::EmptyName`] when the name is empty and
            /// [`ValidationError::DottedGroup`] when the group contains a `.`.
            pub fn validate(&self) -> Result<(), ValidationError> {
                if self.name.is_empty() {
                    return Err(ValidationError::EmptyName);
                }
                if self.group.contains('.') {
                    return Err(ValidationError::DottedGroup(self.group.clone()));
                }
                Ok(())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}.{}", self.group, self.name)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            /// Parses `group.name`, splitting at the first dot. A string without
            /// a dot is a name in the default group.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let key = match s.split_once('.') {
                    Some((group, name)) => Self::with_group(name, group),
                    None => Self::new(s),
                };
                key.validate()?;
                Ok(key)
            }
        }
    };
}

define_key!(
    /// Identifies a stored job.
    JobKey
);

define_key!(
    /// Identifies a stored trigger.
    TriggerKey
);
