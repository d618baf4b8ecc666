//! Type-safe wrappers for entity identifiers.
//!
//! Each entity type gets its own id wrapper so a `FarmerId` cannot be passed
//! where a `SchemeId` is expected. Ids are UUID-v4 strings generated at
//! creation time.

use crate::storage_key::StorageKey;
use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an id from an existing string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generates a fresh random id.
            pub fn generate() -> Self {
                Self(uuid::Uuid::new_v4().to_string())
            }

            /// Returns the id as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the wrapper and returns the inner String.
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl StorageKey for $name {
            fn storage_key(&self) -> Vec<u8> {
                self.0.as_bytes().to_vec()
            }

            fn from_storage_key(bytes: &[u8]) -> Result<Self, String> {
                String::from_utf8(bytes.to_vec())
                    .map(Self)
                    .map_err(|e| format!("invalid utf-8 in storage key: {}", e))
            }
        }
    };
}

define_id!(
    /// Identifier of a registered farmer.
    FarmerId
);
define_id!(
    /// Identifier of a surveyed land parcel.
    LandId
);
define_id!(
    /// Identifier of a welfare scheme.
    SchemeId
);
define_id!(
    /// Identifier of an enrollment application.
    EnrollmentId
);
define_id!(
    /// Identifier of a registry user account.
    UserId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        let a = FarmerId::generate();
        let b = FarmerId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_storage_key_round_trip() {
        let id = SchemeId::new("s-123");
        let bytes = id.storage_key();
        let back = SchemeId::from_storage_key(&bytes).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_serde_transparent() {
        let id = LandId::new("l-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"l-1\"");
        let back: LandId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
