//! User roles for role-gated operations.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a registry user.
///
/// Admins manage schemes and can verify farmers and delete records; workers
/// handle day-to-day registration and enrollment work. Read access is open
/// to any authenticated user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Worker,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::Worker => write!(f, "worker"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "worker" => Ok(Role::Worker),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}
