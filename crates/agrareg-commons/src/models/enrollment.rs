//! Enrollment record linking a farmer, a land parcel and a scheme.

use super::ids::{EnrollmentId, FarmerId, LandId, SchemeId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Approval status of an enrollment application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Applied,
    Approved,
    Rejected,
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnrollmentStatus::Applied => write!(f, "applied"),
            EnrollmentStatus::Approved => write!(f, "approved"),
            EnrollmentStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for EnrollmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applied" => Ok(EnrollmentStatus::Applied),
            "approved" => Ok(EnrollmentStatus::Approved),
            "rejected" => Ok(EnrollmentStatus::Rejected),
            other => Err(format!("unknown enrollment status: {}", other)),
        }
    }
}

/// A link between a farmer, a specific land holding and a scheme, carrying
/// an approval status. Duplicate applications for the same farmer/land/
/// scheme combination are permitted; the status workflow handles them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub farmer_id: FarmerId,
    pub land_id: LandId,
    pub scheme_id: SchemeId,
    pub status: EnrollmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&EnrollmentStatus::Applied).unwrap(),
            "\"applied\""
        );
        let s: EnrollmentStatus = serde_json::from_str("\"rejected\"").unwrap();
        assert_eq!(s, EnrollmentStatus::Rejected);
    }

    #[test]
    fn test_status_from_str_rejects_unknown() {
        assert!(EnrollmentStatus::from_str("pending").is_err());
        assert_eq!(
            EnrollmentStatus::from_str("approved").unwrap(),
            EnrollmentStatus::Approved
        );
    }
}
