//! Welfare scheme record and its eligibility rules.

use super::ids::{SchemeId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Eligibility rules of a scheme.
///
/// Zero is the "unset" sentinel for both area bounds: `min_land_area == 0`
/// means no floor, and `max_land_area == 0` means no ceiling (not "zero
/// hectares"). An empty `allowed_districts` means all districts qualify.
/// The sentinel convention is inherited from the stored documents and kept
/// deliberately.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemeEligibility {
    #[serde(default)]
    pub min_land_area: f64,
    #[serde(default)]
    pub max_land_area: f64,
    #[serde(default)]
    pub allowed_districts: Vec<String>,
}

impl SchemeEligibility {
    /// True when the given total land area satisfies the area bounds.
    pub fn area_eligible(&self, total_land_area: f64) -> bool {
        if total_land_area < self.min_land_area {
            return false;
        }
        // max_land_area == 0 imposes no upper bound
        self.max_land_area == 0.0 || total_land_area <= self.max_land_area
    }

    /// True when the district restriction admits at least one of the given
    /// districts. An empty restriction admits everything.
    pub fn district_eligible<S: AsRef<str>>(&self, districts: &[S]) -> bool {
        if self.allowed_districts.is_empty() {
            return true;
        }
        districts
            .iter()
            .any(|d| self.allowed_districts.iter().any(|a| a == d.as_ref()))
    }
}

/// A welfare program definition with eligibility rules and an optional
/// application deadline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scheme {
    pub id: SchemeId,
    pub title: String,
    /// Uppercase code, unique across schemes, `[A-Z0-9-]+`.
    pub scheme_code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub benefits: String,
    #[serde(default)]
    pub eligibility: SchemeEligibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_deadline: Option<DateTime<Utc>>,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
