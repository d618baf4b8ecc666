//! Land holding record.

use super::ids::{FarmerId, LandId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Location attributes of a land parcel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandLocation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// A surveyed land parcel. Belongs to exactly one farmer; a farmer may hold
/// multiple parcels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Land {
    pub id: LandId,
    pub farmer_id: FarmerId,
    pub survey_number: String,
    /// Surveyed area in hectares. Non-negative.
    pub area_hectares: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub irrigation_type: Option<String>,
    #[serde(default)]
    pub location: LandLocation,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
