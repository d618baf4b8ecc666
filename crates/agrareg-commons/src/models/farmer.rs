//! Farmer record.

use super::ids::{FarmerId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Postal address of a farmer. All fields optional; records are often
/// registered with partial addresses and completed later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub village: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tehsil: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
}

/// Verification state of a farmer record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    #[serde(default)]
    pub status: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
}

/// An individual registered in the system, owner of zero or more land
/// holdings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farmer {
    pub id: FarmerId,
    pub name: String,
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aadhar: Option<String>,
    #[serde(default)]
    pub address: Address,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,
    #[serde(default)]
    pub verified: Verification,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_farmer_json_defaults() {
        // Partial documents deserialize with defaulted address/verification.
        let json = r#"{
            "id": "f1",
            "name": "Ramesh",
            "phone": "9999999999",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }"#;
        let farmer: Farmer = serde_json::from_str(json).unwrap();
        assert!(!farmer.verified.status);
        assert!(farmer.address.district.is_none());
        assert!(farmer.aadhar.is_none());
    }
}
