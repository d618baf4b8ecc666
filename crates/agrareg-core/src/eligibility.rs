//! Scheme eligibility evaluation.
//!
//! Pure function of its inputs: given a farmer's land holdings, the active
//! scheme catalog and the current time, compute the subset of schemes the
//! farmer qualifies for, along with the aggregates the decision was based
//! on. Performs no I/O and holds no state; callers fetch the snapshot.

use agrareg_commons::{Land, Scheme};
use chrono::{DateTime, Utc};

/// Result of an eligibility evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct EligibilityReport {
    /// Sum of `area_hectares` over all holdings; 0 when the farmer has none.
    pub total_land_area: f64,
    /// Distinct districts across holdings, first-seen order. Holdings
    /// without a recorded district contribute nothing.
    pub farmer_districts: Vec<String>,
    /// Matching schemes in catalog order.
    pub eligible_schemes: Vec<Scheme>,
}

/// Evaluates which of the given active schemes the farmer qualifies for.
///
/// A scheme matches when all of the following hold:
/// - it has no application deadline, or `now` is not past it (a scheme is
///   still open on the deadline instant itself);
/// - the farmer's total land area is at least `min_land_area`;
/// - `max_land_area` is 0 (no ceiling) or the total area does not exceed it;
/// - the scheme has no district restriction, or at least one of the
///   farmer's districts is allowed.
///
/// An empty result is a normal outcome, not an error. A farmer with no
/// holdings evaluates with `total_land_area = 0` and still matches schemes
/// whose `min_land_area` is 0.
pub fn evaluate_eligibility(
    lands: &[Land],
    active_schemes: &[Scheme],
    now: DateTime<Utc>,
) -> EligibilityReport {
    let total_land_area: f64 = lands.iter().map(|l| l.area_hectares).sum();

    let mut farmer_districts: Vec<String> = Vec::new();
    for land in lands {
        if let Some(district) = &land.location.district {
            if !farmer_districts.iter().any(|d| d == district) {
                farmer_districts.push(district.clone());
            }
        }
    }

    let eligible_schemes = active_schemes
        .iter()
        .filter(|scheme| {
            if !scheme.is_active {
                return false;
            }
            if let Some(deadline) = scheme.application_deadline {
                if now > deadline {
                    return false;
                }
            }
            scheme.eligibility.area_eligible(total_land_area)
                && scheme.eligibility.district_eligible(&farmer_districts)
        })
        .cloned()
        .collect();

    EligibilityReport {
        total_land_area,
        farmer_districts,
        eligible_schemes,
    }
}
