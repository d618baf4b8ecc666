//! Domain logic for the agrareg registry.
//!
//! Builds typed entity stores on top of the storage layer, wires them into a
//! shared [`AppContext`], and hosts the two pieces of business logic the
//! HTTP layer calls into: the scheme eligibility evaluator and the dashboard
//! statistics aggregation.

pub mod app_context;
pub mod dashboard;
pub mod eligibility;
pub mod stores;

pub use app_context::AppContext;
pub use dashboard::{compute_stats, compute_stats_async, DashboardStats};
pub use eligibility::{evaluate_eligibility, EligibilityReport};
