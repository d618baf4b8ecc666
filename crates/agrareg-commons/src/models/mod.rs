//! Domain models for the registry.

mod enrollment;
mod farmer;
mod ids;
mod land;
mod role;
mod scheme;
mod user;

pub use enrollment::{Enrollment, EnrollmentStatus};
pub use farmer::{Address, Farmer, Verification};
pub use ids::{EnrollmentId, FarmerId, LandId, SchemeId, UserId};
pub use land::{Land, LandLocation};
pub use role::Role;
pub use scheme::{Scheme, SchemeEligibility};
pub use user::User;
