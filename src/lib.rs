//! Farmer and land registry server.
//!
//! Library surface of the server binary, exposed so integration tests can
//! reuse the configuration and lifecycle wiring.

pub mod config;
pub mod lifecycle;
pub mod logging;
