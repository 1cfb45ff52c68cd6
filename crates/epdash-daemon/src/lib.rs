//! Daemon wiring: configuration and the display refresh loop
//!
//! Split out of the binary so integration tests can drive whole cycles.

pub mod config;
pub mod scheduler;

pub use config::DashConfig;
pub use scheduler::{seconds_until_next_minute, Scheduler};
