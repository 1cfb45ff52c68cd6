//! Core data types and pipeline traits for the e-paper dashboard
//!
//! This crate defines the value types shared across the workspace and the
//! seam traits that let the weather policy and the scheduler be tested
//! without network or hardware.

pub mod pipeline;
pub mod types;

pub use pipeline::*;
pub use types::*;
