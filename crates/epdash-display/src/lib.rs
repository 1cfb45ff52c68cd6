//! Panel abstraction and frame composition
//!
//! The hardware driver is an external collaborator with a narrow surface:
//! init, display, sleep. The real panel driver plugs in behind the
//! [`Panel`] trait; a simulator stands in for development and tests.

pub mod panel;
pub mod render;

pub use panel::{probe_init, InitMode, Panel, SimulatedPanel, INIT_PROBE_ORDER};
pub use render::{render, Frame};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("Display I/O failed: {0}")]
    Io(String),

    #[error("Panel init exhausted all probe modes")]
    InitExhausted,
}

pub type DisplayResult<T> = Result<T, DisplayError>;
