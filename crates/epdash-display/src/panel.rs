//! Panel trait and init probing

use crate::{DisplayError, DisplayResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Init call variants across panel firmware revisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitMode {
    Default,
    FullUpdate,
    Legacy,
}

/// Probe order for panel init. First success wins.
pub const INIT_PROBE_ORDER: [InitMode; 3] =
    [InitMode::Default, InitMode::FullUpdate, InitMode::Legacy];

/// Narrow interface to the e-paper hardware
pub trait Panel: Send {
    /// Panel name/identifier
    fn name(&self) -> &str;

    /// Panel geometry in pixels (width, height)
    fn dimensions(&self) -> (u32, u32);

    /// Initialize the panel with one init variant
    fn init(&mut self, mode: InitMode) -> DisplayResult<()>;

    /// Push a packed 1-bpp buffer to the panel
    fn display(&mut self, buffer: &[u8]) -> DisplayResult<()>;

    /// Put the panel into low-power sleep
    fn sleep(&mut self) -> DisplayResult<()>;
}

/// Try each init variant in fixed priority order; first success wins.
///
/// Exhausting the probe sequence is the only way init fails.
pub fn probe_init(panel: &mut dyn Panel) -> DisplayResult<InitMode> {
    for mode in INIT_PROBE_ORDER {
        match panel.init(mode) {
            Ok(()) => {
                info!(panel = panel.name(), ?mode, "Panel initialized");
                return Ok(mode);
            }
            Err(e) => {
                debug!(panel = panel.name(), ?mode, "Init variant rejected: {}", e);
            }
        }
    }
    Err(DisplayError::InitExhausted)
}

/// In-memory panel for development and tests.
///
/// Mirrors the 2.13" panel geometry (250x122) and enforces the same
/// lifecycle as the hardware: init before display, sleep deactivates.
pub struct SimulatedPanel {
    supported: Vec<InitMode>,
    active: bool,
    frames: Arc<AtomicUsize>,
    width: u32,
    height: u32,
}

impl SimulatedPanel {
    pub fn new() -> Self {
        Self {
            supported: INIT_PROBE_ORDER.to_vec(),
            active: false,
            frames: Arc::new(AtomicUsize::new(0)),
            width: 250,
            height: 122,
        }
    }

    /// Restrict which init variants the simulated firmware accepts
    pub fn with_supported(mut self, supported: Vec<InitMode>) -> Self {
        self.supported = supported;
        self
    }

    /// Shared counter of frames pushed to the panel
    pub fn frame_counter(&self) -> Arc<AtomicUsize> {
        self.frames.clone()
    }
}

impl Default for SimulatedPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for SimulatedPanel {
    fn name(&self) -> &str {
        "simulator"
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn init(&mut self, mode: InitMode) -> DisplayResult<()> {
        if !self.supported.contains(&mode) {
            return Err(DisplayError::Io(format!(
                "firmware rejected init variant {:?}",
                mode
            )));
        }
        self.active = true;
        Ok(())
    }

    fn display(&mut self, buffer: &[u8]) -> DisplayResult<()> {
        if !self.active {
            return Err(DisplayError::Io("panel not initialized".to_string()));
        }
        let expected = (self.width as usize).div_ceil(8) * self.height as usize;
        if buffer.len() != expected {
            return Err(DisplayError::Io(format!(
                "buffer size {} does not match panel ({} expected)",
                buffer.len(),
                expected
            )));
        }
        self.frames.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn sleep(&mut self) -> DisplayResult<()> {
        self.active = false;
        Ok(())
    }
}
