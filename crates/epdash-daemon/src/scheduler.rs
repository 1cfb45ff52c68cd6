//! Minute-boundary display refresh loop

use anyhow::{Context, Result};
use chrono::{DateTime, Local, TimeZone, Timelike, Utc};
use epdash_core::TimeRecord;
use epdash_display::{probe_init, render, Panel};
use epdash_weather::RefreshPolicy;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info, warn};

/// Scheduler drives one display refresh per minute boundary.
///
/// Two states: Rendering (one full cycle) and Waiting (sleep until the
/// next whole minute). A failure inside one cycle is logged at the cycle
/// boundary and never terminates the loop.
pub struct Scheduler {
    policy: RefreshPolicy,
    panel: Box<dyn Panel>,
}

impl Scheduler {
    pub fn new(policy: RefreshPolicy, panel: Box<dyn Panel>) -> Self {
        Self { policy, panel }
    }

    /// Run one full cycle: resolve weather, render, push to the panel,
    /// sleep the panel.
    pub async fn run_once(&mut self) -> Result<()> {
        let time = TimeRecord::now();
        let weather = self.policy.resolve(Utc::now()).await;

        if weather.is_none() {
            warn!("Rendering without weather data this cycle");
        }
        info!(time = %time.time, date = %time.date, "Refreshing display");

        let (width, height) = self.panel.dimensions();
        let frame = render(&time, weather.as_ref(), width, height);

        probe_init(self.panel.as_mut()).context("Panel init failed")?;
        self.panel
            .display(frame.buffer())
            .context("Panel display failed")?;
        self.panel.sleep().context("Panel sleep failed")?;

        Ok(())
    }

    /// Run cycles indefinitely, waking on each minute boundary.
    ///
    /// The wait is recomputed from the live clock every cycle, so drift
    /// does not accumulate. Exits only via external interrupt.
    pub async fn run(&mut self) -> Result<()> {
        info!("Scheduler started");

        loop {
            if let Err(e) = self.run_once().await {
                error!("Display cycle failed: {:#}", e);
                // Continue running despite errors
            }

            let wait = seconds_until_next_minute(Local::now());
            debug!(wait, "Waiting for next minute boundary");
            sleep(Duration::from_secs(wait)).await;
        }
    }
}

/// Seconds until the wall clock crosses the next whole-minute boundary
pub fn seconds_until_next_minute<Tz: TimeZone>(now: DateTime<Tz>) -> u64 {
    u64::from(60 - now.second())
}
