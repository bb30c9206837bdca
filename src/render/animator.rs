use log::debug;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, Instant, MissedTickBehavior};

use crate::core::Tick;
use crate::overlay::SharedOverlay;

/// Cadence of the cooperative redraw loop
pub const FRAME_INTERVAL_MS: u64 = 16;

/// Self-arming, self-cancelling redraw loop. The task only lives while the
/// timeline buffer has data; arming is idempotent.
pub struct Animator {
    handle: Option<JoinHandle<()>>,
}

impl Animator {
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Start the loop unless it is already running
    pub fn ensure_running(&mut self, overlay: SharedOverlay) {
        if let Some(handle) = &self.handle {
            if !handle.is_finished() {
                return;
            }
        }
        self.handle = Some(tokio::spawn(run_loop(overlay)));
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Stop the loop; required on component teardown
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Animator {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_loop(overlay: SharedOverlay) {
    let mut ticker = interval(Duration::from_millis(FRAME_INTERVAL_MS));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();

    loop {
        ticker.tick().await;
        let dt_ms = last.elapsed().as_secs_f64() * 1_000.0;
        last = Instant::now();

        let mut overlay = overlay.lock().unwrap();
        match overlay.animate(dt_ms) {
            Tick::Finished => {
                // final repaint clears the chart
                overlay.redraw();
                debug!("timeline drained; stopping animation loop");
                break;
            }
            Tick::Changed => overlay.redraw(),
            Tick::Unchanged => {}
        }
    }
}
