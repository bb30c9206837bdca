use log::debug;

use crate::panel::VibeConfig;

use super::clock::PlaybackClock;
use super::devices::{Device, DeviceRegistry, MAX_SLOTS};
use super::frame::{VibeFrame, VibeGroup};
use super::timeline::TimelineBuffer;

/// Look-back window the chart keeps on screen
pub const VISIBLE_PAST_MS: f64 = 10_000.0;

/// Look-ahead window shown in front of the cursor
pub const VISIBLE_FUTURE_MS: f64 = 5_000.0;

/// Outcome of one animation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Nothing moved; the redraw can be skipped
    Unchanged,
    /// Clock or buffer state changed; redraw
    Changed,
    /// The buffer drained; redraw once more and stop the loop
    Finished,
}

/// Composes the device registry, timeline buffer, and playback clock behind
/// the dispatch-level operations the feed consumer calls. Every mutation
/// reports `changed` instead of raising, so nothing throws across the
/// event-dispatch boundary.
pub struct GraphEngine {
    registry: DeviceRegistry,
    buffer: TimelineBuffer,
    clock: PlaybackClock,
    config: VibeConfig,
    username: Option<String>,
}

impl GraphEngine {
    pub fn new() -> Self {
        Self {
            registry: DeviceRegistry::new(),
            buffer: TimelineBuffer::new(MAX_SLOTS),
            clock: PlaybackClock::new(),
            config: VibeConfig::default(),
            username: None,
        }
    }

    pub fn devices(&self) -> &[Device] {
        self.registry.devices()
    }

    pub fn buffer(&self) -> &TimelineBuffer {
        &self.buffer
    }

    pub fn clock(&self) -> &PlaybackClock {
        &self.clock
    }

    pub fn config(&self) -> &VibeConfig {
        &self.config
    }

    /// User the active group is attributed to, if any
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Replace the local config mirror
    pub fn update_config(&mut self, config: VibeConfig) -> bool {
        if self.config == config {
            return false;
        }
        self.config = config;
        true
    }

    /// Replace the device list, remapping existing timeline data by name
    pub fn update_devices(&mut self, devices: Vec<Device>) -> bool {
        self.registry.update(devices, &mut self.buffer)
    }

    /// Clear all timeline data, the clock, and the group attribution
    pub fn reset_group(&mut self) -> bool {
        let mut changed = self.buffer.reset();
        changed |= self.clock.reset();
        changed |= self.username.take().is_some();
        changed
    }

    /// Start a new playback session: reset, then replay the group's frames
    /// in order
    pub fn set_group(&mut self, group: VibeGroup) -> bool {
        let mut changed = self.reset_group();
        if !group.username.is_empty() {
            self.username = Some(group.username);
            changed = true;
        }
        for frame in &group.frames {
            changed |= self.add_frame(frame);
        }
        changed
    }

    /// Convert one frame into timeline samples at the current total,
    /// extending the total by its duration when any device was targeted
    pub fn add_frame(&mut self, frame: &VibeFrame) -> bool {
        if frame.duration <= 0.0 {
            debug!("ignoring frame with non-positive duration: {}", frame.duration);
            return false;
        }
        let appended = self
            .buffer
            .append_frame(frame, self.registry.devices(), self.clock.total());
        if appended {
            self.clock.extend_total(frame.duration);
        }
        appended
    }

    /// Open the next clock interval
    pub fn advance(&mut self, amount: f64) -> bool {
        if amount <= 0.0 {
            debug!("ignoring non-positive clock advance: {}", amount);
            return false;
        }
        self.clock.advance(amount)
    }

    /// One animation step: pace the clock by the wall-clock delta, drop
    /// expired samples, and report what the loop should do next. When the
    /// buffer empties the engine resets the group itself.
    pub fn animate(&mut self, dt_ms: f64) -> Tick {
        let moved = self.clock.tick(dt_ms);
        let pruned = self.buffer.prune(self.clock.now(), VISIBLE_PAST_MS);

        if self.buffer.is_empty() {
            self.reset_group();
            return Tick::Finished;
        }
        if moved || pruned {
            Tick::Changed
        } else {
            Tick::Unchanged
        }
    }

    /// Visible time-window bounds around the cursor
    pub fn window(&self) -> (f64, f64) {
        (
            self.clock.now() - VISIBLE_PAST_MS,
            self.clock.now() + VISIBLE_FUTURE_MS,
        )
    }
}

impl Default for GraphEngine {
    fn default() -> Self {
        Self::new()
    }
}
