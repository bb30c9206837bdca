use super::devices::Device;
use super::frame::{resolve_targets, VibeFrame};

/// Flat hold appended before the ramp toward the next frame's value, so the
/// renderer's tension curve does not overshoot a step transition
pub const SMOOTHING_WINDOW_MS: f64 = 100.0;

/// One point on a device's intensity curve, in virtual milliseconds since
/// the active group began
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: f64,
    pub value: f64,
}

/// Per-slot piecewise-linear intensity curves, append-only at the tail and
/// pruned only from the head. Sample times are non-decreasing within a slot.
#[derive(Debug, Clone)]
pub struct TimelineBuffer {
    slots: Vec<Vec<Sample>>,
}

impl TimelineBuffer {
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![Vec::new(); slot_count],
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn slot(&self, slot: usize) -> &[Sample] {
        &self.slots[slot]
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|samples| samples.is_empty())
    }

    /// Append the frame's resolved targets as a hold segment starting at
    /// `current_total`: one sample at the segment start and one shortly
    /// before its end. Returns whether any slot changed; the caller extends
    /// the clock's total by the frame duration when it did.
    pub fn append_frame(
        &mut self,
        frame: &VibeFrame,
        devices: &[Device],
        current_total: f64,
    ) -> bool {
        if frame.duration <= 0.0 {
            return false;
        }

        let hold_end =
            current_total + frame.duration - (frame.duration * 0.2).min(SMOOTHING_WINDOW_MS);

        let mut changed = false;
        for (samples, target) in self.slots.iter_mut().zip(resolve_targets(frame, devices)) {
            if let Some(value) = target {
                let value = value.clamp(0.0, 1.0);
                samples.push(Sample {
                    time: current_total,
                    value,
                });
                samples.push(Sample {
                    time: hold_end,
                    value,
                });
                changed = true;
            }
        }
        changed
    }

    /// Drop samples that scrolled out of the look-back window, keeping one
    /// padding sample before the cutoff so interpolation into the visible
    /// range stays correct. Idempotent for a fixed `now`.
    pub fn prune(&mut self, now: f64, visible_past: f64) -> bool {
        let cutoff = now - visible_past;

        let mut changed = false;
        for samples in &mut self.slots {
            if samples.is_empty() {
                continue;
            }
            match samples.iter().position(|sample| sample.time >= cutoff) {
                None => {
                    samples.clear();
                    changed = true;
                }
                Some(first_visible) if first_visible > 1 => {
                    samples.drain(..first_visible - 1);
                    changed = true;
                }
                Some(_) => {}
            }
        }
        changed
    }

    /// Clear every slot; reports whether anything was non-empty beforehand
    pub fn reset(&mut self) -> bool {
        let had_data = !self.is_empty();
        for samples in &mut self.slots {
            samples.clear();
        }
        had_data
    }

    /// Step-hold lookup: value of the last sample at or before `t`
    pub fn value_at(&self, slot: usize, t: f64) -> Option<f64> {
        let samples = self.slots.get(slot)?;
        let idx = samples.partition_point(|sample| sample.time <= t);
        if idx == 0 {
            None
        } else {
            Some(samples[idx - 1].value)
        }
    }

    /// Piecewise-linear value at `t`: lerp between the bracketing samples,
    /// hold after the last, nothing before the first
    pub fn interpolate_at(&self, slot: usize, t: f64) -> Option<f64> {
        let samples = self.slots.get(slot)?;
        let idx = samples.partition_point(|sample| sample.time <= t);
        if idx == 0 {
            return None;
        }

        let prev = samples[idx - 1];
        match samples.get(idx) {
            None => Some(prev.value),
            Some(next) => {
                let span = next.time - prev.time;
                if span <= 0.0 {
                    Some(next.value)
                } else {
                    let k = (t - prev.time) / span;
                    Some(prev.value + (next.value - prev.value) * k)
                }
            }
        }
    }

    pub(crate) fn take_slot(&mut self, slot: usize) -> Vec<Sample> {
        std::mem::take(&mut self.slots[slot])
    }

    pub(crate) fn put_slot(&mut self, slot: usize, samples: Vec<Sample>) {
        self.slots[slot] = samples;
    }
}
