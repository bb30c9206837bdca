use crate::core::GraphEngine;

use super::palette::color_for;
use super::surface::{ChartSurface, CursorMark, CursorOverlay};

/// Translates engine state into chart-surface draw calls
pub struct RenderAdapter {
    surface: Box<dyn ChartSurface>,
}

impl RenderAdapter {
    pub fn new(surface: Box<dyn ChartSurface>) -> Self {
        Self { surface }
    }

    /// Push the current window, series, and cursor to the surface and ask it
    /// to repaint. Idempotent; callers skip it when nothing changed.
    pub fn redraw(&mut self, engine: &GraphEngine) {
        if engine.config().hidden {
            for slot in 0..self.surface.slot_count() {
                self.surface.clear_series(slot);
            }
            self.surface.set_cursor(None);
            self.surface.redraw();
            return;
        }

        let (start, end) = engine.window();
        self.surface.set_window(start, end);

        for slot in 0..self.surface.slot_count() {
            let occupied = engine
                .devices()
                .get(slot)
                .map(|device| (device, engine.buffer().slot(slot)))
                .filter(|(_, samples)| !samples.is_empty());
            match occupied {
                Some((device, samples)) => {
                    let points: Vec<(f64, f64)> = samples
                        .iter()
                        .map(|sample| (sample.time, sample.value))
                        .collect();
                    self.surface
                        .set_series(slot, &device.name, color_for(slot), &points);
                }
                None => self.surface.clear_series(slot),
            }
        }

        let overlay = self.cursor_overlay(engine);
        self.surface.set_cursor(overlay.as_ref());
        self.surface.redraw();
    }

    /// Per-device interpolated value at `now`, plus the vertical line top at
    /// the topmost visible value. Devices with no samples yet contribute no
    /// mark; their curve is a gap, not a hold.
    fn cursor_overlay(&self, engine: &GraphEngine) -> Option<CursorOverlay> {
        let now = engine.clock().now();

        let mut marks = Vec::new();
        for slot in 0..engine.devices().len() {
            if let Some(value) = engine.buffer().interpolate_at(slot, now) {
                marks.push(CursorMark {
                    slot,
                    value,
                    color: color_for(slot),
                });
            }
        }
        if marks.is_empty() {
            return None;
        }

        let top = marks.iter().map(|mark| mark.value).fold(f64::MIN, f64::max);
        Some(CursorOverlay {
            time: now,
            marks,
            line_top_y: self.surface.value_to_y(top),
        })
    }
}
