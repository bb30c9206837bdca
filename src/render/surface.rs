use anyhow::Result;
use log::debug;

/// Current-value marker for one device at the cursor
#[derive(Debug, Clone, PartialEq)]
pub struct CursorMark {
    pub slot: usize,
    pub value: f64,
    pub color: &'static str,
}

/// Cursor overlay: the "now" line plus one mark per device with data
#[derive(Debug, Clone, PartialEq)]
pub struct CursorOverlay {
    /// Virtual time of the cursor line
    pub time: f64,
    pub marks: Vec<CursorMark>,
    /// Pixel y of the line's top end, sitting at the topmost visible
    /// device value
    pub line_top_y: f64,
}

/// Minimal contract the chart backend provides: a fixed number of drawable
/// slots taking ordered (time, value) points, a value-to-pixel mapping for
/// cursor placement, and an explicit on-demand redraw.
pub trait ChartSurface: Send {
    fn slot_count(&self) -> usize;

    /// Replace a slot's point sequence; `points` are (virtual ms, intensity)
    fn set_series(&mut self, slot: usize, label: &str, color: &'static str, points: &[(f64, f64)]);

    fn clear_series(&mut self, slot: usize);

    /// Visible time window, virtual milliseconds
    fn set_window(&mut self, start: f64, end: f64);

    /// Map an intensity in [0, 1] to a pixel y coordinate
    fn value_to_y(&self, value: f64) -> f64;

    fn set_cursor(&mut self, cursor: Option<&CursorOverlay>);

    /// Repaint from the state pushed above. Never automatic.
    fn redraw(&mut self);
}

struct TextSeries {
    label: String,
    points: Vec<(f64, f64)>,
}

/// Log-backed chart surface for the demo binary: one gauge row per occupied
/// slot on every redraw.
pub struct TextSurface {
    height_px: f64,
    window: (f64, f64),
    series: Vec<Option<TextSeries>>,
    cursor: Option<CursorOverlay>,
}

const GAUGE_WIDTH: usize = 24;

impl TextSurface {
    pub fn new(slot_count: usize, height_px: f64) -> Result<Self> {
        if slot_count == 0 || height_px <= 0.0 {
            anyhow::bail!(
                "chart surface needs at least one slot and a positive height, got {} x {}",
                slot_count,
                height_px
            );
        }
        Ok(Self {
            height_px,
            window: (0.0, 0.0),
            series: std::iter::repeat_with(|| None).take(slot_count).collect(),
            cursor: None,
        })
    }

    fn gauge(value: f64) -> String {
        let filled = (value.clamp(0.0, 1.0) * GAUGE_WIDTH as f64).round() as usize;
        let mut bar = "#".repeat(filled);
        bar.push_str(&".".repeat(GAUGE_WIDTH - filled));
        bar
    }
}

impl ChartSurface for TextSurface {
    fn slot_count(&self) -> usize {
        self.series.len()
    }

    fn set_series(&mut self, slot: usize, label: &str, _color: &'static str, points: &[(f64, f64)]) {
        self.series[slot] = Some(TextSeries {
            label: label.to_string(),
            points: points.to_vec(),
        });
    }

    fn clear_series(&mut self, slot: usize) {
        self.series[slot] = None;
    }

    fn set_window(&mut self, start: f64, end: f64) {
        self.window = (start, end);
    }

    fn value_to_y(&self, value: f64) -> f64 {
        (1.0 - value.clamp(0.0, 1.0)) * self.height_px
    }

    fn set_cursor(&mut self, cursor: Option<&CursorOverlay>) {
        self.cursor = cursor.cloned();
    }

    fn redraw(&mut self) {
        let (start, end) = self.window;
        for (slot, series) in self.series.iter().enumerate() {
            if let Some(series) = series {
                let value = self
                    .cursor
                    .as_ref()
                    .and_then(|cursor| cursor.marks.iter().find(|mark| mark.slot == slot))
                    .map(|mark| mark.value);
                match value {
                    Some(value) => debug!(
                        "{:<20} [{}] {:.2}  ({} pts, window {:.0}..{:.0}ms)",
                        series.label,
                        Self::gauge(value),
                        value,
                        series.points.len(),
                        start,
                        end
                    ),
                    None => debug!(
                        "{:<20} [{}]  --  ({} pts, window {:.0}..{:.0}ms)",
                        series.label,
                        Self::gauge(0.0),
                        series.points.len(),
                        start,
                        end
                    ),
                }
            }
        }
    }
}
