pub mod adapter;
pub mod animator;
pub mod palette;
pub mod surface;

pub use adapter::RenderAdapter;
pub use animator::{Animator, FRAME_INTERVAL_MS};
pub use palette::color_for;
pub use surface::{ChartSurface, CursorMark, CursorOverlay, TextSurface};
