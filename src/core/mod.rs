pub mod clock;
pub mod devices;
pub mod engine;
pub mod frame;
pub mod timeline;

pub use clock::PlaybackClock;
pub use devices::{Device, DeviceRegistry, MAX_SLOTS};
pub use engine::{GraphEngine, Tick, VISIBLE_FUTURE_MS, VISIBLE_PAST_MS};
pub use frame::{resolve_targets, TargetMode, VibeFrame, VibeGroup, VibeTarget};
pub use timeline::{Sample, TimelineBuffer, SMOOTHING_WINDOW_MS};
