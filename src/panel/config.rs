use serde::{Deserialize, Serialize};

/// Remote display/behavior flags. The overlay consumes `hidden` and mirrors
/// the rest; the config panel owns the read-modify-write cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VibeConfig {
    /// Blank the chart entirely while set
    #[serde(default)]
    pub hidden: bool,

    /// Playback is held upstream; shown for the panel only
    #[serde(default)]
    pub paused: bool,

    /// Intensity scaling applied by device control, 0-100
    #[serde(default)]
    pub strength: u8,
}
