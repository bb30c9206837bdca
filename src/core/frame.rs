use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::devices::Device;

/// How a frame's targets apply to the known device list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TargetMode {
    /// Every known device gets a target; unlisted ones fall back to the
    /// frame's default value
    #[default]
    Override,
    /// Only devices named in `targets` get a target
    Exclusive,
}

/// Explicit per-device intensity inside a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibeTarget {
    pub device: String,
    pub value: f64,
}

impl VibeTarget {
    pub fn new(device: impl Into<String>, value: f64) -> Self {
        Self {
            device: device.into(),
            value,
        }
    }
}

/// A request to hold intensity values for a duration. Consumed once into
/// timeline samples; never retained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VibeFrame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Milliseconds; non-positive durations make the frame a no-op
    #[serde(default = "default_duration")]
    pub duration: f64,

    /// Fallback intensity for devices without an explicit target
    #[serde(default = "default_value")]
    pub value: f64,

    #[serde(default)]
    pub targets: Vec<VibeTarget>,

    #[serde(default)]
    pub mode: TargetMode,
}

fn default_duration() -> f64 {
    30_000.0
}

fn default_value() -> f64 {
    0.5
}

impl VibeFrame {
    pub fn override_all(duration: f64, value: f64) -> Self {
        Self {
            id: None,
            duration,
            value,
            targets: Vec::new(),
            mode: TargetMode::Override,
        }
    }

    pub fn exclusive(duration: f64, targets: Vec<VibeTarget>) -> Self {
        Self {
            id: None,
            duration,
            value: 0.0,
            targets,
            mode: TargetMode::Exclusive,
        }
    }
}

/// One playback session attributed to a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VibeGroup {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub frames: Vec<VibeFrame>,
}

/// Resolve the authoritative target per device slot for one frame.
///
/// Explicit targets are applied in listed order, last write winning on
/// duplicates. OVERRIDE then fills every remaining known device with the
/// frame's default value; EXCLUSIVE leaves them unresolved. Targets naming
/// unknown devices have no slot and are dropped.
pub fn resolve_targets(frame: &VibeFrame, devices: &[Device]) -> Vec<Option<f64>> {
    let mut explicit: HashMap<&str, f64> = HashMap::new();
    for target in &frame.targets {
        explicit.insert(target.device.as_str(), target.value);
    }

    devices
        .iter()
        .map(|device| {
            explicit
                .get(device.name.as_str())
                .copied()
                .or(match frame.mode {
                    TargetMode::Override => Some(frame.value),
                    TargetMode::Exclusive => None,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_defaults() {
        let frame: VibeFrame = serde_json::from_str("{}").unwrap();
        assert_eq!(frame.duration, 30_000.0);
        assert_eq!(frame.value, 0.5);
        assert_eq!(frame.mode, TargetMode::Override);
        assert!(frame.targets.is_empty());
        assert!(frame.id.is_none());
    }

    #[test]
    fn test_mode_wire_names() {
        let frame: VibeFrame =
            serde_json::from_str(r#"{"duration": 1000, "mode": "EXCLUSIVE"}"#).unwrap();
        assert_eq!(frame.mode, TargetMode::Exclusive);
    }
}
