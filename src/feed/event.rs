use anyhow::{Context, Result};
use serde_json::Value;

use crate::core::{Device, VibeFrame, VibeGroup};
use crate::panel::VibeConfig;

/// Typed inbound feed message, one JSON object per wire message
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// Liveness only
    Ping,
    UpdateConfig { config: VibeConfig },
    UpdateDevices { devices: Vec<Device> },
    ResetGroup,
    SetGroup { group: VibeGroup },
    AddFrame { frame: VibeFrame },
    /// Clock advance amount, milliseconds
    Advance { amount: f64 },
    /// Unrecognized `type`; the consumer logs and ignores it
    Unknown(String),
}

impl FeedEvent {
    /// Parse one wire message. Unknown kinds parse to `Unknown` so the
    /// consumer can log and move on; only malformed JSON or a bad payload
    /// for a known kind is an error.
    pub fn parse(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).context("malformed feed message")?;
        let kind = value["type"]
            .as_str()
            .context("feed message missing type")?;

        let event = match kind {
            "ping" => Self::Ping,
            "update-config" => Self::UpdateConfig {
                config: serde_json::from_value(value["config"].clone())
                    .context("update-config payload")?,
            },
            "update-devices" => Self::UpdateDevices {
                devices: serde_json::from_value(value["devices"].clone())
                    .context("update-devices payload")?,
            },
            "reset-group" => Self::ResetGroup,
            "set-group" => Self::SetGroup {
                group: serde_json::from_value(value["group"].clone())
                    .context("set-group payload")?,
            },
            "add-frame" => Self::AddFrame {
                frame: serde_json::from_value(value["frame"].clone())
                    .context("add-frame payload")?,
            },
            "advance" => Self::Advance {
                amount: value["amount"].as_f64().context("advance payload")?,
            },
            other => Self::Unknown(other.to_string()),
        };
        Ok(event)
    }
}
