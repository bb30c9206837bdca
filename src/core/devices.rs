use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::timeline::{Sample, TimelineBuffer};

/// Chart slot capacity; devices beyond this are silently dropped
pub const MAX_SLOTS: usize = 8;

/// A named intensity channel. Identity is the name; order determines the
/// chart slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
}

impl Device {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Ordered, slot-bounded device list. Owns device identity and order only;
/// timeline data is remapped by name when the list changes.
#[derive(Debug, Default)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Replace the device list, carrying each persisting device's samples to
    /// its new slot and clearing slots beyond the new count. Identical lists
    /// are a no-op.
    pub fn update(&mut self, new_devices: Vec<Device>, buffer: &mut TimelineBuffer) -> bool {
        let mut incoming = new_devices;
        incoming.truncate(buffer.slot_count());

        if incoming == self.devices {
            return false;
        }

        let mut carried: HashMap<String, Vec<Sample>> = HashMap::new();
        for (slot, device) in self.devices.iter().enumerate() {
            carried.insert(device.name.clone(), buffer.take_slot(slot));
        }

        for (slot, device) in incoming.iter().enumerate() {
            let samples = carried.remove(&device.name).unwrap_or_default();
            buffer.put_slot(slot, samples);
        }
        for slot in incoming.len()..buffer.slot_count() {
            buffer.put_slot(slot, Vec::new());
        }

        self.devices = incoming;
        true
    }
}
