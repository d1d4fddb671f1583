//! Radio models and the partial update envelope

use serde::{Deserialize, Serialize};

/// A Wi-Fi radio on an access point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Radio {
    pub id: String,
    /// Frequency band as reported by the vendor (e.g. "2.4GHz")
    pub band: String,
    pub channel: i32,
    /// Channel width in MHz
    pub channel_width: i32,
    /// Transmit power in dBm
    pub transmit_power: i32,
    pub enabled: bool,
    pub status: RadioStatus,
}

/// Radio operating state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RadioStatus {
    Active,
    Inactive,
    Disabled,
    #[default]
    Unknown,
}

impl RadioStatus {
    /// Map a free-text vendor status onto the radio vocabulary.
    ///
    /// Matching is case-insensitive; missing or unrecognized values map to
    /// `Unknown`.
    pub fn from_vendor(status: Option<&str>) -> Self {
        match status.map(str::to_ascii_lowercase).as_deref() {
            Some("active" | "up") => RadioStatus::Active,
            Some("inactive" | "down") => RadioStatus::Inactive,
            Some("disabled") => RadioStatus::Disabled,
            _ => RadioStatus::Unknown,
        }
    }
}

/// Partial update for a single radio.
///
/// Only the fields that are `Some` are sent to the vendor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RadioControlRequest {
    pub device_id: String,
    pub radio_id: String,
    pub enabled: Option<bool>,
    pub channel: Option<i32>,
    pub transmit_power: Option<i32>,
}

impl RadioControlRequest {
    pub fn new(device_id: impl Into<String>, radio_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            radio_id: radio_id.into(),
            ..Default::default()
        }
    }

    /// Request that only flips the enabled flag
    pub fn toggle(device_id: impl Into<String>, radio_id: impl Into<String>, enabled: bool) -> Self {
        Self::new(device_id, radio_id).with_enabled(enabled)
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = Some(enabled);
        self
    }

    pub fn with_channel(mut self, channel: i32) -> Self {
        self.channel = Some(channel);
        self
    }

    pub fn with_transmit_power(mut self, transmit_power: i32) -> Self {
        self.transmit_power = Some(transmit_power);
        self
    }
}

/// Outcome of a radio update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadioControlResponse {
    pub success: bool,
    pub message: Option<String>,
    /// Radio state echoed back by the vendor, if any
    pub radio: Option<Radio>,
}

impl RadioControlResponse {
    pub fn updated(radio: Option<Radio>) -> Self {
        Self {
            success: true,
            message: Some("Radio updated successfully".to_string()),
            radio,
        }
    }
}
