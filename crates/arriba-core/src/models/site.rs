//! Site and device models

use serde::{Deserialize, Serialize};

use super::radio::Radio;

/// An Instant On site (a physical location grouping access points)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub time_zone: Option<String>,
    #[serde(default)]
    pub devices: Vec<Device>,
}

/// A managed device (access point, switch) within a site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    pub id: String,
    pub name: String,
    pub mac_address: String,
    pub model: String,
    pub serial_number: String,
    pub status: DeviceStatus,
    #[serde(default)]
    pub radios: Vec<Radio>,
}

/// Device connectivity state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeviceStatus {
    Online,
    Offline,
    Updating,
    #[default]
    Unknown,
}

impl DeviceStatus {
    /// Map a free-text vendor status onto the device vocabulary.
    ///
    /// Matching is case-insensitive; missing or unrecognized values map to
    /// `Unknown`.
    pub fn from_vendor(status: Option<&str>) -> Self {
        match status.map(str::to_ascii_lowercase).as_deref() {
            Some("online" | "up") => DeviceStatus::Online,
            Some("offline" | "down") => DeviceStatus::Offline,
            Some("updating") => DeviceStatus::Updating,
            _ => DeviceStatus::Unknown,
        }
    }
}
