//! Vendor wire DTOs and their mapping onto core models
//!
//! Auth endpoints use snake_case field names, device-management endpoints
//! use camelCase. Topology DTOs also accept the PascalCase and snake_case
//! spellings some portal responses use.

use arriba_core::{
    Device, DeviceStatus, LoginResponse, Radio, RadioControlRequest, RadioStatus, Site, UserInfo,
    BEARER,
};
use serde::{Deserialize, Serialize};

/// Placeholder for vendor fields that are optional on the wire but not in the model
const UNKNOWN: &str = "Unknown";

// =============================================================================
// Auth
// =============================================================================

#[derive(Serialize)]
pub(crate) struct LoginPayload<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Serialize)]
pub(crate) struct RefreshPayload<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthResponse {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_in: Option<i64>,
    pub token_type: Option<String>,
}

impl AuthResponse {
    /// Convert into a token grant; `None` when the vendor omitted the access token.
    ///
    /// `fallback_refresh` is kept when the vendor does not rotate the refresh token.
    pub fn into_grant(self, fallback_refresh: Option<&str>) -> Option<LoginResponse> {
        let access_token = self.access_token.filter(|t| !t.is_empty())?;
        Some(LoginResponse {
            access_token,
            refresh_token: self
                .refresh_token
                .or_else(|| fallback_refresh.map(str::to_string)),
            expires_in: self.expires_in.unwrap_or_default(),
            token_type: self.token_type.unwrap_or_else(|| BEARER.to_string()),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserInfoElement {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
}

impl From<UserInfoElement> for UserInfo {
    fn from(element: UserInfoElement) -> Self {
        let name = element.name.unwrap_or_else(|| element.email.clone());
        Self {
            id: element.id,
            email: element.email,
            name,
        }
    }
}

// =============================================================================
// Topology
// =============================================================================

/// Envelope used by every vendor list endpoint
#[derive(Debug, Deserialize)]
pub(crate) struct Elements<T> {
    pub elements: Option<Vec<T>>,
}

impl<T> Elements<T> {
    pub fn into_vec<U: From<T>>(envelope: Option<Self>) -> Vec<U> {
        envelope
            .and_then(|e| e.elements)
            .unwrap_or_default()
            .into_iter()
            .map(U::from)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SiteElement {
    #[serde(alias = "Id")]
    pub id: String,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Description")]
    pub description: Option<String>,
    #[serde(alias = "timeZone", alias = "TimeZone", alias = "time_zone")]
    pub timezone: Option<String>,
    #[serde(alias = "Devices")]
    pub devices: Option<Vec<DeviceElement>>,
}

impl From<SiteElement> for Site {
    fn from(element: SiteElement) -> Self {
        Self {
            id: element.id,
            name: element.name,
            description: element.description,
            time_zone: element.timezone,
            devices: map_all(element.devices),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DeviceElement {
    #[serde(alias = "Id")]
    pub id: String,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "MacAddress", alias = "mac_address")]
    pub mac_address: String,
    #[serde(alias = "Model")]
    pub model: Option<String>,
    #[serde(alias = "SerialNumber", alias = "serial_number")]
    pub serial_number: Option<String>,
    #[serde(alias = "Status")]
    pub status: Option<String>,
    #[serde(alias = "Radios")]
    pub radios: Option<Vec<RadioElement>>,
}

impl From<DeviceElement> for Device {
    fn from(element: DeviceElement) -> Self {
        Self {
            status: DeviceStatus::from_vendor(element.status.as_deref()),
            id: element.id,
            name: element.name,
            mac_address: element.mac_address,
            model: element.model.unwrap_or_else(|| UNKNOWN.to_string()),
            serial_number: element.serial_number.unwrap_or_else(|| UNKNOWN.to_string()),
            radios: map_all(element.radios),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RadioElement {
    #[serde(alias = "Id")]
    pub id: String,
    #[serde(alias = "Band")]
    pub band: Option<String>,
    #[serde(alias = "Channel")]
    pub channel: Option<i32>,
    #[serde(alias = "ChannelWidth", alias = "channel_width")]
    pub channel_width: Option<i32>,
    #[serde(alias = "TransmitPower", alias = "transmit_power")]
    pub transmit_power: Option<i32>,
    #[serde(alias = "Enabled")]
    pub enabled: Option<bool>,
    #[serde(alias = "Status")]
    pub status: Option<String>,
}

impl From<RadioElement> for Radio {
    fn from(element: RadioElement) -> Self {
        Self {
            status: RadioStatus::from_vendor(element.status.as_deref()),
            id: element.id,
            band: element.band.unwrap_or_else(|| UNKNOWN.to_string()),
            channel: element.channel.unwrap_or_default(),
            channel_width: element.channel_width.unwrap_or_default(),
            transmit_power: element.transmit_power.unwrap_or_default(),
            enabled: element.enabled.unwrap_or_default(),
        }
    }
}

fn map_all<T, U: From<T>>(items: Option<Vec<T>>) -> Vec<U> {
    items.unwrap_or_default().into_iter().map(U::from).collect()
}

// =============================================================================
// Radio control
// =============================================================================

/// PATCH body for a radio; absent fields are omitted rather than sent as null
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RadioUpdatePayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transmit_power: Option<i32>,
}

impl From<&RadioControlRequest> for RadioUpdatePayload {
    fn from(request: &RadioControlRequest) -> Self {
        Self {
            enabled: request.enabled,
            channel: request.channel,
            transmit_power: request.transmit_power,
        }
    }
}
