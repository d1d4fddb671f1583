//! In-process stand-in for the Instant On portal
//!
//! Serves a fixed topology to anyone holding the stub credentials, so the
//! browser UI can be developed without a real portal account.

use std::time::Duration;

use arriba_core::{
    Device, DeviceStatus, LoginRequest, LoginResponse, Radio, RadioControlRequest,
    RadioControlResponse, RadioStatus, Site, UserInfo, VendorClient, VendorError, VendorResult,
    BEARER,
};
use async_trait::async_trait;
use tracing::{debug, info, warn};

pub const STUB_EMAIL: &str = "test@example.com";
pub const STUB_PASSWORD: &str = "password";
pub const STUB_ACCESS_TOKEN: &str = "mock-access-token-12345";
pub const STUB_REFRESH_TOKEN: &str = "mock-refresh-token-67890";

const STUB_EXPIRES_IN: i64 = 3600;
const STUB_SITE_ID: &str = "mock-site-1";
const STUB_DEVICE_ID: &str = "mock-device-1";
const STUB_MAC: &str = "00:11:22:33:44:55";
const STUB_MODEL: &str = "AP22";
const STUB_SERIAL: &str = "MOCK12345";

/// Simulated vendor round-trip times
#[derive(Debug, Clone, Copy)]
struct Latency {
    login: Duration,
    refresh: Duration,
    control: Duration,
}

impl Latency {
    const REALISTIC: Latency = Latency {
        login: Duration::from_millis(500),
        refresh: Duration::from_millis(300),
        control: Duration::from_millis(1000),
    };

    const NONE: Latency = Latency {
        login: Duration::ZERO,
        refresh: Duration::ZERO,
        control: Duration::ZERO,
    };
}

/// Vendor client returning canned data
#[derive(Debug, Clone)]
pub struct StubClient {
    latency: Latency,
}

impl StubClient {
    /// Stub with simulated vendor latency
    pub fn new() -> Self {
        Self {
            latency: Latency::REALISTIC,
        }
    }

    /// Stub that answers immediately
    pub fn instant() -> Self {
        Self {
            latency: Latency::NONE,
        }
    }

    fn authorize(&self, access_token: &str) -> VendorResult<()> {
        if access_token.starts_with(STUB_ACCESS_TOKEN) {
            Ok(())
        } else {
            Err(VendorError::upstream(401, "Invalid token"))
        }
    }

    async fn pause(duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

impl Default for StubClient {
    fn default() -> Self {
        Self::new()
    }
}

fn grant(access_token: String) -> LoginResponse {
    LoginResponse {
        access_token,
        refresh_token: Some(STUB_REFRESH_TOKEN.to_string()),
        expires_in: STUB_EXPIRES_IN,
        token_type: BEARER.to_string(),
    }
}

fn stub_radios() -> Vec<Radio> {
    vec![
        Radio {
            id: "mock-radio-1".to_string(),
            band: "2.4GHz".to_string(),
            channel: 6,
            channel_width: 20,
            transmit_power: 17,
            enabled: true,
            status: RadioStatus::Active,
        },
        Radio {
            id: "mock-radio-2".to_string(),
            band: "5GHz".to_string(),
            channel: 36,
            channel_width: 40,
            transmit_power: 23,
            enabled: true,
            status: RadioStatus::Active,
        },
    ]
}

fn stub_device(id: &str, name: String, radios: Vec<Radio>) -> Device {
    Device {
        id: id.to_string(),
        name,
        mac_address: STUB_MAC.to_string(),
        model: STUB_MODEL.to_string(),
        serial_number: STUB_SERIAL.to_string(),
        status: DeviceStatus::Online,
        radios,
    }
}

#[async_trait]
impl VendorClient for StubClient {
    async fn login(&self, request: &LoginRequest) -> VendorResult<LoginResponse> {
        info!(email = %request.email, "Stub login attempt");
        Self::pause(self.latency.login).await;

        if request.email == STUB_EMAIL && request.password == STUB_PASSWORD {
            info!("Stub login successful");
            Ok(grant(STUB_ACCESS_TOKEN.to_string()))
        } else {
            warn!("Stub login failed - invalid credentials");
            Err(VendorError::upstream(401, "Invalid credentials"))
        }
    }

    async fn refresh_token(&self, refresh_token: &str) -> VendorResult<LoginResponse> {
        info!("Stub token refresh");
        Self::pause(self.latency.refresh).await;

        if refresh_token == STUB_REFRESH_TOKEN {
            Ok(grant(format!("{}-refreshed", STUB_ACCESS_TOKEN)))
        } else {
            warn!("Stub token refresh failed");
            Err(VendorError::upstream(401, "Invalid refresh token"))
        }
    }

    async fn get_user_info(&self, access_token: &str) -> VendorResult<UserInfo> {
        self.authorize(access_token)?;
        Ok(UserInfo {
            id: "mock-user-id".to_string(),
            email: STUB_EMAIL.to_string(),
            name: "Mock User".to_string(),
        })
    }

    async fn list_sites(&self, access_token: &str) -> VendorResult<Vec<Site>> {
        debug!("Stub list sites");
        self.authorize(access_token)?;
        Ok(vec![Site {
            id: STUB_SITE_ID.to_string(),
            name: "Mock Site 1".to_string(),
            description: Some("Test site for development".to_string()),
            time_zone: Some("UTC".to_string()),
            devices: vec![stub_device(
                STUB_DEVICE_ID,
                "Mock AP 1".to_string(),
                stub_radios(),
            )],
        }])
    }

    async fn get_site(&self, access_token: &str, site_id: &str) -> VendorResult<Site> {
        debug!(site_id, "Stub get site");
        self.authorize(access_token)?;
        Ok(Site {
            id: site_id.to_string(),
            name: format!("Mock Site {}", site_id),
            description: Some("Test site for development".to_string()),
            time_zone: Some("UTC".to_string()),
            devices: Vec::new(),
        })
    }

    async fn list_devices(&self, access_token: &str, site_id: &str) -> VendorResult<Vec<Device>> {
        debug!(site_id, "Stub list devices");
        self.authorize(access_token)?;
        Ok(vec![stub_device(
            STUB_DEVICE_ID,
            "Mock AP 1".to_string(),
            Vec::new(),
        )])
    }

    async fn get_device(
        &self,
        access_token: &str,
        _site_id: &str,
        device_id: &str,
    ) -> VendorResult<Device> {
        debug!(device_id, "Stub get device");
        self.authorize(access_token)?;
        Ok(stub_device(
            device_id,
            format!("Mock AP {}", device_id),
            Vec::new(),
        ))
    }

    async fn list_radios(
        &self,
        access_token: &str,
        _site_id: &str,
        device_id: &str,
    ) -> VendorResult<Vec<Radio>> {
        debug!(device_id, "Stub list radios");
        self.authorize(access_token)?;
        Ok(stub_radios())
    }

    async fn control_radio(
        &self,
        access_token: &str,
        _site_id: &str,
        request: &RadioControlRequest,
    ) -> VendorResult<RadioControlResponse> {
        info!(radio_id = %request.radio_id, enabled = ?request.enabled, "Stub control radio");
        self.authorize(access_token)?;
        Self::pause(self.latency.control).await;

        let enabled = request.enabled.unwrap_or(true);
        let radio = Radio {
            id: request.radio_id.clone(),
            band: "2.4GHz".to_string(),
            channel: request.channel.unwrap_or(6),
            channel_width: 20,
            transmit_power: request.transmit_power.unwrap_or(17),
            enabled,
            status: if enabled {
                RadioStatus::Active
            } else {
                RadioStatus::Inactive
            },
        };
        Ok(RadioControlResponse::updated(Some(radio)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn login_accepts_stub_credentials() {
        let client = StubClient::instant();
        let grant = client
            .login(&LoginRequest::new(STUB_EMAIL, STUB_PASSWORD))
            .await
            .unwrap();

        assert_eq!(grant.access_token, STUB_ACCESS_TOKEN);
        assert_eq!(grant.refresh_token.as_deref(), Some(STUB_REFRESH_TOKEN));
        assert_eq!(grant.expires_in, 3600);
    }

    #[tokio::test]
    async fn login_rejects_other_credentials() {
        let client = StubClient::instant();
        let err = client
            .login(&LoginRequest::new(STUB_EMAIL, "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn refreshed_token_is_still_accepted() {
        let client = StubClient::instant();
        let grant = client.refresh_token(STUB_REFRESH_TOKEN).await.unwrap();

        assert_eq!(grant.access_token, "mock-access-token-12345-refreshed");
        assert!(client.list_sites(&grant.access_token).await.is_ok());
    }

    #[tokio::test]
    async fn foreign_token_is_unauthorized() {
        let client = StubClient::instant();
        let err = client.list_sites("someone-else").await.unwrap_err();

        assert_eq!(err.status_code(), 401);
        assert_eq!(err.to_string(), "Invalid token");
    }

    #[tokio::test]
    async fn sites_carry_full_topology() {
        let client = StubClient::instant();
        let sites = client.list_sites(STUB_ACCESS_TOKEN).await.unwrap();

        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].id, "mock-site-1");
        assert_eq!(sites[0].devices[0].model, "AP22");
        assert_eq!(sites[0].devices[0].radios.len(), 2);
    }

    #[tokio::test]
    async fn control_radio_applies_defaults() {
        let client = StubClient::instant();
        let request = RadioControlRequest::toggle("mock-device-1", "mock-radio-2", false);
        let response = client
            .control_radio(STUB_ACCESS_TOKEN, "mock-site-1", &request)
            .await
            .unwrap();

        let radio = response.radio.unwrap();
        assert!(response.success);
        assert_eq!(radio.id, "mock-radio-2");
        assert_eq!(radio.channel, 6);
        assert_eq!(radio.transmit_power, 17);
        assert!(!radio.enabled);
        assert_eq!(radio.status, RadioStatus::Inactive);
    }
}
