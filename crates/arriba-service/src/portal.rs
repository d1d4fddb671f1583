//! Portal service - composes vendor calls for the HTTP surface
//!
//! Only the failure of the primary resource of an operation is surfaced.
//! Enrichment fetches (devices for a site, radios for a device) degrade to
//! empty defaults and are logged.

use std::sync::Arc;

use arriba_core::{
    Credential, Device, LoginRequest, Radio, RadioControlRequest, RadioControlResponse, Site,
    UserInfo, VendorClient, VendorError, VendorResult,
};
use chrono::Utc;
use futures::future::join_all;
use tracing::{debug, info, warn};

/// Aggregation service over a [`VendorClient`]
#[derive(Clone)]
pub struct PortalService {
    client: Arc<dyn VendorClient>,
}

impl PortalService {
    pub fn new(client: Arc<dyn VendorClient>) -> Self {
        Self { client }
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Log in and turn the vendor grant into a credential
    pub async fn authenticate(&self, email: &str, password: &str) -> VendorResult<Credential> {
        let grant = self
            .client
            .login(&LoginRequest::new(email, password))
            .await?;
        info!(email, "User authenticated");
        Ok(Credential::issued(grant, Utc::now()))
    }

    /// Exchange a refresh token for a new credential.
    ///
    /// No retry; on failure the caller has to log in again.
    pub async fn refresh(&self, refresh_token: &str) -> VendorResult<Credential> {
        let grant = self.client.refresh_token(refresh_token).await?;
        debug!("Credential refreshed");
        Ok(Credential::issued(grant, Utc::now()))
    }

    pub async fn user_info(&self, credential: &Credential) -> VendorResult<UserInfo> {
        self.client.get_user_info(&credential.access_token).await
    }

    // =========================================================================
    // Topology
    // =========================================================================

    pub async fn list_sites(&self, credential: &Credential) -> VendorResult<Vec<Site>> {
        self.client.list_sites(&credential.access_token).await
    }

    /// Look a site up in the site list without enriching it
    pub async fn get_site(&self, credential: &Credential, site_id: &str) -> VendorResult<Site> {
        self.list_sites(credential)
            .await?
            .into_iter()
            .find(|site| site.id == site_id)
            .ok_or_else(|| VendorError::NotFound(format!("Site '{}' not found", site_id)))
    }

    /// Fetch a site with its devices and every device's radios.
    ///
    /// Radio fetches run concurrently and all of them are awaited; one failing
    /// device leaves its radio list empty without affecting the others.
    pub async fn get_site_with_devices(
        &self,
        credential: &Credential,
        site_id: &str,
    ) -> VendorResult<Site> {
        let token = credential.access_token.as_str();
        let mut site = self.client.get_site(token, site_id).await?;

        let devices = match self.client.list_devices(token, site_id).await {
            Ok(devices) => devices,
            Err(e) => {
                warn!(site_id, error = %e, "Device list fetch failed, returning site as fetched");
                return Ok(site);
            }
        };

        let futs = devices
            .into_iter()
            .map(|device| self.attach_radios(token, site_id, device));
        site.devices = join_all(futs).await;

        debug!(site_id, devices = site.devices.len(), "Site enriched");
        Ok(site)
    }

    pub async fn list_devices(
        &self,
        credential: &Credential,
        site_id: &str,
    ) -> VendorResult<Vec<Device>> {
        self.client
            .list_devices(&credential.access_token, site_id)
            .await
    }

    /// Fetch a device with its radios; a radio failure leaves the list empty
    pub async fn get_device_with_radios(
        &self,
        credential: &Credential,
        site_id: &str,
        device_id: &str,
    ) -> VendorResult<Device> {
        let token = credential.access_token.as_str();
        let device = self.client.get_device(token, site_id, device_id).await?;
        Ok(self.attach_radios(token, site_id, device).await)
    }

    async fn attach_radios(&self, token: &str, site_id: &str, mut device: Device) -> Device {
        device.radios = self.radios_or_empty(token, site_id, &device.id).await;
        device
    }

    async fn radios_or_empty(&self, token: &str, site_id: &str, device_id: &str) -> Vec<Radio> {
        match self.client.list_radios(token, site_id, device_id).await {
            Ok(radios) => radios,
            Err(e) => {
                warn!(site_id, device_id, error = %e, "Radio fetch failed");
                Vec::new()
            }
        }
    }

    // =========================================================================
    // Radio control
    // =========================================================================

    /// Enable or disable a single radio
    pub async fn toggle_radio(
        &self,
        credential: &Credential,
        site_id: &str,
        device_id: &str,
        radio_id: &str,
        enabled: bool,
    ) -> VendorResult<RadioControlResponse> {
        info!(site_id, device_id, radio_id, enabled, "Toggling radio");
        let request = RadioControlRequest::toggle(device_id, radio_id, enabled);
        self.update_radio(credential, site_id, &request).await
    }

    pub async fn update_radio(
        &self,
        credential: &Credential,
        site_id: &str,
        request: &RadioControlRequest,
    ) -> VendorResult<RadioControlResponse> {
        self.client
            .control_radio(&credential.access_token, site_id, request)
            .await
    }
}
