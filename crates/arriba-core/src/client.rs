//! VendorClient trait - the seam between aggregation and the vendor portal

use async_trait::async_trait;

use crate::error::VendorResult;
use crate::models::{
    Device, LoginRequest, LoginResponse, Radio, RadioControlRequest, RadioControlResponse, Site,
    UserInfo,
};

/// One operation per vendor capability.
///
/// Implementations must never panic on unexpected vendor data: every failure
/// (vendor status, transport, response shape) is returned as a
/// [`VendorError`](crate::VendorError) carrying a status code.
#[async_trait]
pub trait VendorClient: Send + Sync {
    /// Exchange email/password for a token grant
    async fn login(&self, request: &LoginRequest) -> VendorResult<LoginResponse>;

    /// Exchange a refresh token for a new token grant
    async fn refresh_token(&self, refresh_token: &str) -> VendorResult<LoginResponse>;

    /// Fetch the account behind an access token
    async fn get_user_info(&self, access_token: &str) -> VendorResult<UserInfo>;

    async fn list_sites(&self, access_token: &str) -> VendorResult<Vec<Site>>;

    async fn get_site(&self, access_token: &str, site_id: &str) -> VendorResult<Site>;

    async fn list_devices(&self, access_token: &str, site_id: &str) -> VendorResult<Vec<Device>>;

    async fn get_device(
        &self,
        access_token: &str,
        site_id: &str,
        device_id: &str,
    ) -> VendorResult<Device>;

    async fn list_radios(
        &self,
        access_token: &str,
        site_id: &str,
        device_id: &str,
    ) -> VendorResult<Vec<Radio>>;

    /// Apply a partial radio update
    async fn control_radio(
        &self,
        access_token: &str,
        site_id: &str,
        request: &RadioControlRequest,
    ) -> VendorResult<RadioControlResponse>;
}
