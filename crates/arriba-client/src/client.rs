//! Instant On HTTP client implementation

use std::time::Duration;

use arriba_core::{
    Device, LoginRequest, LoginResponse, Radio, RadioControlRequest, RadioControlResponse, Site,
    UserInfo, VendorClient, VendorError, VendorResult,
};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};
use url::Url;

use crate::wire::{
    AuthResponse, DeviceElement, Elements, LoginPayload, RadioElement, RadioUpdatePayload,
    RefreshPayload, SiteElement, UserInfoElement,
};

/// Instant On single sign-on service
pub const DEFAULT_AUTH_URL: &str = "https://sso.arubainstanton.com";
/// Instant On device-management API
pub const DEFAULT_API_URL: &str = "https://nb.portal.arubainstanton.com/api";

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Vendor error bodies are truncated to this many characters in messages
const MAX_ERROR_DETAIL: usize = 500;

const LOGIN_PATH: &[&str] = &["aio", "api", "v1", "mfa", "validate", "full"];
const REFRESH_PATH: &[&str] = &["aio", "api", "v1", "refresh"];

/// Connection settings for [`InstantOnClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the authentication service
    pub auth_url: String,
    /// Base URL of the device-management API
    pub api_url: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

/// Instant On REST API client
///
/// Talks to the real vendor portal. Every failure is returned as a
/// [`VendorError`]; nothing panics on unexpected vendor data.
#[derive(Debug, Clone)]
pub struct InstantOnClient {
    client: Client,
    auth_url: Url,
    api_url: Url,
}

impl InstantOnClient {
    /// Create a client for the production portal
    pub fn new() -> VendorResult<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a client with custom endpoints and timeouts
    pub fn with_config(config: &ClientConfig) -> VendorResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| VendorError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            auth_url: parse_base(&config.auth_url)?,
            api_url: parse_base(&config.api_url)?,
        })
    }

    pub fn auth_url(&self) -> &Url {
        &self.auth_url
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    // =========================================================================
    // Request helpers
    // =========================================================================

    fn api_get(&self, access_token: &str, segments: &[&str]) -> VendorResult<RequestBuilder> {
        let url = endpoint(&self.api_url, segments)?;
        debug!(%url, "GET");
        Ok(self.client.get(url).bearer_auth(access_token))
    }

    async fn send(&self, request: RequestBuilder) -> VendorResult<Response> {
        request.send().await.map_err(transport_error)
    }

    /// Check the status and read the body as JSON.
    ///
    /// A `null` or empty body decodes to `None`.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: Response,
        failure: &str,
    ) -> VendorResult<Option<T>> {
        let status = response.status();
        if !status.is_success() {
            return Err(self.extract_error(response, failure).await);
        }

        let body = response.text().await.map_err(transport_error)?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "Unexpected response shape from Instant On");
            VendorError::InvalidResponse(format!("{}: invalid response ({})", failure, e))
        })
    }

    /// Build an upstream error from a non-2xx response, preserving its status
    async fn extract_error(&self, response: Response, failure: &str) -> VendorError {
        let status = response.status().as_u16();
        let detail: String = match response.text().await {
            Ok(body) => body.trim().chars().take(MAX_ERROR_DETAIL).collect(),
            Err(_) => String::new(),
        };

        let message = if detail.is_empty() {
            failure.to_string()
        } else {
            format!("{}: {}", failure, detail)
        };

        warn!(status, %message, "Instant On request failed");
        VendorError::upstream(status, message)
    }

    async fn fetch_list<W, T>(
        &self,
        access_token: &str,
        segments: &[&str],
        failure: &str,
    ) -> VendorResult<Vec<T>>
    where
        W: DeserializeOwned,
        T: From<W>,
    {
        let request = self.api_get(access_token, segments)?;
        let response = self.send(request).await?;
        let envelope = self.handle_response::<Elements<W>>(response, failure).await?;
        Ok(Elements::into_vec(envelope))
    }

    async fn exchange_token(
        &self,
        request: RequestBuilder,
        failure: &str,
        fallback_refresh: Option<&str>,
    ) -> VendorResult<LoginResponse> {
        let response = self.send(request).await?;
        debug!(status = %response.status(), "Received auth response");

        self.handle_response::<AuthResponse>(response, failure)
            .await?
            .and_then(|auth| auth.into_grant(fallback_refresh))
            .ok_or_else(|| {
                VendorError::InvalidResponse(format!("{}: invalid authentication response", failure))
            })
    }
}

#[async_trait]
impl VendorClient for InstantOnClient {
    #[instrument(skip(self, request), fields(email = %request.email))]
    async fn login(&self, request: &LoginRequest) -> VendorResult<LoginResponse> {
        info!("Attempting login");
        let url = endpoint(&self.auth_url, LOGIN_PATH)?;
        let payload = LoginPayload {
            username: &request.email,
            password: &request.password,
        };

        let grant = self
            .exchange_token(
                self.client.post(url).json(&payload),
                "Authentication failed",
                None,
            )
            .await?;
        info!("Login successful");
        Ok(grant)
    }

    #[instrument(skip_all)]
    async fn refresh_token(&self, refresh_token: &str) -> VendorResult<LoginResponse> {
        info!("Attempting to refresh authentication token");
        let url = endpoint(&self.auth_url, REFRESH_PATH)?;
        let payload = RefreshPayload { refresh_token };

        let grant = self
            .exchange_token(
                self.client.post(url).json(&payload),
                "Token refresh failed",
                Some(refresh_token),
            )
            .await?;
        info!("Token refresh successful");
        Ok(grant)
    }

    #[instrument(skip_all)]
    async fn get_user_info(&self, access_token: &str) -> VendorResult<UserInfo> {
        let request = self.api_get(access_token, &["userinfo"])?;
        let response = self.send(request).await?;

        self.handle_response::<UserInfoElement>(response, "Failed to get user info")
            .await?
            .map(UserInfo::from)
            .ok_or_else(|| VendorError::InvalidResponse("Invalid user info response".to_string()))
    }

    #[instrument(skip(self, access_token))]
    async fn list_sites(&self, access_token: &str) -> VendorResult<Vec<Site>> {
        let sites: Vec<Site> = self
            .fetch_list::<SiteElement, _>(access_token, &["sites"], "Failed to get sites")
            .await?;
        debug!(count = sites.len(), "Fetched sites");
        Ok(sites)
    }

    #[instrument(skip(self, access_token))]
    async fn get_site(&self, access_token: &str, site_id: &str) -> VendorResult<Site> {
        let request = self.api_get(access_token, &["sites", site_id])?;
        let response = self.send(request).await?;

        self.handle_response::<SiteElement>(response, "Failed to get site")
            .await?
            .map(Site::from)
            .ok_or_else(|| VendorError::NotFound("Site not found".to_string()))
    }

    #[instrument(skip(self, access_token))]
    async fn list_devices(&self, access_token: &str, site_id: &str) -> VendorResult<Vec<Device>> {
        let devices: Vec<Device> = self
            .fetch_list::<DeviceElement, _>(
                access_token,
                &["sites", site_id, "devices"],
                "Failed to get devices",
            )
            .await?;
        debug!(count = devices.len(), "Fetched devices");
        Ok(devices)
    }

    #[instrument(skip(self, access_token))]
    async fn get_device(
        &self,
        access_token: &str,
        site_id: &str,
        device_id: &str,
    ) -> VendorResult<Device> {
        let request = self.api_get(access_token, &["sites", site_id, "devices", device_id])?;
        let response = self.send(request).await?;

        self.handle_response::<DeviceElement>(response, "Failed to get device")
            .await?
            .map(Device::from)
            .ok_or_else(|| VendorError::NotFound("Device not found".to_string()))
    }

    #[instrument(skip(self, access_token))]
    async fn list_radios(
        &self,
        access_token: &str,
        site_id: &str,
        device_id: &str,
    ) -> VendorResult<Vec<Radio>> {
        self.fetch_list::<RadioElement, _>(
            access_token,
            &["sites", site_id, "devices", device_id, "radios"],
            "Failed to get radios",
        )
        .await
    }

    #[instrument(skip(self, access_token, request), fields(device_id = %request.device_id, radio_id = %request.radio_id))]
    async fn control_radio(
        &self,
        access_token: &str,
        site_id: &str,
        request: &RadioControlRequest,
    ) -> VendorResult<RadioControlResponse> {
        let url = endpoint(
            &self.api_url,
            &[
                "sites",
                site_id,
                "devices",
                &request.device_id,
                "radios",
                &request.radio_id,
            ],
        )?;
        let payload = RadioUpdatePayload::from(request);
        debug!(%url, ?payload, "PATCH");

        let response = self
            .send(
                self.client
                    .patch(url)
                    .bearer_auth(access_token)
                    .json(&payload),
            )
            .await?;

        let radio = self
            .handle_response::<RadioElement>(response, "Failed to control radio")
            .await?
            .map(Radio::from);
        Ok(RadioControlResponse::updated(radio))
    }
}

fn parse_base(raw: &str) -> VendorResult<Url> {
    Url::parse(raw).map_err(|e| VendorError::Internal(format!("Invalid base URL '{}': {}", raw, e)))
}

/// Append path segments to a base URL.
///
/// Segments are percent-encoded, so identifiers containing `/` stay a
/// single path segment.
fn endpoint(base: &Url, segments: &[&str]) -> VendorResult<Url> {
    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| VendorError::Internal(format!("Base URL cannot have a path: {}", base)))?;
        path.pop_if_empty().extend(segments);
    }
    Ok(url)
}

/// Map transport failures onto the fixed sentinel errors
fn transport_error(err: reqwest::Error) -> VendorError {
    if err.is_timeout() {
        warn!(error = %err, "Instant On request timed out");
        VendorError::Timeout("Request to Instant On timed out. Please try again.".to_string())
    } else if err.is_builder() {
        VendorError::Internal(err.to_string())
    } else {
        warn!(error = %err, "Instant On network error");
        VendorError::Network(err.to_string())
    }
}
