//! Site and device handlers

use arriba_core::{Device, Site};
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use tracing::{error, info};

use crate::auth::BearerCredential;
use crate::error::{codes, ApiError};
use crate::extract::ApiQuery;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteQuery {
    pub include_devices: Option<bool>,
}

/// GET /api/sites
pub async fn list_sites(
    State(state): State<AppState>,
    BearerCredential(credential): BearerCredential,
) -> Result<Json<Vec<Site>>, ApiError> {
    info!("Fetching sites");
    let sites = state
        .service()
        .list_sites(&credential)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to fetch sites");
            ApiError::service(codes::FETCH_FAILED)(e)
        })?;

    info!(count = sites.len(), "Fetched sites");
    Ok(Json(sites))
}

/// GET /api/sites/{site_id}?includeDevices=bool
///
/// With devices (the default) the site is enriched with every device and its
/// radios; without, it is looked up in the site list.
pub async fn get_site(
    State(state): State<AppState>,
    BearerCredential(credential): BearerCredential,
    Path(site_id): Path<String>,
    ApiQuery(query): ApiQuery<SiteQuery>,
) -> Result<Json<Site>, ApiError> {
    let service = state.service();
    let site = if query.include_devices.unwrap_or(true) {
        info!(site_id = %site_id, "Fetching site with devices");
        service.get_site_with_devices(&credential, &site_id).await
    } else {
        info!(site_id = %site_id, "Fetching site");
        service.get_site(&credential, &site_id).await
    }
    .map_err(|e| {
        error!(site_id = %site_id, error = %e, "Failed to fetch site");
        ApiError::service(codes::FETCH_FAILED)(e)
    })?;

    Ok(Json(site))
}

/// GET /api/sites/{site_id}/devices
pub async fn list_devices(
    State(state): State<AppState>,
    BearerCredential(credential): BearerCredential,
    Path(site_id): Path<String>,
) -> Result<Json<Vec<Device>>, ApiError> {
    let devices = state
        .service()
        .list_devices(&credential, &site_id)
        .await
        .map_err(|e| {
            error!(site_id = %site_id, error = %e, "Failed to fetch devices");
            ApiError::service(codes::FETCH_FAILED)(e)
        })?;

    info!(site_id = %site_id, count = devices.len(), "Fetched devices");
    Ok(Json(devices))
}

/// GET /api/sites/{site_id}/devices/{device_id}
pub async fn get_device(
    State(state): State<AppState>,
    BearerCredential(credential): BearerCredential,
    Path((site_id, device_id)): Path<(String, String)>,
) -> Result<Json<Device>, ApiError> {
    let device = state
        .service()
        .get_device_with_radios(&credential, &site_id, &device_id)
        .await
        .map_err(|e| {
            error!(site_id = %site_id, device_id = %device_id, error = %e, "Failed to fetch device");
            ApiError::service(codes::FETCH_FAILED)(e)
        })?;

    Ok(Json(device))
}
