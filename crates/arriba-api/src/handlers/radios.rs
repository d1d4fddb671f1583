//! Radio handlers

use arriba_core::{Radio, RadioControlRequest, RadioControlResponse};
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use tracing::{error, info};

use crate::auth::BearerCredential;
use crate::error::{codes, ApiError};
use crate::extract::ApiJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ToggleRadioRequest {
    pub enabled: bool,
}

/// Partial radio update; omitted fields are left unchanged on the device
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRadioRequest {
    pub enabled: Option<bool>,
    pub channel: Option<i32>,
    pub transmit_power: Option<i32>,
}

/// GET /api/sites/{site_id}/devices/{device_id}/radios
pub async fn list_radios(
    State(state): State<AppState>,
    BearerCredential(credential): BearerCredential,
    Path((site_id, device_id)): Path<(String, String)>,
) -> Result<Json<Vec<Radio>>, ApiError> {
    info!(site_id = %site_id, device_id = %device_id, "Fetching radios");
    let device = state
        .service()
        .get_device_with_radios(&credential, &site_id, &device_id)
        .await
        .map_err(|e| {
            error!(site_id = %site_id, device_id = %device_id, error = %e, "Failed to fetch radios");
            ApiError::service(codes::FETCH_FAILED)(e)
        })?;

    info!(device_id = %device_id, count = device.radios.len(), "Fetched radios");
    Ok(Json(device.radios))
}

/// POST /api/sites/{site_id}/devices/{device_id}/radios/{radio_id}/toggle
pub async fn toggle_radio(
    State(state): State<AppState>,
    BearerCredential(credential): BearerCredential,
    Path((site_id, device_id, radio_id)): Path<(String, String, String)>,
    ApiJson(request): ApiJson<ToggleRadioRequest>,
) -> Result<Json<RadioControlResponse>, ApiError> {
    let response = state
        .service()
        .toggle_radio(&credential, &site_id, &device_id, &radio_id, request.enabled)
        .await
        .map_err(|e| {
            error!(device_id = %device_id, radio_id = %radio_id, error = %e, "Failed to toggle radio");
            ApiError::service(codes::TOGGLE_FAILED)(e)
        })?;

    info!(radio_id = %radio_id, enabled = request.enabled, "Radio toggled");
    Ok(Json(response))
}

/// PATCH /api/sites/{site_id}/devices/{device_id}/radios/{radio_id}
pub async fn update_radio(
    State(state): State<AppState>,
    BearerCredential(credential): BearerCredential,
    Path((site_id, device_id, radio_id)): Path<(String, String, String)>,
    ApiJson(request): ApiJson<UpdateRadioRequest>,
) -> Result<Json<RadioControlResponse>, ApiError> {
    info!(
        device_id = %device_id,
        radio_id = %radio_id,
        enabled = ?request.enabled,
        channel = ?request.channel,
        transmit_power = ?request.transmit_power,
        "Updating radio"
    );

    let control = RadioControlRequest {
        device_id,
        radio_id,
        enabled: request.enabled,
        channel: request.channel,
        transmit_power: request.transmit_power,
    };

    let response = state
        .service()
        .update_radio(&credential, &site_id, &control)
        .await
        .map_err(|e| {
            error!(radio_id = %control.radio_id, error = %e, "Failed to update radio");
            ApiError::service(codes::UPDATE_FAILED)(e)
        })?;

    Ok(Json(response))
}
