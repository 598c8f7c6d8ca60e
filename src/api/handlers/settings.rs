//! Handlers for settings endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::settings::DomainRequest;
use crate::domain::entities::Settings;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/settings`
pub async fn get_settings_handler(
    State(state): State<AppState>,
) -> Result<Json<Settings>, AppError> {
    Ok(Json(state.settings_service.get_settings().await?))
}

/// Replaces the domain used in short URLs.
///
/// # Endpoint
///
/// `PUT /api/settings/default-domain`
///
/// ```json
/// { "domain": "s.example.com" }
/// ```
pub async fn update_default_domain_handler(
    State(state): State<AppState>,
    Json(payload): Json<DomainRequest>,
) -> Result<Json<Settings>, AppError> {
    payload.validate()?;

    let settings = state
        .settings_service
        .update_default_domain(&payload.domain)
        .await?;

    Ok(Json(settings))
}

/// Adds a custom domain. Adding an existing domain is a no-op.
///
/// # Endpoint
///
/// `POST /api/settings/domains`
pub async fn add_domain_handler(
    State(state): State<AppState>,
    Json(payload): Json<DomainRequest>,
) -> Result<Json<Settings>, AppError> {
    payload.validate()?;

    let settings = state
        .settings_service
        .add_custom_domain(&payload.domain)
        .await?;

    Ok(Json(settings))
}

/// Removes a custom domain.
///
/// # Endpoint
///
/// `DELETE /api/settings/domains/{domain}`
///
/// # Errors
///
/// Returns 404 if the domain is not configured.
pub async fn remove_domain_handler(
    Path(domain): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Settings>, AppError> {
    let settings = state
        .settings_service
        .remove_custom_domain(&domain)
        .await?;

    Ok(Json(settings))
}
