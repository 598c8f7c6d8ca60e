//! Handlers for link management endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::links::{CreateLinkRequest, LinkResponse, UpdateLinkRequest};
use crate::domain::ab_test::{normalize_weights, validate_ab_tests};
use crate::domain::entities::{Link, LinkPatch, NewLink, Variant};
use crate::error::AppError;
use crate::state::AppState;

/// Validates an A/B configuration and returns it with normalized weights.
///
/// The second value is a human-readable warning for recoverable issues.
fn prepare_ab_tests(variants: Vec<Variant>) -> Result<(Vec<Variant>, Option<String>), AppError> {
    let validation = validate_ab_tests(&variants);

    if let Some(error) = validation.error {
        return Err(AppError::invalid_input(
            error.to_string(),
            serde_json::to_value(&error).unwrap_or_else(|_| json!({})),
        ));
    }

    Ok((
        normalize_weights(&variants),
        validation.warning.map(|w| w.to_string()),
    ))
}

async fn link_response(
    state: &AppState,
    link: Link,
    warning: Option<String>,
) -> Result<LinkResponse, AppError> {
    let short_url = state.link_service.get_short_url(&link).await?;
    Ok(LinkResponse {
        link,
        short_url,
        warning,
    })
}

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "example.com/landing",
///   "customCode": "spring-sale",
///   "utmParams": { "utm_source": "newsletter" },
///   "abTests": [
///     { "url": "https://a.example.com", "weight": 70 },
///     { "url": "https://b.example.com", "weight": 30 }
///   ]
/// }
/// ```
///
/// A/B weights are normalized to sum to 100 before the link is stored.
///
/// # Errors
///
/// Returns 400 for an invalid URL, custom code or A/B configuration.
/// Returns 409 if the custom code is already taken.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let mut new_link = NewLink::from(payload);

    let mut warning = None;
    if let Some(variants) = new_link.ab_tests.take() {
        let (normalized, ab_warning) = prepare_ab_tests(variants)?;
        new_link.ab_tests = Some(normalized);
        warning = ab_warning;
    }

    let link = state.link_service.create_link(new_link).await?;

    Ok((
        StatusCode::CREATED,
        Json(link_response(&state, link, warning).await?),
    ))
}

/// Lists every link with its short URL.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.get_all_links().await?;

    let mut items = Vec::with_capacity(links.len());
    for link in links {
        items.push(link_response(&state, link, None).await?);
    }

    Ok(Json(items))
}

/// Returns one link by id.
///
/// # Endpoint
///
/// `GET /api/links/{id}`
pub async fn get_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state
        .link_service
        .get_link_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))?;

    Ok(Json(link_response(&state, link, None).await?))
}

/// Returns one link by short code without tracking a click.
///
/// # Endpoint
///
/// `GET /api/links/by-code/{code}`
pub async fn get_link_by_code_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state
        .redirect_service
        .peek(&code)
        .await?
        .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))?;

    Ok(Json(link_response(&state, link, None).await?))
}

/// Partially updates a link.
///
/// # Endpoint
///
/// `PATCH /api/links/{id}`
///
/// # Request Body
///
/// All fields are optional. Only provided fields are changed; `null` clears
/// `utmParams`, `abTests` and `customDomain`.
///
/// ```json
/// {
///   "isActive": false,
///   "abTests": null
/// }
/// ```
///
/// # Errors
///
/// Returns 404 if the link does not exist.
/// Returns 409 if the link was modified concurrently.
pub async fn update_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let mut patch = LinkPatch::from(payload);

    let mut warning = None;
    if let Some(Some(variants)) = patch.ab_tests {
        let (normalized, ab_warning) = prepare_ab_tests(variants)?;
        patch.ab_tests = Some(Some(normalized));
        warning = ab_warning;
    }

    let link = state.link_service.update_link(&id, patch).await?;

    Ok(Json(link_response(&state, link, warning).await?))
}

/// Deletes a link.
///
/// # Endpoint
///
/// `DELETE /api/links/{id}`
///
/// # Errors
///
/// Returns 404 if the link does not exist.
pub async fn delete_link_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    if !state.link_service.delete_link(&id).await? {
        return Err(AppError::not_found("Link not found", json!({ "id": id })));
    }

    Ok(StatusCode::NO_CONTENT)
}
