//! Handler for short URL redirect.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Redirect, Response},
};
use tokio::sync::mpsc::error::TrySendError;

use crate::api::dto::redirect::RedirectQuery;
use crate::domain::click_event::ClickEvent;
use crate::error::AppError;
use crate::state::AppState;

/// Error page shown instead of a redirect.
#[derive(Template, WebTemplate)]
#[template(path = "redirect_error.html")]
struct RedirectErrorTemplate {
    status_code: u16,
    title: &'static str,
    message: String,
    code: Option<String>,
}

/// Redirects a short code to its resolved destination.
///
/// # Endpoint
///
/// `GET /redirect?code={code}`
///
/// # Request Flow
///
/// 1. Resolve the code (A/B variant selection, UTM merge)
/// 2. Send click event to background worker
/// 3. Return 307 Temporary Redirect
///
/// # Click Tracking
///
/// Click events are sent to a bounded channel for async processing.
/// If the queue is full, the click is dropped (fire-and-forget).
///
/// # Errors
///
/// Renders an HTML error page instead of redirecting:
/// - 400 if `code` is missing
/// - 404 if the short code doesn't exist
/// - 410 if the link is disabled
/// - 502 if the stored destination is not a valid URL
pub async fn redirect_handler(
    Query(query): Query<RedirectQuery>,
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    let Some(code) = query.code.filter(|c| !c.trim().is_empty()) else {
        metrics::counter!("redirect_errors_total", "reason" => "missing_code").increment(1);
        return error_page(
            StatusCode::BAD_REQUEST,
            "Missing short code",
            "The link is incomplete: no short code was given.".to_string(),
            None,
        );
    };

    let resolution = match state.redirect_service.resolve(&code).await {
        Ok(resolution) => resolution,
        Err(e) => {
            metrics::counter!("redirect_errors_total", "reason" => e.code()).increment(1);
            return render_error(e, code);
        }
    };

    let click_event = ClickEvent::new(
        code,
        resolution.variant.as_ref().map(|v| v.url.as_str()),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );

    match state.click_sender.try_send(click_event) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            metrics::counter!("clicks_dropped_total").increment(1);
            tracing::warn!(code = %event.code, "Click queue full, click dropped");
        }
        Err(TrySendError::Closed(event)) => {
            metrics::counter!("clicks_dropped_total").increment(1);
            tracing::error!(code = %event.code, "Click queue closed, click dropped");
        }
    }

    metrics::counter!("redirects_total").increment(1);

    Redirect::temporary(&resolution.final_url).into_response()
}

fn render_error(error: AppError, code: String) -> Response {
    match error {
        AppError::NotFound { .. } => error_page(
            StatusCode::NOT_FOUND,
            "Link not found",
            "This short link does not exist or has been deleted.".to_string(),
            Some(code),
        ),
        AppError::Inactive { .. } => error_page(
            StatusCode::GONE,
            "Link disabled",
            "This short link has been disabled by its owner.".to_string(),
            Some(code),
        ),
        AppError::InvalidUrl { .. } => error_page(
            StatusCode::BAD_GATEWAY,
            "Invalid destination",
            "This short link points to an address that cannot be opened.".to_string(),
            Some(code),
        ),
        other => other.into_response(),
    }
}

fn error_page(
    status: StatusCode,
    title: &'static str,
    message: String,
    code: Option<String>,
) -> Response {
    let page = RedirectErrorTemplate {
        status_code: status.as_u16(),
        title,
        message,
        code,
    };
    (status, page).into_response()
}
