//! API route configuration.

use crate::api::handlers::{
    add_domain_handler, create_link_handler, delete_link_handler, export_handler,
    get_link_by_code_handler, get_link_handler, get_settings_handler, import_handler,
    list_links_handler, remove_domain_handler, stats_handler, update_default_domain_handler,
    update_link_handler, validate_ab_tests_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// All JSON API routes.
///
/// # Endpoints
///
/// - `GET    /links`                   - List links with short URLs
/// - `POST   /links`                   - Create a link
/// - `GET    /links/{id}`              - Fetch a link
/// - `PATCH  /links/{id}`              - Partially update a link
/// - `DELETE /links/{id}`              - Delete a link
/// - `GET    /links/by-code/{code}`    - Fetch a link by short code
/// - `GET    /stats/{code}`            - Click totals and daily history
/// - `POST   /ab-tests/validate`       - Check an A/B configuration
/// - `GET    /settings`                - Current settings
/// - `PUT    /settings/default-domain` - Change the default domain
/// - `POST   /settings/domains`        - Add a custom domain
/// - `DELETE /settings/domains/{domain}` - Remove a custom domain
/// - `GET    /export`                  - Download all data
/// - `POST   /import`                  - Replace data from an export
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route(
            "/links/{id}",
            get(get_link_handler)
                .patch(update_link_handler)
                .delete(delete_link_handler),
        )
        .route("/links/by-code/{code}", get(get_link_by_code_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/ab-tests/validate", post(validate_ab_tests_handler))
        .route("/settings", get(get_settings_handler))
        .route(
            "/settings/default-domain",
            put(update_default_domain_handler),
        )
        .route("/settings/domains", post(add_domain_handler))
        .route("/settings/domains/{domain}", delete(remove_domain_handler))
        .route("/export", get(export_handler))
        .route("/import", post(import_handler))
}
