//! Query parameters for the public redirect endpoint.

use serde::Deserialize;

/// `GET /redirect?code={code}`
#[derive(Debug, Deserialize)]
pub struct RedirectQuery {
    pub code: Option<String>,
}
