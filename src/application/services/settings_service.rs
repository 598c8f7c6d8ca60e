//! Domain settings management service.

use std::sync::{Arc, LazyLock};

use regex::Regex;
use serde_json::json;

use crate::domain::entities::Settings;
use crate::domain::repositories::SettingsRepository;
use crate::error::AppError;

static DOMAIN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$").unwrap()
});

/// Service for managing the default and custom short-link domains.
///
/// Custom domains are display-only: they change generated short URLs, never
/// how redirects are routed.
pub struct SettingsService<S: SettingsRepository> {
    repository: Arc<S>,
}

impl<S: SettingsRepository> SettingsService<S> {
    pub fn new(repository: Arc<S>) -> Self {
        Self { repository }
    }

    pub async fn get_settings(&self) -> Result<Settings, AppError> {
        self.repository.get_settings().await
    }

    /// Replaces the default domain.
    ///
    /// Accepts a host with an optional port (`localhost:3000`).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] for an empty value or one with
    /// characters other than letters, digits, dots, hyphens and colons.
    pub async fn update_default_domain(&self, domain: &str) -> Result<Settings, AppError> {
        let domain = domain.trim();

        if domain.is_empty() || domain.len() > 255 {
            return Err(AppError::invalid_input(
                "Invalid domain name length",
                json!({ "min": 1, "max": 255 }),
            ));
        }

        if !domain
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | ':'))
        {
            return Err(AppError::invalid_input(
                "Invalid characters in domain name",
                json!({ "domain": domain, "allowed": "a-z, 0-9, dots, hyphens, port" }),
            ));
        }

        let mut settings = self.repository.get_settings().await?;
        settings.default_domain = domain.to_string();

        let saved = self.repository.save_settings(settings).await?;
        tracing::info!(domain, "Default domain updated");
        Ok(saved)
    }

    /// Adds a custom domain. Adding an existing domain is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if the domain is not a valid
    /// hostname with a top-level domain.
    pub async fn add_custom_domain(&self, domain: &str) -> Result<Settings, AppError> {
        let domain = domain.trim();

        if !DOMAIN_REGEX.is_match(domain) {
            return Err(AppError::invalid_input(
                "Invalid domain format",
                json!({ "domain": domain, "hint": "Expected a hostname such as go.example.com" }),
            ));
        }

        let mut settings = self.repository.get_settings().await?;
        if !settings.add_custom_domain(domain) {
            return Ok(settings);
        }

        let saved = self.repository.save_settings(settings).await?;
        tracing::info!(domain, "Custom domain added");
        Ok(saved)
    }

    /// Removes a custom domain.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the domain is not configured.
    pub async fn remove_custom_domain(&self, domain: &str) -> Result<Settings, AppError> {
        let mut settings = self.repository.get_settings().await?;

        if !settings.remove_custom_domain(domain) {
            return Err(AppError::not_found(
                "Domain not found",
                json!({ "domain": domain }),
            ));
        }

        let saved = self.repository.save_settings(settings).await?;
        tracing::info!(domain, "Custom domain removed");
        Ok(saved)
    }
}
