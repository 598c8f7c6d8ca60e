//! Link creation, update and retrieval service.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

use crate::domain::entities::{Link, LinkPatch, NewLink};
use crate::domain::repositories::{LinkRepository, SettingsRepository};
use crate::error::AppError;
use crate::utils::code_generator::{DEFAULT_CODE_LENGTH, generate_unique_code, validate_custom_code};
use crate::utils::url_normalizer::validate_and_normalize;

/// Service for creating, editing and reading links.
///
/// Handles URL normalization and short code generation/validation. Writes go
/// through [`LinkRepository::save`], so an edit racing another writer fails
/// with [`AppError::Conflict`] instead of overwriting it.
pub struct LinkService<L: LinkRepository, S: SettingsRepository> {
    link_repository: Arc<L>,
    settings_repository: Arc<S>,
    public_scheme: String,
}

impl<L: LinkRepository, S: SettingsRepository> LinkService<L, S> {
    /// Creates a new link service.
    ///
    /// `public_scheme` is the scheme used in generated short URLs.
    pub fn new(
        link_repository: Arc<L>,
        settings_repository: Arc<S>,
        public_scheme: impl Into<String>,
    ) -> Self {
        Self {
            link_repository,
            settings_repository,
            public_scheme: public_scheme.into(),
        }
    }

    /// Creates an active link with zeroed statistics.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] for an empty URL and
    /// [`AppError::InvalidUrl`] for one that fails validation.
    /// Returns [`AppError::InvalidCode`] if the custom code is malformed and
    /// [`AppError::DuplicateCode`] if it is already taken.
    pub async fn create_link(&self, new_link: NewLink) -> Result<Link, AppError> {
        let original_url = validate_and_normalize(&new_link.original_url)?;

        let existing: HashSet<String> = self
            .link_repository
            .get_all()
            .await?
            .into_iter()
            .map(|l| l.short_code)
            .collect();

        let short_code = match new_link.custom_code {
            Some(custom) => {
                validate_custom_code(&custom)?;

                if existing.contains(&custom) {
                    return Err(AppError::duplicate_code(
                        "Custom code already exists",
                        json!({ "code": custom }),
                    ));
                }

                custom
            }
            None => generate_unique_code(&existing, DEFAULT_CODE_LENGTH),
        };

        let mut link = Link::new(
            Uuid::new_v4().to_string(),
            short_code,
            original_url,
            Utc::now(),
        );
        link.utm_params = new_link.utm_params;
        link.ab_tests = new_link.ab_tests;

        let saved = self.link_repository.save(link).await?;

        tracing::info!(
            id = %saved.id,
            code = %saved.short_code,
            ab_test = saved.variants().is_some(),
            "Link created"
        );

        Ok(saved)
    }

    /// Applies a partial update to an existing link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this id.
    /// Returns [`AppError::InvalidUrl`] if a new URL fails validation.
    /// Returns [`AppError::Conflict`] if the link changed since it was read.
    pub async fn update_link(&self, id: &str, patch: LinkPatch) -> Result<Link, AppError> {
        let mut link = self
            .link_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": id })))?;

        if let Some(url) = patch.original_url {
            link.original_url = validate_and_normalize(&url)?;
        }
        if let Some(utm_params) = patch.utm_params {
            link.utm_params = utm_params;
        }
        if let Some(ab_tests) = patch.ab_tests {
            link.ab_tests = ab_tests;
        }
        if let Some(is_active) = patch.is_active {
            link.is_active = is_active;
        }
        if let Some(custom_domain) = patch.custom_domain {
            link.custom_domain = custom_domain;
        }

        let saved = self.link_repository.save(link).await?;
        tracing::info!(id = %saved.id, revision = saved.revision, "Link updated");

        Ok(saved)
    }

    /// Deletes a link. Returns `false` if it did not exist.
    pub async fn delete_link(&self, id: &str) -> Result<bool, AppError> {
        let deleted = self.link_repository.delete(id).await?;
        if deleted {
            tracing::info!(id, "Link deleted");
        }
        Ok(deleted)
    }

    pub async fn get_all_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.get_all().await
    }

    pub async fn get_link_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        self.link_repository.find_by_code(code).await
    }

    pub async fn get_link_by_id(&self, id: &str) -> Result<Option<Link>, AppError> {
        self.link_repository.find_by_id(id).await
    }

    /// Builds the public short URL for a link.
    ///
    /// Uses the link's custom domain when set, otherwise the configured
    /// default domain.
    pub async fn get_short_url(&self, link: &Link) -> Result<String, AppError> {
        let domain = match &link.custom_domain {
            Some(domain) => domain.clone(),
            None => self.settings_repository.get_settings().await?.default_domain,
        };

        Ok(format!(
            "{}://{}/redirect?code={}",
            self.public_scheme,
            domain.trim_end_matches('/'),
            link.short_code
        ))
    }
}
