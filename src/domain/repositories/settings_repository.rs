//! Repository trait for application settings.

use crate::domain::entities::Settings;
use crate::error::AppError;
use async_trait::async_trait;

/// Storage port for the single [`Settings`] record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get_settings(&self) -> Result<Settings, AppError>;

    async fn save_settings(&self, settings: Settings) -> Result<Settings, AppError>;
}
