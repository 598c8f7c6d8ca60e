//! JSON document store implementing every storage port.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, Settings, Snapshot};
use crate::domain::repositories::{LinkRepository, SettingsRepository, SnapshotRepository};
use crate::error::AppError;

/// Links and settings held as one [`Snapshot`] behind a read-write lock.
///
/// When opened with a path, every successful write is mirrored to disk by
/// writing a sibling temporary file and renaming it over the target. The
/// in-memory state only changes after the file write succeeds.
pub struct JsonStore {
    state: RwLock<Snapshot>,
    path: Option<PathBuf>,
}

impl JsonStore {
    /// Creates a store that lives only in memory.
    pub fn in_memory(settings: Settings) -> Self {
        Self {
            state: RwLock::new(Snapshot::empty(settings)),
            path: None,
        }
    }

    /// Opens a file-backed store.
    ///
    /// A missing file yields an empty store with `default_settings`; nothing
    /// is written until the first change.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Persistence`] if the file exists but cannot be read
    /// or does not hold a valid snapshot.
    pub async fn open(
        path: impl Into<PathBuf>,
        default_settings: Settings,
    ) -> Result<Self, AppError> {
        let path = path.into();

        let snapshot = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice::<Snapshot>(&bytes).map_err(|e| {
                AppError::persistence(
                    "Data file is corrupt",
                    json!({ "path": path.display().to_string(), "reason": e.to_string() }),
                )
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "Data file not found, starting empty");
                Snapshot::empty(default_settings)
            }
            Err(e) => {
                return Err(AppError::persistence(
                    "Failed to read data file",
                    json!({ "path": path.display().to_string(), "reason": e.to_string() }),
                ));
            }
        };

        tracing::info!(
            path = %path.display(),
            links = snapshot.links.len(),
            "Data file loaded"
        );

        Ok(Self {
            state: RwLock::new(snapshot),
            path: Some(path),
        })
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Number of stored links.
    pub async fn link_count(&self) -> usize {
        self.state.read().await.links.len()
    }

    /// Applies `change` to a copy of the state, persists it, then publishes it.
    ///
    /// The write lock is held throughout, so writes are serialized.
    async fn write<T>(
        &self,
        change: impl FnOnce(&mut Snapshot) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut guard = self.state.write().await;
        let mut next = guard.clone();
        let out = change(&mut next)?;
        self.persist(&next).await?;
        *guard = next;
        Ok(out)
    }

    async fn persist(&self, snapshot: &Snapshot) -> Result<(), AppError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let bytes = serde_json::to_vec_pretty(snapshot)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, path).await?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Data file written");
        Ok(())
    }
}

#[async_trait]
impl LinkRepository for JsonStore {
    async fn get_all(&self) -> Result<Vec<Link>, AppError> {
        Ok(self.state.read().await.links.clone())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let state = self.state.read().await;
        Ok(state.links.iter().find(|l| l.short_code == code).cloned())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Link>, AppError> {
        let state = self.state.read().await;
        Ok(state.links.iter().find(|l| l.id == id).cloned())
    }

    async fn save(&self, link: Link) -> Result<Link, AppError> {
        self.write(|state| {
            if state
                .links
                .iter()
                .any(|l| l.short_code == link.short_code && l.id != link.id)
            {
                return Err(AppError::duplicate_code(
                    "Short code already exists",
                    json!({ "code": link.short_code }),
                ));
            }

            match state.links.iter_mut().find(|l| l.id == link.id) {
                Some(stored) => {
                    if stored.revision != link.revision {
                        return Err(AppError::conflict(
                            "Link was modified concurrently",
                            json!({
                                "id": link.id,
                                "expected": stored.revision,
                                "actual": link.revision,
                            }),
                        ));
                    }
                    let mut updated = link;
                    updated.revision += 1;
                    *stored = updated.clone();
                    Ok(updated)
                }
                None => {
                    let mut created = link;
                    created.revision = 1;
                    state.links.push(created.clone());
                    Ok(created)
                }
            }
        })
        .await
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        self.write(|state| {
            let before = state.links.len();
            state.links.retain(|l| l.id != id);
            Ok(state.links.len() != before)
        })
        .await
    }
}

#[async_trait]
impl SettingsRepository for JsonStore {
    async fn get_settings(&self) -> Result<Settings, AppError> {
        Ok(self.state.read().await.settings.clone())
    }

    async fn save_settings(&self, settings: Settings) -> Result<Settings, AppError> {
        self.write(|state| {
            state.settings = settings.clone();
            Ok(settings)
        })
        .await
    }
}

#[async_trait]
impl SnapshotRepository for JsonStore {
    async fn export_all(&self) -> Result<Snapshot, AppError> {
        Ok(self.state.read().await.clone())
    }

    async fn import_all(&self, snapshot: Snapshot) -> Result<(), AppError> {
        let links = snapshot.links.len();
        self.write(|state| {
            *state = snapshot;
            Ok(())
        })
        .await?;

        tracing::info!(links, "Snapshot imported");
        Ok(())
    }
}
