//! Settings persistence.
//!
//! [`SettingsBackend`] is the opaque load/save contract. [`SettingsStore`]
//! holds the live snapshot on top of a backend: it loads once at startup
//! (falling back to defaults on any failure) and persists after every edit.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use super::config::{AppSettings, SettingsPatch};
use super::data_dir;
use crate::error::{ConfigError, Result};

/// Stable identifier the settings are stored under.
pub const SETTINGS_KEY: &str = "zenflip_settings";

/// Load/save contract for persisted settings.
pub trait SettingsBackend {
    /// `Ok(None)` when nothing has been persisted yet.
    fn load(&self) -> Result<Option<AppSettings>>;
    fn save(&self, settings: &AppSettings) -> Result<()>;
}

/// TOML file backend: `<dir>/zenflip_settings.toml`.
#[derive(Debug, Clone)]
pub struct TomlFileBackend {
    path: PathBuf,
}

impl TomlFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backend inside `dir`, keyed by [`SETTINGS_KEY`].
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(format!("{SETTINGS_KEY}.toml")))
    }

    /// Backend inside the default data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::in_dir(&data_dir()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsBackend for TomlFileBackend {
    fn load(&self) -> Result<Option<AppSettings>> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: self.path.clone(),
                    message: e.to_string(),
                }
                .into())
            }
        };
        AppSettings::from_toml(&content).map(Some)
    }

    fn save(&self, settings: &AppSettings) -> Result<()> {
        let content = settings.to_toml()?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, content).map_err(|e| {
            ConfigError::SaveFailed {
                path: self.path.clone(),
                message: e.to_string(),
            }
            .into()
        })
    }
}

/// In-memory backend. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    slot: Arc<Mutex<Option<AppSettings>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(settings: AppSettings) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(settings))),
        }
    }

    /// Last persisted snapshot.
    pub fn stored(&self) -> Option<AppSettings> {
        self.slot
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl SettingsBackend for MemoryBackend {
    fn load(&self) -> Result<Option<AppSettings>> {
        Ok(self.stored())
    }

    fn save(&self, settings: &AppSettings) -> Result<()> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(settings.clone());
        Ok(())
    }
}

/// Live settings snapshot backed by a persistence backend.
#[derive(Debug)]
pub struct SettingsStore<B: SettingsBackend> {
    backend: B,
    current: AppSettings,
}

impl<B: SettingsBackend> SettingsStore<B> {
    /// Load from the backend. Missing or unreadable settings yield defaults;
    /// startup never fails.
    pub fn open(backend: B) -> Self {
        let current = match backend.load() {
            Ok(Some(settings)) => settings.sanitized(),
            Ok(None) => {
                tracing::debug!("no persisted settings, using defaults");
                AppSettings::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "persisted settings unreadable, using defaults");
                AppSettings::default()
            }
        };
        Self { backend, current }
    }

    pub fn get(&self) -> &AppSettings {
        &self.current
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Apply a patch, persist, and return the new snapshot.
    pub fn merge(&mut self, patch: SettingsPatch) -> &AppSettings {
        let next = self.current.merged(patch);
        self.replace(next)
    }

    /// Set one field by dot-separated key, persist, and return the new snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    /// The live snapshot is unchanged in that case.
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<&AppSettings> {
        let next = self.current.with_field(key, value)?;
        Ok(self.replace(next))
    }

    /// Replace the whole snapshot and persist it.
    pub fn replace(&mut self, settings: AppSettings) -> &AppSettings {
        self.current = settings.sanitized();
        self.persist();
        &self.current
    }

    fn persist(&self) {
        if let Err(e) = self.backend.save(&self.current) {
            tracing::warn!(error = %e, "failed to persist settings");
        }
    }
}
