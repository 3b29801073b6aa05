//! Durable key-value storage for the settings blob.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::foundation::error::{RayburstError, RayburstResult};
use crate::settings::{PersistedSettings, SETTINGS_KEY};

/// Environment variable overriding the default store directory.
pub const STORE_DIR_ENV: &str = "RAYBURST_STORE_DIR";

/// A string store addressed by fixed keys.
pub trait SettingsStore {
    /// Blob stored under `key`, if any.
    fn load(&self, key: &str) -> RayburstResult<Option<String>>;

    /// Replace the blob stored under `key`.
    fn save(&mut self, key: &str, blob: &str) -> RayburstResult<()>;
}

impl<S: SettingsStore + ?Sized> SettingsStore for &mut S {
    fn load(&self, key: &str) -> RayburstResult<Option<String>> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, blob: &str) -> RayburstResult<()> {
        (**self).save(key, blob)
    }
}

/// Keeps every key in its own `<key>.json` file inside one directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`. The directory is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store at `$RAYBURST_STORE_DIR`, falling back to `<config dir>/rayburst`.
    pub fn from_env() -> RayburstResult<Self> {
        if let Some(dir) = std::env::var_os(STORE_DIR_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::new(dir));
        }
        default_store_dir().map(Self::new)
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> RayburstResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(RayburstError::store(format!("invalid store key \"{key}\"")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl SettingsStore for FileStore {
    fn load(&self, key: &str) -> RayburstResult<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RayburstError::store(format!(
                "failed to read '{}': {e}",
                path.display()
            ))),
        }
    }

    fn save(&mut self, key: &str, blob: &str) -> RayburstResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            RayburstError::store(format!(
                "failed to create store dir '{}': {e}",
                self.dir.display()
            ))
        })?;

        // Readers only ever see a complete blob.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, blob).map_err(|e| {
            RayburstError::store(format!("failed to write '{}': {e}", tmp.display()))
        })?;
        std::fs::rename(&tmp, &path).map_err(|e| {
            RayburstError::store(format!("failed to replace '{}': {e}", path.display()))
        })
    }
}

/// In-memory store, mostly for tests and embedding.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self, key: &str) -> RayburstResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &str) -> RayburstResult<()> {
        self.entries.insert(key.to_owned(), blob.to_owned());
        Ok(())
    }
}

/// `<platform config dir>/rayburst`.
pub fn default_store_dir() -> RayburstResult<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join("rayburst"))
        .ok_or_else(|| RayburstError::store("no config directory available on this platform"))
}

/// Load settings, falling back to defaults when nothing usable is stored.
///
/// A missing blob, an unreadable store, a corrupt blob and an unknown version all yield
/// [`PersistedSettings::default`]; only the last three are logged.
pub fn load_settings(store: &impl SettingsStore) -> PersistedSettings {
    let blob = match store.load(SETTINGS_KEY) {
        Ok(Some(blob)) => blob,
        Ok(None) => {
            tracing::debug!("no stored settings, using defaults");
            return PersistedSettings::default();
        }
        Err(e) => {
            tracing::warn!("failed to load settings, using defaults: {e}");
            return PersistedSettings::default();
        }
    };

    match PersistedSettings::from_json(&blob) {
        Ok(s) => {
            tracing::info!(file_name = %s.file_name, "loaded stored settings");
            s
        }
        Err(e) => {
            tracing::warn!("ignoring stored settings: {e}");
            PersistedSettings::default()
        }
    }
}

/// Serialize and store `settings` under [`SETTINGS_KEY`].
pub fn save_settings(
    store: &mut impl SettingsStore,
    settings: &PersistedSettings,
) -> RayburstResult<()> {
    let blob = settings.to_json()?;
    store.save(SETTINGS_KEY, &blob)?;
    tracing::debug!(bytes = blob.len(), "saved settings");
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/store.rs"]
mod tests;
