//! Registry persistence backends.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;
use vasari_core::MediaDirectoryDescriptor;
use vasari_error::{RegistryError, RegistryErrorKind, VasariResult};

/// The registry state as persisted between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryState {
    /// Whether user-added directories currently contribute media
    pub custom_directories_enabled: bool,
    /// All registered descriptors, defaults first
    pub directories: Vec<MediaDirectoryDescriptor>,
}

impl Default for RegistryState {
    fn default() -> Self {
        Self {
            custom_directories_enabled: true,
            directories: Vec::new(),
        }
    }
}

/// Key-value style persistence for the serialized registry state.
///
/// Read once at startup, written on every mutation.
pub trait DirectoryStore: Send + Sync {
    /// Load the persisted state, or `None` on first run.
    fn load(&self) -> VasariResult<Option<RegistryState>>;

    /// Persist the given state, replacing whatever was stored.
    fn save(&self, state: &RegistryState) -> VasariResult<()>;
}

/// JSON file persistence with atomic writes (temp file + rename).
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store writing to the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DirectoryStore for JsonFileStore {
    fn load(&self) -> VasariResult<Option<RegistryState>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(RegistryError::new(RegistryErrorKind::Persistence(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
                .into());
            }
        };

        let state = serde_json::from_str(&contents).map_err(|e| {
            RegistryError::new(RegistryErrorKind::Persistence(format!(
                "{}: {}",
                self.path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %self.path.display(), "Loaded registry state");
        Ok(Some(state))
    }

    fn save(&self, state: &RegistryState) -> VasariResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                RegistryError::new(RegistryErrorKind::Persistence(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let json = serde_json::to_string_pretty(state).map_err(|e| {
            RegistryError::new(RegistryErrorKind::Persistence(e.to_string()))
        })?;

        // Write to temp file first, then rename for atomicity
        let temp_path = self.path.with_extension("tmp");
        std::fs::write(&temp_path, json).map_err(|e| {
            RegistryError::new(RegistryErrorKind::Persistence(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| {
            RegistryError::new(RegistryErrorKind::Persistence(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            )))
        })?;

        tracing::debug!(
            path = %self.path.display(),
            directories = state.directories.len(),
            "Saved registry state"
        );
        Ok(())
    }
}

/// In-memory persistence for tests and ephemeral sessions.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<Option<RegistryState>>,
}

impl InMemoryStore {
    /// Create an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DirectoryStore for InMemoryStore {
    fn load(&self) -> VasariResult<Option<RegistryState>> {
        Ok(self.state.lock().expect("store lock poisoned").clone())
    }

    fn save(&self, state: &RegistryState) -> VasariResult<()> {
        *self.state.lock().expect("store lock poisoned") = Some(state.clone());
        Ok(())
    }
}
