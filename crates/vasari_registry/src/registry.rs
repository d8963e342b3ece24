//! Directory registry implementation.

use crate::{DirectoryStore, RegistryState};
use std::path::Path;
use std::sync::RwLock;
use uuid::Uuid;
use vasari_core::MediaDirectoryDescriptor;
use vasari_error::{RegistryError, RegistryErrorKind, VasariResult};

/// Registry of on-device folders eligible as media sources.
///
/// Membership decisions ([`DirectoryRegistry::is_path_allowed`]) are
/// computed from current state on every call, so they are never stale
/// relative to the last completed mutation. Mutations are applied to a
/// copy, persisted through the store, and only then committed — a failed
/// save leaves the registry unchanged.
pub struct DirectoryRegistry {
    store: Box<dyn DirectoryStore>,
    defaults: Vec<MediaDirectoryDescriptor>,
    state: RwLock<RegistryState>,
}

impl DirectoryRegistry {
    /// Open the registry, seeding platform defaults on first run.
    ///
    /// # Errors
    ///
    /// Returns error if the store fails to load or the first-run seed
    /// fails to persist.
    pub fn new(
        store: Box<dyn DirectoryStore>,
        defaults: Vec<MediaDirectoryDescriptor>,
    ) -> VasariResult<Self> {
        let state = match store.load()? {
            Some(state) => {
                tracing::info!(
                    directories = state.directories.len(),
                    custom_enabled = state.custom_directories_enabled,
                    "Loaded directory registry"
                );
                state
            }
            None => {
                let state = RegistryState {
                    custom_directories_enabled: true,
                    directories: defaults.clone(),
                };
                store.save(&state)?;
                tracing::info!(
                    directories = state.directories.len(),
                    "Seeded directory registry from platform defaults"
                );
                state
            }
        };

        Ok(Self {
            store,
            defaults,
            state: RwLock::new(state),
        })
    }

    /// All registered descriptors, defaults first.
    pub fn directories(&self) -> Vec<MediaDirectoryDescriptor> {
        self.read_state().directories.clone()
    }

    /// Descriptors currently contributing media.
    ///
    /// A descriptor contributes when it is enabled and, for custom
    /// entries, when custom directories are enabled as a whole.
    pub fn enabled_directories(&self) -> Vec<MediaDirectoryDescriptor> {
        let state = self.read_state();
        state
            .directories
            .iter()
            .filter(|d| Self::is_eligible(d, state.custom_directories_enabled))
            .cloned()
            .collect()
    }

    /// Whether user-added directories currently contribute media.
    pub fn custom_directories_enabled(&self) -> bool {
        self.read_state().custom_directories_enabled
    }

    /// Whether a path lies under any currently eligible directory.
    ///
    /// When custom directories are disabled only platform-default
    /// descriptors are consulted, regardless of any previously enabled
    /// custom entry.
    pub fn is_path_allowed(&self, path: &Path) -> bool {
        let state = self.read_state();
        state
            .directories
            .iter()
            .filter(|d| Self::is_eligible(d, state.custom_directories_enabled))
            .any(|d| path.starts_with(&d.path))
    }

    /// Enable or disable a single descriptor.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryNotFound` if no descriptor has the given id.
    pub fn update_enabled(&self, id: Uuid, enabled: bool) -> VasariResult<()> {
        self.mutate(|state| {
            let descriptor = state
                .directories
                .iter_mut()
                .find(|d| d.id == id)
                .ok_or_else(|| {
                    RegistryError::new(RegistryErrorKind::DirectoryNotFound(id.to_string()))
                })?;
            descriptor.is_enabled = enabled;
            tracing::info!(id = %id, enabled, "Updated directory enablement");
            Ok(())
        })
    }

    /// Toggle whether custom directories contribute media at all.
    pub fn set_custom_directories_enabled(&self, enabled: bool) -> VasariResult<()> {
        self.mutate(|state| {
            state.custom_directories_enabled = enabled;
            tracing::info!(enabled, "Toggled custom directories");
            Ok(())
        })
    }

    /// Register a user-added directory.
    ///
    /// # Errors
    ///
    /// Returns `DirectoryNotFound` if the path does not exist on disk and
    /// `DuplicateDirectory` if a descriptor already has the same path.
    pub fn add(
        &self,
        display_name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> VasariResult<MediaDirectoryDescriptor> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(RegistryError::new(RegistryErrorKind::DirectoryNotFound(
                path.display().to_string(),
            ))
            .into());
        }

        let descriptor = MediaDirectoryDescriptor::custom(display_name, path);
        let added = descriptor.clone();
        self.mutate(move |state| {
            if state.directories.iter().any(|d| d.path == descriptor.path) {
                return Err(RegistryError::new(RegistryErrorKind::DuplicateDirectory(
                    descriptor.path.display().to_string(),
                ))
                .into());
            }
            tracing::info!(
                path = %descriptor.path.display(),
                name = %descriptor.display_name,
                "Added custom media directory"
            );
            state.directories.push(descriptor);
            Ok(())
        })?;

        Ok(added)
    }

    /// Remove a user-added directory.
    ///
    /// # Errors
    ///
    /// Returns `CannotRemoveDefault` for platform-default descriptors and
    /// `DirectoryNotFound` if no descriptor has the given id.
    pub fn remove(&self, id: Uuid) -> VasariResult<()> {
        self.mutate(|state| {
            let position = state
                .directories
                .iter()
                .position(|d| d.id == id)
                .ok_or_else(|| {
                    RegistryError::new(RegistryErrorKind::DirectoryNotFound(id.to_string()))
                })?;

            if state.directories[position].is_default {
                return Err(RegistryError::new(RegistryErrorKind::CannotRemoveDefault(
                    state.directories[position].display_name.clone(),
                ))
                .into());
            }

            let removed = state.directories.remove(position);
            tracing::info!(path = %removed.path.display(), "Removed custom media directory");
            Ok(())
        })
    }

    /// Restore the registry to its seeded platform defaults.
    ///
    /// Drops every custom descriptor, re-enables the defaults, and turns
    /// custom directories back on.
    pub fn reset_to_defaults(&self) -> VasariResult<()> {
        let defaults = self.defaults.clone();
        self.mutate(move |state| {
            state.custom_directories_enabled = true;
            state.directories = defaults;
            tracing::info!(
                directories = state.directories.len(),
                "Reset directory registry to defaults"
            );
            Ok(())
        })
    }

    fn is_eligible(descriptor: &MediaDirectoryDescriptor, custom_enabled: bool) -> bool {
        descriptor.is_enabled && (descriptor.is_default || custom_enabled)
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, RegistryState> {
        self.state.read().expect("registry lock poisoned")
    }

    /// Apply a mutation to a copy of the state, persist it, then commit.
    fn mutate<F>(&self, mutation: F) -> VasariResult<()>
    where
        F: FnOnce(&mut RegistryState) -> VasariResult<()>,
    {
        let mut state = self.state.write().expect("registry lock poisoned");
        let mut next = state.clone();
        mutation(&mut next)?;
        self.store.save(&next)?;
        *state = next;
        Ok(())
    }
}
