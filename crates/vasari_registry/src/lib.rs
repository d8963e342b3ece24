//! Media source directory registry for the Vasari media engine.
//!
//! Tracks which on-device folders are eligible sources of media: platform
//! defaults seeded at first run plus user-added custom directories, each of
//! which can be enabled or disabled. Every mutation persists through a
//! [`DirectoryStore`] before it returns, so path-eligibility decisions are
//! never stale relative to the last completed mutation.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod defaults;
mod registry;
mod store;

pub use defaults::platform_default_descriptors;
pub use registry::DirectoryRegistry;
pub use store::{DirectoryStore, InMemoryStore, JsonFileStore, RegistryState};
