//! Media index provider for the Vasari media engine.
//!
//! The [`MediaIndex`] trait stands in for the platform media store: it
//! lists currently indexed assets, clears the store-level file cache, and
//! toggles change notifications. [`FsMediaIndex`] is the bundled
//! filesystem-backed provider, walking the directories the
//! [`DirectoryRegistry`](vasari_registry::DirectoryRegistry) currently
//! allows and serving listings from a short-lived snapshot.

#![warn(missing_docs)]

mod asset;
mod fs;
mod index;

pub use asset::{AssetDescriptor, SearchParams, to_reference_maps};
pub use fs::FsMediaIndex;
pub use index::MediaIndex;
