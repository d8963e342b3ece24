//! Media index trait definition.

use crate::{AssetDescriptor, SearchParams};
use vasari_error::VasariResult;

/// Trait for media index providers.
///
/// Stands in for the platform media store. Implementations expose the
/// listing primitive the recovery strategies search through, plus the
/// store-level cache-clear and change-notification primitives consumed by
/// the invalidation governor.
#[async_trait::async_trait]
pub trait MediaIndex: Send + Sync {
    /// List currently indexed assets matching the parameters.
    async fn list_candidates(&self, params: &SearchParams) -> VasariResult<Vec<AssetDescriptor>>;

    /// Force a fresh snapshot of the indexed directories.
    ///
    /// Returns the number of assets discovered. Expensive; callers go
    /// through the invalidation governor rather than invoking this on
    /// every query.
    async fn rescan(&self) -> VasariResult<usize>;

    /// Drop the store-level file cache.
    async fn clear_file_cache(&self) -> VasariResult<()>;

    /// Toggle change notifications from the underlying store.
    async fn set_change_notifications(&self, enabled: bool) -> VasariResult<()>;
}
