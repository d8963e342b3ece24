//! Cache invalidation governor.
//!
//! Gates the expensive store-wide operations behind single-flight guards
//! and wall-clock rate limits. The underlying store's re-list is an
//! unbounded-latency operation; without this discipline every query would
//! serialize the whole app behind it.

use crate::config::GovernorConfig;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use vasari_cache::MediaCaches;
use vasari_error::{ConfigError, VasariResult};
use vasari_index::{MediaIndex, SearchParams};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// What a gated operation actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GovernorOutcome {
    /// The operation ran to completion
    #[display("ran")]
    Ran,
    /// Skipped: the same operation kind was already in flight
    #[display("skipped_in_flight")]
    SkippedInFlight,
    /// Skipped: the operation ran too recently
    #[display("skipped_rate_limited")]
    SkippedRateLimited,
}

impl GovernorOutcome {
    /// Whether the underlying work was performed.
    pub fn ran(&self) -> bool {
        matches!(self, GovernorOutcome::Ran)
    }
}

/// Serializes and throttles store-wide refresh operations.
///
/// Each operation kind carries exactly one single-flight guard
/// (`Mutex::try_lock`): a call arriving while the same kind is in flight
/// is a no-op. Smart invalidation and directory rescans are additionally
/// rate-limited by wall clock. The guards do not serialize unrelated
/// operations against each other.
pub struct InvalidationGovernor {
    index: Arc<dyn MediaIndex>,
    caches: Arc<MediaCaches>,
    config: GovernorConfig,
    smart_limiter: DirectRateLimiter,
    rescan_limiter: DirectRateLimiter,
    smart_guard: Mutex<()>,
    comprehensive_guard: Mutex<()>,
    rescan_guard: Mutex<()>,
}

impl InvalidationGovernor {
    /// Create a governor over the given index and caches.
    ///
    /// # Errors
    ///
    /// Returns error if a rate-limit interval in the configuration is
    /// zero.
    pub fn new(
        index: Arc<dyn MediaIndex>,
        caches: Arc<MediaCaches>,
        config: GovernorConfig,
    ) -> VasariResult<Self> {
        let smart_quota =
            Quota::with_period(Duration::from_secs(*config.smart_invalidation_interval_secs()))
                .ok_or_else(|| {
                    ConfigError::new("smart_invalidation_interval_secs must be nonzero")
                })?;
        let rescan_quota =
            Quota::with_period(Duration::from_secs(*config.directory_rescan_interval_secs()))
                .ok_or_else(|| ConfigError::new("directory_rescan_interval_secs must be nonzero"))?;

        Ok(Self {
            index,
            caches,
            config,
            smart_limiter: RateLimiter::direct(smart_quota),
            rescan_limiter: RateLimiter::direct(rescan_quota),
            smart_guard: Mutex::new(()),
            comprehensive_guard: Mutex::new(()),
            rescan_guard: Mutex::new(()),
        })
    }

    /// Smart invalidation: store cache clear plus a notification bounce.
    ///
    /// Clears the store-level file cache, toggles change notifications off
    /// and on around a short settle delay, and performs one lightweight
    /// re-list to force internal state rebuild. Single-flight and limited
    /// to once per configured interval.
    #[tracing::instrument(skip(self))]
    pub async fn smart_invalidate(&self) -> VasariResult<GovernorOutcome> {
        let Ok(_guard) = self.smart_guard.try_lock() else {
            tracing::debug!("Smart invalidation already in flight, skipping");
            return Ok(GovernorOutcome::SkippedInFlight);
        };
        if self.smart_limiter.check().is_err() {
            tracing::debug!("Smart invalidation rate limited, skipping");
            return Ok(GovernorOutcome::SkippedRateLimited);
        }

        tracing::info!("Running smart store invalidation");
        self.index.clear_file_cache().await?;
        self.index.set_change_notifications(false).await?;
        tokio::time::sleep(Duration::from_millis(*self.config.smart_settle_ms())).await;
        self.index.set_change_notifications(true).await?;

        let params = SearchParams {
            limit: Some(1),
            ..SearchParams::all()
        };
        self.index.list_candidates(&params).await?;

        Ok(GovernorOutcome::Ran)
    }

    /// Comprehensive refresh: the full reset used by recovery.
    ///
    /// Purges everything queued as stale, clears the store cache, resets
    /// change notifications with longer settle delays, re-lists with
    /// retry and backoff, and finally clears all internal caches.
    /// Single-flight; not wall-clock limited.
    #[tracing::instrument(skip(self))]
    pub async fn comprehensive_refresh(&self) -> VasariResult<GovernorOutcome> {
        let Ok(_guard) = self.comprehensive_guard.try_lock() else {
            tracing::debug!("Comprehensive refresh already in flight, skipping");
            return Ok(GovernorOutcome::SkippedInFlight);
        };

        tracing::info!("Running comprehensive store refresh");
        let purged = self.caches.purge_stale().await;
        if purged > 0 {
            tracing::debug!(purged, "Purged stale references before refresh");
        }

        self.index.clear_file_cache().await?;
        let settle = Duration::from_millis(*self.config.comprehensive_settle_ms());
        self.index.set_change_notifications(false).await?;
        tokio::time::sleep(settle).await;
        self.index.set_change_notifications(true).await?;
        tokio::time::sleep(settle).await;

        // The re-list is the step most likely to hit transient store
        // errors, so it retries with backoff.
        let retry_strategy = ExponentialBackoff::from_millis(200)
            .factor(2)
            .max_delay(Duration::from_secs(5))
            .map(jitter)
            .take(3);
        let discovered = Retry::spawn(retry_strategy, || async {
            self.index.rescan().await.map_err(|e| {
                tracing::warn!(error = %e, "Re-list failed, will retry");
                RetryError::Transient {
                    err: e,
                    retry_after: None,
                }
            })
        })
        .await?;

        self.caches.clear_all().await;
        tracing::info!(discovered, "Comprehensive refresh complete");
        Ok(GovernorOutcome::Ran)
    }

    /// Re-snapshot the index's directory listing.
    ///
    /// Single-flight and limited to once per configured interval.
    #[tracing::instrument(skip(self))]
    pub async fn rescan_directories(&self) -> VasariResult<GovernorOutcome> {
        let Ok(_guard) = self.rescan_guard.try_lock() else {
            tracing::debug!("Directory rescan already in flight, skipping");
            return Ok(GovernorOutcome::SkippedInFlight);
        };
        if self.rescan_limiter.check().is_err() {
            tracing::debug!("Directory rescan rate limited, skipping");
            return Ok(GovernorOutcome::SkippedRateLimited);
        }

        let discovered = self.index.rescan().await?;
        tracing::info!(discovered, "Directory rescan complete");
        Ok(GovernorOutcome::Ran)
    }
}
