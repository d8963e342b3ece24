//! Ordered recovery pipeline.

use crate::strategy::{RecoveryStrategy, RecoveryTarget};
use std::time::Instant;
use vasari_core::{ValidationConfig, ValidationResult};
use vasari_error::ValidationErrorKind;

/// Drives the ordered strategy list over one broken reference.
///
/// The first strategy runs unconditionally; every later strategy runs
/// inside whatever remains of the configured recovery budget, racing a
/// timer whose loser's result is discarded. The pipeline short-circuits
/// on the first proposed candidate.
pub struct RecoveryEngine {
    strategies: Vec<Box<dyn RecoveryStrategy>>,
}

impl RecoveryEngine {
    /// Create a pipeline over an ordered strategy list.
    pub fn new(strategies: Vec<Box<dyn RecoveryStrategy>>) -> Self {
        Self { strategies }
    }

    /// Number of configured strategies.
    pub fn strategy_count(&self) -> usize {
        self.strategies.len()
    }

    /// Run the pipeline, returning the best available substitute or a
    /// definitive failure.
    #[tracing::instrument(skip(self, target, config), fields(uri = %target.original_uri))]
    pub async fn recover(
        &self,
        target: &RecoveryTarget,
        config: &ValidationConfig,
    ) -> ValidationResult {
        let started = Instant::now();
        let budget = config.max_recovery_time();
        let verbose = *config.verbose_logging();

        for (position, strategy) in self.strategies.iter().enumerate() {
            let method = strategy.method();
            if !strategy.is_enabled(config) {
                tracing::debug!(%method, "Strategy disabled by configuration, skipping");
                continue;
            }

            if verbose {
                tracing::info!(%method, position, "Attempting recovery strategy");
            } else {
                tracing::debug!(%method, position, "Attempting recovery strategy");
            }

            let attempt = if position == 0 {
                strategy.attempt(target, config).await
            } else {
                let Some(remaining) = budget.checked_sub(started.elapsed()) else {
                    return self.timeout_result(target, budget);
                };
                match tokio::time::timeout(remaining, strategy.attempt(target, config)).await {
                    Ok(attempt) => attempt,
                    Err(_) => {
                        tracing::warn!(%method, "Strategy timed out, abandoning pipeline");
                        return self.timeout_result(target, budget);
                    }
                }
            };

            match attempt {
                Ok(Some(candidate)) => {
                    if verbose {
                        tracing::info!(%method, recovered = %candidate.uri, "Recovery succeeded");
                    }
                    return ValidationResult::recovered(
                        target.original_uri.clone(),
                        candidate.uri,
                        method,
                        Some(candidate.metadata),
                    );
                }
                Ok(None) => continue,
                Err(e) => {
                    // One failing strategy never aborts the pipeline.
                    tracing::warn!(%method, error = %e, "Strategy failed, trying next");
                    continue;
                }
            }
        }

        let message = ValidationErrorKind::RecoveryExhausted(format!(
            "no strategy produced a substitute for {}",
            target.original_uri
        ))
        .to_string();
        tracing::debug!(uri = %target.original_uri, "Recovery exhausted");
        ValidationResult::invalid(target.original_uri.clone(), message)
    }

    fn timeout_result(
        &self,
        target: &RecoveryTarget,
        budget: std::time::Duration,
    ) -> ValidationResult {
        let message = ValidationErrorKind::RecoveryTimeout(format!(
            "recovery exceeded its {}ms budget for {}",
            budget.as_millis(),
            target.original_uri
        ))
        .to_string();
        ValidationResult::invalid(target.original_uri.clone(), message)
    }
}
