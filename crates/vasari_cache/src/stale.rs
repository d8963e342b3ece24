//! Stale reference tracking.

use std::collections::HashSet;

/// Insertion-ordered set of reference URIs queued for cache purge.
///
/// A stale reference is one whose basic validation failed; purging it is
/// best-effort and asynchronous, so the set only queues work and never
/// touches the caches itself.
#[derive(Debug, Default)]
pub struct StaleReferenceSet {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl StaleReferenceSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a URI for purge. Returns false if it was already queued.
    pub fn insert(&mut self, uri: impl Into<String>) -> bool {
        let uri = uri.into();
        if !self.seen.insert(uri.clone()) {
            return false;
        }
        tracing::debug!(uri = %uri, queued = self.order.len() + 1, "Queued stale reference");
        self.order.push(uri);
        true
    }

    /// Whether a URI is queued.
    pub fn contains(&self, uri: &str) -> bool {
        self.seen.contains(uri)
    }

    /// Take all queued URIs in insertion order, emptying the set.
    pub fn drain(&mut self) -> Vec<String> {
        self.seen.clear();
        std::mem::take(&mut self.order)
    }

    /// Number of queued URIs.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
