use std::collections::HashMap;
use std::sync::Mutex;

use log::trace;

use crate::Resolver;

/// The mutex-backed flavor of [`View`](crate::View).
///
/// Resolver and store are locked independently, so resolving one key does
/// not block hits on others. When two threads race to resolve the same key
/// the first stored value wins, the losing result is discarded, and every
/// racing reader observes the winner.
pub struct SyncView<R: Resolver> {
    resolver: Mutex<R>,
    resolved: Mutex<HashMap<String, R::Output>>,
    memoize: bool,
}

impl<R: Resolver> SyncView<R> {
    /// A memoizing view: each key resolves at most once, racing
    /// resolutions of one key excepted.
    pub fn new(resolver: R) -> Self {
        Self::with_memoize(resolver, true)
    }

    /// A non-memoizing view: every read resolves afresh.
    pub fn uncached(resolver: R) -> Self {
        Self::with_memoize(resolver, false)
    }

    pub fn with_memoize(resolver: R, memoize: bool) -> Self {
        SyncView {
            resolver: Mutex::new(resolver),
            resolved: Mutex::new(HashMap::new()),
            memoize,
        }
    }

    /// Reads `key`, resolving it on a store miss.
    pub fn get(&self, key: &str) -> R::Output
    where
        R::Output: Clone,
    {
        if let Some(value) = self.resolved.lock().unwrap().get(key) {
            return value.clone();
        }

        trace!("resolving key {key:?}");
        let value = self.resolver.lock().unwrap().resolve(key);

        if self.memoize {
            // First write wins: a racing resolution of the same key keeps
            // whichever value was stored first.
            return self
                .resolved
                .lock()
                .unwrap()
                .entry(key.to_owned())
                .or_insert(value)
                .clone();
        }

        value
    }

    /// Stores `value` under `key`, overriding any previous resolution.
    pub fn insert(&self, key: impl Into<String>, value: R::Output) {
        self.resolved.lock().unwrap().insert(key.into(), value);
    }

    /// Keys with a stored value, resolved or inserted.
    pub fn keys(&self) -> Vec<String> {
        self.resolved.lock().unwrap().keys().cloned().collect()
    }

    pub fn is_resolved(&self, key: &str) -> bool {
        self.resolved.lock().unwrap().contains_key(key)
    }
}
