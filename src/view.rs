use std::cell::RefCell;
use std::collections::HashMap;

use log::trace;

use crate::Resolver;

/// A lazy key-value view over a resolver.
///
/// Reading a key with no stored value invokes the resolver; with
/// memoization enabled (the default) the result is stored and the resolver
/// is never invoked again for that key. Stored values, whether resolved or
/// inserted, shadow the resolver in both modes.
///
/// Single-threaded; see [`SyncView`](crate::SyncView) for the mutex-backed
/// flavor.
pub struct View<R: Resolver> {
    resolver: RefCell<R>,
    resolved: RefCell<HashMap<String, R::Output>>,
    memoize: bool,
}

impl<R: Resolver> View<R> {
    /// A memoizing view: each key resolves at most once.
    pub fn new(resolver: R) -> Self {
        Self::with_memoize(resolver, true)
    }

    /// A non-memoizing view: every read resolves afresh.
    pub fn uncached(resolver: R) -> Self {
        Self::with_memoize(resolver, false)
    }

    pub fn with_memoize(resolver: R, memoize: bool) -> Self {
        View {
            resolver: RefCell::new(resolver),
            resolved: RefCell::new(HashMap::new()),
            memoize,
        }
    }

    /// Reads `key`, resolving it on a store miss.
    ///
    /// The resolver must not read back from the view it backs; the
    /// reentrant borrow panics.
    pub fn get(&self, key: &str) -> R::Output
    where
        R::Output: Clone,
    {
        if let Some(value) = self.resolved.borrow().get(key) {
            return value.clone();
        }

        trace!("resolving key {key:?}");
        let value = self.resolver.borrow_mut().resolve(key);

        if self.memoize {
            self.resolved
                .borrow_mut()
                .insert(key.to_owned(), value.clone());
        }

        value
    }

    /// Stores `value` under `key`, overriding any previous resolution.
    pub fn insert(&self, key: impl Into<String>, value: R::Output) {
        self.resolved.borrow_mut().insert(key.into(), value);
    }

    /// Keys with a stored value, resolved or inserted.
    pub fn keys(&self) -> Vec<String> {
        self.resolved.borrow().keys().cloned().collect()
    }

    pub fn is_resolved(&self, key: &str) -> bool {
        self.resolved.borrow().contains_key(key)
    }
}
