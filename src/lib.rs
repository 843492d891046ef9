//! Lazy, memoizing key-value views over resolver functions.
//!
//! A [`Resolver`] maps a string key to a value. A [`View`] wraps one into a
//! mapping whose entries are resolved on first read and, by default,
//! memoized for the life of the view. [`wrap`] pairs a resolver with a body
//! function, yielding an [`Injector`] that prepends the shared view to the
//! body's arguments on every call. [`injector`] adds a weak construction
//! cache so repeated wrapping of one [`Shared`] resolver reuses one view.
//!
//! ```
//! use lazy_inject::{wrap, View};
//!
//! let view = View::new(|key: &str| key.len());
//! assert_eq!(3, view.get("abc"));
//!
//! let greet = wrap(
//!     |key: &str| key.to_uppercase(),
//!     |view: &View<_>, punct: &str| format!("{}{punct}", view.get("hey")),
//! );
//! assert_eq!("HEY!", greet.call(("!",)));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

pub mod inject;
pub mod registry;
pub mod sync;
pub mod view;

pub use inject::{wrap, Body, Injector};
pub use registry::{injector, Inject};
pub use sync::SyncView;
pub use view::View;

/// Maps a key name to a value, invoked on demand by a view.
///
/// Any `FnMut(&str) -> V` closure or `fn` item is a resolver.
pub trait Resolver {
    type Output;

    fn resolve(&mut self, key: &str) -> Self::Output;
}

impl<V, F: FnMut(&str) -> V> Resolver for F {
    type Output = V;

    fn resolve(&mut self, key: &str) -> V {
        self(key)
    }
}

/// A resolver with shared state and a stable identity.
///
/// Clones resolve through one underlying resolver; the identity is what
/// [`injector`] keys its construction cache on.
pub struct Shared<R: Resolver>(Rc<RefCell<R>>);

impl<R: Resolver> Shared<R> {
    pub fn new(resolver: R) -> Self {
        Shared(Rc::new(RefCell::new(resolver)))
    }

    pub(crate) fn key(&self) -> usize {
        Rc::as_ptr(&self.0) as usize
    }
}

impl<R: Resolver> Clone for Shared<R> {
    fn clone(&self) -> Self {
        Shared(Rc::clone(&self.0))
    }
}

impl<R: Resolver> Resolver for Shared<R> {
    type Output = R::Output;

    fn resolve(&mut self, key: &str) -> Self::Output {
        self.0.borrow_mut().resolve(key)
    }
}
