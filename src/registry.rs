use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use log::debug;

use crate::inject::{Body, Injector};
use crate::view::View;
use crate::{Resolver, Shared};

/// A handle on one shared memoizing view, from which injectors are bound.
///
/// Equality is view identity: two handles compare equal exactly when they
/// share the same view, and with it the same memoized resolutions.
pub struct Inject<R: Resolver> {
    view: Rc<View<R>>,
}

impl<R: Resolver> Inject<R> {
    fn over(view: Rc<View<R>>) -> Self {
        Inject { view }
    }

    /// Binds `body` to this handle's view; see [`Injector`].
    pub fn bind<B, Args>(&self, body: B) -> Injector<R, B, Args>
    where
        B: Body<R, Args>,
    {
        Injector::from_view(Rc::clone(&self.view), body)
    }
}

impl<R: Resolver> Clone for Inject<R> {
    fn clone(&self) -> Self {
        Inject {
            view: Rc::clone(&self.view),
        }
    }
}

impl<R: Resolver> PartialEq for Inject<R> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.view, &other.view)
    }
}

impl<R: Resolver> Eq for Inject<R> {}

thread_local! {
    static REGISTRY: RefCell<HashMap<usize, Weak<dyn Any>>> =
        RefCell::new(HashMap::new());
}

/// Builds, or reuses, the [`Inject`] handle for `resolver`.
///
/// With `no_cache` false the handle is kept in a thread-local registry
/// keyed by the resolver's identity: while any previously returned handle
/// or injector bound from it is alive, the identical `Inject` comes back,
/// so separately obtained injectors share one view and its resolutions.
/// The registry holds only weak references and never keeps a resolver or
/// its view alive; once every holder is dropped the association is
/// discarded and a later call builds a fresh view.
///
/// With `no_cache` true the handle is independent: its view is never
/// registered, never shared, and never returned to a later cached call.
pub fn injector<R>(resolver: &Shared<R>, no_cache: bool) -> Inject<Shared<R>>
where
    R: Resolver + 'static,
    R::Output: 'static,
{
    if no_cache {
        return Inject::over(Rc::new(View::new(resolver.clone())));
    }

    let key = resolver.key();

    REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();

        if let Some(view) = registry
            .get(&key)
            .and_then(Weak::upgrade)
            .and_then(|live| live.downcast::<View<Shared<R>>>().ok())
        {
            return Inject::over(view);
        }

        let view = Rc::new(View::new(resolver.clone()));
        let view_any: Rc<dyn Any> = view.clone();
        let weak: Weak<dyn Any> = Rc::downgrade(&view_any);
        registry.insert(key, weak);
        registry.retain(|_, entry| entry.strong_count() > 0);
        debug!("registered injector view for resolver @{key:#x}");

        Inject::over(view)
    })
}
