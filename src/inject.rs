use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::view::View;
use crate::Resolver;

/// A callable that an [`Injector`] invokes with the shared view prepended
/// to its arguments.
///
/// Implemented for closures taking the view plus up to six trailing
/// arguments; the trailing arguments travel through [`Injector::call`] as
/// a tuple and reach the body positionally, in order.
pub trait Body<R: Resolver, Args> {
    type Output;

    fn apply(&mut self, view: &View<R>, args: Args) -> Self::Output;
}

macro_rules! impl_body {
    ($($arg:ident),*) => {
        impl<Rsv, Fun, Out $(, $arg)*> Body<Rsv, ($($arg,)*)> for Fun
        where
            Rsv: Resolver,
            Fun: FnMut(&View<Rsv> $(, $arg)*) -> Out,
        {
            type Output = Out;

            #[allow(non_snake_case)]
            fn apply(&mut self, view: &View<Rsv>, ($($arg,)*): ($($arg,)*)) -> Out {
                self(view $(, $arg)*)
            }
        }
    };
}

impl_body!();
impl_body!(A1);
impl_body!(A1, A2);
impl_body!(A1, A2, A3);
impl_body!(A1, A2, A3, A4);
impl_body!(A1, A2, A3, A4, A5);
impl_body!(A1, A2, A3, A4, A5, A6);

/// Wraps `resolver` and `body` into an [`Injector`].
pub fn wrap<R, B, Args>(resolver: R, body: B) -> Injector<R, B, Args>
where
    R: Resolver,
    B: Body<R, Args>,
{
    Injector::new(resolver, body)
}

/// A callable built over a body and one shared memoizing [`View`].
///
/// Every [`call`](Injector::call) invokes the body with the same view, so
/// resolutions memoized during one call are visible to the next.
pub struct Injector<R: Resolver, B, Args> {
    view: Rc<View<R>>,
    body: RefCell<B>,
    _args: PhantomData<fn(Args)>,
}

impl<R, B, Args> Injector<R, B, Args>
where
    R: Resolver,
    B: Body<R, Args>,
{
    pub fn new(resolver: R, body: B) -> Self {
        Self::from_view(Rc::new(View::new(resolver)), body)
    }

    pub(crate) fn from_view(view: Rc<View<R>>, body: B) -> Self {
        Injector {
            view,
            body: RefCell::new(body),
            _args: PhantomData,
        }
    }

    /// Invokes the body as `body(view, args...)` and returns its result.
    pub fn call(&self, args: Args) -> B::Output {
        self.body.borrow_mut().apply(&self.view, args)
    }
}
