//! Publisher facades and the mechanisms that bind them to a manager.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;
use std::rc::Rc;

use crate::{Event, HasChannel, Sealed};

/// Enables a publisher to reference the manager it was bound to.
///
/// This is a sealed trait and exists for internal use only. You never need
/// to use it.
#[expect(private_bounds, reason = "intentional - sealed trait")]
pub trait ManagerRef: Deref<Target = Self::Manager> + Sealed {
    /// The manager type this reference leads to.
    type Manager;
}

/// A manager referenced via `&` shared reference.
///
/// Only used in type names. Instances are created internally by
/// [`Publisher::bind_by_ref`].
#[derive(Debug)]
pub struct RefManager<'m, M> {
    manager: &'m M,
}

impl<M> Sealed for RefManager<'_, M> {}
impl<M> ManagerRef for RefManager<'_, M> {
    type Manager = M;
}
impl<M> Deref for RefManager<'_, M> {
    type Target = M;

    fn deref(&self) -> &Self::Target {
        self.manager
    }
}
impl<M> Clone for RefManager<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<M> Copy for RefManager<'_, M> {}

/// A manager referenced via `Rc` shared reference.
///
/// Only used in type names. Instances are created internally by
/// [`Publisher::bind_by_rc`].
#[derive(Debug)]
pub struct RcManager<M> {
    manager: Rc<M>,
}

impl<M> Sealed for RcManager<M> {}
impl<M> ManagerRef for RcManager<M> {
    type Manager = M;
}
impl<M> Deref for RcManager<M> {
    type Target = M;

    fn deref(&self) -> &Self::Target {
        &self.manager
    }
}
impl<M> Clone for RcManager<M> {
    fn clone(&self) -> Self {
        Self {
            manager: Rc::clone(&self.manager),
        }
    }
}

/// Declares that the publisher declaration `Self` raises event `E`.
///
/// Implementations are generated by [`publishes!`][crate::publishes]; one
/// impl exists per event in the declared set. [`Publisher::dispatch`]
/// requires this marker, so raising an event outside the declared set fails
/// to compile:
///
/// ```compile_fail
/// use events_fanout::{Event, Publisher, event_manager, publishes};
///
/// struct Deposited;
/// impl Event for Deposited {
///     type Args = (u64,);
/// }
///
/// struct Withdrawn;
/// impl Event for Withdrawn {
///     type Args = (u64,);
/// }
///
/// event_manager! {
///     struct AccountEvents {
///         deposits: Deposited,
///         withdrawals: Withdrawn,
///     }
/// }
///
/// struct DepositFeed;
/// publishes!(DepositFeed: Deposited);
///
/// let manager = AccountEvents::new();
/// let feed = Publisher::<_, DepositFeed>::bind_by_ref(&manager);
///
/// // The manager carries a `Withdrawn` channel, but this publisher
/// // never declared the event - rejected at compile time.
/// feed.dispatch::<Withdrawn>((40,));
/// ```
pub trait Publishes<E: Event> {}

/// Declares that every event in `Self`'s declared set has a channel in `M`.
///
/// Implementations are generated by [`publishes!`][crate::publishes] as a
/// single blanket impl over all managers carrying the full declared set.
/// [`Publisher::bind_by_ref`] and [`Publisher::bind_by_rc`] require this, so
/// an incompatible manager is rejected at construction rather than at the
/// first dispatch:
///
/// ```compile_fail
/// use events_fanout::{Event, Publisher, event_manager, publishes};
///
/// struct Deposited;
/// impl Event for Deposited {
///     type Args = (u64,);
/// }
///
/// struct Withdrawn;
/// impl Event for Withdrawn {
///     type Args = (u64,);
/// }
///
/// event_manager! {
///     struct DepositOnly {
///         deposits: Deposited,
///     }
/// }
///
/// struct Cashier;
/// publishes!(Cashier: Deposited, Withdrawn);
///
/// let manager = DepositOnly::new();
///
/// // The manager has no `Withdrawn` channel - rejected at binding.
/// let cashier = Publisher::<_, Cashier>::bind_by_ref(&manager);
/// ```
pub trait Binds<M> {}

/// Declares the fixed set of events a publisher declaration type may raise.
///
/// The first argument names a type of your own (the publisher declaration -
/// any type works, a unit struct is typical); the rest is the event set. The
/// expansion emits one [`Publishes<E>`] marker impl per event plus the
/// [`Binds<M>`] impl tying the whole set to compatible managers.
///
/// # Example
///
/// ```rust
/// use events_fanout::{Event, Publisher, event_manager, publishes};
///
/// struct Deposited;
/// impl Event for Deposited {
///     type Args = (u64,);
/// }
///
/// event_manager! {
///     struct AccountEvents {
///         deposits: Deposited,
///     }
/// }
///
/// struct Cashier;
/// publishes!(Cashier: Deposited);
///
/// let manager = AccountEvents::new();
/// let cashier = Publisher::<_, Cashier>::bind_by_ref(&manager);
/// cashier.dispatch::<Deposited>((100,));
/// ```
#[macro_export]
macro_rules! publishes {
    ($publisher:ty : $($event:ty),+ $(,)?) => {
        $(
            impl $crate::Publishes<$event> for $publisher {}
        )+

        impl<__Manager> $crate::Binds<__Manager> for $publisher
        where
            $( __Manager: $crate::HasChannel<$event>, )+
        {
        }
    };
}

/// Raises events through the manager it was bound to at construction.
///
/// A publisher is a thin facade: it stores nothing but the manager binding
/// and a phantom declaration type `P` naming the set of events it may raise
/// (see [`publishes!`][crate::publishes]). The binding is established once
/// at construction and never rebound. [`dispatch`][Self::dispatch] routes
/// purely on the event type parameter; there is no runtime branching.
///
/// Two binding mechanisms are available:
///
/// - [`bind_by_ref`][Self::bind_by_ref] borrows the manager, so the borrow
///   checker enforces that the manager outlives the publisher;
/// - [`bind_by_rc`][Self::bind_by_rc] shares ownership of the manager for
///   contexts where a borrow is too restrictive.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
///
/// use events_fanout::{
///     Event, Fallback, Handle, Publisher, Subscription, event_manager, publishes, subscribes,
/// };
///
/// struct Deposited;
/// impl Event for Deposited {
///     type Args = (u64,);
/// }
///
/// event_manager! {
///     struct AccountEvents {
///         deposits: Deposited,
///     }
/// }
///
/// #[derive(Default)]
/// struct Teller {
///     received: Cell<u64>,
/// }
///
/// impl Fallback for Teller {
///     fn unhandled<E: Event>(&self, _args: &E::Args) {}
/// }
///
/// impl Handle<Deposited> for Teller {
///     fn handle(&self, (amount,): &(u64,)) {
///         self.received.set(self.received.get() + amount);
///     }
/// }
///
/// subscribes!(Teller: Deposited);
///
/// struct Cashier;
/// publishes!(Cashier: Deposited);
///
/// let manager = AccountEvents::new();
/// let teller = Subscription::bind(&manager, Teller::default());
/// let cashier = Publisher::<_, Cashier>::bind_by_ref(&manager);
///
/// cashier.dispatch::<Deposited>((100,));
/// cashier.dispatch::<Deposited>((250,));
///
/// assert_eq!(teller.received.get(), 350);
/// ```
pub struct Publisher<R, P>
where
    R: ManagerRef,
{
    manager: R,
    _declared: PhantomData<P>,
}

impl<'m, M, P> Publisher<RefManager<'m, M>, P>
where
    P: Binds<M>,
{
    /// Binds a publisher to `manager` by shared reference.
    ///
    /// The manager must carry a channel for every event in the publisher's
    /// declared set; anything less fails to compile here rather than at the
    /// first dispatch.
    #[must_use]
    #[inline]
    pub fn bind_by_ref(manager: &'m M) -> Self {
        Self {
            manager: RefManager { manager },
            _declared: PhantomData,
        }
    }
}

impl<M, P> Publisher<RcManager<M>, P>
where
    P: Binds<M>,
{
    /// Binds a publisher to `manager` by `Rc`, sharing ownership.
    ///
    /// Use this when the publisher must not be tied to a borrow, e.g. when
    /// it is stored in a `'static` context alongside the manager.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::rc::Rc;
    ///
    /// use events_fanout::{Event, Publisher, event_manager, publishes};
    ///
    /// struct Deposited;
    /// impl Event for Deposited {
    ///     type Args = (u64,);
    /// }
    ///
    /// event_manager! {
    ///     struct AccountEvents {
    ///         deposits: Deposited,
    ///     }
    /// }
    ///
    /// struct Cashier;
    /// publishes!(Cashier: Deposited);
    ///
    /// let manager = Rc::new(AccountEvents::new());
    /// let cashier = Publisher::<_, Cashier>::bind_by_rc(&manager);
    /// drop(manager); // The publisher keeps the manager alive.
    ///
    /// cashier.dispatch::<Deposited>((100,));
    /// ```
    #[must_use]
    #[inline]
    pub fn bind_by_rc(manager: &Rc<M>) -> Self {
        Self {
            manager: RcManager {
                manager: Rc::clone(manager),
            },
            _declared: PhantomData,
        }
    }
}

impl<R, P> Publisher<R, P>
where
    R: ManagerRef,
{
    /// Routes one notification for `E` to the bound manager's channel,
    /// synchronously triggering every subscriber registered there, on the
    /// calling thread.
    ///
    /// `E` must be in the publisher's declared set and the bound manager
    /// must carry a channel for it; both are compile-time requirements.
    /// Panics raised by a subscriber propagate to the caller (see
    /// [`Channel::notify`][crate::Channel::notify]).
    #[inline]
    pub fn dispatch<E>(&self, args: E::Args)
    where
        E: Event,
        P: Publishes<E>,
        R::Manager: HasChannel<E>,
    {
        <R::Manager as HasChannel<E>>::channel(&self.manager).notify(args);
    }
}

impl<R, P> Clone for Publisher<R, P>
where
    R: ManagerRef + Clone,
{
    fn clone(&self) -> Self {
        Self {
            manager: self.manager.clone(),
            _declared: PhantomData,
        }
    }
}

impl<R, P> Copy for Publisher<R, P> where R: ManagerRef + Copy {}

impl<R, P> fmt::Debug for Publisher<R, P>
where
    R: ManagerRef,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Publisher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use static_assertions::assert_not_impl_any;

    use super::*;
    use crate::{Fallback, Handle, Subscription, event_manager};

    struct Deposited;
    impl Event for Deposited {
        type Args = (u64,);
    }

    struct Withdrawn;
    impl Event for Withdrawn {
        type Args = (u64,);
    }

    event_manager! {
        struct AccountEvents {
            deposits: Deposited,
            withdrawals: Withdrawn,
        }
    }

    #[derive(Default)]
    struct Teller {
        deposited: Cell<usize>,
        withdrawn: Cell<usize>,
    }

    impl Fallback for Teller {
        fn unhandled<E: Event>(&self, _args: &E::Args) {}
    }

    impl Handle<Deposited> for Teller {
        fn handle(&self, _args: &(u64,)) {
            self.deposited.set(self.deposited.get().wrapping_add(1));
        }
    }

    impl Handle<Withdrawn> for Teller {
        fn handle(&self, _args: &(u64,)) {
            self.withdrawn.set(self.withdrawn.get().wrapping_add(1));
        }
    }

    crate::subscribes!(Teller: Deposited, Withdrawn);

    struct Cashier;
    publishes!(Cashier: Deposited, Withdrawn);

    struct DepositFeed;
    publishes!(DepositFeed: Deposited);

    #[test]
    fn dispatch_routes_on_the_event_type() {
        let manager = AccountEvents::new();
        let teller = Subscription::bind(&manager, Teller::default());
        let cashier = Publisher::<_, Cashier>::bind_by_ref(&manager);

        cashier.dispatch::<Deposited>((100,));

        assert_eq!(teller.deposited.get(), 1);
        assert_eq!(teller.withdrawn.get(), 0);

        cashier.dispatch::<Withdrawn>((40,));

        assert_eq!(teller.deposited.get(), 1);
        assert_eq!(teller.withdrawn.get(), 1);
    }

    #[test]
    fn publisher_with_partial_declaration_reaches_shared_channels() {
        let manager = AccountEvents::new();
        let teller = Subscription::bind(&manager, Teller::default());

        let cashier = Publisher::<_, Cashier>::bind_by_ref(&manager);
        let feed = Publisher::<_, DepositFeed>::bind_by_ref(&manager);

        cashier.dispatch::<Deposited>((100,));
        feed.dispatch::<Deposited>((100,));

        assert_eq!(teller.deposited.get(), 2);
    }

    #[test]
    fn rc_binding_keeps_the_manager_alive() {
        let manager = Rc::new(AccountEvents::new());
        let teller = Subscription::bind(&*manager, Teller::default());
        let cashier = Publisher::<_, Cashier>::bind_by_rc(&manager);

        drop(manager);
        cashier.dispatch::<Deposited>((100,));

        assert_eq!(teller.deposited.get(), 1);
    }

    #[test]
    fn by_ref_publishers_are_copyable() {
        let manager = AccountEvents::new();
        let teller = Subscription::bind(&manager, Teller::default());

        let cashier = Publisher::<_, Cashier>::bind_by_ref(&manager);
        let copied = cashier;

        cashier.dispatch::<Deposited>((100,));
        copied.dispatch::<Deposited>((100,));

        assert_eq!(teller.deposited.get(), 2);
    }

    #[test]
    fn rc_publishers_are_cloneable() {
        let manager = Rc::new(AccountEvents::new());
        let teller = Subscription::bind(&*manager, Teller::default());

        let cashier = Publisher::<_, Cashier>::bind_by_rc(&manager);
        let cloned = cashier.clone();

        cashier.dispatch::<Deposited>((100,));
        cloned.dispatch::<Deposited>((100,));

        assert_eq!(teller.deposited.get(), 2);
    }

    #[test]
    fn debug_output_is_well_formed() {
        let manager = AccountEvents::new();
        let cashier = Publisher::<_, Cashier>::bind_by_ref(&manager);

        assert!(format!("{cashier:?}").contains("Publisher"));
    }

    #[test]
    fn single_threaded_type() {
        assert_not_impl_any!(
            Publisher<RefManager<'static, AccountEvents>, Cashier>: Send, Sync
        );
    }
}
