//! Subscriber facades: statically selected handlers behind a type-erased
//! registry entry.

use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::{Event, Sink};

/// The generic catch-all handler of a concrete subscriber.
///
/// Every subscriber type provides exactly one implementation of this trait.
/// It is invoked for any declared event whose [`Handle<E>`] impl does not
/// override [`handle`][Handle::handle]. Stable Rust rejects a generic
/// `Handle<E>` impl alongside per-event ones, so the catch-all lives here,
/// one supertrait hop away, and the `Handle` default method body bridges
/// the two.
///
/// A subscriber that handles all of its declared events explicitly still
/// implements this trait; a plain no-op body is fine.
pub trait Fallback {
    /// Handles a notification for an event without a dedicated handler.
    fn unhandled<E: Event>(&self, args: &E::Args);
}

/// The per-event handler slot of a concrete subscriber.
///
/// One impl exists per (subscriber, event) pair. Overriding
/// [`handle`][Self::handle] gives the event a dedicated, exactly-typed
/// handler; an empty impl keeps the default body, which routes the
/// notification into the subscriber's [`Fallback`]. Which of the two runs
/// is decided entirely at compile time.
///
/// Handlers take `&self`: subscribers are shared with the channels they
/// registered with, so mutable state lives in [`Cell`][std::cell::Cell] or
/// [`RefCell`][std::cell::RefCell] fields.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
///
/// use events_fanout::{Event, Fallback, Handle};
///
/// struct Saved;
/// impl Event for Saved {
///     type Args = (u64, String);
/// }
///
/// struct Discarded;
/// impl Event for Discarded {
///     type Args = (u64,);
/// }
///
/// #[derive(Default)]
/// struct Archivist {
///     saves: Cell<usize>,
///     other: Cell<usize>,
/// }
///
/// impl Fallback for Archivist {
///     fn unhandled<E: Event>(&self, _args: &E::Args) {
///         self.other.set(self.other.get() + 1);
///     }
/// }
///
/// // Dedicated handler: destructure the argument bundle in the pattern.
/// impl Handle<Saved> for Archivist {
///     fn handle(&self, (revision, path): &(u64, String)) {
///         println!("archiving {path} at revision {revision}");
///         self.saves.set(self.saves.get() + 1);
///     }
/// }
///
/// // No override: `Discarded` notifications take the generic path.
/// impl Handle<Discarded> for Archivist {}
/// ```
pub trait Handle<E: Event>: Fallback {
    /// Handles one notification for `E`.
    ///
    /// The default body forwards to [`Fallback::unhandled`].
    fn handle(&self, args: &E::Args) {
        self.unhandled::<E>(args);
    }
}

impl<E, S> Sink<E> for S
where
    E: Event,
    S: Handle<E>,
{
    #[inline]
    fn consume(&self, args: &E::Args) {
        Handle::<E>::handle(self, args);
    }
}

/// Declares that the subscriber type `Self` receives event `E`.
///
/// Implementations are generated by [`subscribes!`][crate::subscribes]; one
/// impl exists per event in the declared set. [`Subscription::consume`]
/// requires this marker, so feeding a subscriber an event outside its
/// declared set fails to compile:
///
/// ```compile_fail
/// use events_fanout::{Event, Fallback, Handle, Subscription, event_manager, subscribes};
///
/// struct Posted;
/// impl Event for Posted {
///     type Args = (i32,);
/// }
///
/// struct Archived;
/// impl Event for Archived {
///     type Args = (i32,);
/// }
///
/// event_manager! {
///     struct BoardEvents {
///         posts: Posted,
///         archives: Archived,
///     }
/// }
///
/// #[derive(Default)]
/// struct PostTracker;
///
/// impl Fallback for PostTracker {
///     fn unhandled<E: Event>(&self, _args: &E::Args) {}
/// }
///
/// impl Handle<Posted> for PostTracker {}
///
/// subscribes!(PostTracker: Posted);
///
/// let board = BoardEvents::new();
/// let tracker = Subscription::bind(&board, PostTracker::default());
///
/// // `Archived` is not in this subscriber's declared set.
/// tracker.consume::<Archived>((1,));
/// ```
pub trait Consumes<E: Event> {}

/// Wires a subscriber into every channel of its declared event set.
///
/// Implementations are generated by [`subscribes!`][crate::subscribes].
/// [`Subscription::bind`] calls [`attach`][Self::attach] exactly once, at
/// construction.
pub trait Attach<M>: Sized {
    /// Registers `subscriber` with the channel of every declared event, in
    /// declaration order.
    fn attach(manager: &M, subscriber: &Rc<Self>);
}

/// Declares the fixed set of events a subscriber type receives.
///
/// The expansion emits one [`Consumes<E>`] marker impl per event plus the
/// [`Attach<M>`] impl that registers the subscriber with every declared
/// channel. Each declared event needs a [`Handle<E>`] impl on the
/// subscriber type (possibly an empty one falling back to the type's
/// [`Fallback`]); a missing impl fails to compile at this declaration:
///
/// ```compile_fail
/// use events_fanout::{Event, subscribes};
///
/// struct Posted;
/// impl Event for Posted {
///     type Args = (i32,);
/// }
///
/// struct Deaf;
///
/// // `Deaf` neither handles `Posted` nor provides a catch-all.
/// subscribes!(Deaf: Posted);
/// ```
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
///
/// use events_fanout::{Event, Fallback, Handle, Subscription, event_manager, subscribes};
///
/// struct Saved;
/// impl Event for Saved {
///     type Args = (u64, String);
/// }
///
/// event_manager! {
///     struct DocumentEvents {
///         saves: Saved,
///     }
/// }
///
/// #[derive(Default)]
/// struct Archivist {
///     saves: Cell<usize>,
/// }
///
/// impl Fallback for Archivist {
///     fn unhandled<E: Event>(&self, _args: &E::Args) {}
/// }
///
/// impl Handle<Saved> for Archivist {
///     fn handle(&self, _args: &(u64, String)) {
///         self.saves.set(self.saves.get() + 1);
///     }
/// }
///
/// subscribes!(Archivist: Saved);
///
/// let manager = DocumentEvents::new();
/// let archivist = Subscription::bind(&manager, Archivist::default());
///
/// events_fanout::HasChannel::<Saved>::channel(&manager).notify((1, "notes.txt".to_string()));
/// assert_eq!(archivist.saves.get(), 1);
/// ```
#[macro_export]
macro_rules! subscribes {
    ($subscriber:ty : $($event:ty),+ $(,)?) => {
        $(
            impl $crate::Consumes<$event> for $subscriber {}
        )+

        impl<__Manager> $crate::Attach<__Manager> for $subscriber
        where
            $( __Manager: $crate::HasChannel<$event>, )+
        {
            fn attach(manager: &__Manager, subscriber: &::std::rc::Rc<Self>) {
                $(
                    <__Manager as $crate::HasChannel<$event>>::channel(manager)
                        .add_subscriber(
                            ::std::rc::Rc::clone(subscriber)
                                as ::std::rc::Rc<dyn $crate::Sink<$event>>,
                        );
                )+
            }
        }
    };
}

/// A handle to a subscriber registered with a manager.
///
/// Binding is single-shot: [`bind`][Self::bind] takes ownership of the
/// concrete subscriber and, as an observable side effect of construction,
/// registers it with the channel of every event it declares (see
/// [`subscribes!`][crate::subscribes]). Registration is never undone - the
/// channels share ownership of the subscriber, so it keeps receiving
/// notifications for as long as the manager lives, whether or not this
/// handle is kept.
///
/// The handle is the only way to reach the subscriber's state afterwards
/// (it dereferences to the concrete subscriber), which is why discarding it
/// immediately is flagged as likely misuse.
///
/// # Example
///
/// See [`subscribes!`][crate::subscribes] for the full declaration cycle,
/// and [`consume`][Self::consume] for driving a subscriber directly.
#[must_use = "registration is permanent, but this handle is the only access to the subscriber's state"]
pub struct Subscription<S> {
    subscriber: Rc<S>,
}

impl<S> Subscription<S> {
    /// Creates the subscriber's registration with every channel it declares
    /// on `manager`, returning the handle to its state.
    ///
    /// When the manager lives in an `Rc`, pass `&*manager`.
    #[inline]
    pub fn bind<M>(manager: &M, subscriber: S) -> Self
    where
        S: Attach<M>,
    {
        let subscriber = Rc::new(subscriber);
        S::attach(manager, &subscriber);

        Self { subscriber }
    }

    /// Routes one notification for `E` directly into the subscriber's
    /// handler, without going through a channel.
    ///
    /// This is the exactly-typed entry point for test and integration code
    /// that wants to drive a subscriber in isolation. `E` must be in the
    /// subscriber's declared set; the argument bundle must match the
    /// event's declared argument list. Both are compile-time requirements.
    ///
    /// # Example
    ///
    /// ```rust
    /// # use std::cell::Cell;
    /// # use events_fanout::{Event, Fallback, Handle, Subscription, event_manager, subscribes};
    /// # struct Saved;
    /// # impl Event for Saved {
    /// #     type Args = (u64, String);
    /// # }
    /// # event_manager! {
    /// #     struct DocumentEvents {
    /// #         saves: Saved,
    /// #     }
    /// # }
    /// # #[derive(Default)]
    /// # struct Archivist {
    /// #     saves: Cell<usize>,
    /// # }
    /// # impl Fallback for Archivist {
    /// #     fn unhandled<E: Event>(&self, _args: &E::Args) {}
    /// # }
    /// # impl Handle<Saved> for Archivist {
    /// #     fn handle(&self, _args: &(u64, String)) {
    /// #         self.saves.set(self.saves.get() + 1);
    /// #     }
    /// # }
    /// # subscribes!(Archivist: Saved);
    /// let manager = DocumentEvents::new();
    /// let archivist = Subscription::bind(&manager, Archivist::default());
    ///
    /// archivist.consume::<Saved>((1, "notes.txt".to_string()));
    /// assert_eq!(archivist.saves.get(), 1);
    /// ```
    #[allow(
        clippy::needless_pass_by_value,
        reason = "mirrors dispatch - the caller hands over one argument bundle"
    )]
    #[inline]
    pub fn consume<E>(&self, args: E::Args)
    where
        E: Event,
        S: Consumes<E> + Handle<E>,
    {
        <S as Sink<E>>::consume(&self.subscriber, &args);
    }
}

impl<S> Clone for Subscription<S> {
    fn clone(&self) -> Self {
        Self {
            subscriber: Rc::clone(&self.subscriber),
        }
    }
}

impl<S> Deref for Subscription<S> {
    type Target = S;

    fn deref(&self) -> &Self::Target {
        &self.subscriber
    }
}

impl<S> fmt::Debug for Subscription<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}
