//! Per-event subscriber registries and synchronous fan-out.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::Event;

/// The type-erased entry point through which a [`Channel`] delivers one
/// event's notifications to a registered subscriber.
///
/// This trait is implemented automatically for every type that implements
/// [`Handle<E>`][crate::Handle] - implement that trait instead. The split
/// exists because `Handle` is not dyn-compatible (its
/// [`Fallback`][crate::Fallback] supertrait has a generic method), while
/// channels need a uniform `Rc<dyn Sink<E>>` entry per subscriber. Delivery
/// therefore goes through one dynamic call here and resolves statically from
/// that point on.
pub trait Sink<E: Event> {
    /// Routes one notification's argument bundle into the subscriber.
    fn consume(&self, args: &E::Args);
}

/// The subscriber registry and fan-out mechanism for exactly one event
/// identity.
///
/// A channel owns an insertion-ordered list of subscriber entry points.
/// Registration appends; notification walks the list in registration order,
/// synchronously, on the calling thread. There is no unsubscription - a
/// registered subscriber stays registered (and therefore alive, as the
/// channel shares ownership of it) for the channel's whole lifetime.
///
/// Channels are usually not created directly but as fields of a manager
/// declared with [`event_manager!`][crate::event_manager], which is what
/// publishers and subscribers bind against.
///
/// # Example
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// use events_fanout::{Channel, Event, Fallback, Handle};
///
/// struct Saved;
/// impl Event for Saved {
///     type Args = (u64, String);
/// }
///
/// #[derive(Default)]
/// struct SaveLog {
///     seen: Cell<usize>,
/// }
///
/// impl Fallback for SaveLog {
///     fn unhandled<E: Event>(&self, _args: &E::Args) {}
/// }
///
/// impl Handle<Saved> for SaveLog {
///     fn handle(&self, (revision, path): &(u64, String)) {
///         println!("saved {path} at revision {revision}");
///         self.seen.set(self.seen.get() + 1);
///     }
/// }
///
/// let channel = Channel::<Saved>::new();
/// let log = Rc::new(SaveLog::default());
///
/// channel.add_subscriber(Rc::clone(&log) as Rc<dyn events_fanout::Sink<Saved>>);
/// channel.notify((1, "notes.txt".to_string()));
///
/// assert_eq!(log.seen.get(), 1);
/// ```
pub struct Channel<E: Event> {
    subscribers: RefCell<Vec<Rc<dyn Sink<E>>>>,
}

impl<E: Event> Channel<E> {
    /// Creates a channel with no subscribers.
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Self {
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Appends a subscriber entry point to the channel.
    ///
    /// No de-duplication is performed; registering the same subscriber twice
    /// means it is invoked twice per notification. The subscriber becomes
    /// eligible for future notifications, not past ones.
    #[inline]
    pub fn add_subscriber(&self, subscriber: Rc<dyn Sink<E>>) {
        self.subscribers.borrow_mut().push(subscriber);
    }

    /// Constructs one argument bundle from `args` and delivers it to every
    /// registered subscriber, in registration order, synchronously, on the
    /// calling thread.
    ///
    /// Each subscriber currently registered is invoked exactly once per call.
    /// There is no result aggregation and no early termination: if a
    /// subscriber panics, the panic propagates to the caller and delivery to
    /// the remaining subscribers is abandoned.
    ///
    /// The subscriber list is not borrowed across subscriber calls, so a
    /// handler may itself dispatch on this channel or register further
    /// subscribers. Whether a subscriber added while a notification is in
    /// flight sees that notification is unspecified - do not rely on either
    /// outcome.
    #[allow(
        clippy::needless_pass_by_value,
        reason = "the caller hands over the argument bundle; one bundle is built and shared with every subscriber"
    )]
    pub fn notify(&self, args: E::Args) {
        let mut index = 0_usize;
        loop {
            // Re-borrow per iteration so subscriber code can touch the
            // channel without aborting on an outstanding borrow.
            let subscriber = {
                let subscribers = self.subscribers.borrow();
                match subscribers.get(index) {
                    Some(subscriber) => Rc::clone(subscriber),
                    None => break,
                }
            };

            subscriber.consume(&args);

            index = index.wrapping_add(1);
        }
    }

    /// Returns the number of currently registered subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl<E: Event> Default for Channel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> fmt::Debug for Channel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subscriber_count = self
            .subscribers
            .try_borrow()
            .map(|subscribers| subscribers.len())
            .unwrap_or_default();

        f.debug_struct("Channel")
            .field("subscriber_count", &subscriber_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use static_assertions::assert_not_impl_any;

    use super::*;
    use crate::{Fallback, Handle};

    struct Added;
    impl Event for Added {
        type Args = (i32, String);
    }

    struct Cleared;
    impl Event for Cleared {
        type Args = ();
    }

    #[derive(Default)]
    struct AddCounter {
        added: Cell<usize>,
    }

    impl Fallback for AddCounter {
        fn unhandled<E: Event>(&self, _args: &E::Args) {}
    }

    impl Handle<Added> for AddCounter {
        fn handle(&self, (amount, _label): &(i32, String)) {
            assert_eq!(*amount, 5);
            self.added.set(self.added.get().wrapping_add(1));
        }
    }

    #[derive(Default)]
    struct ClearCounter {
        cleared: Cell<usize>,
    }

    impl Fallback for ClearCounter {
        fn unhandled<E: Event>(&self, _args: &E::Args) {}
    }

    impl Handle<Cleared> for ClearCounter {
        fn handle(&self, (): &()) {
            self.cleared.set(self.cleared.get().wrapping_add(1));
        }
    }

    struct Exploder;

    impl Fallback for Exploder {
        fn unhandled<E: Event>(&self, _args: &E::Args) {}
    }

    impl Handle<Added> for Exploder {
        fn handle(&self, _args: &(i32, String)) {
            panic!("subscriber failure");
        }
    }

    #[test]
    fn new_channel_is_empty() {
        let channel = Channel::<Added>::new();
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn default_channel_is_empty() {
        let channel = Channel::<Added>::default();
        assert_eq!(channel.subscriber_count(), 0);
    }

    #[test]
    fn notify_without_subscribers_is_a_no_op() {
        let channel = Channel::<Added>::new();
        channel.notify((5, "ledger".to_string()));
    }

    #[test]
    fn notify_invokes_each_subscriber_once() {
        let channel = Channel::<Added>::new();
        let first = Rc::new(AddCounter::default());
        let second = Rc::new(AddCounter::default());

        channel.add_subscriber(Rc::clone(&first) as Rc<dyn Sink<Added>>);
        channel.add_subscriber(Rc::clone(&second) as Rc<dyn Sink<Added>>);
        assert_eq!(channel.subscriber_count(), 2);

        channel.notify((5, "ledger".to_string()));

        assert_eq!(first.added.get(), 1);
        assert_eq!(second.added.get(), 1);
    }

    #[test]
    fn duplicate_registration_means_duplicate_delivery() {
        let channel = Channel::<Added>::new();
        let counter = Rc::new(AddCounter::default());

        channel.add_subscriber(Rc::clone(&counter) as Rc<dyn Sink<Added>>);
        channel.add_subscriber(Rc::clone(&counter) as Rc<dyn Sink<Added>>);

        channel.notify((5, "ledger".to_string()));

        assert_eq!(counter.added.get(), 2);
    }

    #[test]
    fn late_subscriber_misses_past_notifications() {
        let channel = Channel::<Added>::new();
        let early = Rc::new(AddCounter::default());
        channel.add_subscriber(Rc::clone(&early) as Rc<dyn Sink<Added>>);

        channel.notify((5, "ledger".to_string()));

        let late = Rc::new(AddCounter::default());
        channel.add_subscriber(Rc::clone(&late) as Rc<dyn Sink<Added>>);

        channel.notify((5, "ledger".to_string()));

        assert_eq!(early.added.get(), 2);
        assert_eq!(late.added.get(), 1);
    }

    #[test]
    fn notification_order_matches_registration_order() {
        struct OrderProbe {
            label: &'static str,
            log: Rc<RefCell<Vec<&'static str>>>,
        }

        impl Fallback for OrderProbe {
            fn unhandled<E: Event>(&self, _args: &E::Args) {}
        }

        impl Handle<Added> for OrderProbe {
            fn handle(&self, _args: &(i32, String)) {
                self.log.borrow_mut().push(self.label);
            }
        }

        let log = Rc::new(RefCell::new(Vec::new()));
        let channel = Channel::<Added>::new();

        channel.add_subscriber(Rc::new(OrderProbe {
            label: "first",
            log: Rc::clone(&log),
        }));
        channel.add_subscriber(Rc::new(OrderProbe {
            label: "second",
            log: Rc::clone(&log),
        }));

        channel.notify((5, "ledger".to_string()));

        assert_eq!(*log.borrow(), ["first", "second"]);
    }

    #[test]
    fn zero_argument_notification_is_delivered() {
        let channel = Channel::<Cleared>::new();
        let counter = Rc::new(ClearCounter::default());

        channel.add_subscriber(Rc::clone(&counter) as Rc<dyn Sink<Cleared>>);
        channel.notify(());

        assert_eq!(counter.cleared.get(), 1);
    }

    #[test]
    fn panicking_subscriber_abandons_remaining_fanout() {
        let channel = Channel::<Added>::new();
        let before = Rc::new(AddCounter::default());
        let after = Rc::new(AddCounter::default());

        channel.add_subscriber(Rc::clone(&before) as Rc<dyn Sink<Added>>);
        channel.add_subscriber(Rc::new(Exploder));
        channel.add_subscriber(Rc::clone(&after) as Rc<dyn Sink<Added>>);

        let outcome = catch_unwind(AssertUnwindSafe(|| {
            channel.notify((5, "ledger".to_string()));
        }));

        assert!(outcome.is_err());
        assert_eq!(before.added.get(), 1);
        assert_eq!(after.added.get(), 0);
    }

    #[test]
    fn debug_output_reports_subscriber_count() {
        let channel = Channel::<Added>::new();
        channel.add_subscriber(Rc::new(AddCounter::default()));

        assert_eq!(
            format!("{channel:?}"),
            "Channel { subscriber_count: 1 }"
        );
    }

    #[test]
    fn single_threaded_type() {
        assert_not_impl_any!(Channel<Added>: Send, Sync);
    }
}
