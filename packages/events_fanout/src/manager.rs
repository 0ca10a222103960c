//! Aggregation of per-event channels into a single addressable manager.

use crate::{Channel, Event};

/// Grants access to the [`Channel`] carrying one event identity.
///
/// A manager implements this trait once per event in its declared set, which
/// is how publishers and subscribers reach the right channel without naming
/// manager fields: the event type parameter does the addressing. Anything
/// that implements `HasChannel<E>` for the right set of events can stand in
/// for a manager, so hand-written aggregates work as binding targets too.
pub trait HasChannel<E: Event> {
    /// Returns the channel that carries notifications for `E`.
    fn channel(&self) -> &Channel<E>;
}

/// Declares a manager struct that aggregates one [`Channel`] per event in a
/// fixed set of event identities.
///
/// The declaration reads like a plain struct whose field types are event
/// identities; the expansion replaces each field type with the corresponding
/// `Channel<E>` and implements [`HasChannel<E>`] per field, along with an
/// argument-less `new()` and [`Default`]. The event set is fixed at compile
/// time for the manager's lifetime, and declaring the same event twice in
/// one manager fails to compile with conflicting `HasChannel` impls.
///
/// A manager is purely an aggregation point - it has no operations of its
/// own beyond handing out channels.
///
/// # Example
///
/// ```rust
/// use events_fanout::{Event, HasChannel, event_manager};
///
/// struct Opened;
/// impl Event for Opened {
///     type Args = (u64, String);
/// }
///
/// struct Closed;
/// impl Event for Closed {
///     type Args = (u64,);
/// }
///
/// event_manager! {
///     /// Channels for ledger lifecycle notifications.
///     pub struct LedgerEvents {
///         opened: Opened,
///         closed: Closed,
///     }
/// }
///
/// let manager = LedgerEvents::new();
/// assert_eq!(HasChannel::<Opened>::channel(&manager).subscriber_count(), 0);
/// ```
#[macro_export]
macro_rules! event_manager {
    (
        $(#[$attr:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$field_attr:meta])* $field:ident : $event:ty ),+ $(,)?
        }
    ) => {
        $(#[$attr])*
        #[derive(Debug)]
        $vis struct $name {
            $( $(#[$field_attr])* $field: $crate::Channel<$event>, )+
        }

        impl $name {
            /// Creates a manager with one empty channel per declared event.
            #[must_use]
            $vis const fn new() -> Self {
                Self {
                    $( $field: $crate::Channel::new(), )+
                }
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        $(
            impl $crate::HasChannel<$event> for $name {
                #[inline]
                fn channel(&self) -> &$crate::Channel<$event> {
                    &self.$field
                }
            }
        )+
    };
}
