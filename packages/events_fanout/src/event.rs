//! Event identities and their compile-time argument lists.

use std::fmt;
use std::marker::PhantomData;

/// An event identity, together with the ordered list of argument types that
/// every notification for this event carries.
///
/// An event identity is a distinct type used purely as a compile-time key.
/// It carries no runtime state and is never instantiated - channels, managers,
/// publishers and subscribers all refer to it only through type parameters.
/// Two identities with identical argument lists remain distinguishable
/// because they are distinct types.
///
/// The argument list is an ordered tuple. The empty tuple is valid - events
/// without arguments are a normal case. A single-argument event uses a
/// one-element tuple, so remember the trailing comma: `(u64,)`.
///
/// Attempting to use a type without an `Event` implementation as an event
/// fails to compile at the first use site with an unsatisfied trait bound.
///
/// # Example
///
/// ```rust
/// use events_fanout::Event;
///
/// /// Raised when a document is saved.
/// struct Saved;
///
/// impl Event for Saved {
///     type Args = (u64, String);
/// }
///
/// fn assert_event<E: Event>() {}
/// assert_event::<Saved>();
/// ```
pub trait Event: 'static {
    /// The ordered argument bundle delivered with each notification.
    type Args;
}

/// A ready-made event identity built from a compile-time tag value and an
/// argument list.
///
/// This is the shorthand alternative to implementing [`Event`] by hand: the
/// tag value keeps identities with identical argument lists distinct, so a
/// type alias per event is all that is needed. Enum discriminants work as
/// tags via a const expression, e.g. `Tagged<{ Kind::Saved as u64 }, (u64,)>`.
///
/// Only used in type names. Instances are never created.
///
/// # Example
///
/// ```rust
/// use events_fanout::{Event, Tagged};
///
/// type Saved = Tagged<1, (u64, String)>;
/// type Restored = Tagged<2, (u64, String)>;
///
/// // Same argument list, still two distinct identities.
/// fn assert_event<E: Event>() {}
/// assert_event::<Saved>();
/// assert_event::<Restored>();
/// ```
pub struct Tagged<const ID: u64, A> {
    _args: PhantomData<A>,
}

impl<const ID: u64, A: 'static> Event for Tagged<ID, A> {
    type Args = A;
}

impl<const ID: u64, A> fmt::Debug for Tagged<ID, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tagged<{ID}>")
    }
}

#[cfg(test)]
mod tests {
    use std::any::TypeId;

    use super::*;

    fn assert_event<E: Event>() {}

    #[test]
    fn explicit_impl_satisfies_trait() {
        struct Saved;
        impl Event for Saved {
            type Args = (u64, String);
        }

        assert_event::<Saved>();
    }

    #[test]
    fn zero_argument_events_are_valid() {
        struct Flushed;
        impl Event for Flushed {
            type Args = ();
        }

        assert_event::<Flushed>();
    }

    #[test]
    fn tagged_identities_stay_distinct() {
        // Identical argument lists, different tags - different types.
        assert_ne!(
            TypeId::of::<Tagged<1, (u64, String)>>(),
            TypeId::of::<Tagged<2, (u64, String)>>()
        );
    }

    #[test]
    fn tagged_identity_is_zero_sized() {
        assert_eq!(size_of::<Tagged<1, (u64, String)>>(), 0);
    }

    #[test]
    fn tagged_debug_shows_tag() {
        let tag = Tagged::<7, ()> { _args: PhantomData };
        assert_eq!(format!("{tag:?}"), "Tagged<7>");
    }
}
