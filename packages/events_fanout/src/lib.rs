//! Zero-overhead publish/subscribe primitives with compile-time typed events.
//!
//! This crate lets independent components exchange typed notifications
//! without knowing about each other: a publisher raises events through a
//! shared event manager, and every subscriber registered with that manager
//! is invoked synchronously, on the calling thread, in registration order.
//! Which events exist, which argument types they carry, and which
//! participants may raise or receive which events is all settled at build
//! time - there is no runtime type lookup, no heap-allocated event objects,
//! and no serialization.
//!
//! # Key types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Event`] | Associates an event identity with its ordered argument tuple |
//! | [`Tagged`] | Ready-made identity from a compile-time tag plus argument list |
//! | [`Channel`] | Subscriber registry and fan-out for one event identity |
//! | [`event_manager!`] | Declares a manager aggregating one channel per event |
//! | [`Publisher`] | Raises declared events through a bound manager |
//! | [`publishes!`] | Declares the event set a publisher may raise |
//! | [`Subscription`] | Handle to a subscriber registered with a manager |
//! | [`subscribes!`] | Declares the event set a subscriber receives |
//! | [`Handle`] | Per-event handler slot on a concrete subscriber |
//! | [`Fallback`] | Generic catch-all for events without a dedicated handler |
//!
//! # Quick start
//!
//! ```rust
//! use std::cell::Cell;
//!
//! use events_fanout::{
//!     Event, Fallback, Handle, Publisher, Subscription, event_manager, publishes, subscribes,
//! };
//!
//! // Each event identity is a distinct type; the associated tuple is the
//! // ordered argument list delivered with every notification.
//! struct Reading;
//! impl Event for Reading {
//!     type Args = (u32, String);
//! }
//!
//! struct Calibrated;
//! impl Event for Calibrated {
//!     type Args = (String, String);
//! }
//!
//! event_manager! {
//!     /// One channel per declared event.
//!     struct Telemetry {
//!         readings: Reading,
//!         calibrations: Calibrated,
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Recorder {
//!     readings_seen: Cell<usize>,
//!     other_seen: Cell<usize>,
//! }
//!
//! impl Fallback for Recorder {
//!     fn unhandled<E: Event>(&self, _args: &E::Args) {
//!         self.other_seen.set(self.other_seen.get() + 1);
//!     }
//! }
//!
//! impl Handle<Reading> for Recorder {
//!     fn handle(&self, (value, unit): &(u32, String)) {
//!         assert_eq!(*value, 21);
//!         assert_eq!(*unit, "celsius");
//!         self.readings_seen.set(self.readings_seen.get() + 1);
//!     }
//! }
//!
//! // No override: calibration notifications take the generic path.
//! impl Handle<Calibrated> for Recorder {}
//!
//! subscribes!(Recorder: Reading, Calibrated);
//!
//! struct Probe;
//! publishes!(Probe: Reading, Calibrated);
//!
//! let hub = Telemetry::new();
//! let recorder = Subscription::bind(&hub, Recorder::default());
//! let probe = Publisher::<_, Probe>::bind_by_ref(&hub);
//!
//! probe.dispatch::<Reading>((21, "celsius".to_string()));
//! probe.dispatch::<Calibrated>(("probe-1".to_string(), "factory".to_string()));
//!
//! assert_eq!(recorder.readings_seen.get(), 1);
//! assert_eq!(recorder.other_seen.get(), 1);
//! ```
//!
//! # Declared event sets
//!
//! Publishers and subscribers each name a fixed set of events up front, via
//! [`publishes!`] and [`subscribes!`]. Those sets are enforced at compile
//! time: dispatching an event a publisher did not declare, feeding a
//! subscriber an event it did not declare, binding to a manager that lacks a
//! declared channel, or declaring an event with no handler and no catch-all
//! all surface as unsatisfied trait bounds, never as runtime failures. The
//! library defines no runtime errors at all - every operation that compiles
//! is infallible, and the only failure that can surface during delivery is a
//! panic raised by a subscriber's own handler, which propagates to the
//! dispatching caller.
//!
//! # Lifecycle
//!
//! Binding a subscriber registers it with every declared channel as a side
//! effect of construction, and there is no unsubscription: channels share
//! ownership of their subscribers, so a registered subscriber keeps
//! receiving notifications for as long as its manager lives, even if the
//! [`Subscription`] handle is dropped. Publishers hold their manager either
//! by borrow (the manager must outlive them, enforced by the borrow
//! checker) or by `Rc` (the publisher keeps the manager alive).
//!
//! # Thread safety
//!
//! Everything here is single-threaded: the notification path is built from
//! `Rc` and `RefCell`, so none of the types can leave the thread they were
//! created on. To publish across threads, confine each manager to one
//! thread and bridge between threads with your own channels.
//!
//! This is part of the [Folo project](https://github.com/folo-rs/folo) that
//! provides mechanisms for high-performance hardware-aware programming in
//! Rust.

mod channel;
mod event;
mod manager;
mod publisher;
mod subscriber;

pub use channel::{Channel, Sink};
pub use event::{Event, Tagged};
pub use manager::HasChannel;
pub use publisher::{Binds, ManagerRef, Publisher, Publishes, RcManager, RefManager};
pub use subscriber::{Attach, Consumes, Fallback, Handle, Subscription};

/// Marker for types that may implement our sealed traits.
pub(crate) trait Sealed {}
