//! Basic example of routing typed events from a publisher to subscribers.
//!
//! This example demonstrates the simplest usage pattern of the events_fanout
//! package: declaring events and a manager, binding one subscriber and one
//! publisher, and dispatching notifications through the manager.

use std::cell::Cell;

use events_fanout::{
    Event, Fallback, Handle, Publisher, Subscription, event_manager, publishes, subscribes,
};

/// Raised when a sensor produces a new reading.
struct Reading;
impl Event for Reading {
    type Args = (u32, String);
}

/// Raised when a sensor finishes calibration.
struct Calibrated;
impl Event for Calibrated {
    type Args = (String,);
}

event_manager! {
    /// One channel per telemetry event.
    struct Telemetry {
        readings: Reading,
        calibrations: Calibrated,
    }
}

#[derive(Default)]
struct Recorder {
    readings_seen: Cell<usize>,
}

impl Fallback for Recorder {
    fn unhandled<E: Event>(&self, _args: &E::Args) {}
}

impl Handle<Reading> for Recorder {
    fn handle(&self, (value, unit): &(u32, String)) {
        println!("Recorded reading: {value} {unit}");
        self.readings_seen.set(self.readings_seen.get().wrapping_add(1));
    }
}

impl Handle<Calibrated> for Recorder {
    fn handle(&self, (sensor,): &(String,)) {
        println!("Recorded calibration of {sensor}");
    }
}

subscribes!(Recorder: Reading, Calibrated);

struct Probe;
publishes!(Probe: Reading, Calibrated);

fn main() {
    println!("=== Fanout Basic Example ===");

    let hub = Telemetry::new();

    // Binding registers the recorder with both declared channels.
    let recorder = Subscription::bind(&hub, Recorder::default());

    let probe = Publisher::<_, Probe>::bind_by_ref(&hub);

    println!("Dispatching notifications through the manager...");
    probe.dispatch::<Reading>((21, "celsius".to_string()));
    probe.dispatch::<Reading>((22, "celsius".to_string()));
    probe.dispatch::<Calibrated>(("probe-1".to_string(),));

    println!("Readings seen: {}", recorder.readings_seen.get());
    println!("Example completed successfully!");
}
