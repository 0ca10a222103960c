//! Demonstrates the generic catch-all handler.
//!
//! A subscriber provides one `Fallback` implementation; any declared event
//! whose `Handle` impl does not override `handle` is routed there. This lets
//! a subscriber observe a whole event set without writing a dedicated
//! handler per event.

use std::cell::Cell;

use events_fanout::{
    Event, Fallback, Handle, Publisher, Subscription, event_manager, publishes, subscribes,
};

struct Started;
impl Event for Started {
    type Args = (String,);
}

struct Finished;
impl Event for Finished {
    type Args = (String, u64);
}

struct Failed;
impl Event for Failed {
    type Args = (String, String);
}

event_manager! {
    /// Channels for job lifecycle events.
    struct JobEvents {
        started: Started,
        finished: Finished,
        failed: Failed,
    }
}

/// Counts failures specifically; everything else lands in the catch-all.
#[derive(Default)]
struct Monitor {
    failures: Cell<usize>,
    other: Cell<usize>,
}

impl Fallback for Monitor {
    fn unhandled<E: Event>(&self, _args: &E::Args) {
        self.other.set(self.other.get().wrapping_add(1));
    }
}

impl Handle<Failed> for Monitor {
    fn handle(&self, (job, error): &(String, String)) {
        println!("Job {job} failed: {error}");
        self.failures.set(self.failures.get().wrapping_add(1));
    }
}

// No overrides: these take the generic path.
impl Handle<Started> for Monitor {}
impl Handle<Finished> for Monitor {}

subscribes!(Monitor: Started, Finished, Failed);

struct Runner;
publishes!(Runner: Started, Finished, Failed);

fn main() {
    println!("=== Fanout Fallback Example ===");

    let jobs = JobEvents::new();
    let monitor = Subscription::bind(&jobs, Monitor::default());
    let runner = Publisher::<_, Runner>::bind_by_ref(&jobs);

    runner.dispatch::<Started>(("index-rebuild".to_string(),));
    runner.dispatch::<Failed>(("index-rebuild".to_string(), "disk full".to_string()));
    runner.dispatch::<Started>(("cache-warmup".to_string(),));
    runner.dispatch::<Finished>(("cache-warmup".to_string(), 1250));

    println!("Dedicated handler saw {} failures", monitor.failures.get());
    println!("Catch-all saw {} other notifications", monitor.other.get());
    println!("Example completed successfully!");
}
