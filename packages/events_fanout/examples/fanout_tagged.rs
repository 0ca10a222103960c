//! Demonstrates ready-made event identities built with `Tagged`.
//!
//! Instead of implementing `Event` by hand, a type alias over `Tagged`
//! associates a compile-time tag value with an argument list. Identical
//! argument lists stay distinguishable through the tag. Zero-argument
//! events are shown too.

use std::cell::Cell;

use events_fanout::{
    Event, Fallback, Handle, Publisher, Subscription, Tagged, event_manager, publishes, subscribes,
};

type CacheHit = Tagged<1, (String,)>;
type CacheMiss = Tagged<2, (String,)>;
type CacheFlushed = Tagged<3, ()>;

event_manager! {
    /// Channels for cache activity.
    struct CacheEvents {
        hits: CacheHit,
        misses: CacheMiss,
        flushes: CacheFlushed,
    }
}

#[derive(Default)]
struct HitRatio {
    hits: Cell<u64>,
    misses: Cell<u64>,
}

impl Fallback for HitRatio {
    fn unhandled<E: Event>(&self, _args: &E::Args) {}
}

impl Handle<CacheHit> for HitRatio {
    fn handle(&self, (_key,): &(String,)) {
        self.hits.set(self.hits.get().wrapping_add(1));
    }
}

impl Handle<CacheMiss> for HitRatio {
    fn handle(&self, (_key,): &(String,)) {
        self.misses.set(self.misses.get().wrapping_add(1));
    }
}

impl Handle<CacheFlushed> for HitRatio {
    fn handle(&self, (): &()) {
        self.hits.set(0);
        self.misses.set(0);
    }
}

subscribes!(HitRatio: CacheHit, CacheMiss, CacheFlushed);

struct Cache;
publishes!(Cache: CacheHit, CacheMiss, CacheFlushed);

fn main() {
    println!("=== Fanout Tagged Example ===");

    let events = CacheEvents::new();
    let ratio = Subscription::bind(&events, HitRatio::default());
    let cache = Publisher::<_, Cache>::bind_by_ref(&events);

    cache.dispatch::<CacheHit>(("user:42".to_string(),));
    cache.dispatch::<CacheHit>(("user:42".to_string(),));
    cache.dispatch::<CacheMiss>(("user:7".to_string(),));

    println!(
        "Hits: {}, misses: {}",
        ratio.hits.get(),
        ratio.misses.get()
    );

    cache.dispatch::<CacheFlushed>(());
    println!(
        "After flush - hits: {}, misses: {}",
        ratio.hits.get(),
        ratio.misses.get()
    );
    println!("Example completed successfully!");
}
