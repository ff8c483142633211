//! # Event bus for broadcasting lifecycle events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`]: the group and
//! the adapters publish from many tasks, subscribers receive clones of each
//! event.
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks or fails; events with
//!   no active receiver are dropped.
//! - **Bounded capacity**: a single ring buffer holds the most recent events.
//! - **Lag handling**: a slow receiver observes `RecvError::Lagged(n)` and
//!   skips the `n` oldest items.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for lifecycle events.
///
/// Cheap to clone (the sender is `Arc`-backed); every clone publishes into
/// the same ring buffer.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (clamped to ≥ 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Event>(capacity);
        Self { tx }
    }

    /// Publishes an event to all active subscribers.
    ///
    /// Returns immediately; if nobody is subscribed the event is dropped.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates an independent receiver observing events sent from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn test_subscriber_sees_published_events() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();

        bus.publish(Event::now(EventKind::ShutdownTriggered));
        bus.publish(Event::now(EventKind::GroupFinished).with_error("boom"));

        assert_eq!(rx.recv().await.unwrap().kind, EventKind::ShutdownTriggered);
        let ev = rx.recv().await.unwrap();
        assert_eq!(ev.kind, EventKind::GroupFinished);
        assert_eq!(ev.error.as_deref(), Some("boom"));
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_a_noop() {
        let bus = Bus::new(1);
        bus.publish(Event::now(EventKind::ActorFinished));
    }
}
