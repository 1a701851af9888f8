//! Process-wide publish/subscribe bus.

use tokio::sync::broadcast;

use crate::events::types::Event;

/// Default number of events buffered per subscriber before the slowest one lags.
pub const DEFAULT_CAPACITY: usize = 1024;

/// Typed event bus.
///
/// Cloning yields another handle to the same channel. Events published while
/// nobody is subscribed are dropped.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a bus buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Subscribe to every event published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: Event) {
        let name = event.name().to_string();
        match self.tx.send(event) {
            Ok(receivers) => tracing::debug!(event = %name, receivers, "Event published"),
            Err(_) => tracing::trace!(event = %name, "Event published with no subscribers"),
        }
    }

    /// Number of live subscribers.
    pub fn receiver_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
