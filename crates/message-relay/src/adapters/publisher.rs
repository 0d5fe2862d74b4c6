//! Event Publisher Adapters
//!
//! Implementations of the `EventPublisher` port: a broadcast channel for
//! the off-core relayer network, a no-op for deployments without
//! observers, and a recorder for tests.

use parking_lot::Mutex;
use tokio::sync::broadcast;
use tracing::trace;

use crate::domain::RelayEvent;
use crate::ports::outbound::EventPublisher;

/// Publishes events onto a tokio broadcast channel.
///
/// Relayers subscribe and watch for `OutgoingMessagePosted` and kill-state
/// transitions. Lagging subscribers miss events rather than blocking the
/// relay.
pub struct BroadcastPublisher {
    sender: broadcast::Sender<RelayEvent>,
}

impl BroadcastPublisher {
    /// Create a publisher with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to the event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<RelayEvent> {
        self.sender.subscribe()
    }
}

impl EventPublisher for BroadcastPublisher {
    fn publish(&self, event: RelayEvent) {
        trace!(?event, "publishing relay event");
        // A send error only means there are no subscribers right now.
        let _ = self.sender.send(event);
    }
}

/// Publisher that drops every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpPublisher;

impl EventPublisher for NoOpPublisher {
    fn publish(&self, _event: RelayEvent) {}
}

/// Publisher that records every event, for assertions in tests.
#[derive(Default)]
pub struct RecordingPublisher {
    /// Events in publication order.
    pub events: Mutex<Vec<RelayEvent>>,
}

impl RecordingPublisher {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events.
    pub fn snapshot(&self) -> Vec<RelayEvent> {
        self.events.lock().clone()
    }
}

impl EventPublisher for RecordingPublisher {
    fn publish(&self, event: RelayEvent) {
        self.events.lock().push(event);
    }
}
