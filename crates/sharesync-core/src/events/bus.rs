//! In-process event bus.

use tokio::sync::broadcast;

use super::DomainEvent;

/// Fire-and-forget broadcast bus for [`DomainEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    /// Create a new bus that buffers up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish an event. Having no subscribers is not an error.
    pub fn publish(&self, event: impl Into<DomainEvent>) {
        let event = event.into();
        if self.tx.send(event).is_err() {
            tracing::trace!("No event subscribers attached");
        }
    }

    /// Subscribe to all events published after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{EventPayload, SystemEvent};

    #[tokio::test]
    async fn test_publish_without_subscribers() {
        let bus = EventBus::new(4);
        bus.publish(SystemEvent::WorkerStarted {
            worker: "share".to_string(),
        });
    }

    #[tokio::test]
    async fn test_subscriber_receives_event() {
        let bus = EventBus::new(4);
        let mut rx = bus.subscribe();
        bus.publish(SystemEvent::WorkerFailed {
            worker: "share".to_string(),
            message: "busy".to_string(),
        });

        let event = rx.recv().await.unwrap();
        match event.payload {
            EventPayload::System(SystemEvent::WorkerFailed { worker, message }) => {
                assert_eq!(worker, "share");
                assert_eq!(message, "busy");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
