//! Domain events emitted by ShareSync operations.
//!
//! Events are published on the [`EventBus`] and consumed by whatever
//! listeners the host process attaches (log forwarders, notifications).
//! Publishing never affects the control flow of the publisher.

pub mod bus;
pub mod share;
pub mod system;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use bus::EventBus;
pub use share::ShareEvent;
pub use system::SystemEvent;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A share-related event.
    Share(ShareEvent),
    /// A system-level event.
    System(SystemEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            payload,
        }
    }
}

impl From<ShareEvent> for DomainEvent {
    fn from(event: ShareEvent) -> Self {
        Self::new(EventPayload::Share(event))
    }
}

impl From<SystemEvent> for DomainEvent {
    fn from(event: SystemEvent) -> Self {
        Self::new(EventPayload::System(event))
    }
}
