//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use tactics_core::Notification;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Phase transitions
    Phase,
    /// Damage resolution
    Combat,
    /// Roster membership, positions and stats
    Roster,
}

impl Topic {
    pub const ALL: [Topic; 3] = [Topic::Phase, Topic::Combat, Topic::Roster];

    pub fn of(notification: &Notification) -> Self {
        match notification {
            Notification::PhaseChanged { .. } => Topic::Phase,
            Notification::DamageApplied { .. } => Topic::Combat,
            Notification::CombatantSpawned { .. }
            | Notification::CombatantMoved { .. }
            | Notification::StatsChanged { .. }
            | Notification::CombatantRemoved { .. } => Topic::Roster,
        }
    }
}

/// A notification stamped with its position in the session's output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Monotonic across all topics; lets subscribers of several topics
    /// restore the output order.
    pub sequence: u64,
    pub notification: Notification,
}

impl Event {
    pub fn topic(&self) -> Topic {
        Topic::of(&self.notification)
    }
}

struct Channels {
    phase: broadcast::Sender<Event>,
    combat: broadcast::Sender<Event>,
    roster: broadcast::Sender<Event>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Phase => &self.phase,
            Topic::Combat => &self.combat,
            Topic::Roster => &self.roster,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                phase: broadcast::channel(capacity).0,
                combat: broadcast::channel(capacity).0,
                roster: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
