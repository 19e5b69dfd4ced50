use std::collections::HashMap;

use uuid::Uuid;

use crate::event::Event;

/// In-memory index of event streams, keyed by entity id.
///
/// Every stream is kept ordered by timestamp; events with equal timestamps
/// keep their insertion order.
#[derive(Debug, Default, Clone)]
pub struct EventCache {
    streams: HashMap<Uuid, Vec<Event>>,
}

impl EventCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group events by entity and sort each group by timestamp.
    pub fn from_events(events: impl IntoIterator<Item = Event>) -> Self {
        let mut streams: HashMap<Uuid, Vec<Event>> = HashMap::new();
        for event in events {
            streams.entry(event.entity_id).or_default().push(event);
        }
        for stream in streams.values_mut() {
            stream.sort_by_key(|event| event.timestamp);
        }
        EventCache { streams }
    }

    pub fn insert(&mut self, event: Event) {
        let stream = self.streams.entry(event.entity_id).or_default();
        // After the last event that is not later than this one.
        let position = stream.partition_point(|existing| existing.timestamp <= event.timestamp);
        stream.insert(position, event);
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.streams.keys().copied().collect()
    }

    pub fn stream(&self, id: &Uuid) -> Vec<Event> {
        self.streams.get(id).cloned().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.streams.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}
