use std::sync::{Arc, RwLock};

use log::debug;
use uuid::Uuid;

use super::{EventCache, EventLog, EventLogError};
use crate::event::Event;

/// Event log kept entirely in memory.
///
/// Cloning creates another handle to the same storage.
#[derive(Clone, Default)]
pub struct InMemoryEventLog {
    storage: Arc<RwLock<EventCache>>,
}

impl InMemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log pre-filled with the given events.
    pub fn with_events(events: impl IntoIterator<Item = Event>) -> Self {
        InMemoryEventLog {
            storage: Arc::new(RwLock::new(EventCache::from_events(events))),
        }
    }

    pub fn len(&self) -> Result<usize, EventLogError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| EventLogError::LockPoisoned("read"))?;
        Ok(storage.len())
    }

    pub fn is_empty(&self) -> Result<bool, EventLogError> {
        Ok(self.len()? == 0)
    }
}

impl EventLog for InMemoryEventLog {
    fn append(&self, event: Event) -> Result<(), EventLogError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| EventLogError::LockPoisoned("write"))?;
        debug!(
            "event=append module=log store=memory type={} entity={}",
            event.event_type(),
            event.entity_id
        );
        storage.insert(event);
        Ok(())
    }

    fn entity_ids(&self) -> Result<Vec<Uuid>, EventLogError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| EventLogError::LockPoisoned("read"))?;
        Ok(storage.ids())
    }

    fn events(&self, id: &Uuid) -> Result<Vec<Event>, EventLogError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| EventLogError::LockPoisoned("read"))?;
        Ok(storage.stream(id))
    }
}
