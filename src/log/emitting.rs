use std::sync::Mutex;

use event_emitter_rs::EventEmitter;
use uuid::Uuid;

use super::{EventLog, EventLogError};
use crate::event::{Event, EventRecord};

/// Decorates an [`EventLog`] so that listeners hear about every appended event.
///
/// Listeners are keyed by event type (e.g. `"WorkingPhaseFinished"`) and
/// receive the appended [`EventRecord`]. They run on the emitter's own
/// threads, never on the appending thread.
///
/// ## Example
///
/// ```ignore
/// use mflow::{EmittingEventLog, InMemoryEventLog, EventRecord};
///
/// let log = EmittingEventLog::new(InMemoryEventLog::new());
/// log.on("WorkingPhaseFinished", |record: EventRecord| {
///     println!("phase finished for {}", record.entity_id);
/// })?;
/// ```
pub struct EmittingEventLog<L> {
    inner: L,
    emitter: Mutex<EventEmitter>,
}

impl<L: EventLog> EmittingEventLog<L> {
    pub fn new(inner: L) -> Self {
        EmittingEventLog {
            inner,
            emitter: Mutex::new(EventEmitter::new()),
        }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }

    /// Register a listener for an event type. Returns the listener id.
    pub fn on<F>(&self, event_type: &str, listener: F) -> Result<String, EventLogError>
    where
        F: Fn(EventRecord) + Send + Sync + 'static,
    {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| EventLogError::LockPoisoned("emitter"))?;
        Ok(emitter.on(event_type, listener))
    }

    /// Remove a listener previously returned by [`on`](Self::on).
    pub fn remove_listener(&self, listener_id: &str) -> Result<bool, EventLogError> {
        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| EventLogError::LockPoisoned("emitter"))?;
        Ok(emitter.remove_listener(listener_id).is_some())
    }
}

impl<L: EventLog> EventLog for EmittingEventLog<L> {
    fn append(&self, event: Event) -> Result<(), EventLogError> {
        let record = event.to_record();
        self.inner.append(event)?;

        let mut emitter = self
            .emitter
            .lock()
            .map_err(|_| EventLogError::LockPoisoned("emitter"))?;
        let event_type = record.event_type.clone();
        emitter.emit(&event_type, record);
        Ok(())
    }

    fn entity_ids(&self) -> Result<Vec<Uuid>, EventLogError> {
        self.inner.entity_ids()
    }

    fn events(&self, id: &Uuid) -> Result<Vec<Event>, EventLogError> {
        self.inner.events(id)
    }
}
