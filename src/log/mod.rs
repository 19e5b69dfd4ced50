//! Append-only event log.
//!
//! The log is the only durable state of the application. Every read model is
//! rebuilt from it by folding an entity's stream (see [`crate::aggregate`]).

mod cache;
#[cfg(feature = "emitter")]
mod emitting;
mod error;
mod file;
mod in_memory;

use uuid::Uuid;

use crate::event::Event;

pub use cache::EventCache;
#[cfg(feature = "emitter")]
pub use emitting::EmittingEventLog;
pub use error::EventLogError;
pub use file::FileEventLog;
pub use in_memory::InMemoryEventLog;

/// Storage for immutable domain events, grouped by entity id.
///
/// Implementations never validate event semantics; that is the job of the
/// managers emitting the events.
pub trait EventLog: Send + Sync {
    /// Add an event to its entity's stream. The event is visible to every
    /// subsequent read once this returns `Ok`.
    fn append(&self, event: Event) -> Result<(), EventLogError>;

    /// Every entity id with at least one event, in unspecified order.
    fn entity_ids(&self) -> Result<Vec<Uuid>, EventLogError>;

    /// The entity's stream ordered by timestamp. Empty for unknown ids.
    fn events(&self, id: &Uuid) -> Result<Vec<Event>, EventLogError>;
}

impl<L: EventLog + ?Sized> EventLog for std::sync::Arc<L> {
    fn append(&self, event: Event) -> Result<(), EventLogError> {
        (**self).append(event)
    }

    fn entity_ids(&self) -> Result<Vec<Uuid>, EventLogError> {
        (**self).entity_ids()
    }

    fn events(&self, id: &Uuid) -> Result<Vec<Event>, EventLogError> {
        (**self).events(id)
    }
}
