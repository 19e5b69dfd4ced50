use log::debug;
use uuid::Uuid;

use crate::event::Event;
use crate::log::{EventLog, EventLogError};

/// A read model rebuilt by folding an entity's event stream.
pub trait Aggregate: Sized {
    /// Start the aggregate from its creation event.
    ///
    /// Returns `None` for events that cannot create this aggregate; those are
    /// skipped while the aggregate does not exist yet.
    fn create(id: Uuid, event: &Event) -> Option<Self>;

    /// Apply a later event to an existing aggregate. Events the aggregate does
    /// not know must be ignored.
    fn replay_event(&mut self, event: &Event);
}

/// Rebuild an aggregate from its events.
///
/// Events are applied in timestamp order (stable for ties). A tombstone ends
/// the fold: the aggregate is absent and nothing after it is applied, so an
/// id can never be brought back by a later creation event.
pub fn hydrate<A: Aggregate>(id: Uuid, events: &[Event]) -> Option<A> {
    let mut ordered: Vec<&Event> = events.iter().filter(|e| e.entity_id == id).collect();
    ordered.sort_by_key(|event| event.timestamp);

    let mut aggregate: Option<A> = None;
    for event in ordered {
        if event.kind.is_tombstone() {
            debug!("event=replay_tombstone module=aggregate entity={}", id);
            return None;
        }
        match aggregate.as_mut() {
            Some(existing) => existing.replay_event(event),
            None => aggregate = A::create(id, event),
        }
    }
    aggregate
}

/// Extension trait adding aggregate-aware reads to any event log.
pub trait GetAggregate: EventLog {
    fn get_aggregate<A: Aggregate>(&self, id: &Uuid) -> Result<Option<A>, EventLogError>
    where
        Self: Sized,
    {
        let events = self.events(id)?;
        Ok(hydrate::<A>(*id, &events))
    }

    /// Rebuild every entity of type `A`, skipping ids whose stream does not
    /// produce one (other aggregate types, deleted entities).
    fn get_all_aggregates<A: Aggregate>(&self) -> Result<Vec<A>, EventLogError>
    where
        Self: Sized,
    {
        let ids = self.entity_ids()?;
        let mut aggregates = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(aggregate) = self.get_aggregate::<A>(&id)? {
                aggregates.push(aggregate);
            }
        }
        Ok(aggregates)
    }
}

impl<L: EventLog> GetAggregate for L {}
