use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};
use uuid::Uuid;

use crate::aggregate::{GetAggregate, WorkItem};
use crate::event::{Event, EventKind};
use crate::log::{EventLog, EventLogError};
use crate::protocol::{generate_working_phases, PhaseDurations};
use crate::timer::TimeSource;

/// Commands and queries over work items ("day points").
///
/// Commands only append events; every query rebuilds its result from the log.
#[derive(Clone)]
pub struct WorkItemManager<L> {
    log: L,
    time: Arc<dyn TimeSource>,
}

impl<L: EventLog> WorkItemManager<L> {
    pub fn new(log: L, time: Arc<dyn TimeSource>) -> Self {
        Self { log, time }
    }

    pub fn create_work_item(
        &self,
        name: impl Into<String>,
        category_id: Option<Uuid>,
    ) -> Result<WorkItem, EventLogError> {
        let id = Uuid::new_v4();
        let item = self.create_at(id, self.time.now(), name.into(), category_id)?;
        info!(
            "event=work_item_created module=manager id={} name={:?}",
            item.id, item.name
        );
        Ok(item)
    }

    /// Rename an item. Returns `None` without writing anything if it does not
    /// exist.
    pub fn change_name(
        &self,
        id: Uuid,
        name: impl Into<String>,
    ) -> Result<Option<WorkItem>, EventLogError> {
        if self.get(id)?.is_none() {
            warn!("event=rename_skipped module=manager reason=absent id={}", id);
            return Ok(None);
        }
        let name = name.into();
        info!("event=work_item_renamed module=manager id={} name={:?}", id, name);
        self.log
            .append(Event::new(id, self.time.now(), EventKind::NameChanged { name }))?;
        self.get(id)
    }

    /// Record a finished concentration phase.
    pub fn finish_phase(&self, id: Uuid, timestamp: NaiveDateTime) -> Result<(), EventLogError> {
        info!("event=phase_recorded module=manager id={} at={}", id, timestamp);
        self.log
            .append(Event::new(id, timestamp, EventKind::WorkingPhaseFinished))
    }

    /// Mark the item as done. Repeating this has no further effect.
    pub fn finish_work(&self, id: Uuid, timestamp: NaiveDateTime) -> Result<(), EventLogError> {
        info!("event=work_item_finished module=manager id={} at={}", id, timestamp);
        self.log
            .append(Event::new(id, timestamp, EventKind::DayPointFinished))
    }

    pub fn delete_work_item(&self, id: Uuid) -> Result<(), EventLogError> {
        info!("event=work_item_deleted module=manager id={}", id);
        self.log
            .append(Event::new(id, self.time.now(), EventKind::ItemDeleted))
    }

    pub fn get(&self, id: Uuid) -> Result<Option<WorkItem>, EventLogError> {
        self.log.get_aggregate(&id)
    }

    /// Every live item, sorted by name.
    pub fn get_all(&self) -> Result<Vec<WorkItem>, EventLogError> {
        let mut items: Vec<WorkItem> = self.log.get_all_aggregates()?;
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(items)
    }

    /// Unfinished items created today or earlier.
    pub fn get_day_points(&self) -> Result<Vec<WorkItem>, EventLogError> {
        let today = self.time.today();
        let mut items = self.get_all()?;
        items.retain(|item| !item.is_finished && item.creation.date() <= today);
        Ok(items)
    }

    /// Enter past work after the fact: a finished item on `date` carrying as
    /// many phases as fit into `hours`.
    pub fn add_manual_point(
        &self,
        date: NaiveDate,
        name: impl Into<String>,
        category_id: Option<Uuid>,
        hours: u32,
        durations: &PhaseDurations,
    ) -> Result<WorkItem, EventLogError> {
        let id = Uuid::new_v4();
        let start = date.and_time(chrono::NaiveTime::MIN);
        let mut item = self.create_at(id, start, name.into(), category_id)?;

        let phases = generate_working_phases(start, hours, durations);
        for phase in &phases {
            self.finish_phase(id, *phase)?;
        }
        let finished_at = phases.last().copied().unwrap_or(start);
        self.finish_work(id, finished_at)?;

        info!(
            "event=manual_point_added module=manager id={} date={} phases={}",
            id,
            date,
            phases.len()
        );
        item.working_phases = phases;
        item.is_finished = true;
        Ok(item)
    }

    fn create_at(
        &self,
        id: Uuid,
        creation: NaiveDateTime,
        name: String,
        category_id: Option<Uuid>,
    ) -> Result<WorkItem, EventLogError> {
        self.log.append(Event::new(
            id,
            creation,
            EventKind::DayPointCreated {
                name: name.clone(),
                category_id,
            },
        ))?;
        Ok(WorkItem {
            id,
            creation,
            name,
            category_id,
            working_phases: Vec::new(),
            is_finished: false,
        })
    }
}
