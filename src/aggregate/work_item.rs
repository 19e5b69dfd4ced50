use chrono::NaiveDateTime;
use uuid::Uuid;

use super::Aggregate;
use crate::event::{Event, EventKind};

/// A planned task ("day point") with its recorded concentration phases.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorkItem {
    pub id: Uuid,
    pub creation: NaiveDateTime,
    pub name: String,
    pub category_id: Option<Uuid>,
    /// Completion time of every finished concentration phase, in log order.
    pub working_phases: Vec<NaiveDateTime>,
    pub is_finished: bool,
}

impl Aggregate for WorkItem {
    fn create(id: Uuid, event: &Event) -> Option<Self> {
        match &event.kind {
            EventKind::DayPointCreated { name, category_id } => Some(WorkItem {
                id,
                creation: event.timestamp,
                name: name.clone(),
                category_id: *category_id,
                working_phases: Vec::new(),
                is_finished: false,
            }),
            _ => None,
        }
    }

    fn replay_event(&mut self, event: &Event) {
        match &event.kind {
            EventKind::NameChanged { name } => self.name = name.clone(),
            EventKind::WorkingPhaseFinished => self.working_phases.push(event.timestamp),
            EventKind::DayPointFinished => self.is_finished = true,
            _ => {}
        }
    }
}
