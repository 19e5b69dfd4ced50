use uuid::Uuid;

use super::Aggregate;
use crate::event::{Event, EventKind};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

impl Aggregate for Category {
    fn create(id: Uuid, event: &Event) -> Option<Self> {
        match &event.kind {
            EventKind::CategoryCreated { name } => Some(Category {
                id,
                name: name.clone(),
            }),
            _ => None,
        }
    }

    fn replay_event(&mut self, event: &Event) {
        if let EventKind::NameChanged { name } = &event.kind {
            self.name = name.clone();
        }
    }
}
