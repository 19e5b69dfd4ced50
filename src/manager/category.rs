use std::sync::Arc;

use log::{info, warn};
use uuid::Uuid;

use crate::aggregate::{Category, GetAggregate};
use crate::event::{Event, EventKind};
use crate::log::{EventLog, EventLogError};
use crate::timer::TimeSource;

/// Commands and queries over categories.
#[derive(Clone)]
pub struct CategoryManager<L> {
    log: L,
    time: Arc<dyn TimeSource>,
}

impl<L: EventLog> CategoryManager<L> {
    pub fn new(log: L, time: Arc<dyn TimeSource>) -> Self {
        Self { log, time }
    }

    pub fn create_category(&self, name: impl Into<String>) -> Result<Category, EventLogError> {
        let category = Category {
            id: Uuid::new_v4(),
            name: name.into(),
        };
        self.log.append(Event::new(
            category.id,
            self.time.now(),
            EventKind::CategoryCreated {
                name: category.name.clone(),
            },
        ))?;
        info!(
            "event=category_created module=manager id={} name={:?}",
            category.id, category.name
        );
        Ok(category)
    }

    /// Rename a category. Returns `None` without writing anything if it does
    /// not exist.
    pub fn change_name(
        &self,
        id: Uuid,
        name: impl Into<String>,
    ) -> Result<Option<Category>, EventLogError> {
        if self.get(id)?.is_none() {
            warn!("event=rename_skipped module=manager reason=absent id={}", id);
            return Ok(None);
        }
        let name = name.into();
        info!("event=category_renamed module=manager id={} name={:?}", id, name);
        self.log
            .append(Event::new(id, self.time.now(), EventKind::NameChanged { name }))?;
        self.get(id)
    }

    pub fn delete_category(&self, id: Uuid) -> Result<(), EventLogError> {
        info!("event=category_deleted module=manager id={}", id);
        self.log
            .append(Event::new(id, self.time.now(), EventKind::ItemDeleted))
    }

    pub fn get(&self, id: Uuid) -> Result<Option<Category>, EventLogError> {
        self.log.get_aggregate(&id)
    }

    /// Every live category, sorted by name.
    pub fn get_all(&self) -> Result<Vec<Category>, EventLogError> {
        let mut categories: Vec<Category> = self.log.get_all_aggregates()?;
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}
