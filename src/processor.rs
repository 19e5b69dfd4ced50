//! Use-case facade for a presentation layer.
//!
//! Each method is one user interaction: it runs the necessary commands and
//! returns the refreshed view data.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, NaiveDate};
use log::{error, info};
use uuid::Uuid;

use crate::aggregate::{Category, WorkItem};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::log::{EventLog, FileEventLog};
use crate::manager::{CategoryManager, WorkItemManager};
use crate::protocol::{
    create_details, create_protocol, protocol_years, PhaseDurations, WorkItemDetails, WorkingDay,
};
use crate::report::PerformanceReport;
use crate::timer::{start_phase, work_item_description, CancelToken, SystemTimeSource, TimeSource};

/// Everything the protocol view shows when it opens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenedProtocol {
    /// Years with recorded phases, ascending.
    pub years: Vec<i32>,
    pub year: i32,
    pub month: u32,
    pub working_days: Vec<WorkingDay>,
}

/// A started concentration phase: item name, phase label and the token that
/// cancels it.
pub type ConcentrationStarted = (String, String, CancelToken);

pub struct Processor<L> {
    work_items: WorkItemManager<L>,
    categories: CategoryManager<L>,
    time: Arc<dyn TimeSource>,
    durations: PhaseDurations,
}

impl Processor<FileEventLog> {
    /// Open the file-backed log named in `config` with a wall-clock timer.
    pub fn open(config: &Config) -> Result<Self> {
        let log = FileEventLog::open(&config.events_folder)?;
        let time = Arc::new(SystemTimeSource::new(config.tick_interval()));
        Ok(Self::new(log, time, config.phase_durations()))
    }

    /// Application startup: load the settings at `config_path`, start file
    /// logging into `log_dir` and open the event log.
    pub fn bootstrap(config_path: impl AsRef<Path>, log_dir: impl AsRef<Path>) -> Result<Self> {
        let config = Config::load(config_path)?;
        config.init_logging(log_dir)?;
        info!(
            "event=processor_opened module=processor events_folder={}",
            config.events_folder.display()
        );
        Self::open(&config)
    }
}

impl<L> Processor<L>
where
    L: EventLog + Clone + 'static,
{
    pub fn new(log: L, time: Arc<dyn TimeSource>, durations: PhaseDurations) -> Self {
        Self {
            work_items: WorkItemManager::new(log.clone(), time.clone()),
            categories: CategoryManager::new(log, time.clone()),
            time,
            durations,
        }
    }

    pub fn work_items(&self) -> &WorkItemManager<L> {
        &self.work_items
    }

    pub fn category_manager(&self) -> &CategoryManager<L> {
        &self.categories
    }

    pub fn start_day_planning(&self) -> Result<(Vec<WorkItem>, Vec<Category>)> {
        Ok((self.work_items.get_day_points()?, self.categories.get_all()?))
    }

    pub fn add_new_day_point(
        &self,
        name: impl Into<String>,
        category_id: Option<Uuid>,
    ) -> Result<Vec<WorkItem>> {
        self.work_items.create_work_item(name, category_id)?;
        Ok(self.work_items.get_day_points()?)
    }

    pub fn remove_day_point(&self, id: Uuid) -> Result<Vec<WorkItem>> {
        self.work_items.delete_work_item(id)?;
        Ok(self.work_items.get_day_points()?)
    }

    pub fn change_day_point_name(&self, id: Uuid, name: impl Into<String>) -> Result<Vec<WorkItem>> {
        self.work_items.change_name(id, name)?;
        Ok(self.work_items.get_day_points()?)
    }

    pub fn start_work(&self) -> Result<Vec<WorkItem>> {
        Ok(self.work_items.get_day_points()?)
    }

    /// Start a concentration phase on a day point.
    ///
    /// When the phase runs out a `WorkingPhaseFinished` event is recorded
    /// before `on_finished` is called.
    pub fn start_concentration<P, F>(
        &self,
        id: Uuid,
        on_progress: P,
        on_finished: F,
    ) -> Result<ConcentrationStarted>
    where
        P: FnMut(Duration, f64) + Send + 'static,
        F: FnOnce() + Send + 'static,
    {
        let item = self.existing_item(id)?;
        let (name, phase) = work_item_description(&item);

        let work_items = self.work_items.clone();
        let time = self.time.clone();
        let record_phase = move || {
            if let Err(err) = work_items.finish_phase(id, time.now()) {
                error!(
                    "event=phase_not_recorded module=processor id={} error={}",
                    id, err
                );
            }
            on_finished();
        };

        info!("event=concentration_started module=processor id={} phase={:?}", id, phase);
        let token = start_phase(
            to_std(self.durations.concentration),
            on_progress,
            record_phase,
            self.time.as_ref(),
        );
        Ok((name, phase, token))
    }

    /// Start a break after a concentration phase. Nothing is recorded.
    pub fn start_break<P, F>(
        &self,
        id: Uuid,
        on_progress: P,
        on_finished: F,
    ) -> Result<(String, CancelToken)>
    where
        P: FnMut(Duration, f64) + Send + 'static,
        F: FnOnce() + Send + 'static,
    {
        let item = self.existing_item(id)?;
        let (name, _) = work_item_description(&item);

        info!("event=break_started module=processor id={}", id);
        let token = start_phase(
            to_std(self.durations.break_time),
            on_progress,
            on_finished,
            self.time.as_ref(),
        );
        Ok((name, token))
    }

    pub fn finish_point(&self, id: Uuid) -> Result<()> {
        Ok(self.work_items.finish_work(id, self.time.now())?)
    }

    pub fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.get_all()?)
    }

    pub fn add_category(&self, name: impl Into<String>) -> Result<Vec<Category>> {
        self.categories.create_category(name)?;
        self.categories()
    }

    pub fn remove_category(&self, id: Uuid) -> Result<Vec<Category>> {
        self.categories.delete_category(id)?;
        self.categories()
    }

    pub fn change_category_name(&self, id: Uuid, name: impl Into<String>) -> Result<Vec<Category>> {
        self.categories.change_name(id, name)?;
        self.categories()
    }

    /// Protocol of the current month plus the years available for selection.
    pub fn open_working_protocol(&self) -> Result<OpenedProtocol> {
        let today = self.time.today();
        let work_items = self.work_items.get_all()?;
        let categories = self.categories.get_all()?;
        let working_days = create_protocol(
            today.year(),
            today.month(),
            &work_items,
            &categories,
            &self.durations,
        )?;
        Ok(OpenedProtocol {
            years: protocol_years(&work_items),
            year: today.year(),
            month: today.month(),
            working_days,
        })
    }

    pub fn create_working_protocol(&self, year: i32, month: u32) -> Result<Vec<WorkingDay>> {
        let work_items = self.work_items.get_all()?;
        let categories = self.categories.get_all()?;
        Ok(create_protocol(
            year,
            month,
            &work_items,
            &categories,
            &self.durations,
        )?)
    }

    /// Per-day breakdown of one item, or `None` when it does not exist (any
    /// more).
    pub fn open_work_item_details(&self, id: Uuid) -> Result<Option<WorkItemDetails>> {
        let Some(item) = self.work_items.get(id)? else {
            return Ok(None);
        };
        let category = match item.category_id {
            Some(category_id) => self.categories.get(category_id)?,
            None => None,
        };
        Ok(Some(create_details(&item, category.as_ref(), &self.durations)))
    }

    /// Record `hours` of past work on `date` as a finished item.
    pub fn add_manual_point(
        &self,
        date: NaiveDate,
        name: impl Into<String>,
        category_id: Option<Uuid>,
        hours: u32,
    ) -> Result<WorkItem> {
        Ok(self
            .work_items
            .add_manual_point(date, name, category_id, hours, &self.durations)?)
    }

    pub fn create_performance_report(&self, year: i32, month: u32) -> Result<PerformanceReport> {
        let working_days = self.create_working_protocol(year, month)?;
        Ok(PerformanceReport::create(&working_days)?)
    }

    /// Create the report of a month and write it to `path`.
    pub fn save_performance_report(
        &self,
        year: i32,
        month: u32,
        path: impl AsRef<Path>,
    ) -> Result<PerformanceReport> {
        let report = self.create_performance_report(year, month)?;
        report.write_to(path)?;
        Ok(report)
    }

    fn existing_item(&self, id: Uuid) -> Result<WorkItem> {
        self.work_items.get(id)?.ok_or(Error::WorkItemNotFound(id))
    }
}

fn to_std(duration: chrono::Duration) -> Duration {
    duration.to_std().unwrap_or_default()
}
