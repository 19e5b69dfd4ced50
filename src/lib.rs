//! Event-sourced personal work tracking.
//!
//! Work items ("day points") and categories live only as events in an
//! append-only [`EventLog`]; their current state is rebuilt on every read.
//! Concentration and break phases are timed by [`start_phase`], finished
//! phases feed the monthly working protocol and the performance report.

pub mod aggregate;
pub mod config;
mod error;
pub mod event;
pub mod log;
pub mod logging;
pub mod manager;
mod processor;
pub mod protocol;
pub mod report;
pub mod timer;

pub use aggregate::{hydrate, Aggregate, Category, GetAggregate, WorkItem};
pub use config::{Config, ConfigError};
pub use error::{Error, Result};
pub use event::{Event, EventKind, EventRecord, PayloadError};
#[cfg(feature = "emitter")]
pub use crate::log::EmittingEventLog;
pub use crate::log::{EventLog, EventLogError, FileEventLog, InMemoryEventLog};
pub use logging::{init_logging, LoggingError};
pub use manager::{CategoryManager, WorkItemManager};
pub use processor::{ConcentrationStarted, OpenedProtocol, Processor};
pub use protocol::{
    PhaseDurations, ProtocolError, WorkItemDetails, WorkItemDetailsEntry, WorkingDay,
    WorkingPoint,
};
pub use report::{PerformanceReport, ProtocolEntry, ProtocolGroup, ReportError};
pub use timer::{
    start_phase, work_item_description, CancelToken, ManualTimeSource, SystemTimeSource,
    TimeSource,
};
