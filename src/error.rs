use uuid::Uuid;

use crate::config::ConfigError;
use crate::log::EventLogError;
use crate::logging::LoggingError;
use crate::protocol::ProtocolError;
use crate::report::ReportError;

/// Any failure surfaced by the [`Processor`](crate::Processor).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    EventLog(#[from] EventLogError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    Report(#[from] ReportError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Logging(#[from] LoggingError),
    #[error("work item {0} does not exist")]
    WorkItemNotFound(Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
