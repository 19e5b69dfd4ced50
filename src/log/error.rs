use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum EventLogError {
    #[error("event log lock poisoned during {0}")]
    LockPoisoned(&'static str),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed event in {path} at line {line}: {message}")]
    Malformed {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("event could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

impl EventLogError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        EventLogError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(path: impl Into<PathBuf>, line: usize, message: impl ToString) -> Self {
        EventLogError::Malformed {
            path: path.into(),
            line,
            message: message.to_string(),
        }
    }
}
