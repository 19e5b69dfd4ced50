//! Event log persisted as newline-delimited JSON.
//!
//! Every entity owns one file, `<entity-id>.json`, holding one serialized
//! [`EventRecord`] per line. The whole folder is read once when the log is
//! opened and mirrored in an [`EventCache`]; appends write the line first and
//! then update the cache under the same write lock.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use log::{debug, info};
use uuid::Uuid;

use super::{EventCache, EventLog, EventLogError};
use crate::event::{Event, EventRecord};

#[derive(Clone)]
pub struct FileEventLog {
    folder: PathBuf,
    cache: Arc<RwLock<EventCache>>,
}

impl FileEventLog {
    /// Open the log stored in `folder`, reading every persisted stream.
    ///
    /// A missing folder is an empty log. Any unreadable or malformed line
    /// fails the whole load.
    pub fn open(folder: impl Into<PathBuf>) -> Result<Self, EventLogError> {
        let folder = folder.into();
        let events = read_folder(&folder)?;
        let cache = EventCache::from_events(events);
        info!(
            "event=log_loaded module=log store=file folder={} entities={} events={}",
            folder.display(),
            cache.ids().len(),
            cache.len()
        );
        Ok(FileEventLog {
            folder,
            cache: Arc::new(RwLock::new(cache)),
        })
    }

    pub fn folder(&self) -> &Path {
        &self.folder
    }

    fn entity_file(&self, id: &Uuid) -> PathBuf {
        self.folder.join(format!("{}.json", id))
    }

    fn persist(&self, event: &Event) -> Result<(), EventLogError> {
        fs::create_dir_all(&self.folder).map_err(|e| EventLogError::io(&self.folder, e))?;

        let path = self.entity_file(&event.entity_id);
        let mut line = serde_json::to_string(&event.to_record())?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| EventLogError::io(&path, e))?;
        file.write_all(line.as_bytes())
            .map_err(|e| EventLogError::io(&path, e))?;
        file.sync_data().map_err(|e| EventLogError::io(&path, e))
    }
}

impl EventLog for FileEventLog {
    fn append(&self, event: Event) -> Result<(), EventLogError> {
        let mut cache = self
            .cache
            .write()
            .map_err(|_| EventLogError::LockPoisoned("write"))?;
        self.persist(&event)?;
        debug!(
            "event=append module=log store=file type={} entity={}",
            event.event_type(),
            event.entity_id
        );
        cache.insert(event);
        Ok(())
    }

    fn entity_ids(&self) -> Result<Vec<Uuid>, EventLogError> {
        let cache = self
            .cache
            .read()
            .map_err(|_| EventLogError::LockPoisoned("read"))?;
        Ok(cache.ids())
    }

    fn events(&self, id: &Uuid) -> Result<Vec<Event>, EventLogError> {
        let cache = self
            .cache
            .read()
            .map_err(|_| EventLogError::LockPoisoned("read"))?;
        Ok(cache.stream(id))
    }
}

fn read_folder(folder: &Path) -> Result<Vec<Event>, EventLogError> {
    let entries = match fs::read_dir(folder) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(EventLogError::io(folder, e)),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| EventLogError::io(folder, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();

    let mut events = Vec::new();
    for path in files {
        read_file(&path, &mut events)?;
    }
    Ok(events)
}

fn read_file(path: &Path, events: &mut Vec<Event>) -> Result<(), EventLogError> {
    let file = fs::File::open(path).map_err(|e| EventLogError::io(path, e))?;
    let reader = BufReader::new(file);

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| EventLogError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let record: EventRecord = serde_json::from_str(&line)
            .map_err(|e| EventLogError::malformed(path, index + 1, e))?;
        let event =
            Event::try_from(record).map_err(|e| EventLogError::malformed(path, index + 1, e))?;
        events.push(event);
    }
    Ok(())
}
