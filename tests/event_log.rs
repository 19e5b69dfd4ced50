mod support;

use std::fs;
use std::sync::Arc;

use mflow::logging::logging_status;
use mflow::{
    Config, ConfigError, Error, EventLog, EventLogError, FileEventLog, LoggingError,
    ManualTimeSource, PhaseDurations, Processor,
};
use support::{at, today};

#[test]
fn file_log_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let folder = dir.path().join("Events");
    let time = Arc::new(ManualTimeSource::new(at(today(), 9, 0)));

    let processor = Processor::new(
        FileEventLog::open(&folder).unwrap(),
        time.clone(),
        PhaseDurations::default(),
    );
    let categories = processor.add_category("Projekt 1").unwrap();
    let points = processor
        .add_new_day_point("Punkt 1", Some(categories[0].id))
        .unwrap();
    processor.remove_day_point(points[0].id).unwrap();
    processor
        .add_new_day_point("Punkt 2", Some(categories[0].id))
        .unwrap();

    let reopened = Processor::new(
        FileEventLog::open(&folder).unwrap(),
        time,
        PhaseDurations::default(),
    );
    let (points, categories) = reopened.start_day_planning().unwrap();

    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].name, "Projekt 1");
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].name, "Punkt 2");
    assert_eq!(points[0].category_id, Some(categories[0].id));

    let files = fs::read_dir(&folder).unwrap().count();
    assert_eq!(files, 3);
}

#[test]
fn entity_file_holds_one_json_line_per_event() {
    let dir = tempfile::tempdir().unwrap();
    let time = Arc::new(ManualTimeSource::new(at(today(), 9, 0)));
    let processor = Processor::new(
        FileEventLog::open(dir.path()).unwrap(),
        time,
        PhaseDurations::default(),
    );

    let categories = processor.add_category("Projekt 1").unwrap();
    let id = categories[0].id;
    processor.change_category_name(id, "Projekt 2").unwrap();

    let content = fs::read_to_string(dir.path().join(format!("{}.json", id))).unwrap();
    let lines: Vec<serde_json::Value> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["type"], "CategoryCreated");
    assert_eq!(lines[0]["entityId"], id.to_string());
    assert_eq!(lines[0]["timestamp"], "2021-01-28T09:00:00");
    assert_eq!(lines[0]["data"]["Name"], "Projekt 1");
    assert_eq!(lines[1]["type"], "NameChanged");
    assert_eq!(lines[1]["data"]["Name"], "Projekt 2");
}

#[test]
fn corrupt_file_fails_the_load() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("94201cf9-d097-4ef1-bf75-75999d675aa2.json"),
        "{\"type\":\"CategoryCreated\"}\n",
    )
    .unwrap();

    let err = FileEventLog::open(dir.path()).err().unwrap();

    assert!(matches!(err, EventLogError::Malformed { line: 1, .. }));
}

#[test]
fn processor_opens_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        events_folder: dir.path().join("Events"),
        ..Config::default()
    };

    let processor = Processor::open(&config).unwrap();
    processor.add_category("Projekt 1").unwrap();

    let log = FileEventLog::open(&config.events_folder).unwrap();
    assert_eq!(log.entity_ids().unwrap().len(), 1);
}

#[test]
fn bootstrap_reports_config_and_logging_failures() {
    let dir = tempfile::tempdir().unwrap();
    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();

    let err = Processor::bootstrap(&broken, dir.path().join("logs")).err().unwrap();
    assert!(matches!(err, Error::Config(ConfigError::Parse { .. })));

    let err = Processor::bootstrap(dir.path().join("missing.json"), "logs")
        .err()
        .unwrap();
    assert!(matches!(err, Error::Logging(LoggingError::RelativeDir(_))));
}

#[test]
fn bootstrap_starts_logging_at_configured_level() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("settings.json");
    let log_dir = dir.path().join("logs");
    Config {
        events_folder: dir.path().join("Events"),
        log_level: "debug".into(),
        ..Config::default()
    }
    .save(&config_path)
    .unwrap();

    let processor = Processor::bootstrap(&config_path, &log_dir).unwrap();
    processor.add_category("Projekt 1").unwrap();

    assert_eq!(logging_status(), Some(("debug", log_dir)));
    assert_eq!(processor.categories().unwrap().len(), 1);
}

#[cfg(feature = "emitter")]
#[test]
fn finished_phase_is_announced() {
    use std::sync::mpsc;
    use std::sync::Mutex;
    use std::time::Duration;

    use mflow::{EmittingEventLog, EventRecord, InMemoryEventLog};

    let time = Arc::new(ManualTimeSource::new(at(today(), 9, 0)));
    let log = Arc::new(EmittingEventLog::new(InMemoryEventLog::new()));
    let (tx, rx) = mpsc::channel();
    let tx = Mutex::new(tx);
    log.on("WorkingPhaseFinished", move |record: EventRecord| {
        let _ = tx.lock().unwrap().send(record.entity_id);
    })
    .unwrap();

    let processor = Processor::new(log.clone(), time.clone(), PhaseDurations::default());
    let points = processor.add_new_day_point("Punkt 1", None).unwrap();
    processor
        .start_concentration(points[0].id, |_, _| {}, || {})
        .unwrap();
    time.set_elapsed(Duration::from_secs(25 * 60));

    assert_eq!(rx.recv_timeout(Duration::from_secs(5)).unwrap(), points[0].id);
}
