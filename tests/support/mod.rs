//! Shared fixtures: a seeded in-memory log and a hand-driven clock.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use mflow::{
    Event, EventKind, EventLog, InMemoryEventLog, ManualTimeSource, PhaseDurations, Processor,
};
use uuid::Uuid;

pub const CATEGORY_ID: Uuid = Uuid::from_u128(0x94201cf9_d097_4ef1_bf75_75999d675aa2);
pub const PUNKT_1: Uuid = Uuid::from_u128(0xe59f637f_523d_4a01_9641_ef69ee332735);
pub const PUNKT_2: Uuid = Uuid::from_u128(0x022e3b7c_f606_4490_96ea_415b29f425fa);
pub const PUNKT_3: Uuid = Uuid::from_u128(0xc241338b_8fcf_4240_96da_bd9c1b18b2d8);

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn at(day: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
    day.and_hms_opt(hour, minute, 0).unwrap()
}

/// Thursday, 2021-01-28.
pub fn today() -> NaiveDate {
    date(2021, 1, 28)
}

pub struct Fixture {
    pub log: InMemoryEventLog,
    pub time: ManualTimeSource,
    pub processor: Processor<InMemoryEventLog>,
}

impl Fixture {
    pub fn new(log: InMemoryEventLog, now: NaiveDateTime) -> Self {
        let time = ManualTimeSource::new(now);
        let processor = Processor::new(
            log.clone(),
            Arc::new(time.clone()),
            PhaseDurations::default(),
        );
        Fixture {
            log,
            time,
            processor,
        }
    }

    pub fn empty() -> Self {
        Self::new(InMemoryEventLog::new(), at(today(), 9, 0))
    }

    /// Category "Projekt 1" and the day points "Punkt 1" (yesterday),
    /// "Punkt 2" (yesterday, finished) and "Punkt 3" (today).
    pub fn seeded() -> Self {
        let fixture = Self::empty();
        let yesterday = at(today() - Duration::days(1), 0, 0);
        let midnight = at(today(), 0, 0);

        fixture.append(
            CATEGORY_ID,
            yesterday,
            EventKind::CategoryCreated {
                name: "Projekt 1".into(),
            },
        );
        for (id, name, created) in [
            (PUNKT_1, "Punkt 1", yesterday),
            (PUNKT_2, "Punkt 2", yesterday),
            (PUNKT_3, "Punkt 3", midnight),
        ] {
            fixture.append(
                id,
                created,
                EventKind::DayPointCreated {
                    name: name.into(),
                    category_id: Some(CATEGORY_ID),
                },
            );
        }
        fixture.append(PUNKT_2, midnight, EventKind::DayPointFinished);
        fixture
    }

    pub fn append(&self, id: Uuid, timestamp: NaiveDateTime, kind: EventKind) {
        self.log.append(Event::new(id, timestamp, kind)).unwrap();
    }
}
