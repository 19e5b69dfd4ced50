use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use uuid::Uuid;

use super::{
    PhaseDurations, ProtocolError, WorkItemDetails, WorkItemDetailsEntry, WorkingDay,
    WorkingPoint,
};
use crate::aggregate::{Category, WorkItem};

/// Category label used when an item has no category or it no longer exists.
pub const NO_CATEGORY: &str = "-";

/// Build the working protocol of one month.
///
/// Every weekday of the month gets a [`WorkingDay`], with or without points.
/// Phases logged on weekends are not part of any day.
pub fn create_protocol(
    year: i32,
    month: u32,
    work_items: &[WorkItem],
    categories: &[Category],
    durations: &PhaseDurations,
) -> Result<Vec<WorkingDay>, ProtocolError> {
    let dates = working_dates(year, month)?;
    let items_of_month: Vec<&WorkItem> = work_items
        .iter()
        .filter(|item| {
            item.working_phases
                .iter()
                .any(|phase| phase.year() == year && phase.month() == month)
        })
        .collect();

    Ok(dates
        .into_iter()
        .map(|date| {
            let working_points: Vec<WorkingPoint> = items_of_month
                .iter()
                .filter_map(|item| {
                    let count = phases_on(item, date);
                    (count > 0).then(|| WorkingPoint {
                        work_item_id: item.id,
                        name: item.name.clone(),
                        category: category_name(item.category_id, categories),
                        working_time: durations.working_time(count),
                    })
                })
                .collect();
            let total_work_time = working_points
                .iter()
                .fold(Duration::zero(), |total, point| total + point.working_time);
            WorkingDay {
                date,
                working_points,
                total_work_time,
            }
        })
        .collect())
}

/// Per-day breakdown of one work item, ascending by date.
pub fn create_details(
    work_item: &WorkItem,
    category: Option<&Category>,
    durations: &PhaseDurations,
) -> WorkItemDetails {
    let mut per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();
    for phase in &work_item.working_phases {
        *per_day.entry(phase.date()).or_default() += 1;
    }

    WorkItemDetails {
        id: work_item.id,
        name: work_item.name.clone(),
        category: category
            .map(|category| category.name.clone())
            .unwrap_or_else(|| NO_CATEGORY.to_string()),
        working_days: per_day
            .into_iter()
            .map(|(date, count)| WorkItemDetailsEntry {
                date,
                time: durations.working_time(count),
            })
            .collect(),
    }
}

/// Distinct years with at least one recorded phase, ascending.
pub fn protocol_years(work_items: &[WorkItem]) -> Vec<i32> {
    work_items
        .iter()
        .flat_map(|item| item.working_phases.iter().map(|phase| phase.year()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn working_dates(year: i32, month: u32) -> Result<Vec<NaiveDate>, ProtocolError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(ProtocolError::InvalidMonth { year, month })?;
    Ok(first
        .iter_days()
        .take_while(|date| date.month() == month)
        .filter(|date| !matches!(date.weekday(), Weekday::Sat | Weekday::Sun))
        .collect())
}

fn phases_on(item: &WorkItem, date: NaiveDate) -> usize {
    item.working_phases
        .iter()
        .filter(|phase| phase.date() == date)
        .count()
}

fn category_name(category_id: Option<Uuid>, categories: &[Category]) -> String {
    category_id
        .and_then(|id| categories.iter().find(|category| category.id == id))
        .map(|category| category.name.clone())
        .unwrap_or_else(|| NO_CATEGORY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn item(name: &str, category_id: Option<Uuid>, phases: Vec<NaiveDateTime>) -> WorkItem {
        WorkItem {
            id: Uuid::new_v4(),
            creation: at(2020, 12, 1, 8),
            name: name.into(),
            category_id,
            working_phases: phases,
            is_finished: false,
        }
    }

    #[test]
    fn empty_month_lists_every_weekday() {
        let days = create_protocol(2021, 1, &[], &[], &PhaseDurations::default()).unwrap();

        assert_eq!(days.len(), 21);
        assert!(days
            .iter()
            .all(|day| day.working_points.is_empty() && day.total_work_time.is_zero()));
        assert!(days
            .iter()
            .all(|day| !matches!(day.date.weekday(), Weekday::Sat | Weekday::Sun)));
    }

    #[test]
    fn points_land_on_their_full_date() {
        let category = Category {
            id: Uuid::new_v4(),
            name: "Category 1".into(),
        };
        // Same day of month in another month must not match.
        let point = item(
            "Point 1",
            Some(category.id),
            vec![at(2021, 1, 28, 6), at(2021, 1, 28, 7), at(2020, 12, 28, 7)],
        );

        let days = create_protocol(
            2021,
            1,
            &[point.clone()],
            &[category],
            &PhaseDurations::default(),
        )
        .unwrap();

        let day = days.iter().find(|day| day.date.day() == 28).unwrap();
        assert_eq!(day.working_points.len(), 1);
        assert_eq!(day.working_points[0].work_item_id, point.id);
        assert_eq!(day.working_points[0].category, "Category 1");
        assert_eq!(day.total_work_time, Duration::minutes(60));
        assert_eq!(
            days.iter().filter(|day| !day.working_points.is_empty()).count(),
            1
        );
    }

    #[test]
    fn weekend_phases_are_left_out() {
        let point = item("Point 1", None, vec![at(2021, 1, 30, 8)]);
        let days = create_protocol(2021, 1, &[point], &[], &PhaseDurations::default()).unwrap();
        assert!(days.iter().all(|day| day.working_points.is_empty()));
    }

    #[test]
    fn unknown_category_falls_back_to_dash() {
        let point = item("Point 1", Some(Uuid::new_v4()), vec![at(2021, 1, 4, 8)]);
        let days = create_protocol(2021, 1, &[point], &[], &PhaseDurations::default()).unwrap();
        assert_eq!(days[1].working_points[0].category, NO_CATEGORY);
    }

    #[test]
    fn invalid_month_is_rejected() {
        let err = create_protocol(2021, 13, &[], &[], &PhaseDurations::default()).unwrap_err();
        assert_eq!(
            err,
            ProtocolError::InvalidMonth {
                year: 2021,
                month: 13
            }
        );
    }

    #[test]
    fn details_are_sorted_by_date() {
        let point = item(
            "Point 1",
            None,
            vec![at(2021, 1, 30, 8), at(2021, 1, 28, 6), at(2021, 1, 28, 7)],
        );

        let details = create_details(&point, None, &PhaseDurations::default());

        assert_eq!(details.category, NO_CATEGORY);
        let dates: Vec<u32> = details.working_days.iter().map(|e| e.date.day()).collect();
        assert_eq!(dates, vec![28, 30]);
        assert_eq!(details.working_days[0].time, Duration::minutes(60));
        assert_eq!(details.working_days[1].time, Duration::minutes(30));
    }

    #[test]
    fn years_are_distinct_and_sorted() {
        let items = vec![
            item("a", None, vec![at(2021, 3, 1, 8), at(2019, 3, 1, 8)]),
            item("b", None, vec![at(2021, 1, 1, 8)]),
            item("c", None, vec![]),
        ];
        assert_eq!(protocol_years(&items), vec![2019, 2021]);
    }
}
