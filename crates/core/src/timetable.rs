//! Weekly timetable: weekday numbering, entry validation, and the day filter.
//!
//! Weekdays are numbered `0 = Sunday .. 6 = Saturday`.

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{Datelike, NaiveTime};

use crate::error::CoreError;
use crate::types::{Day, DbId};

/// Display names indexed by `day_of_week`.
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Read access to the fields the filters need.
pub trait ScheduledClass {
    fn subject_id(&self) -> DbId;
    fn day_of_week(&self) -> i16;
    fn start_time(&self) -> Option<NaiveTime>;
}

/// `day_of_week` of a calendar date.
pub fn day_of_week(day: Day) -> i16 {
    // num_days_from_sunday is always 0..=6
    day.weekday().num_days_from_sunday() as i16
}

pub fn validate_day_of_week(day_of_week: i16) -> Result<(), CoreError> {
    if !(0..=6).contains(&day_of_week) {
        return Err(CoreError::Validation(format!(
            "day_of_week must be between 0 (Sunday) and 6 (Saturday), got {day_of_week}"
        )));
    }
    Ok(())
}

/// When both ends of a class window are given, the end must come after the start.
pub fn validate_time_window(
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
) -> Result<(), CoreError> {
    if let (Some(start), Some(end)) = (start, end) {
        if end <= start {
            return Err(CoreError::Validation(format!(
                "end_time ({end}) must be after start_time ({start})"
            )));
        }
    }
    Ok(())
}

/// Entries to show for `day`.
///
/// Returns every entry scheduled on the date's weekday. A subject that is not
/// scheduled that weekday but appears in `recorded_subjects` (it has an
/// attendance record on `day`) contributes its first entry as well, so the
/// record stays editable. The result is ordered by start time; ties keep
/// input order.
pub fn entries_for_day<'a, T: ScheduledClass>(
    entries: &'a [T],
    day: Day,
    recorded_subjects: &HashSet<DbId>,
) -> Vec<&'a T> {
    let weekday = day_of_week(day);

    let mut selected: Vec<&T> = entries
        .iter()
        .filter(|e| e.day_of_week() == weekday)
        .collect();

    let mut covered: HashSet<DbId> = selected.iter().map(|e| e.subject_id()).collect();
    for entry in entries {
        let subject_id = entry.subject_id();
        if recorded_subjects.contains(&subject_id) && covered.insert(subject_id) {
            selected.push(entry);
        }
    }

    sort_by_start_time(&mut selected);
    selected
}

/// Bucket the whole timetable by weekday, Sunday first, each bucket sorted by
/// start time.
pub fn group_by_weekday<T: ScheduledClass>(entries: &[T]) -> [Vec<&T>; 7] {
    let mut days: [Vec<&T>; 7] = std::array::from_fn(|_| Vec::new());
    for entry in entries {
        if let Some(bucket) = usize::try_from(entry.day_of_week())
            .ok()
            .and_then(|i| days.get_mut(i))
        {
            bucket.push(entry);
        }
    }
    for bucket in &mut days {
        sort_by_start_time(bucket);
    }
    days
}

/// Stable sort, untimed entries last.
fn sort_by_start_time<T: ScheduledClass>(entries: &mut [&T]) {
    entries.sort_by(|a, b| match (a.start_time(), b.start_time()) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Entry {
        id: i64,
        subject_id: DbId,
        day_of_week: i16,
        start_time: Option<NaiveTime>,
    }

    impl ScheduledClass for Entry {
        fn subject_id(&self) -> DbId {
            self.subject_id
        }
        fn day_of_week(&self) -> i16 {
            self.day_of_week
        }
        fn start_time(&self) -> Option<NaiveTime> {
            self.start_time
        }
    }

    fn at(h: u32, m: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, 0)
    }

    fn entry(id: i64, subject_id: DbId, day_of_week: i16, start: Option<NaiveTime>) -> Entry {
        Entry {
            id,
            subject_id,
            day_of_week,
            start_time: start,
        }
    }

    /// 2025-03-03 is a Monday.
    fn monday() -> Day {
        Day::from_ymd_opt(2025, 3, 3).unwrap()
    }

    fn ids(entries: &[&Entry]) -> Vec<i64> {
        entries.iter().map(|e| e.id).collect()
    }

    #[test]
    fn weekday_numbering_starts_on_sunday() {
        assert_eq!(day_of_week(monday()), 1);
        assert_eq!(day_of_week(Day::from_ymd_opt(2025, 3, 2).unwrap()), 0);
        assert_eq!(day_of_week(Day::from_ymd_opt(2025, 3, 8).unwrap()), 6);
    }

    #[test]
    fn monday_entries_sorted_by_start_time() {
        let entries = vec![
            entry(1, 10, 1, at(11, 0)),
            entry(2, 11, 1, at(9, 0)),
            entry(3, 12, 2, at(8, 0)),
            entry(4, 13, 1, at(9, 0)),
        ];
        let result = entries_for_day(&entries, monday(), &HashSet::new());
        assert_eq!(ids(&result), vec![2, 4, 1], "tuesday entry excluded, ties stable");
    }

    #[test]
    fn other_day_entry_included_when_recorded() {
        let entries = vec![entry(1, 10, 1, at(10, 0)), entry(2, 20, 2, at(8, 0))];
        let recorded = HashSet::from([20]);
        let result = entries_for_day(&entries, monday(), &recorded);
        assert_eq!(ids(&result), vec![2, 1]);
    }

    #[test]
    fn recorded_subject_already_scheduled_is_not_duplicated() {
        let entries = vec![
            entry(1, 10, 1, at(10, 0)),
            entry(2, 10, 3, at(8, 0)),
            entry(3, 20, 4, None),
            entry(4, 20, 5, at(7, 0)),
        ];
        let recorded = HashSet::from([10, 20]);
        let result = entries_for_day(&entries, monday(), &recorded);
        assert_eq!(ids(&result), vec![1, 3], "one extra entry for subject 20, untimed last");
    }

    #[test]
    fn group_by_weekday_buckets_and_sorts() {
        let entries = vec![
            entry(1, 10, 0, at(12, 0)),
            entry(2, 10, 6, None),
            entry(3, 11, 0, at(8, 30)),
        ];
        let week = group_by_weekday(&entries);
        assert_eq!(ids(&week[0]), vec![3, 1]);
        assert_eq!(ids(&week[6]), vec![2]);
        assert!(week[1..6].iter().all(Vec::is_empty));
    }

    #[test]
    fn day_of_week_bounds() {
        assert!(validate_day_of_week(0).is_ok());
        assert!(validate_day_of_week(6).is_ok());
        assert!(validate_day_of_week(7).is_err());
        assert!(validate_day_of_week(-1).is_err());
    }

    #[test]
    fn time_window_requires_end_after_start() {
        assert!(validate_time_window(at(9, 0), at(10, 0)).is_ok());
        assert!(validate_time_window(at(9, 0), None).is_ok());
        assert!(validate_time_window(None, None).is_ok());
        assert!(validate_time_window(at(10, 0), at(10, 0)).is_err());
        assert!(validate_time_window(at(10, 0), at(9, 0)).is_err());
    }
}
