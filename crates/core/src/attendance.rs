//! Attendance statuses and the derived views computed over a user's records.
//!
//! - [`summarize`] turns one subject's records into counts, a percentage and
//!   a threshold-breach flag.
//! - [`DayIndex`] keys records by calendar day for calendar colouring and the
//!   per-subject "today" lookup.
//!
//! Everything here is pure and infallible: missing input degrades to zeroes.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Day, DbId};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Outcome recorded for one subject on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Attended,
    Missed,
    /// A declared non-class day. Excluded from the percentage denominator.
    Off,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 3] = [Self::Attended, Self::Missed, Self::Off];

    /// Database / wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Attended => "attended",
            Self::Missed => "missed",
            Self::Off => "off",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttendanceStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Invalid attendance status '{s}'. Must be one of: attended, missed, off"
                ))
            })
    }
}

impl TryFrom<String> for AttendanceStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Read access to the fields the derived views need.
///
/// Implemented by the persisted record type so the views can run directly
/// over fetched rows.
pub trait AttendanceEntry {
    fn subject_id(&self) -> DbId;
    fn day(&self) -> Day;
    fn status(&self) -> AttendanceStatus;
}

// ---------------------------------------------------------------------------
// Per-subject summary
// ---------------------------------------------------------------------------

/// Summary statistics for one subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AttendanceSummary {
    pub attended_count: u32,
    pub missed_count: u32,
    pub off_count: u32,
    /// `attended_count + missed_count`.
    pub total_counted: u32,
    /// Rounded half up, `0` when nothing has been counted yet.
    pub percentage: u32,
    /// `percentage < threshold`. Sitting exactly at the threshold is compliant.
    pub is_below_threshold: bool,
}

/// Summarize a subject's statuses against its threshold.
pub fn summarize<I>(threshold: i32, statuses: I) -> AttendanceSummary
where
    I: IntoIterator<Item = AttendanceStatus>,
{
    let mut summary = AttendanceSummary::default();
    for status in statuses {
        match status {
            AttendanceStatus::Attended => summary.attended_count += 1,
            AttendanceStatus::Missed => summary.missed_count += 1,
            AttendanceStatus::Off => summary.off_count += 1,
        }
    }
    summary.total_counted = summary.attended_count + summary.missed_count;
    summary.percentage = attendance_percentage(summary.attended_count, summary.total_counted);
    summary.is_below_threshold = i64::from(summary.percentage) < i64::from(threshold);
    summary
}

/// Summarize only the entries belonging to `subject_id`.
pub fn summarize_subject<'a, T, I>(subject_id: DbId, threshold: i32, records: I) -> AttendanceSummary
where
    T: AttendanceEntry + 'a,
    I: IntoIterator<Item = &'a T>,
{
    summarize(
        threshold,
        records
            .into_iter()
            .filter(|r| r.subject_id() == subject_id)
            .map(AttendanceEntry::status),
    )
}

/// `round(attended / total * 100)` with halves rounded up, in integer math.
///
/// Returns `0` when `total` is zero.
pub fn attendance_percentage(attended: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let attended = u64::from(attended);
    let total = u64::from(total);
    // floor(x + 1/2) where x = 100a/t  ==  floor((200a + t) / 2t)
    let rounded = (200 * attended + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// Day-keyed lookup
// ---------------------------------------------------------------------------

/// Records grouped by calendar day.
///
/// Several records can share a day (one per subject), so calendar colouring
/// keys by day alone while the "today" check keys by `(day, subject)`.
#[derive(Debug)]
pub struct DayIndex<'a, T> {
    by_day: BTreeMap<Day, Vec<&'a T>>,
}

/// Days carrying each status, sorted ascending and de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusDays {
    pub attended: Vec<Day>,
    pub missed: Vec<Day>,
    pub off: Vec<Day>,
}

impl<'a, T: AttendanceEntry> DayIndex<'a, T> {
    pub fn build<I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a T>,
    {
        let mut by_day: BTreeMap<Day, Vec<&'a T>> = BTreeMap::new();
        for record in records {
            by_day.entry(record.day()).or_default().push(record);
        }
        Self { by_day }
    }

    /// All records on `day`, in input order.
    pub fn on(&self, day: Day) -> &[&'a T] {
        self.by_day.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The record for `subject_id` on `day`, if any.
    pub fn for_subject(&self, day: Day, subject_id: DbId) -> Option<&'a T> {
        self.on(day)
            .iter()
            .copied()
            .find(|r| r.subject_id() == subject_id)
    }

    /// Subjects that have any record on `day`.
    pub fn subjects_on(&self, day: Day) -> HashSet<DbId> {
        self.on(day).iter().map(|r| r.subject_id()).collect()
    }

    /// Days per status for calendar colouring.
    ///
    /// A day with records of several statuses shows up in each list.
    pub fn status_days(&self) -> StatusDays {
        let mut attended = BTreeSet::new();
        let mut missed = BTreeSet::new();
        let mut off = BTreeSet::new();
        for (day, records) in &self.by_day {
            for record in records {
                match record.status() {
                    AttendanceStatus::Attended => attended.insert(*day),
                    AttendanceStatus::Missed => missed.insert(*day),
                    AttendanceStatus::Off => off.insert(*day),
                };
            }
        }
        StatusDays {
            attended: attended.into_iter().collect(),
            missed: missed.into_iter().collect(),
            off: off.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use AttendanceStatus::{Attended, Missed, Off};

    struct Rec {
        subject_id: DbId,
        day: Day,
        status: AttendanceStatus,
    }

    impl AttendanceEntry for Rec {
        fn subject_id(&self) -> DbId {
            self.subject_id
        }
        fn day(&self) -> Day {
            self.day
        }
        fn status(&self) -> AttendanceStatus {
            self.status
        }
    }

    fn day(d: u32) -> Day {
        Day::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn rec(subject_id: DbId, d: u32, status: AttendanceStatus) -> Rec {
        Rec {
            subject_id,
            day: day(d),
            status,
        }
    }

    // -- summarize ----------------------------------------------------------

    #[test]
    fn off_days_are_excluded_from_denominator() {
        let s = summarize(75, [Attended, Attended, Attended, Missed, Off, Off]);
        assert_eq!(s.attended_count, 3);
        assert_eq!(s.missed_count, 1);
        assert_eq!(s.off_count, 2);
        assert_eq!(s.total_counted, 4);
        assert_eq!(s.percentage, 75);
        assert!(!s.is_below_threshold);
    }

    #[test]
    fn no_counted_records_reports_zero() {
        let s = summarize(75, []);
        assert_eq!(s.percentage, 0);
        assert!(s.is_below_threshold);

        let only_off = summarize(0, [Off, Off]);
        assert_eq!(only_off.total_counted, 0);
        assert_eq!(only_off.percentage, 0);
        assert!(!only_off.is_below_threshold, "0 < 0 is false");
    }

    #[test]
    fn exactly_at_threshold_is_compliant() {
        let s = summarize(50, [Attended, Missed]);
        assert_eq!(s.percentage, 50);
        assert!(!s.is_below_threshold);

        let s = summarize(51, [Attended, Missed]);
        assert!(s.is_below_threshold);
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(attendance_percentage(1, 8), 13); // 12.5
        assert_eq!(attendance_percentage(1, 3), 33); // 33.33
        assert_eq!(attendance_percentage(2, 3), 67); // 66.67
        assert_eq!(attendance_percentage(5, 5), 100);
        assert_eq!(attendance_percentage(0, 7), 0);
        assert_eq!(attendance_percentage(0, 0), 0);
    }

    #[test]
    fn summarize_subject_ignores_other_subjects() {
        let records = vec![rec(1, 3, Attended), rec(2, 3, Missed), rec(1, 4, Missed)];
        let s = summarize_subject(1, 60, &records);
        assert_eq!(s.attended_count, 1);
        assert_eq!(s.missed_count, 1);
        assert_eq!(s.percentage, 50);
        assert!(s.is_below_threshold);
    }

    // -- status parsing -----------------------------------------------------

    #[test]
    fn status_parses_wire_names() {
        assert_eq!("attended".parse::<AttendanceStatus>().unwrap(), Attended);
        assert_eq!(AttendanceStatus::try_from("off".to_string()).unwrap(), Off);
        assert_matches!(
            "present".parse::<AttendanceStatus>(),
            Err(CoreError::Validation(_))
        );
    }

    // -- day index ----------------------------------------------------------

    #[test]
    fn day_index_keys_by_day_and_subject() {
        let records = vec![rec(1, 3, Attended), rec(2, 3, Missed), rec(1, 4, Off)];
        let index = DayIndex::build(&records);

        assert_eq!(index.on(day(3)).len(), 2);
        assert_eq!(index.on(day(5)).len(), 0);
        assert_eq!(index.for_subject(day(3), 2).map(|r| r.status), Some(Missed));
        assert!(index.for_subject(day(4), 2).is_none());
        assert_eq!(index.subjects_on(day(3)), HashSet::from([1, 2]));
    }

    #[test]
    fn status_days_are_sorted_and_deduplicated() {
        let records = vec![
            rec(1, 9, Attended),
            rec(2, 3, Attended),
            rec(3, 3, Attended),
            rec(1, 3, Missed),
            rec(1, 5, Off),
        ];
        let days = DayIndex::build(&records).status_days();
        assert_eq!(days.attended, vec![day(3), day(9)]);
        assert_eq!(days.missed, vec![day(3)]);
        assert_eq!(days.off, vec![day(5)]);
    }

    #[test]
    fn empty_index_has_no_days() {
        let records: Vec<Rec> = Vec::new();
        let index = DayIndex::build(&records);
        assert!(index.on(day(1)).is_empty());
        assert_eq!(index.status_days(), StatusDays::default());
    }
}
