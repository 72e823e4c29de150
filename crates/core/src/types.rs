/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Calendar day without time-of-day. Attendance and timetable lookups compare
/// these by equality only.
pub type Day = chrono::NaiveDate;
