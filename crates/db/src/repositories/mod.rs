//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Every user-owned table is
//! scoped by the caller's `user_id`, so a row belonging to someone else
//! behaves exactly like a missing row.

pub mod attendance_repo;
pub mod classroom_repo;
pub mod material_repo;
pub mod session_repo;
pub mod subject_repo;
pub mod timetable_repo;
pub mod user_repo;

pub use attendance_repo::AttendanceRepo;
pub use classroom_repo::ClassroomRepo;
pub use material_repo::MaterialRepo;
pub use session_repo::SessionRepo;
pub use subject_repo::SubjectRepo;
pub use timetable_repo::TimetableRepo;
pub use user_repo::UserRepo;
