pub mod attendance;
pub mod auth;
pub mod classrooms;
pub mod materials;
pub mod profile;
pub mod subjects;
pub mod timetable;
