//! Domain rules and pure derived views for Rollcall.
//!
//! This crate has no internal dependencies so it can be shared by the
//! repository layer, the API server, and tests.

pub mod attendance;
pub mod classroom;
pub mod error;
pub mod materials;
pub mod roles;
pub mod subject;
pub mod timetable;
pub mod types;
