//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- the caller, from a JWT Bearer token.
//! - [`rbac::RequireOwner`] -- requires the `owner` profile role.

pub mod auth;
pub mod rbac;
