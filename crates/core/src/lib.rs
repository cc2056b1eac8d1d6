//! Domain logic for the event roster and attendance ledger.
//!
//! Everything in this crate is pure: no database or network access. The
//! `roster-db` crate persists these types and `roster-api` exposes them
//! over HTTP.

pub mod attendance;
pub mod counters;
pub mod enums;
pub mod error;
pub mod schema;
pub mod types;
pub mod validation;
