//! Domain model structs and DTOs.
//!
//! Each entity submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO, reused as the full-record
//!   update DTO (updates replace every writable field)
//!
//! [`aggregate`] holds the nested read shapes assembled by
//! [`crate::repositories::AggregateRepo`].

pub mod action;
pub mod aggregate;
pub mod attendance;
pub mod location;
pub mod participant;
pub mod team;
