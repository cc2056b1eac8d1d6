//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` (or any `PgExecutor`) as the first argument.

pub mod action_repo;
pub mod aggregate_repo;
pub mod attendance_repo;
pub mod location_repo;
pub mod participant_repo;
pub mod team_repo;

pub use action_repo::ActionRepo;
pub use aggregate_repo::AggregateRepo;
pub use attendance_repo::AttendanceRepo;
pub use location_repo::LocationRepo;
pub use participant_repo::ParticipantRepo;
pub use team_repo::TeamRepo;
