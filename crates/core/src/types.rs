//! Scalar aliases shared by every roster entity.

/// Primary keys of locations, teams, participants, actions and attendance
/// rows (PostgreSQL BIGSERIAL).
pub type DbId = i64;

/// Creation, update and soft-delete instants, always UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
