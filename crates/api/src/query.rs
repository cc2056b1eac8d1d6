//! Query parameter types for API handlers.

use roster_core::attendance::DedupPolicy;
use serde::Deserialize;

/// `?allow_duplicates=` on attendance submission.
///
/// Kept as a raw string so unexpected values fall back to rejecting
/// duplicates instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct RecordAttendanceParams {
    pub allow_duplicates: Option<String>,
}

impl RecordAttendanceParams {
    pub fn policy(&self) -> DedupPolicy {
        DedupPolicy::from_flag(self.allow_duplicates.as_deref())
    }
}
