//! Attendance recording policy.
//!
//! An attendance submission either always inserts a new row or, by
//! default, reuses an existing active row for the same
//! `(action_id, participant_id)` pair.

/// Query flag value that selects [`DedupPolicy::AllowDuplicates`].
pub const ALLOW_DUPLICATES_TRUE: &str = "true";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DedupPolicy {
    /// Insert unconditionally, even if the pair is already recorded.
    AllowDuplicates,
    /// Find-or-create on the `(action_id, participant_id)` pair.
    #[default]
    RejectDuplicates,
}

impl DedupPolicy {
    /// Interpret the caller's `allow_duplicates` flag.
    ///
    /// Only `"true"` (any case, surrounding whitespace ignored) allows
    /// duplicates; every other value, or no value, rejects them.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some(v) if v.trim().eq_ignore_ascii_case(ALLOW_DUPLICATES_TRUE) => {
                DedupPolicy::AllowDuplicates
            }
            _ => DedupPolicy::RejectDuplicates,
        }
    }
}

/// Result of a find-or-create write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome<T> {
    /// A new row was inserted.
    Created(T),
    /// A matching row already existed and was returned unchanged.
    Existing(T),
}

impl<T> RecordOutcome<T> {
    pub fn is_created(&self) -> bool {
        matches!(self, RecordOutcome::Created(_))
    }

    pub fn record(&self) -> &T {
        match self {
            RecordOutcome::Created(r) | RecordOutcome::Existing(r) => r,
        }
    }

    pub fn into_record(self) -> T {
        match self {
            RecordOutcome::Created(r) | RecordOutcome::Existing(r) => r,
        }
    }
}
