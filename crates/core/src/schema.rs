//! Deployment-selected participant field sets.
//!
//! Earlier deployments classified participants by gender and maintained
//! per-team gender counters; later ones replaced gender with a batch (year
//! of study) and relaxed the shirt size requirement. Both columns exist in
//! storage; the active [`RosterSchema`] decides which ones a write must
//! carry.

use std::fmt;
use std::str::FromStr;

use crate::enums::{Batch, Gender, ShirtSize};
use crate::error::CoreError;

pub const SCHEMA_GENDER: &str = "gender";
pub const SCHEMA_BATCH: &str = "batch";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RosterSchema {
    #[default]
    Gender,
    Batch,
}

impl RosterSchema {
    pub fn as_str(self) -> &'static str {
        match self {
            RosterSchema::Gender => SCHEMA_GENDER,
            RosterSchema::Batch => SCHEMA_BATCH,
        }
    }

    /// Whether team gender counters can be maintained under this schema.
    pub fn supports_gender_counting(self) -> bool {
        matches!(self, RosterSchema::Gender)
    }

    pub fn field_set(self) -> ParticipantFieldSet {
        match self {
            RosterSchema::Gender => ParticipantFieldSet {
                gender: Requirement::Required,
                batch: Requirement::Forbidden,
                email: Requirement::Required,
                shirt_size: Requirement::Required,
            },
            RosterSchema::Batch => ParticipantFieldSet {
                gender: Requirement::Forbidden,
                batch: Requirement::Required,
                email: Requirement::Required,
                shirt_size: Requirement::Optional,
            },
        }
    }
}

impl fmt::Display for RosterSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RosterSchema {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            SCHEMA_GENDER => Ok(RosterSchema::Gender),
            SCHEMA_BATCH => Ok(RosterSchema::Batch),
            other => Err(CoreError::Validation(format!(
                "Invalid roster schema: '{other}'. Must be one of: {SCHEMA_GENDER}, {SCHEMA_BATCH}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
    Forbidden,
}

impl Requirement {
    fn check(self, field: &str, present: bool) -> Result<(), CoreError> {
        match (self, present) {
            (Requirement::Required, false) => {
                Err(CoreError::Validation(format!("{field} is required")))
            }
            (Requirement::Forbidden, true) => Err(CoreError::Validation(format!(
                "{field} is not part of the active roster schema"
            ))),
            _ => Ok(()),
        }
    }
}

/// Which schema-dependent participant fields must, may, or must not be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticipantFieldSet {
    pub gender: Requirement,
    pub batch: Requirement,
    pub email: Requirement,
    pub shirt_size: Requirement,
}

/// The schema-dependent subset of a participant write.
#[derive(Debug, Clone, Copy)]
pub struct ParticipantFields<'a> {
    pub gender: Option<Gender>,
    pub batch: Option<Batch>,
    pub email: Option<&'a str>,
    pub shirt_size: Option<ShirtSize>,
}

impl ParticipantFieldSet {
    /// Check a participant write against this field set.
    ///
    /// A blank email counts as absent.
    pub fn validate(&self, fields: &ParticipantFields<'_>) -> Result<(), CoreError> {
        self.gender.check("gender", fields.gender.is_some())?;
        self.batch.check("batch", fields.batch.is_some())?;
        self.email.check(
            "email",
            fields.email.is_some_and(|e| !e.trim().is_empty()),
        )?;
        self.shirt_size
            .check("shirt_size", fields.shirt_size.is_some())?;
        Ok(())
    }
}
