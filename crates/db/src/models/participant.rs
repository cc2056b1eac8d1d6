//! Participant entity model and DTOs.

use roster_core::counters::Membership;
use roster_core::enums::{Batch, Department, Gender, ShirtSize};
use roster_core::error::CoreError;
use roster_core::schema::ParticipantFields;
use roster_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};
use validator::Validate;

/// A participant row from the `participants` table.
///
/// `gender` and `batch` are mutually exclusive; which one is populated
/// depends on the roster schema the row was written under.
#[derive(Debug, Clone, Serialize)]
pub struct Participant {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<Batch>,
    pub department: Department,
    pub shirt_size: Option<ShirtSize>,
    pub team_id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Participant {
    /// The counted team membership of this participant.
    pub fn membership(&self) -> Membership {
        Membership {
            team_id: self.team_id,
            gender: self.gender,
        }
    }
}

fn decode_text<T>(row: &PgRow, column: &str) -> Result<T, sqlx::Error>
where
    T: TryFrom<String, Error = CoreError>,
{
    let raw: String = row.try_get(column)?;
    T::try_from(raw).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn decode_optional_text<T>(row: &PgRow, column: &str) -> Result<Option<T>, sqlx::Error>
where
    T: TryFrom<String, Error = CoreError>,
{
    let raw: Option<String> = row.try_get(column)?;
    raw.map(T::try_from)
        .transpose()
        .map_err(|e| sqlx::Error::ColumnDecode {
            index: column.to_string(),
            source: Box::new(e),
        })
}

impl<'r> FromRow<'r, PgRow> for Participant {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            email: row.try_get("email")?,
            phone: row.try_get("phone")?,
            gender: decode_optional_text(row, "gender")?,
            batch: decode_optional_text(row, "batch")?,
            department: decode_text(row, "department")?,
            shirt_size: decode_optional_text(row, "shirt_size")?,
            team_id: row.try_get("team_id")?,
            deleted_at: row.try_get("deleted_at")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

/// DTO for creating or fully replacing a participant.
///
/// Field-level checks run through [`Validate`]; the schema-dependent
/// required/forbidden rules are checked separately against
/// [`CreateParticipant::fields`].
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateParticipant {
    #[validate(custom(function = "roster_core::validation::not_blank"))]
    pub name: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,
    #[validate(custom(function = "roster_core::validation::phone_number"))]
    pub phone: String,
    pub gender: Option<Gender>,
    pub batch: Option<Batch>,
    pub department: Department,
    pub shirt_size: Option<ShirtSize>,
    pub team_id: DbId,
}

/// Full-record update: every writable field is replaced.
pub type UpdateParticipant = CreateParticipant;

impl CreateParticipant {
    /// The schema-dependent subset of this write.
    pub fn fields(&self) -> ParticipantFields<'_> {
        ParticipantFields {
            gender: self.gender,
            batch: self.batch,
            email: self.email.as_deref(),
            shirt_size: self.shirt_size,
        }
    }

    /// The counted membership this write would produce.
    pub fn membership(&self) -> Membership {
        Membership {
            team_id: self.team_id,
            gender: self.gender,
        }
    }
}
