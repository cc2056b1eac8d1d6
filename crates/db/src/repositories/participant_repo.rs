//! Repository for the `participants` table.
//!
//! The write paths take a `count_genders` switch. When it is on, every
//! insert, full-record update, and soft delete adjusts the owning teams'
//! gender counters inside the same transaction as the participant write.

use roster_core::counters::{membership_adjustments, CounterAdjustment};
use roster_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::participant::{CreateParticipant, Participant, UpdateParticipant};
use crate::repositories::TeamRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, gender, batch, department, shirt_size, team_id, \
                       deleted_at, created_at, updated_at";

/// Provides CRUD operations for participants.
pub struct ParticipantRepo;

impl ParticipantRepo {
    /// Insert a new participant, returning the created row.
    ///
    /// With `count_genders`, the owning team's matching counter is
    /// incremented by one in the same transaction.
    pub async fn create(
        pool: &PgPool,
        input: &CreateParticipant,
        count_genders: bool,
    ) -> Result<Participant, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO participants
                (name, email, phone, gender, batch, department, shirt_size, team_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let participant = sqlx::query_as::<_, Participant>(&query)
            .bind(input.name.trim())
            .bind(input.email.as_deref().map(str::trim))
            .bind(&input.phone)
            .bind(input.gender.map(|g| g.as_str()))
            .bind(input.batch.map(|b| b.as_str()))
            .bind(input.department.as_str())
            .bind(input.shirt_size.map(|s| s.as_str()))
            .bind(input.team_id)
            .fetch_one(&mut *tx)
            .await?;

        if count_genders {
            let adjustments = membership_adjustments(None, Some(participant.membership()));
            apply_adjustments(&mut tx, &adjustments).await?;
        }

        tx.commit().await?;
        Ok(participant)
    }

    /// Find a participant by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Participant>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM participants WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a participant by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM participants WHERE id = $1");
        sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all active participants in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Participant>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM participants WHERE deleted_at IS NULL ORDER BY id");
        sqlx::query_as::<_, Participant>(&query)
            .fetch_all(pool)
            .await
    }

    /// Fetch the active participants among `ids`, in insertion order.
    pub async fn find_many(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Participant>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM participants
             WHERE id = ANY($1) AND deleted_at IS NULL
             ORDER BY id"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Active participants belonging to any of `team_ids`, in insertion order.
    pub async fn list_by_teams(
        pool: &PgPool,
        team_ids: &[DbId],
    ) -> Result<Vec<Participant>, sqlx::Error> {
        if team_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM participants
             WHERE team_id = ANY($1) AND deleted_at IS NULL
             ORDER BY id"
        );
        sqlx::query_as::<_, Participant>(&query)
            .bind(team_ids)
            .fetch_all(pool)
            .await
    }

    /// Replace every writable field of an active participant.
    ///
    /// With `count_genders`, a change of team or gender moves the tally
    /// from the old team/counter to the new one. Returns `None` if no
    /// active row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateParticipant,
        count_genders: bool,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let lock_query = format!(
            "SELECT {COLUMNS} FROM participants WHERE id = $1 AND deleted_at IS NULL FOR UPDATE"
        );
        let Some(before) = sqlx::query_as::<_, Participant>(&lock_query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let query = format!(
            "UPDATE participants SET
                name = $2, email = $3, phone = $4, gender = $5, batch = $6,
                department = $7, shirt_size = $8, team_id = $9
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let after = sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .bind(input.name.trim())
            .bind(input.email.as_deref().map(str::trim))
            .bind(&input.phone)
            .bind(input.gender.map(|g| g.as_str()))
            .bind(input.batch.map(|b| b.as_str()))
            .bind(input.department.as_str())
            .bind(input.shirt_size.map(|s| s.as_str()))
            .bind(input.team_id)
            .fetch_one(&mut *tx)
            .await?;

        if count_genders {
            let adjustments =
                membership_adjustments(Some(before.membership()), Some(after.membership()));
            apply_adjustments(&mut tx, &adjustments).await?;
        }

        tx.commit().await?;
        Ok(Some(after))
    }

    /// Soft-delete a participant by ID.
    ///
    /// Returns the row as it was marked deleted, or `None` if it was
    /// already deleted or never existed. With `count_genders`, the owning
    /// team's counter is decremented.
    pub async fn soft_delete(
        pool: &PgPool,
        id: DbId,
        count_genders: bool,
    ) -> Result<Option<Participant>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE participants SET deleted_at = NOW()
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        let deleted = sqlx::query_as::<_, Participant>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;

        if let (Some(participant), true) = (&deleted, count_genders) {
            let adjustments = membership_adjustments(Some(participant.membership()), None);
            apply_adjustments(&mut tx, &adjustments).await?;
        }

        tx.commit().await?;
        Ok(deleted)
    }
}

/// Apply counter adjustments inside an open transaction.
///
/// A team that has disappeared since the participant write was validated
/// is skipped with a warning rather than failing the write.
async fn apply_adjustments(
    tx: &mut Transaction<'_, Postgres>,
    adjustments: &[CounterAdjustment],
) -> Result<(), sqlx::Error> {
    for adjustment in adjustments {
        let applied = TeamRepo::adjust_gender_count(&mut **tx, adjustment).await?;
        if applied {
            tracing::debug!(
                team_id = adjustment.team_id,
                gender = %adjustment.gender,
                delta = adjustment.delta,
                "Adjusted team gender counter"
            );
        } else {
            tracing::warn!(
                team_id = adjustment.team_id,
                gender = %adjustment.gender,
                delta = adjustment.delta,
                "Team not found for counter adjustment, skipping"
            );
        }
    }
    Ok(())
}
