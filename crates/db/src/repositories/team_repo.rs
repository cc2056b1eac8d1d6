//! Repository for the `teams` table, including the gender counters.

use roster_core::counters::{counter_column, CounterAdjustment, GenderTally};
use roster_core::enums::Gender;
use roster_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::team::{CreateTeam, Team, UpdateTeam};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, project_type, male_count, female_count, location_id, \
                       deleted_at, created_at, updated_at";

/// Provides CRUD operations for teams and maintains their gender counters.
pub struct TeamRepo;

impl TeamRepo {
    /// Insert a new team with both counters at zero, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTeam) -> Result<Team, sqlx::Error> {
        let query = format!(
            "INSERT INTO teams (name, project_type, location_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(input.name.trim())
            .bind(input.project_type.as_str())
            .bind(input.location_id)
            .fetch_one(pool)
            .await
    }

    /// Find a team by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a team by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE id = $1");
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all active teams in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Team>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM teams WHERE deleted_at IS NULL ORDER BY id");
        sqlx::query_as::<_, Team>(&query).fetch_all(pool).await
    }

    /// Fetch the active teams among `ids`, in insertion order.
    pub async fn find_many(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Team>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM teams
             WHERE id = ANY($1) AND deleted_at IS NULL
             ORDER BY id"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Active teams hosted by any of `location_ids`, in insertion order.
    pub async fn list_by_locations(
        pool: &PgPool,
        location_ids: &[DbId],
    ) -> Result<Vec<Team>, sqlx::Error> {
        if location_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM teams
             WHERE location_id = ANY($1) AND deleted_at IS NULL
             ORDER BY id"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(location_ids)
            .fetch_all(pool)
            .await
    }

    /// Replace every writable field of an active team. Counters are untouched.
    ///
    /// Returns `None` if no active row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTeam,
    ) -> Result<Option<Team>, sqlx::Error> {
        let query = format!(
            "UPDATE teams SET name = $2, project_type = $3, location_id = $4
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .bind(input.name.trim())
            .bind(input.project_type.as_str())
            .bind(input.location_id)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a team by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("UPDATE teams SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL")
                .bind(id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply one counter adjustment as a single atomic update.
    ///
    /// The counter never drops below zero. Returns `false` when the team is
    /// missing or soft-deleted, in which case nothing changes.
    pub async fn adjust_gender_count<'e, E>(
        executor: E,
        adjustment: &CounterAdjustment,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let column = counter_column(adjustment.gender);
        let query = format!(
            "UPDATE teams SET {column} = GREATEST({column} + $2, 0)
             WHERE id = $1 AND deleted_at IS NULL"
        );
        let result = sqlx::query(&query)
            .bind(adjustment.team_id)
            .bind(adjustment.delta)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Recompute both counters from the team's active participants.
    ///
    /// The team row is locked for the duration so concurrent counter
    /// adjustments queue behind the recount instead of being overwritten.
    /// Returns `None` if no active team with the given `id` exists.
    pub async fn recount(pool: &PgPool, id: DbId) -> Result<Option<Team>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let locked: Option<DbId> =
            sqlx::query_scalar("SELECT id FROM teams WHERE id = $1 AND deleted_at IS NULL FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if locked.is_none() {
            return Ok(None);
        }

        let genders: Vec<String> = sqlx::query_scalar(
            "SELECT gender FROM participants
             WHERE team_id = $1 AND deleted_at IS NULL AND gender IS NOT NULL",
        )
        .bind(id)
        .fetch_all(&mut *tx)
        .await?;

        // Decoded the same way `Participant` rows are, so bad data fails loudly.
        let genders = genders
            .into_iter()
            .map(|raw| {
                Gender::try_from(raw).map_err(|e| sqlx::Error::ColumnDecode {
                    index: "gender".to_string(),
                    source: Box::new(e),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let tally = GenderTally::from_genders(genders);

        let query = format!(
            "UPDATE teams SET male_count = $2, female_count = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let team = sqlx::query_as::<_, Team>(&query)
            .bind(id)
            .bind(tally.male_count)
            .bind(tally.female_count)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(team))
    }
}
