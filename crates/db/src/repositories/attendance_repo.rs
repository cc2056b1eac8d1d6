//! Repository for the `attendance` table and the attendance recording policy.

use roster_core::attendance::{DedupPolicy, RecordOutcome};
use roster_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::attendance::{Attendance, CreateAttendance};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, action_id, participant_id, deleted_at, created_at, updated_at";

/// Provides CRUD operations for attendance rows.
pub struct AttendanceRepo;

impl AttendanceRepo {
    /// Insert a new attendance row unconditionally.
    pub async fn create<'e, E>(executor: E, input: &CreateAttendance) -> Result<Attendance, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "INSERT INTO attendance (action_id, participant_id)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(input.action_id)
            .bind(input.participant_id)
            .fetch_one(executor)
            .await
    }

    /// Record attendance under the given duplicate policy.
    ///
    /// - [`DedupPolicy::AllowDuplicates`] always inserts.
    /// - [`DedupPolicy::RejectDuplicates`] returns the oldest active row for
    ///   the same `(action_id, participant_id)` pair as
    ///   [`RecordOutcome::Existing`], inserting only when none exists.
    ///
    /// The reject path holds a transaction-scoped advisory lock keyed on
    /// the pair, so concurrent identical submissions cannot both insert.
    pub async fn record(
        pool: &PgPool,
        input: &CreateAttendance,
        policy: DedupPolicy,
    ) -> Result<RecordOutcome<Attendance>, sqlx::Error> {
        if policy == DedupPolicy::AllowDuplicates {
            let created = Self::create(pool, input).await?;
            return Ok(RecordOutcome::Created(created));
        }

        let mut tx = pool.begin().await?;

        sqlx::query(
            "SELECT pg_advisory_xact_lock(hashtextextended('attendance:' || $1::text || ':' || $2::text, 0))",
        )
        .bind(input.action_id)
        .bind(input.participant_id)
        .execute(&mut *tx)
        .await?;

        if let Some(existing) =
            Self::find_active_by_pair(&mut *tx, input.action_id, input.participant_id).await?
        {
            tx.commit().await?;
            return Ok(RecordOutcome::Existing(existing));
        }

        let created = Self::create(&mut *tx, input).await?;
        tx.commit().await?;
        Ok(RecordOutcome::Created(created))
    }

    /// The oldest active attendance row for an `(action_id, participant_id)` pair.
    pub async fn find_active_by_pair<'e, E>(
        executor: E,
        action_id: DbId,
        participant_id: DbId,
    ) -> Result<Option<Attendance>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let query = format!(
            "SELECT {COLUMNS} FROM attendance
             WHERE action_id = $1 AND participant_id = $2 AND deleted_at IS NULL
             ORDER BY id
             LIMIT 1"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(action_id)
            .bind(participant_id)
            .fetch_optional(executor)
            .await
    }

    /// Number of active rows for an `(action_id, participant_id)` pair.
    pub async fn count_by_pair(
        pool: &PgPool,
        action_id: DbId,
        participant_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM attendance
             WHERE action_id = $1 AND participant_id = $2 AND deleted_at IS NULL",
        )
        .bind(action_id)
        .bind(participant_id)
        .fetch_one(pool)
        .await
    }

    /// Find an attendance row by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Attendance>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM attendance WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Attendance>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an attendance row by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Attendance>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM attendance WHERE id = $1");
        sqlx::query_as::<_, Attendance>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all active attendance rows in insertion order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Attendance>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM attendance WHERE deleted_at IS NULL ORDER BY id");
        sqlx::query_as::<_, Attendance>(&query).fetch_all(pool).await
    }

    /// Active attendance rows for any of `action_ids`, in insertion order.
    pub async fn list_by_actions(
        pool: &PgPool,
        action_ids: &[DbId],
    ) -> Result<Vec<Attendance>, sqlx::Error> {
        if action_ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM attendance
             WHERE action_id = ANY($1) AND deleted_at IS NULL
             ORDER BY id"
        );
        sqlx::query_as::<_, Attendance>(&query)
            .bind(action_ids)
            .fetch_all(pool)
            .await
    }

    /// Soft-delete an attendance row by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE attendance SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
