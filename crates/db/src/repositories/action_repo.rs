//! Repository for the `actions` table.

use roster_core::types::DbId;
use sqlx::PgPool;

use crate::models::action::{Action, CreateAction, UpdateAction};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, valid, deleted_at, created_at, updated_at";

/// Provides CRUD operations for actions.
pub struct ActionRepo;

impl ActionRepo {
    /// Insert a new action, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAction) -> Result<Action, sqlx::Error> {
        let query = format!(
            "INSERT INTO actions (title, valid)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(input.title.trim())
            .bind(input.valid)
            .fetch_one(pool)
            .await
    }

    /// Find an action by ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Action>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM actions WHERE id = $1 AND deleted_at IS NULL");
        sqlx::query_as::<_, Action>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an action by ID, including soft-deleted rows.
    pub async fn find_by_id_include_deleted(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Action>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM actions WHERE id = $1");
        sqlx::query_as::<_, Action>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List active actions in insertion order.
    ///
    /// With `valid_only`, actions whose `valid` flag is false are skipped.
    pub async fn list(pool: &PgPool, valid_only: bool) -> Result<Vec<Action>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM actions
             WHERE deleted_at IS NULL AND (valid OR NOT $1)
             ORDER BY id"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(valid_only)
            .fetch_all(pool)
            .await
    }

    /// Fetch the active actions among `ids`, in insertion order.
    pub async fn find_many(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Action>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!(
            "SELECT {COLUMNS} FROM actions
             WHERE id = ANY($1) AND deleted_at IS NULL
             ORDER BY id"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Replace every writable field of an active action.
    ///
    /// Returns `None` if no active row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAction,
    ) -> Result<Option<Action>, sqlx::Error> {
        let query = format!(
            "UPDATE actions SET title = $2, valid = $3
             WHERE id = $1 AND deleted_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Action>(&query)
            .bind(id)
            .bind(input.title.trim())
            .bind(input.valid)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete an action by ID. Returns `true` if a row was marked deleted.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE actions SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
