//! Integration tests for attendance recording and duplicate handling.

mod common;

use common::*;
use roster_core::attendance::{DedupPolicy, RecordOutcome};
use roster_core::enums::Gender;
use roster_db::models::attendance::CreateAttendance;
use roster_db::repositories::AttendanceRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_first_record_is_created(pool: PgPool) {
    let team = seed_team(&pool, "Attend").await;
    let p = seed_participant(&pool, team.id, "Nina", Gender::Female).await;
    let action = seed_action(&pool, "Check-in", true).await;

    let outcome = AttendanceRepo::record(
        &pool,
        &CreateAttendance {
            action_id: action.id,
            participant_id: p.id,
        },
        DedupPolicy::RejectDuplicates,
    )
    .await
    .unwrap();

    assert!(outcome.is_created());
    assert_eq!(outcome.record().action_id, action.id);
    assert_eq!(outcome.record().participant_id, p.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_returns_existing_row(pool: PgPool) {
    let team = seed_team(&pool, "Dedup").await;
    let p = seed_participant(&pool, team.id, "Om", Gender::Male).await;
    let action = seed_action(&pool, "Lunch", true).await;
    let input = CreateAttendance {
        action_id: action.id,
        participant_id: p.id,
    };

    let first = AttendanceRepo::record(&pool, &input, DedupPolicy::RejectDuplicates)
        .await
        .unwrap()
        .into_record();
    let second = AttendanceRepo::record(&pool, &input, DedupPolicy::RejectDuplicates)
        .await
        .unwrap();

    match second {
        RecordOutcome::Existing(existing) => assert_eq!(existing.id, first.id),
        RecordOutcome::Created(_) => panic!("duplicate should not insert"),
    }
    assert_eq!(
        AttendanceRepo::count_by_pair(&pool, action.id, p.id).await.unwrap(),
        1
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_allow_duplicates_inserts_every_time(pool: PgPool) {
    let team = seed_team(&pool, "Dupes").await;
    let p = seed_participant(&pool, team.id, "Priya", Gender::Female).await;
    let action = seed_action(&pool, "Snack", true).await;
    let input = CreateAttendance {
        action_id: action.id,
        participant_id: p.id,
    };

    for _ in 0..3 {
        let outcome = AttendanceRepo::record(&pool, &input, DedupPolicy::AllowDuplicates)
            .await
            .unwrap();
        assert!(outcome.is_created());
    }

    assert_eq!(
        AttendanceRepo::count_by_pair(&pool, action.id, p.id).await.unwrap(),
        3
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_row_does_not_block_new_record(pool: PgPool) {
    let team = seed_team(&pool, "Redo").await;
    let p = seed_participant(&pool, team.id, "Qadir", Gender::Male).await;
    let action = seed_action(&pool, "Dinner", true).await;
    let input = CreateAttendance {
        action_id: action.id,
        participant_id: p.id,
    };

    let first = AttendanceRepo::record(&pool, &input, DedupPolicy::RejectDuplicates)
        .await
        .unwrap()
        .into_record();
    assert!(AttendanceRepo::soft_delete(&pool, first.id).await.unwrap());

    let second = AttendanceRepo::record(&pool, &input, DedupPolicy::RejectDuplicates)
        .await
        .unwrap();
    assert!(second.is_created());
    assert_ne!(second.record().id, first.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_concurrent_duplicates_insert_once(pool: PgPool) {
    let team = seed_team(&pool, "Race").await;
    let p = seed_participant(&pool, team.id, "Ria", Gender::Female).await;
    let action = seed_action(&pool, "Midnight", true).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let pool = pool.clone();
        let input = CreateAttendance {
            action_id: action.id,
            participant_id: p.id,
        };
        handles.push(tokio::spawn(async move {
            AttendanceRepo::record(&pool, &input, DedupPolicy::RejectDuplicates).await
        }));
    }

    let mut created = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap().is_created() {
            created += 1;
        }
    }

    assert_eq!(created, 1, "exactly one submission should insert");
    assert_eq!(
        AttendanceRepo::count_by_pair(&pool, action.id, p.id).await.unwrap(),
        1
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_soft_delete_twice_reports_false(pool: PgPool) {
    let team = seed_team(&pool, "Twice").await;
    let p = seed_participant(&pool, team.id, "Sam", Gender::Male).await;
    let action = seed_action(&pool, "Talk", true).await;
    let row = AttendanceRepo::create(
        &pool,
        &CreateAttendance {
            action_id: action.id,
            participant_id: p.id,
        },
    )
    .await
    .unwrap();

    assert!(AttendanceRepo::soft_delete(&pool, row.id).await.unwrap());
    assert!(!AttendanceRepo::soft_delete(&pool, row.id).await.unwrap());

    let kept = AttendanceRepo::find_by_id_include_deleted(&pool, row.id)
        .await
        .unwrap()
        .expect("row remains in storage");
    assert!(kept.deleted_at.is_some());
    assert!(AttendanceRepo::find_by_id(&pool, row.id).await.unwrap().is_none());
}
