//! Fixture builders shared by the repository integration tests.

#![allow(dead_code)]

use roster_core::enums::{Department, Gender, ProjectType, ShirtSize, Wing};
use roster_core::types::DbId;
use roster_db::models::action::{Action, CreateAction};
use roster_db::models::location::{CreateLocation, Location};
use roster_db::models::participant::{CreateParticipant, Participant};
use roster_db::models::team::{CreateTeam, Team};
use roster_db::repositories::{ActionRepo, LocationRepo, ParticipantRepo, TeamRepo};
use sqlx::PgPool;

pub fn new_location(name: &str) -> CreateLocation {
    CreateLocation {
        name: name.to_string(),
        wing: Wing::Cef,
        capacity: 4,
    }
}

pub fn new_team(location_id: DbId, name: &str) -> CreateTeam {
    CreateTeam {
        name: name.to_string(),
        project_type: ProjectType::Software,
        location_id,
    }
}

pub fn new_participant(team_id: DbId, name: &str, gender: Gender) -> CreateParticipant {
    CreateParticipant {
        name: name.to_string(),
        email: Some(format!("{}@example.com", name.to_lowercase().replace(' ', "."))),
        phone: "9876543210".to_string(),
        gender: Some(gender),
        batch: None,
        department: Department::It,
        shirt_size: Some(ShirtSize::M),
        team_id,
    }
}

pub fn new_action(title: &str, valid: bool) -> CreateAction {
    CreateAction {
        title: title.to_string(),
        valid,
    }
}

pub async fn seed_location(pool: &PgPool, name: &str) -> Location {
    LocationRepo::create(pool, &new_location(name)).await.unwrap()
}

pub async fn seed_team(pool: &PgPool, name: &str) -> Team {
    let location = seed_location(pool, &format!("{name} Lab")).await;
    TeamRepo::create(pool, &new_team(location.id, name))
        .await
        .unwrap()
}

pub async fn seed_participant(
    pool: &PgPool,
    team_id: DbId,
    name: &str,
    gender: Gender,
) -> Participant {
    ParticipantRepo::create(pool, &new_participant(team_id, name, gender), true)
        .await
        .unwrap()
}

pub async fn seed_action(pool: &PgPool, title: &str, valid: bool) -> Action {
    ActionRepo::create(pool, &new_action(title, valid))
        .await
        .unwrap()
}
