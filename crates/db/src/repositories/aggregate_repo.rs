//! Assembles the nested read shapes in [`crate::models::aggregate`].
//!
//! Every shape is built with one query per level of the traversal, batched
//! with `= ANY($1)` over the ids collected from the level above, then
//! stitched together in memory. No per-row queries.

use std::collections::{HashMap, HashSet};

use roster_core::types::DbId;
use sqlx::PgPool;

use crate::models::aggregate::{
    ActionWithAttendance, ActionWithFullData, AttendanceWithAction, AttendanceWithContext,
    AttendanceWithParticipant, LocationWithTeams, ParticipantWithTeam, TeamWithLocation,
    TeamWithRoster,
};
use crate::models::attendance::Attendance;
use crate::models::location::Location;
use crate::models::participant::Participant;
use crate::models::team::Team;
use crate::repositories::{ActionRepo, AttendanceRepo, LocationRepo, ParticipantRepo, TeamRepo};

/// Read-only composer for the nested shapes.
pub struct AggregateRepo;

impl AggregateRepo {
    // -- Teams -----------------------------------------------------------

    /// `TeamWithRoster` for one active team.
    pub async fn team_with_roster(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<TeamWithRoster>, sqlx::Error> {
        let Some(team) = TeamRepo::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        Ok(Self::compose_rosters(pool, vec![team]).await?.pop())
    }

    /// `TeamWithRoster` for every active team.
    pub async fn teams_with_roster(pool: &PgPool) -> Result<Vec<TeamWithRoster>, sqlx::Error> {
        let teams = TeamRepo::list(pool).await?;
        Self::compose_rosters(pool, teams).await
    }

    async fn compose_rosters(
        pool: &PgPool,
        teams: Vec<Team>,
    ) -> Result<Vec<TeamWithRoster>, sqlx::Error> {
        let team_ids: Vec<DbId> = teams.iter().map(|t| t.id).collect();
        let location_ids = unique_ids(teams.iter().map(|t| t.location_id));

        let locations = index_by_id(LocationRepo::find_many(pool, &location_ids).await?, |l| l.id);
        let mut members = group_by(ParticipantRepo::list_by_teams(pool, &team_ids).await?, |p| {
            p.team_id
        });

        Ok(teams
            .into_iter()
            .map(|team| TeamWithRoster {
                location: locations.get(&team.location_id).cloned(),
                members: members.remove(&team.id).unwrap_or_default(),
                team,
            })
            .collect())
    }

    // -- Participants ----------------------------------------------------

    /// `ParticipantWithTeam` for one active participant.
    pub async fn participant_with_team(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ParticipantWithTeam>, sqlx::Error> {
        let Some(participant) = ParticipantRepo::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        Ok(Self::compose_participants(pool, vec![participant])
            .await?
            .pop())
    }

    /// `ParticipantWithTeam` for every active participant.
    pub async fn participants_with_team(
        pool: &PgPool,
    ) -> Result<Vec<ParticipantWithTeam>, sqlx::Error> {
        let participants = ParticipantRepo::list(pool).await?;
        Self::compose_participants(pool, participants).await
    }

    async fn compose_participants(
        pool: &PgPool,
        participants: Vec<Participant>,
    ) -> Result<Vec<ParticipantWithTeam>, sqlx::Error> {
        let team_ids = unique_ids(participants.iter().map(|p| p.team_id));
        let teams = Self::teams_with_location(pool, &team_ids).await?;

        Ok(participants
            .into_iter()
            .map(|participant| ParticipantWithTeam {
                team: teams.get(&participant.team_id).cloned(),
                participant,
            })
            .collect())
    }

    /// Active teams among `ids` joined to their locations, keyed by team id.
    async fn teams_with_location(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<HashMap<DbId, TeamWithLocation>, sqlx::Error> {
        let teams = TeamRepo::find_many(pool, ids).await?;
        let location_ids = unique_ids(teams.iter().map(|t| t.location_id));
        let locations = index_by_id(LocationRepo::find_many(pool, &location_ids).await?, |l| l.id);

        Ok(teams
            .into_iter()
            .map(|team| {
                let location = locations.get(&team.location_id).cloned();
                (team.id, TeamWithLocation { team, location })
            })
            .collect())
    }

    // -- Locations -------------------------------------------------------

    /// `LocationWithTeams` for one active location.
    pub async fn location_with_teams(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<LocationWithTeams>, sqlx::Error> {
        let Some(location) = LocationRepo::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        Ok(Self::compose_locations(pool, vec![location]).await?.pop())
    }

    /// `LocationWithTeams` for every active location.
    pub async fn locations_with_teams(
        pool: &PgPool,
    ) -> Result<Vec<LocationWithTeams>, sqlx::Error> {
        let locations = LocationRepo::list(pool).await?;
        Self::compose_locations(pool, locations).await
    }

    async fn compose_locations(
        pool: &PgPool,
        locations: Vec<Location>,
    ) -> Result<Vec<LocationWithTeams>, sqlx::Error> {
        let location_ids: Vec<DbId> = locations.iter().map(|l| l.id).collect();
        let mut teams = group_by(
            TeamRepo::list_by_locations(pool, &location_ids).await?,
            |t| t.location_id,
        );

        Ok(locations
            .into_iter()
            .map(|location| LocationWithTeams {
                teams: teams.remove(&location.id).unwrap_or_default(),
                location,
            })
            .collect())
    }

    // -- Attendance ------------------------------------------------------

    /// `AttendanceWithContext` for one active attendance row.
    pub async fn attendance_with_context(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AttendanceWithContext>, sqlx::Error> {
        let Some(attendance) = AttendanceRepo::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        Ok(Self::compose_attendance(pool, vec![attendance])
            .await?
            .pop())
    }

    /// `AttendanceWithContext` for every active attendance row.
    pub async fn attendance_list_with_context(
        pool: &PgPool,
    ) -> Result<Vec<AttendanceWithContext>, sqlx::Error> {
        let rows = AttendanceRepo::list(pool).await?;
        Self::compose_attendance(pool, rows).await
    }

    async fn compose_attendance(
        pool: &PgPool,
        rows: Vec<Attendance>,
    ) -> Result<Vec<AttendanceWithContext>, sqlx::Error> {
        let participant_ids = unique_ids(rows.iter().map(|a| a.participant_id));
        let action_ids = unique_ids(rows.iter().map(|a| a.action_id));

        let participants = index_by_id(
            ParticipantRepo::find_many(pool, &participant_ids).await?,
            |p| p.id,
        );
        let actions = index_by_id(ActionRepo::find_many(pool, &action_ids).await?, |a| a.id);

        Ok(rows
            .into_iter()
            .map(|attendance| AttendanceWithContext {
                participant: participants.get(&attendance.participant_id).cloned(),
                action: actions.get(&attendance.action_id).cloned(),
                attendance,
            })
            .collect())
    }

    // -- Actions ---------------------------------------------------------

    /// `ActionsValidOnly`: valid actions, each with its attendance rows and
    /// each row's action.
    pub async fn actions_valid_only(
        pool: &PgPool,
    ) -> Result<Vec<ActionWithAttendance>, sqlx::Error> {
        let actions = ActionRepo::list(pool, true).await?;
        let action_ids: Vec<DbId> = actions.iter().map(|a| a.id).collect();
        let mut attendance = group_by(
            AttendanceRepo::list_by_actions(pool, &action_ids).await?,
            |a| a.action_id,
        );

        Ok(actions
            .into_iter()
            .map(|action| {
                let rows = attendance
                    .remove(&action.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|attendance| AttendanceWithAction {
                        attendance,
                        action: Some(action.clone()),
                    })
                    .collect();
                ActionWithAttendance {
                    action,
                    attendance: rows,
                }
            })
            .collect())
    }

    /// `ActionsWithFullData`: every active action, valid or not, with
    /// attendance -> participant -> team -> location.
    pub async fn actions_with_full_data(
        pool: &PgPool,
    ) -> Result<Vec<ActionWithFullData>, sqlx::Error> {
        let actions = ActionRepo::list(pool, false).await?;
        let action_ids: Vec<DbId> = actions.iter().map(|a| a.id).collect();
        let rows = AttendanceRepo::list_by_actions(pool, &action_ids).await?;

        let participant_ids = unique_ids(rows.iter().map(|a| a.participant_id));
        let participants = index_by_id(
            Self::compose_participants(
                pool,
                ParticipantRepo::find_many(pool, &participant_ids).await?,
            )
            .await?,
            |p| p.participant.id,
        );

        let mut attendance = group_by(rows, |a| a.action_id);

        Ok(actions
            .into_iter()
            .map(|action| {
                let rows = attendance
                    .remove(&action.id)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|attendance| AttendanceWithParticipant {
                        participant: participants.get(&attendance.participant_id).cloned(),
                        action: Some(action.clone()),
                        attendance,
                    })
                    .collect();
                ActionWithFullData {
                    action,
                    attendance: rows,
                }
            })
            .collect())
    }
}

/// Distinct ids in first-seen order.
fn unique_ids(ids: impl Iterator<Item = DbId>) -> Vec<DbId> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}

fn index_by_id<T>(items: Vec<T>, key: impl Fn(&T) -> DbId) -> HashMap<DbId, T> {
    items.into_iter().map(|item| (key(&item), item)).collect()
}

/// Group rows by a foreign key, preserving the input order within each group.
fn group_by<T>(items: Vec<T>, key: impl Fn(&T) -> DbId) -> HashMap<DbId, Vec<T>> {
    let mut groups: HashMap<DbId, Vec<T>> = HashMap::new();
    for item in items {
        groups.entry(key(&item)).or_default().push(item);
    }
    groups
}
