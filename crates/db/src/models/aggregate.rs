//! Nested read shapes.
//!
//! Each shape is a fixed traversal of the entity graph, flattened so the
//! root entity's own fields sit at the top level of the JSON object.
//! Single references are `null` when the referenced row is soft-deleted;
//! collections only ever contain active rows and may be empty.

use serde::Serialize;

use crate::models::action::Action;
use crate::models::attendance::Attendance;
use crate::models::location::Location;
use crate::models::participant::Participant;
use crate::models::team::Team;

/// Team + its location + its active participants.
#[derive(Debug, Clone, Serialize)]
pub struct TeamWithRoster {
    #[serde(flatten)]
    pub team: Team,
    pub location: Option<Location>,
    pub members: Vec<Participant>,
}

/// Team + its location (no participants).
#[derive(Debug, Clone, Serialize)]
pub struct TeamWithLocation {
    #[serde(flatten)]
    pub team: Team,
    pub location: Option<Location>,
}

/// Participant + its team + that team's location.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantWithTeam {
    #[serde(flatten)]
    pub participant: Participant,
    pub team: Option<TeamWithLocation>,
}

/// Location + its active teams (participants not included).
#[derive(Debug, Clone, Serialize)]
pub struct LocationWithTeams {
    #[serde(flatten)]
    pub location: Location,
    pub teams: Vec<Team>,
}

/// Attendance + its participant + its action.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceWithContext {
    #[serde(flatten)]
    pub attendance: Attendance,
    pub participant: Option<Participant>,
    pub action: Option<Action>,
}

/// Attendance + its action, nested under that same action.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceWithAction {
    #[serde(flatten)]
    pub attendance: Attendance,
    pub action: Option<Action>,
}

/// A valid action with its attendance rows (`ActionsValidOnly`).
#[derive(Debug, Clone, Serialize)]
pub struct ActionWithAttendance {
    #[serde(flatten)]
    pub action: Action,
    pub attendance: Vec<AttendanceWithAction>,
}

/// Attendance fully materialized down to the participant's location.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceWithParticipant {
    #[serde(flatten)]
    pub attendance: Attendance,
    pub action: Option<Action>,
    pub participant: Option<ParticipantWithTeam>,
}

/// Any action with attendance -> participant -> team -> location
/// (`ActionsWithFullData`).
#[derive(Debug, Clone, Serialize)]
pub struct ActionWithFullData {
    #[serde(flatten)]
    pub action: Action,
    pub attendance: Vec<AttendanceWithParticipant>,
}
