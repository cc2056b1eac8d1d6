//! Team gender counter arithmetic.
//!
//! Teams cache `male_count` / `female_count`. The repository layer applies
//! the adjustments computed here as atomic `SET col = col + delta` updates;
//! [`GenderTally`] is also the result of recounting from source.

use serde::Serialize;

use crate::enums::Gender;
use crate::types::DbId;

/// The team column that tallies the given gender.
pub fn counter_column(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "male_count",
        Gender::Female => "female_count",
    }
}

/// Male / female head count for one team.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderTally {
    pub male_count: i32,
    pub female_count: i32,
}

impl GenderTally {
    pub fn from_genders<I>(genders: I) -> Self
    where
        I: IntoIterator<Item = Gender>,
    {
        genders.into_iter().fold(Self::default(), |mut tally, g| {
            match g {
                Gender::Male => tally.male_count += 1,
                Gender::Female => tally.female_count += 1,
            }
            tally
        })
    }

    pub fn total(&self) -> i32 {
        self.male_count + self.female_count
    }
}

/// A single `+1` / `-1` to apply to one team's counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterAdjustment {
    pub team_id: DbId,
    pub gender: Gender,
    pub delta: i32,
}

/// A participant's counted membership: the team it is tallied under and its
/// gender. Participants without a gender are never counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Membership {
    pub team_id: DbId,
    pub gender: Option<Gender>,
}

/// Adjustments needed when a participant moves from `before` to `after`.
///
/// Pass `None` for `before` on creation and for `after` on deletion. An
/// unchanged membership produces no adjustments.
pub fn membership_adjustments(
    before: Option<Membership>,
    after: Option<Membership>,
) -> Vec<CounterAdjustment> {
    if before == after {
        return Vec::new();
    }

    let mut adjustments = Vec::with_capacity(2);
    if let Some(Membership {
        team_id,
        gender: Some(gender),
    }) = before
    {
        adjustments.push(CounterAdjustment {
            team_id,
            gender,
            delta: -1,
        });
    }
    if let Some(Membership {
        team_id,
        gender: Some(gender),
    }) = after
    {
        adjustments.push(CounterAdjustment {
            team_id,
            gender,
            delta: 1,
        });
    }
    adjustments
}
