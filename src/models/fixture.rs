//! Matches and match proposals.
//!
//! A committed [`Match`] was valid when it was created. Nothing here
//! re-checks it afterwards: revoking the covering permit leaves the match
//! in place.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{TeamRef, TimeWindow, Venue};

/// A committed booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Match identifier.
    pub id: String,
    /// Where the match is played.
    pub venue: Venue,
    /// Home side.
    pub home: TeamRef,
    /// Away side.
    pub away: TeamRef,
    /// Booked window.
    pub window: TimeWindow,
}

/// A match awaiting validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchProposal {
    /// Where the match would be played.
    pub venue: Venue,
    /// Home side.
    pub home: TeamRef,
    /// Away side.
    pub away: TeamRef,
    /// Requested window.
    pub window: TimeWindow,
}

impl Match {
    /// Creates a match.
    pub fn new(
        id: impl Into<String>,
        venue: Venue,
        home: TeamRef,
        away: TeamRef,
        window: TimeWindow,
    ) -> Self {
        Self {
            id: id.into(),
            venue,
            home,
            away,
            window,
        }
    }

    /// Creates a match between two stored teams on a club field.
    pub fn on_field(
        id: impl Into<String>,
        field_id: impl Into<String>,
        home_team_id: impl Into<String>,
        away_team_id: impl Into<String>,
        window: TimeWindow,
    ) -> Self {
        Self::new(
            id,
            Venue::field(field_id),
            TeamRef::existing(home_team_id),
            TeamRef::existing(away_team_id),
            window,
        )
    }

    /// Field identifier, if played on a club field.
    pub fn field_id(&self) -> Option<&str> {
        self.venue.field_id()
    }

    /// Whether the stored team `team_id` plays in this match.
    pub fn involves(&self, team_id: &str) -> bool {
        self.home.is(team_id) || self.away.is(team_id)
    }

    /// Whether this match occupies `field_id` at any point of `window`.
    ///
    /// Matches with a malformed window never conflict.
    pub fn conflicts_with(&self, field_id: &str, window: &TimeWindow) -> bool {
        self.field_id() == Some(field_id)
            && self.window.is_well_formed()
            && self.window.overlaps(window)
    }

    /// The same match moved to `new_start`, keeping its duration.
    ///
    /// `None` if the shifted end is not representable.
    pub fn rescheduled(&self, new_start: NaiveDateTime) -> Option<Self> {
        let window = self.window.shifted_to(new_start)?;
        Some(Self {
            window,
            ..self.clone()
        })
    }

    /// This match as a proposal, for re-validation.
    pub fn to_proposal(&self) -> MatchProposal {
        MatchProposal {
            venue: self.venue.clone(),
            home: self.home.clone(),
            away: self.away.clone(),
            window: self.window,
        }
    }
}

impl MatchProposal {
    /// Creates a proposal.
    pub fn new(venue: Venue, home: TeamRef, away: TeamRef, window: TimeWindow) -> Self {
        Self {
            venue,
            home,
            away,
            window,
        }
    }

    /// Creates a proposal between two stored teams on a club field.
    pub fn on_field(
        field_id: impl Into<String>,
        home_team_id: impl Into<String>,
        away_team_id: impl Into<String>,
        window: TimeWindow,
    ) -> Self {
        Self::new(
            Venue::field(field_id),
            TeamRef::existing(home_team_id),
            TeamRef::existing(away_team_id),
            window,
        )
    }

    /// Stored team ids on either side.
    pub fn team_ids(&self) -> impl Iterator<Item = &str> {
        self.home.id().into_iter().chain(self.away.id())
    }

    /// Commits this proposal under `id`.
    ///
    /// Persisting the result is the caller's job, and only after validation
    /// has passed.
    pub fn into_match(self, id: impl Into<String>) -> Match {
        Match {
            id: id.into(),
            venue: self.venue,
            home: self.home,
            away: self.away,
            window: self.window,
        }
    }
}
