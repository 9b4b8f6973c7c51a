//! Store records to domain models.
//!
//! Store records identify teams, venues and blackout scopes with plain
//! strings and overload some of them with sentinels:
//!
//! | Field | Sentinel | Model |
//! |-------|----------|-------|
//! | team id | `"TEMP"` | [`TeamRef::Temporary`] |
//! | field id | `"EXTERNAL"`, `"TEMP"` | [`Venue::External`] |
//! | blackout scope | `"ALL"` | [`BlackoutScope::Club`] |
//!
//! Conversion happens once, here. Windows with `end <= start` are rejected.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::SlotGrid;
use crate::error::{Error, Result};
use crate::models::{
    AvailabilityDeclaration, Blackout, BlackoutScope, Match, MatchProposal, Permit, TeamRef,
    TimeWindow, Venue,
};
use crate::validation::{validate_match, MatchValidation};
use crate::{availability, slots};

/// Team id marking an ad hoc opponent.
pub const TEMP_ID: &str = "TEMP";

/// Field id marking a venue outside the club.
pub const EXTERNAL_FIELD_ID: &str = "EXTERNAL";

/// A permit as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPermit {
    /// Record id.
    pub id: String,
    /// Field id.
    pub field_id: String,
    /// Window start.
    pub start: NaiveDateTime,
    /// Window end.
    pub end: NaiveDateTime,
}

/// A match as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMatch {
    /// Record id.
    pub id: String,
    /// Field id, or a venue sentinel.
    pub field_id: String,
    /// Venue name for external venues.
    #[serde(default)]
    pub field_name: Option<String>,
    /// Home team id, or `"TEMP"`.
    pub home_team_id: String,
    /// Home team display name.
    #[serde(default)]
    pub home_team_name: Option<String>,
    /// Away team id, or `"TEMP"`.
    pub away_team_id: String,
    /// Away team display name.
    #[serde(default)]
    pub away_team_name: Option<String>,
    /// Window start.
    pub start: NaiveDateTime,
    /// Window end.
    pub end: NaiveDateTime,
}

/// A blackout as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBlackout {
    /// Record id.
    pub id: String,
    /// Team id or `"ALL"`.
    pub scope: String,
    /// Window start.
    pub start: NaiveDateTime,
    /// Window end.
    pub end: NaiveDateTime,
    /// Free-text reason.
    #[serde(default)]
    pub reason: Option<String>,
}

/// An availability declaration as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAvailability {
    /// Record id.
    pub id: String,
    /// Declaring team.
    pub team_id: String,
    /// Window start.
    pub start: NaiveDateTime,
    /// Window end.
    pub end: NaiveDateTime,
    /// Free-text note.
    #[serde(default)]
    pub note: Option<String>,
}

/// A team request, either a blackout or an availability declaration.
///
/// Both kinds share one store collection and are told apart by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRequest {
    /// Record id.
    pub id: String,
    /// Requesting team, or `"ALL"` for a club-wide blackout.
    pub team_id: String,
    /// `"blackout"` or `"available"`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Window start.
    pub start: NaiveDateTime,
    /// Window end.
    pub end: NaiveDateTime,
    /// Blackout reason.
    #[serde(default)]
    pub reason: Option<String>,
    /// Availability note.
    #[serde(default)]
    pub note: Option<String>,
}

/// A request resolved to its model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Team or club unavailability.
    Blackout(Blackout),
    /// Team openness.
    Available(AvailabilityDeclaration),
}

fn team_ref(record: &str, id: String, name: Option<String>) -> Result<TeamRef> {
    if id.is_empty() {
        return Err(Error::MissingField {
            record: record.to_string(),
            field: "teamId",
        });
    }
    if id == TEMP_ID {
        let name = name.filter(|n| !n.is_empty()).ok_or_else(|| Error::MissingField {
            record: record.to_string(),
            field: "teamName",
        })?;
        return Ok(TeamRef::Temporary { name });
    }
    Ok(TeamRef::Existing {
        id,
        name: name.unwrap_or_default(),
    })
}

fn venue(record: &str, id: String, name: Option<String>) -> Result<Venue> {
    if id.is_empty() {
        return Err(Error::MissingField {
            record: record.to_string(),
            field: "fieldId",
        });
    }
    if id == EXTERNAL_FIELD_ID || id == TEMP_ID {
        return Ok(Venue::External {
            name: name.unwrap_or_default(),
        });
    }
    Ok(Venue::Field { id })
}

impl TryFrom<RawPermit> for Permit {
    type Error = Error;

    fn try_from(raw: RawPermit) -> Result<Self> {
        if raw.field_id.is_empty() {
            return Err(Error::MissingField {
                record: raw.id,
                field: "fieldId",
            });
        }
        let window = TimeWindow::new(raw.start, raw.end)?;
        Ok(Permit::new(raw.id, raw.field_id, window))
    }
}

impl TryFrom<RawMatch> for Match {
    type Error = Error;

    fn try_from(raw: RawMatch) -> Result<Self> {
        let window = TimeWindow::new(raw.start, raw.end)?;
        let venue = venue(&raw.id, raw.field_id, raw.field_name)?;
        let home = team_ref(&raw.id, raw.home_team_id, raw.home_team_name)?;
        let away = team_ref(&raw.id, raw.away_team_id, raw.away_team_name)?;
        Ok(Match::new(raw.id, venue, home, away, window))
    }
}

impl TryFrom<RawBlackout> for Blackout {
    type Error = Error;

    fn try_from(raw: RawBlackout) -> Result<Self> {
        if raw.scope.is_empty() {
            return Err(Error::MissingField {
                record: raw.id,
                field: "scope",
            });
        }
        let window = TimeWindow::new(raw.start, raw.end)?;
        Ok(Blackout::new(raw.id, BlackoutScope::from(raw.scope), window)
            .with_reason(raw.reason.unwrap_or_default()))
    }
}

impl TryFrom<RawAvailability> for AvailabilityDeclaration {
    type Error = Error;

    fn try_from(raw: RawAvailability) -> Result<Self> {
        let window = TimeWindow::new(raw.start, raw.end)?;
        Ok(AvailabilityDeclaration {
            id: raw.id,
            team_id: raw.team_id,
            window,
            note: raw.note.filter(|n| !n.is_empty()),
        })
    }
}

impl TryFrom<RawRequest> for Request {
    type Error = Error;

    fn try_from(raw: RawRequest) -> Result<Self> {
        match raw.kind.as_str() {
            "blackout" => Blackout::try_from(RawBlackout {
                id: raw.id,
                scope: raw.team_id,
                start: raw.start,
                end: raw.end,
                reason: raw.reason,
            })
            .map(Request::Blackout),
            "available" => AvailabilityDeclaration::try_from(RawAvailability {
                id: raw.id,
                team_id: raw.team_id,
                start: raw.start,
                end: raw.end,
                note: raw.note,
            })
            .map(Request::Available),
            _ => Err(Error::UnknownRequestKind(raw.kind)),
        }
    }
}

/// Raw store contents, as delivered by the change feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSnapshot {
    /// Field permits.
    pub permits: Vec<RawPermit>,
    /// Committed matches.
    pub matches: Vec<RawMatch>,
    /// Blackouts stored on their own.
    pub blackouts: Vec<RawBlackout>,
    /// Declarations stored on their own.
    pub availability: Vec<RawAvailability>,
    /// Mixed blackout/availability requests.
    pub requests: Vec<RawRequest>,
}

/// Immutable, typed view of the stores at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Field permits.
    pub permits: Vec<Permit>,
    /// Committed matches.
    pub matches: Vec<Match>,
    /// Blackouts.
    pub blackouts: Vec<Blackout>,
    /// Availability declarations.
    pub declarations: Vec<AvailabilityDeclaration>,
}

fn keep<R, T>(raw: Vec<R>, rejected: &mut Vec<Error>) -> Vec<T>
where
    T: TryFrom<R, Error = Error>,
{
    raw.into_iter()
        .filter_map(|r| match T::try_from(r) {
            Ok(t) => Some(t),
            Err(e) => {
                warn!(error = %e, "skipping store record");
                rejected.push(e);
                None
            }
        })
        .collect()
}

impl Snapshot {
    /// Converts raw records, skipping (and returning) the malformed ones.
    pub fn from_raw(raw: RawSnapshot) -> (Self, Vec<Error>) {
        let mut rejected = Vec::new();
        let mut snapshot = Snapshot {
            permits: keep(raw.permits, &mut rejected),
            matches: keep(raw.matches, &mut rejected),
            blackouts: keep(raw.blackouts, &mut rejected),
            declarations: keep(raw.availability, &mut rejected),
        };
        for request in keep::<RawRequest, Request>(raw.requests, &mut rejected) {
            match request {
                Request::Blackout(b) => snapshot.blackouts.push(b),
                Request::Available(d) => snapshot.declarations.push(d),
            }
        }
        (snapshot, rejected)
    }

    /// Valid `HH:MM` kickoff times on the default grid.
    pub fn enumerate_slots(
        &self,
        field_id: &str,
        date: NaiveDate,
        duration_minutes: i64,
    ) -> Vec<String> {
        slots::enumerate_slots(
            field_id,
            date,
            duration_minutes,
            &self.permits,
            &self.matches,
            &self.blackouts,
        )
    }

    /// Valid kickoff times on an explicit grid.
    pub fn enumerate_slots_with(
        &self,
        grid: &SlotGrid,
        field_id: &str,
        date: NaiveDate,
        duration_minutes: i64,
    ) -> Vec<NaiveTime> {
        slots::enumerate_slots_with(
            grid,
            field_id,
            date,
            duration_minutes,
            &self.permits,
            &self.matches,
            &self.blackouts,
        )
    }

    /// Validates a proposal against this snapshot.
    pub fn validate(&self, proposal: &MatchProposal) -> MatchValidation {
        validate_match(proposal, &self.matches, &self.permits, &self.blackouts)
    }

    /// Per-day availability of `team_id` from `today` on.
    pub fn team_availability(
        &self,
        team_id: &str,
        today: NaiveDate,
    ) -> Vec<availability::DayProjection> {
        availability::project_availability(team_id, &self.declarations, &self.matches, today)
    }
}
