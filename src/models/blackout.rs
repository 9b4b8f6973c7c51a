//! Blackouts: declared unavailability.
//!
//! A blackout is scoped either to one team or to the whole club. The store
//! encodes club scope as the literal `"ALL"`; in memory it is
//! [`BlackoutScope::Club`].

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::TimeWindow;

/// Store literal for club-wide scope.
pub const CLUB_SCOPE: &str = "ALL";

/// Who a blackout applies to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BlackoutScope {
    /// Every team in the club.
    Club,
    /// A single team.
    Team(String),
}

impl From<String> for BlackoutScope {
    fn from(s: String) -> Self {
        if s == CLUB_SCOPE {
            BlackoutScope::Club
        } else {
            BlackoutScope::Team(s)
        }
    }
}

impl From<BlackoutScope> for String {
    fn from(scope: BlackoutScope) -> Self {
        match scope {
            BlackoutScope::Club => CLUB_SCOPE.to_string(),
            BlackoutScope::Team(id) => id,
        }
    }
}

/// An unavailability window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blackout {
    /// Blackout identifier.
    pub id: String,
    /// Who is unavailable.
    pub scope: BlackoutScope,
    /// When.
    pub window: TimeWindow,
    /// Free-text reason.
    #[serde(default)]
    pub reason: String,
}

impl Blackout {
    /// Creates a blackout.
    pub fn new(id: impl Into<String>, scope: BlackoutScope, window: TimeWindow) -> Self {
        Self {
            id: id.into(),
            scope,
            window,
            reason: String::new(),
        }
    }

    /// Creates a club-wide blackout.
    pub fn club(id: impl Into<String>, window: TimeWindow) -> Self {
        Self::new(id, BlackoutScope::Club, window)
    }

    /// Creates a blackout for one team.
    pub fn team(id: impl Into<String>, team_id: impl Into<String>, window: TimeWindow) -> Self {
        Self::new(id, BlackoutScope::Team(team_id.into()), window)
    }

    /// Creates a blackout covering `date` from 00:00:00.000 to 23:59:59.999.
    pub fn full_day(
        id: impl Into<String>,
        scope: BlackoutScope,
        date: NaiveDate,
        reason: impl Into<String>,
    ) -> Self {
        let last_ms = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
        let window = TimeWindow {
            start: date.and_time(NaiveTime::MIN),
            end: date.and_time(last_ms),
        };
        Self::new(id, scope, window).with_reason(reason)
    }

    /// Sets the reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Whether this blackout is club-wide.
    #[inline]
    pub fn is_club_wide(&self) -> bool {
        self.scope == BlackoutScope::Club
    }

    /// Whether this blackout binds `team_id`.
    pub fn applies_to(&self, team_id: &str) -> bool {
        match &self.scope {
            BlackoutScope::Club => true,
            BlackoutScope::Team(id) => id == team_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_from_store_literal() {
        assert_eq!(BlackoutScope::from("ALL".to_string()), BlackoutScope::Club);
        assert_eq!(
            BlackoutScope::from("t1".to_string()),
            BlackoutScope::Team("t1".into())
        );
        assert_eq!(String::from(BlackoutScope::Club), "ALL");
    }

    #[test]
    fn test_scope_serde() {
        let json = serde_json::to_string(&BlackoutScope::Club).unwrap();
        assert_eq!(json, r#""ALL""#);
        let team: BlackoutScope = serde_json::from_str(r#""t7""#).unwrap();
        assert_eq!(team, BlackoutScope::Team("t7".into()));
    }

    #[test]
    fn test_applies_to() {
        let d = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let club = Blackout::full_day("b1", BlackoutScope::Club, d, "Field maintenance");
        let team = Blackout::full_day("b2", BlackoutScope::Team("t1".into()), d, "Tournament");

        assert!(club.is_club_wide());
        assert!(club.applies_to("t1"));
        assert!(club.applies_to("anyone"));
        assert!(team.applies_to("t1"));
        assert!(!team.applies_to("t2"));
    }

    #[test]
    fn test_full_day_window() {
        let d = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let b = Blackout::full_day("b1", BlackoutScope::Club, d, "Admin Override");
        assert_eq!(b.window.start, d.and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(b.window.end, d.and_hms_milli_opt(23, 59, 59, 999).unwrap());
        assert_eq!(b.reason, "Admin Override");
    }
}
