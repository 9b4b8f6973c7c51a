//! Public availability projection for a single team.
//!
//! Declarations spanning several days are exploded into one record per
//! calendar day. Each day carries the team's busy intervals (matches
//! overlapping that day) without revealing opponents.
//!
//! # Algorithm
//!
//! 1. Keep the team's well-formed declarations and the matches it plays
//!    in (home or away), deduplicated by match id.
//! 2. For every day a declaration overlaps and that is not before
//!    `today`, emit `{day, note, busy}`.
//! 3. Sort by day. `busy` is sorted by start.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{AvailabilityDeclaration, Match, TeamRef, TimeWindow};

/// A busy interval, stripped of match identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyInterval {
    /// Busy from.
    pub start: NaiveDateTime,
    /// Busy until.
    pub end: NaiveDateTime,
}

/// One open day of a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayProjection {
    /// The calendar day.
    pub day: NaiveDate,
    /// Note copied from the declaration.
    pub note: Option<String>,
    /// Matches overlapping the day, ascending.
    pub busy: Vec<BusyInterval>,
}

/// How much of an open day is still free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayStatus {
    /// No match on this day.
    FullyAvailable,
    /// At least one match on this day.
    PartiallyAvailable,
}

impl DayProjection {
    /// Availability status of the day.
    pub fn status(&self) -> DayStatus {
        if self.busy.is_empty() {
            DayStatus::FullyAvailable
        } else {
            DayStatus::PartiallyAvailable
        }
    }
}

/// Projects `team_id`'s declarations into per-day records from `today` on.
///
/// Declarations of other teams and malformed declarations are skipped.
/// A declaration ending exactly at 00:00 does not cover that end date.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use fieldplan::availability::{project_availability, DayStatus};
/// use fieldplan::models::{AvailabilityDeclaration, TimeWindow};
///
/// let d = |day| NaiveDate::from_ymd_opt(2026, 10, day).unwrap();
/// let open = AvailabilityDeclaration::new(
///     "a1",
///     "t1",
///     TimeWindow::new(
///         d(16).and_hms_opt(0, 0, 0).unwrap(),
///         d(18).and_hms_opt(23, 59, 0).unwrap(),
///     )
///     .unwrap(),
/// )
/// .with_note("Prefer mornings");
///
/// let days = project_availability("t1", &[open], &[], d(17));
/// assert_eq!(days.len(), 2);
/// assert_eq!(days[0].day, d(17));
/// assert_eq!(days[0].status(), DayStatus::FullyAvailable);
/// ```
pub fn project_availability(
    team_id: &str,
    declarations: &[AvailabilityDeclaration],
    matches: &[Match],
    today: NaiveDate,
) -> Vec<DayProjection> {
    let team_matches = team_matches(team_id, matches);

    let mut days: Vec<DayProjection> = declarations
        .iter()
        .filter(|d| d.team_id == team_id)
        .filter(|d| {
            let ok = d.window.is_well_formed();
            if !ok {
                warn!(declaration_id = %d.id, "skipping malformed availability declaration");
            }
            ok
        })
        .flat_map(|d| {
            let team_matches = &team_matches;
            d.window
                .days()
                .filter(move |day| *day >= today)
                .map(move |day| DayProjection {
                    day,
                    note: d.note.clone(),
                    busy: busy_on(day, team_matches),
                })
        })
        .collect();

    days.sort_by_key(|p| p.day);
    days
}

/// The team's matches, first occurrence per id.
fn team_matches<'a>(team_id: &str, matches: &'a [Match]) -> Vec<&'a Match> {
    let mut seen = HashSet::new();
    matches
        .iter()
        .filter(|m| m.involves(team_id) && m.window.is_well_formed())
        .filter(|m| seen.insert(m.id.as_str()))
        .collect()
}

fn busy_on(day: NaiveDate, matches: &[&Match]) -> Vec<BusyInterval> {
    let day_window = TimeWindow::day(day);
    let mut busy: Vec<BusyInterval> = matches
        .iter()
        .filter(|m| m.window.overlaps(&day_window))
        .map(|m| BusyInterval {
            start: m.window.start,
            end: m.window.end,
        })
        .collect();
    busy.sort_by_key(|b| (b.start, b.end));
    busy
}

/// Whether `team_id` has declared any part of `date` open.
pub fn is_declared_available(
    team_id: &str,
    date: NaiveDate,
    declarations: &[AvailabilityDeclaration],
) -> bool {
    let day = TimeWindow::day(date);
    declarations
        .iter()
        .any(|d| d.team_id == team_id && d.window.is_well_formed() && d.window.overlaps(&day))
}

/// Scheduler warning when `team` has not declared `date` open.
///
/// Temporary teams have no declarations and never warn.
pub fn availability_warning(
    team: &TeamRef,
    date: NaiveDate,
    declarations: &[AvailabilityDeclaration],
) -> Option<String> {
    let team_id = team.id()?;
    if is_declared_available(team_id, date, declarations) {
        None
    } else {
        Some(format!(
            "{} has not listed {} as available",
            team.label(),
            date
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn at(offset_days: i64, h: u32, m: u32) -> NaiveDateTime {
        (today() + Duration::days(offset_days))
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn window(start: NaiveDateTime, end: NaiveDateTime) -> TimeWindow {
        TimeWindow::new(start, end).unwrap()
    }

    fn game(id: &str, home: &str, away: &str, start: NaiveDateTime, minutes: i64) -> Match {
        Match::on_field(
            id,
            "F",
            home,
            away,
            TimeWindow::from_duration(start, minutes).unwrap(),
        )
    }

    #[test]
    fn test_skips_days_before_today() {
        let decl = AvailabilityDeclaration::new("a1", "t1", window(at(-1, 0, 0), at(1, 20, 0)));
        let days = project_availability("t1", &[decl], &[], today());
        let dates: Vec<_> = days.iter().map(|d| d.day).collect();
        assert_eq!(dates, vec![today(), today() + Duration::days(1)]);
    }

    #[test]
    fn test_declaration_ending_at_midnight_excludes_end_date() {
        let decl = AvailabilityDeclaration::new("a1", "t1", window(at(0, 9, 0), at(2, 0, 0)));
        let days = project_availability("t1", &[decl], &[], today());
        let dates: Vec<_> = days.iter().map(|d| d.day).collect();
        assert_eq!(dates, vec![today(), today() + Duration::days(1)]);
    }

    #[test]
    fn test_note_copied_to_every_day() {
        let decl = AvailabilityDeclaration::new("a1", "t1", window(at(0, 9, 0), at(2, 17, 0)))
            .with_note("Evenings only");
        let days = project_availability("t1", &[decl], &[], today());
        assert_eq!(days.len(), 3);
        assert!(days
            .iter()
            .all(|d| d.note.as_deref() == Some("Evenings only")));
    }

    #[test]
    fn test_busy_intervals_sorted_and_anonymous() {
        let decl = AvailabilityDeclaration::new("a1", "t1", window(at(0, 0, 0), at(1, 23, 0)));
        let matches = vec![
            game("m2", "t1", "t9", at(0, 16, 0), 90),
            game("m1", "t8", "t1", at(0, 10, 0), 60),
            game("m3", "t5", "t6", at(0, 12, 0), 60), // not ours
        ];

        let days = project_availability("t1", &[decl], &matches, today());
        assert_eq!(days.len(), 2);

        assert_eq!(days[0].status(), DayStatus::PartiallyAvailable);
        assert_eq!(
            days[0].busy,
            vec![
                BusyInterval {
                    start: at(0, 10, 0),
                    end: at(0, 11, 0)
                },
                BusyInterval {
                    start: at(0, 16, 0),
                    end: at(0, 17, 30)
                },
            ]
        );
        assert_eq!(days[1].status(), DayStatus::FullyAvailable);
    }

    #[test]
    fn test_duplicate_matches_counted_once() {
        let decl = AvailabilityDeclaration::new("a1", "t1", window(at(0, 0, 0), at(0, 23, 0)));
        let m = game("m1", "t1", "t2", at(0, 10, 0), 60);
        // Same match fetched once as home side and once as away side.
        let matches = vec![m.clone(), m];
        let days = project_availability("t1", &[decl], &matches, today());
        assert_eq!(days[0].busy.len(), 1);
    }

    #[test]
    fn test_match_across_midnight_busy_on_both_days() {
        let decl = AvailabilityDeclaration::new("a1", "t1", window(at(0, 0, 0), at(1, 23, 0)));
        let matches = vec![game("m1", "t1", "t2", at(0, 23, 0), 120)];
        let days = project_availability("t1", &[decl], &matches, today());
        assert_eq!(days[0].busy.len(), 1);
        assert_eq!(days[1].busy.len(), 1);
    }

    #[test]
    fn test_filters_other_teams_and_malformed() {
        let mine = AvailabilityDeclaration::new("a1", "t1", window(at(3, 9, 0), at(3, 12, 0)));
        let theirs = AvailabilityDeclaration::new("a2", "t2", window(at(0, 9, 0), at(0, 12, 0)));
        let mut broken = AvailabilityDeclaration::new("a3", "t1", window(at(1, 9, 0), at(1, 12, 0)));
        broken.window = TimeWindow {
            start: at(1, 12, 0),
            end: at(1, 9, 0),
        };

        let days = project_availability("t1", &[broken, theirs, mine], &[], today());
        assert_eq!(days.len(), 1);
        assert_eq!(days[0].day, today() + Duration::days(3));
    }

    #[test]
    fn test_sorted_across_declarations() {
        let later = AvailabilityDeclaration::new("a1", "t1", window(at(5, 9, 0), at(5, 12, 0)));
        let sooner = AvailabilityDeclaration::new("a2", "t1", window(at(2, 9, 0), at(2, 12, 0)));
        let days = project_availability("t1", &[later, sooner], &[], today());
        assert_eq!(days[0].day, today() + Duration::days(2));
        assert_eq!(days[1].day, today() + Duration::days(5));
    }

    #[test]
    fn test_declared_available() {
        let decls = vec![AvailabilityDeclaration::new(
            "a1",
            "t1",
            window(at(0, 18, 0), at(0, 21, 0)),
        )];
        assert!(is_declared_available("t1", today(), &decls));
        assert!(!is_declared_available("t1", today() + Duration::days(1), &decls));
        assert!(!is_declared_available("t2", today(), &decls));
    }

    #[test]
    fn test_availability_warning() {
        let decls = vec![AvailabilityDeclaration::new(
            "a1",
            "t1",
            window(at(0, 9, 0), at(0, 12, 0)),
        )];
        let rovers = TeamRef::existing("t1").with_name("Rovers");
        assert_eq!(availability_warning(&rovers, today(), &decls), None);

        let tomorrow = today() + Duration::days(1);
        assert_eq!(
            availability_warning(&rovers, tomorrow, &decls),
            Some("Rovers has not listed 2026-10-18 as available".to_string())
        );

        let guests = TeamRef::temporary("Guests");
        assert_eq!(availability_warning(&guests, tomorrow, &decls), None);
    }
}
