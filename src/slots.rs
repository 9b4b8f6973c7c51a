//! Slot enumeration: advisory kickoff times for a candidate game.
//!
//! # Algorithm
//!
//! 1. If a club-wide blackout contains the day's reference instant
//!    (local midnight), the day is closed and nothing is returned.
//! 2. Walk the [`SlotGrid`] for the date. For each start `s` with
//!    `e = s + duration`:
//!    - some permit for the field must cover `[s, e]`, and
//!    - no match on the field may overlap `[s, e)`.
//! 3. Return the surviving starts in ascending order.
//!
//! Only club-wide blackouts are consulted here. Team blackouts are
//! checked at commit time by [`validate_match`](crate::validation::validate_match),
//! which must re-derive everything independently anyway.
//!
//! # Complexity
//! O(k * (p + m)) where k = grid candidates, p = permits, m = matches.

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, warn};

use crate::config::SlotGrid;
use crate::models::{Blackout, Match, Permit, TimeWindow};

/// Slot enumerator over a configurable scan grid.
///
/// # Example
///
/// ```
/// use chrono::{NaiveDate, NaiveTime};
/// use fieldplan::models::Permit;
/// use fieldplan::slots::SlotEnumerator;
///
/// let day = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
/// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// let permits = vec![Permit::on_day("p1", "F1", day, t(9, 0), t(11, 0)).unwrap()];
///
/// let slots = SlotEnumerator::new().enumerate("F1", day, 90, &permits, &[], &[]);
/// assert_eq!(slots, vec![t(9, 0), t(9, 15), t(9, 30)]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SlotEnumerator {
    grid: SlotGrid,
}

impl SlotEnumerator {
    /// Creates an enumerator over the default 06:00 to 22:00 grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the scan grid.
    pub fn with_grid(mut self, grid: SlotGrid) -> Self {
        self.grid = grid;
        self
    }

    /// The scan grid in use.
    pub fn grid(&self) -> &SlotGrid {
        &self.grid
    }

    /// Valid start times for a `duration_minutes` game on `field_id`.
    ///
    /// Returns an empty list for a non-positive duration, an invalid grid,
    /// a club-wide blackout day, or when no permit fits the duration.
    pub fn enumerate(
        &self,
        field_id: &str,
        date: NaiveDate,
        duration_minutes: i64,
        permits: &[Permit],
        matches: &[Match],
        blackouts: &[Blackout],
    ) -> Vec<NaiveTime> {
        if duration_minutes <= 0 {
            warn!(field_id, duration_minutes, "rejecting non-positive slot duration");
            return Vec::new();
        }
        if let Err(e) = self.grid.validate() {
            warn!(error = %e, "rejecting slot grid");
            return Vec::new();
        }
        if let Some(b) = closing_blackout(date, blackouts) {
            debug!(field_id, %date, blackout_id = %b.id, "day closed by club-wide blackout");
            return Vec::new();
        }

        let field_permits: Vec<&Permit> =
            permits.iter().filter(|p| p.field_id == field_id).collect();
        if field_permits.is_empty() {
            debug!(field_id, %date, "no permits for field");
            return Vec::new();
        }

        let slots: Vec<NaiveTime> = self
            .grid
            .candidate_starts(date)
            .filter_map(|start| TimeWindow::from_duration(start, duration_minutes).ok())
            .filter(|w| field_permits.iter().any(|p| p.covers(field_id, w)))
            .filter(|w| !matches.iter().any(|m| m.conflicts_with(field_id, w)))
            .map(|w| w.start.time())
            .collect();

        debug!(field_id, %date, duration_minutes, count = slots.len(), "enumerated slots");
        slots
    }
}

/// The club-wide blackout closing `date`, if any.
///
/// Checked at the day's reference instant only, not over the full day.
fn closing_blackout(date: NaiveDate, blackouts: &[Blackout]) -> Option<&Blackout> {
    let reference = date.and_time(NaiveTime::MIN);
    blackouts
        .iter()
        .find(|b| b.is_club_wide() && b.window.is_well_formed() && b.window.contains(reference))
}

/// Valid kickoff times as `HH:MM` strings on the default grid.
///
/// Pure: the result depends only on the arguments.
pub fn enumerate_slots(
    field_id: &str,
    date: NaiveDate,
    duration_minutes: i64,
    permits: &[Permit],
    matches: &[Match],
    blackouts: &[Blackout],
) -> Vec<String> {
    SlotEnumerator::new()
        .enumerate(field_id, date, duration_minutes, permits, matches, blackouts)
        .into_iter()
        .map(format_slot)
        .collect()
}

/// Valid kickoff times on an explicit grid.
pub fn enumerate_slots_with(
    grid: &SlotGrid,
    field_id: &str,
    date: NaiveDate,
    duration_minutes: i64,
    permits: &[Permit],
    matches: &[Match],
    blackouts: &[Blackout],
) -> Vec<NaiveTime> {
    SlotEnumerator::new()
        .with_grid(*grid)
        .enumerate(field_id, date, duration_minutes, permits, matches, blackouts)
}

/// Formats a slot as 24-hour `HH:MM`.
pub fn format_slot(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}
