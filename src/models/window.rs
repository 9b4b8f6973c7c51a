//! Time window model.
//!
//! # Time Model
//! All instants are local wall-clock `NaiveDateTime`s. A day is the
//! half-open window `[date 00:00, next date 00:00)`.
//!
//! # Interval Rules
//! - **Containment** (`covers`, `contains`) is closed on both ends.
//! - **Overlap** (`overlaps`) is half-open: touching windows do not overlap.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A time interval `[start, end)` with `start < end`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TimeWindow {
    /// Interval start.
    pub start: NaiveDateTime,
    /// Interval end.
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Creates a window, rejecting `end <= start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self> {
        if end <= start {
            return Err(Error::MalformedWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a window of `minutes` length starting at `start`.
    pub fn from_duration(start: NaiveDateTime, minutes: i64) -> Result<Self> {
        if minutes <= 0 {
            return Err(Error::InvalidDuration(minutes));
        }
        let end = Duration::try_minutes(minutes)
            .and_then(|d| start.checked_add_signed(d))
            .ok_or(Error::InvalidDuration(minutes))?;
        Self::new(start, end)
    }

    /// The full-day window `[date 00:00, next date 00:00)`.
    pub fn day(date: NaiveDate) -> Self {
        let start = date.and_time(NaiveTime::MIN);
        let end = start
            .checked_add_signed(Duration::days(1))
            .unwrap_or(NaiveDateTime::MAX);
        Self { start, end }
    }

    /// Whether `start < end` still holds.
    ///
    /// Fields are public, so windows built by hand or deserialized from a
    /// store may violate the invariant.
    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.start < self.end
    }

    /// Length of this window.
    #[inline]
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Whether an instant lies in `[start, end]`.
    #[inline]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Whether `other` lies entirely inside this window (both endpoints
    /// inclusive).
    #[inline]
    pub fn covers(&self, other: &Self) -> bool {
        self.contains(other.start) && self.contains(other.end)
    }

    /// Whether two windows overlap (half-open).
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The same-length window starting at `new_start`.
    ///
    /// `None` if the end falls outside the representable range.
    pub fn shifted_to(&self, new_start: NaiveDateTime) -> Option<Self> {
        let end = new_start.checked_add_signed(self.duration())?;
        Some(Self {
            start: new_start,
            end,
        })
    }

    /// Calendar days this window overlaps, ascending.
    ///
    /// A window ending exactly at midnight does not touch the following day.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start
            .date()
            .iter_days()
            .take_while(move |d| d.and_time(NaiveTime::MIN) < end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_new_rejects_malformed() {
        assert!(TimeWindow::new(at(17, 9, 0), at(17, 10, 0)).is_ok());
        assert_eq!(
            TimeWindow::new(at(17, 10, 0), at(17, 10, 0)),
            Err(Error::MalformedWindow {
                start: at(17, 10, 0),
                end: at(17, 10, 0)
            })
        );
        assert!(TimeWindow::new(at(17, 11, 0), at(17, 10, 0)).is_err());
    }

    #[test]
    fn test_from_duration() {
        let w = TimeWindow::from_duration(at(17, 9, 0), 90).unwrap();
        assert_eq!(w.end, at(17, 10, 30));
        assert_eq!(w.duration(), Duration::minutes(90));
        assert_eq!(
            TimeWindow::from_duration(at(17, 9, 0), 0),
            Err(Error::InvalidDuration(0))
        );
    }

    #[test]
    fn test_covers_is_closed() {
        let permit = TimeWindow::new(at(17, 9, 0), at(17, 12, 0)).unwrap();
        let exact = TimeWindow::new(at(17, 9, 0), at(17, 12, 0)).unwrap();
        let inner = TimeWindow::new(at(17, 9, 15), at(17, 10, 45)).unwrap();
        let spill = TimeWindow::new(at(17, 11, 0), at(17, 12, 30)).unwrap();

        assert!(permit.covers(&exact));
        assert!(permit.covers(&inner));
        assert!(!permit.covers(&spill)); // partial coverage
    }

    #[test]
    fn test_overlap_is_half_open() {
        let a = TimeWindow::new(at(17, 9, 0), at(17, 10, 0)).unwrap();
        let b = TimeWindow::new(at(17, 9, 30), at(17, 11, 0)).unwrap();
        let c = TimeWindow::new(at(17, 10, 0), at(17, 11, 0)).unwrap(); // touching

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn test_shifted_to_preserves_duration() {
        let w = TimeWindow::new(at(17, 9, 0), at(17, 10, 30)).unwrap();
        let moved = w.shifted_to(at(18, 14, 0)).unwrap();
        assert_eq!(moved.start, at(18, 14, 0));
        assert_eq!(moved.end, at(18, 15, 30));

        let late = NaiveDateTime::MAX - Duration::minutes(30);
        assert_eq!(w.shifted_to(late), None);
    }

    #[test]
    fn test_days_excludes_midnight_end() {
        let w = TimeWindow::new(at(16, 9, 0), at(18, 0, 0)).unwrap();
        let days: Vec<_> = w.days().map(|d| d.to_string()).collect();
        assert_eq!(days, vec!["2026-10-16", "2026-10-17"]);
    }

    #[test]
    fn test_days() {
        let w = TimeWindow::new(at(16, 18, 0), at(18, 9, 0)).unwrap();
        let days: Vec<_> = w.days().map(|d| d.to_string()).collect();
        assert_eq!(days, vec!["2026-10-16", "2026-10-17", "2026-10-18"]);

        let to_midnight = TimeWindow::new(at(16, 18, 0), at(17, 0, 0)).unwrap();
        assert_eq!(to_midnight.days().count(), 1);
    }

    #[test]
    fn test_day_window() {
        let d = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let w = TimeWindow::day(d);
        assert_eq!(w.start, at(17, 0, 0));
        assert_eq!(w.end, at(18, 0, 0));
        assert_eq!(w.duration(), Duration::days(1));
    }
}
