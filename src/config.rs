//! Slot scan configuration.
//!
//! A [`SlotGrid`] fixes the daily window and step at which candidate
//! kickoff times are generated. Grids deserialize from host configuration
//! with per-field defaults.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

fn default_day_start() -> NaiveTime {
    NaiveTime::from_hms_opt(6, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn default_day_end() -> NaiveTime {
    NaiveTime::from_hms_opt(22, 0, 0).unwrap_or(NaiveTime::MIN)
}

fn default_step_minutes() -> u32 {
    15
}

/// Daily scan window and step for slot enumeration.
///
/// Candidate starts are `day_start, day_start + step, ...` while strictly
/// before `day_end`. A match may run past `day_end` if a permit allows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGrid {
    /// First candidate start (inclusive).
    #[serde(default = "default_day_start")]
    pub day_start: NaiveTime,
    /// Last candidate bound (exclusive).
    #[serde(default = "default_day_end")]
    pub day_end: NaiveTime,
    /// Minutes between candidates.
    #[serde(default = "default_step_minutes")]
    pub step_minutes: u32,
}

impl Default for SlotGrid {
    /// 06:00 to 22:00 every 15 minutes.
    fn default() -> Self {
        Self {
            day_start: default_day_start(),
            day_end: default_day_end(),
            step_minutes: default_step_minutes(),
        }
    }
}

impl SlotGrid {
    /// Creates a grid, rejecting an empty window or a zero step.
    pub fn new(day_start: NaiveTime, day_end: NaiveTime, step_minutes: u32) -> Result<Self> {
        let grid = Self {
            day_start,
            day_end,
            step_minutes,
        };
        grid.validate()?;
        Ok(grid)
    }

    /// The 07:00 to 21:00 window offered to team managers.
    pub fn manager() -> Self {
        Self {
            day_start: NaiveTime::from_hms_opt(7, 0, 0).unwrap_or(NaiveTime::MIN),
            day_end: NaiveTime::from_hms_opt(21, 0, 0).unwrap_or(NaiveTime::MIN),
            ..Self::default()
        }
    }

    /// Checks that the grid can be scanned.
    pub fn validate(&self) -> Result<()> {
        if self.step_minutes == 0 {
            return Err(Error::InvalidGrid("step must be at least one minute".into()));
        }
        if self.day_end <= self.day_start {
            return Err(Error::InvalidGrid(format!(
                "day end {} is not after day start {}",
                self.day_end, self.day_start
            )));
        }
        Ok(())
    }

    /// Candidate start instants on `date`, ascending.
    ///
    /// Yields nothing for an invalid grid.
    pub fn candidate_starts(&self, date: NaiveDate) -> impl Iterator<Item = NaiveDateTime> {
        let first = date.and_time(self.day_start);
        let bound = date.and_time(self.day_end);
        let step = Duration::minutes(i64::from(self.step_minutes));
        let valid = self.validate().is_ok();

        std::iter::successors(valid.then_some(first), move |s| s.checked_add_signed(step))
            .take_while(move |s| *s < bound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_default_grid() {
        let g = SlotGrid::default();
        assert_eq!(g.day_start, t(6, 0));
        assert_eq!(g.day_end, t(22, 0));
        assert_eq!(g.step_minutes, 15);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn test_candidate_starts() {
        let d = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        let starts: Vec<_> = SlotGrid::default().candidate_starts(d).collect();
        assert_eq!(starts.len(), 16 * 4);
        assert_eq!(starts.first(), Some(&d.and_time(t(6, 0))));
        assert_eq!(starts.last(), Some(&d.and_time(t(21, 45))));

        let manager: Vec<_> = SlotGrid::manager().candidate_starts(d).collect();
        assert_eq!(manager.first(), Some(&d.and_time(t(7, 0))));
        assert_eq!(manager.last(), Some(&d.and_time(t(20, 45))));
    }

    #[test]
    fn test_invalid_grid() {
        assert!(SlotGrid::new(t(6, 0), t(22, 0), 0).is_err());
        assert!(SlotGrid::new(t(22, 0), t(6, 0), 15).is_err());
        assert!(SlotGrid::new(t(8, 0), t(12, 0), 30).is_ok());

        let broken = SlotGrid {
            step_minutes: 0,
            ..SlotGrid::default()
        };
        let d = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(broken.candidate_starts(d).count(), 0);
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let g: SlotGrid = serde_json::from_str(r#"{"step_minutes": 30}"#).unwrap();
        assert_eq!(g.step_minutes, 30);
        assert_eq!(g.day_start, t(6, 0));

        let g: SlotGrid =
            serde_json::from_str(r#"{"day_start": "07:00:00", "day_end": "21:00:00"}"#).unwrap();
        assert_eq!(g, SlotGrid::manager());
    }
}
