//! Field permits.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::TimeWindow;
use crate::error::Result;

/// The club's right to use a field during a window.
///
/// Several permits may exist for one field. The core does not check that
/// they are disjoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permit {
    /// Permit identifier.
    pub id: String,
    /// Field the permit grants.
    pub field_id: String,
    /// Granted window.
    pub window: TimeWindow,
}

impl Permit {
    /// Creates a permit.
    pub fn new(id: impl Into<String>, field_id: impl Into<String>, window: TimeWindow) -> Self {
        Self {
            id: id.into(),
            field_id: field_id.into(),
            window,
        }
    }

    /// Creates a permit for `start..end` on a single day.
    ///
    /// Fails if `end <= start`.
    pub fn on_day(
        id: impl Into<String>,
        field_id: impl Into<String>,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
    ) -> Result<Self> {
        let window = TimeWindow::new(date.and_time(start), date.and_time(end))?;
        Ok(Self::new(id, field_id, window))
    }

    /// Whether this permit grants `field_id` for all of `window`.
    pub fn covers(&self, field_id: &str, window: &TimeWindow) -> bool {
        self.field_id == field_id && self.window.covers(window)
    }
}
