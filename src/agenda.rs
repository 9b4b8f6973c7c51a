//! Upcoming club schedule, grouped by day.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};

use crate::models::Match;

/// Optional narrowing of the agenda.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgendaFilter {
    /// Only matches starting on this day.
    pub day: Option<NaiveDate>,
    /// Case-insensitive substring of the home or away team label.
    pub team: Option<String>,
}

impl AgendaFilter {
    /// No filtering.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one day.
    pub fn with_day(mut self, day: NaiveDate) -> Self {
        self.day = Some(day);
        self
    }

    /// Restricts to teams whose label contains `query`.
    pub fn with_team(mut self, query: impl Into<String>) -> Self {
        self.team = Some(query.into());
        self
    }

    fn accepts(&self, m: &Match) -> bool {
        if self.day.is_some_and(|d| m.window.start.date() != d) {
            return false;
        }
        match &self.team {
            None => true,
            Some(q) => {
                let q = q.to_lowercase();
                m.home.label().to_lowercase().contains(&q)
                    || m.away.label().to_lowercase().contains(&q)
            }
        }
    }
}

/// Matches starting on one day, in start order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaDay<'a> {
    /// The day.
    pub day: NaiveDate,
    /// Matches starting that day.
    pub matches: Vec<&'a Match>,
}

/// Matches starting on or after `today` 00:00, grouped by start day.
pub fn upcoming_agenda<'a>(
    matches: &'a [Match],
    today: NaiveDate,
    filter: &AgendaFilter,
) -> Vec<AgendaDay<'a>> {
    let cutoff = today.and_time(NaiveTime::MIN);
    let mut by_day: BTreeMap<NaiveDate, Vec<&'a Match>> = BTreeMap::new();

    for m in matches
        .iter()
        .filter(|m| m.window.start >= cutoff && filter.accepts(m))
    {
        by_day.entry(m.window.start.date()).or_default().push(m);
    }

    by_day
        .into_iter()
        .map(|(day, mut matches)| {
            matches.sort_by(|a, b| {
                a.window
                    .start
                    .cmp(&b.window.start)
                    .then_with(|| a.id.cmp(&b.id))
            });
            AgendaDay { day, matches }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TeamRef, TimeWindow, Venue};
    use chrono::{Duration, NaiveDateTime};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    fn at(offset_days: i64, h: u32) -> NaiveDateTime {
        (today() + Duration::days(offset_days))
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    fn game(id: &str, home: &str, away: &str, start: NaiveDateTime) -> Match {
        Match::new(
            id,
            Venue::field("F"),
            TeamRef::existing(home.to_lowercase()).with_name(home),
            TeamRef::temporary(away),
            TimeWindow::from_duration(start, 90).unwrap(),
        )
    }

    fn sample() -> Vec<Match> {
        vec![
            game("m4", "Rovers", "Harbour FC", at(2, 10)),
            game("m1", "Rovers", "Old Town", at(-1, 10)),
            game("m3", "United", "Rovers B", at(0, 9)),
            game("m2", "United", "Valley", at(0, 8)),
        ]
    }

    #[test]
    fn test_groups_upcoming_by_day() {
        let matches = sample();
        let agenda = upcoming_agenda(&matches, today(), &AgendaFilter::new());

        assert_eq!(agenda.len(), 2);
        assert_eq!(agenda[0].day, today());
        let ids: Vec<_> = agenda[0].matches.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m2", "m3"]);
        assert_eq!(agenda[1].day, today() + Duration::days(2));
    }

    #[test]
    fn test_day_filter() {
        let matches = sample();
        let filter = AgendaFilter::new().with_day(today() + Duration::days(2));
        let agenda = upcoming_agenda(&matches, today(), &filter);
        assert_eq!(agenda.len(), 1);
        assert_eq!(agenda[0].matches[0].id, "m4");
    }

    #[test]
    fn test_team_search_is_case_insensitive() {
        let matches = sample();
        let filter = AgendaFilter::new().with_team("rovers");
        let agenda = upcoming_agenda(&matches, today(), &filter);
        let ids: Vec<_> = agenda
            .iter()
            .flat_map(|d| d.matches.iter().map(|m| m.id.as_str()))
            .collect();
        assert_eq!(ids, vec!["m3", "m4"]);
    }
}
