//! Authoritative match validation.
//!
//! Runs at commit time against the latest snapshot. Slots offered by
//! [`slots`](crate::slots) are never taken as proof: every condition is
//! re-derived here. Detects:
//! - Missing permit coverage for the field and window
//! - Overlap with another match on the same field
//! - A blackout binding either stored team (or the whole club)
//!
//! All checks run and their errors accumulate. A malformed window is
//! rejected up front as an invalid proposal.
//!
//! Two submissions validated against the same stale snapshot can both
//! pass. Resolving that race belongs to the store that persists matches.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Blackout, Match, MatchProposal, Permit};

/// Outcome of validating a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchValidation {
    /// True iff `errors` is empty.
    pub is_valid: bool,
    /// Accumulated errors, in check order.
    pub errors: Vec<ValidationError>,
}

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
    /// Conflicting match or blackout, when there is one.
    pub related_id: Option<String>,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// The proposal window has `end <= start`.
    InvalidProposal,
    /// No permit for the field covers the whole window.
    NoPermit,
    /// Another match occupies the field during the window.
    FieldConflict,
    /// A blackout binds the home or away team during the window.
    TeamBlackout,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            related_id: None,
        }
    }

    fn related(mut self, id: &str) -> Self {
        self.related_id = Some(id.to_string());
        self
    }
}

impl MatchValidation {
    fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    fn invalid_proposal() -> Self {
        Self::from_errors(vec![ValidationError::new(
            ValidationErrorKind::InvalidProposal,
            "invalid proposal",
        )])
    }

    /// Error messages, in check order.
    pub fn messages(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.message.as_str()).collect()
    }

    /// Whether an error of `kind` was reported.
    pub fn has(&self, kind: ValidationErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }
}

/// Validates a proposal against the current snapshot.
///
/// Checks:
/// 1. A permit for the proposal's field covers the whole window
/// 2. No existing match on that field overlaps the window
/// 3. No blackout for the home team, the away team, or the club overlaps
///    the window
///
/// Performs no persistence. The caller commits only if `is_valid`.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use fieldplan::models::{Blackout, MatchProposal, Permit, TimeWindow};
/// use fieldplan::validation::validate_match;
///
/// let day = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
/// let at = |h, m| day.and_hms_opt(h, m, 0).unwrap();
///
/// let permits = vec![Permit::new("p1", "F", TimeWindow::new(at(13, 0), at(16, 0)).unwrap())];
/// let blackouts = vec![Blackout::team("b1", "teamA", TimeWindow::new(at(14, 0), at(15, 0)).unwrap())];
/// let proposal = MatchProposal::on_field(
///     "F", "teamA", "teamB", TimeWindow::new(at(14, 0), at(15, 30)).unwrap(),
/// );
///
/// let result = validate_match(&proposal, &[], &permits, &blackouts);
/// assert!(!result.is_valid);
/// assert_eq!(result.messages(), vec!["team blackout conflict"]);
/// ```
pub fn validate_match(
    proposal: &MatchProposal,
    matches: &[Match],
    permits: &[Permit],
    blackouts: &[Blackout],
) -> MatchValidation {
    check_proposal(proposal, None, matches, permits, blackouts)
}

/// Validates moving `existing` to `new_start`, keeping its duration.
///
/// Same checks as [`validate_match`], except that `existing` does not
/// conflict with itself. A start whose shifted end is not representable
/// is an invalid proposal.
pub fn validate_reschedule(
    existing: &Match,
    new_start: NaiveDateTime,
    matches: &[Match],
    permits: &[Permit],
    blackouts: &[Blackout],
) -> MatchValidation {
    let Some(moved) = existing.rescheduled(new_start) else {
        debug!(match_id = %existing.id, %new_start, "reschedule end out of range");
        return MatchValidation::invalid_proposal();
    };
    check_proposal(
        &moved.to_proposal(),
        Some(&existing.id),
        matches,
        permits,
        blackouts,
    )
}

fn check_proposal(
    proposal: &MatchProposal,
    ignore_match: Option<&str>,
    matches: &[Match],
    permits: &[Permit],
    blackouts: &[Blackout],
) -> MatchValidation {
    let window = &proposal.window;
    if !window.is_well_formed() {
        debug!(start = %window.start, end = %window.end, "rejecting malformed proposal");
        return MatchValidation::invalid_proposal();
    }

    let mut errors = Vec::new();
    let field_id = proposal.venue.field_id();

    // Permit coverage
    let covered = field_id.is_some_and(|f| permits.iter().any(|p| p.covers(f, window)));
    if !covered {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoPermit,
            "no permit for field/time",
        ));
    }

    // Field conflict
    let conflict = field_id.and_then(|f| {
        matches
            .iter()
            .filter(|m| Some(m.id.as_str()) != ignore_match)
            .find(|m| m.conflicts_with(f, window))
    });
    if let Some(m) = conflict {
        errors.push(
            ValidationError::new(
                ValidationErrorKind::FieldConflict,
                format!("field conflict with match {}", m.id),
            )
            .related(&m.id),
        );
    }

    // Team blackouts
    let team_ids: Vec<&str> = proposal.team_ids().collect();
    let blackout = blackouts.iter().find(|b| {
        b.window.is_well_formed()
            && b.window.overlaps(window)
            && (b.is_club_wide() || team_ids.iter().any(|t| b.applies_to(t)))
    });
    if let Some(b) = blackout {
        errors.push(
            ValidationError::new(ValidationErrorKind::TeamBlackout, "team blackout conflict")
                .related(&b.id),
        );
    }

    for e in &errors {
        debug!(kind = ?e.kind, message = %e.message, "proposal rejected");
    }
    MatchValidation::from_errors(errors)
}
