//! Field-usage scheduling core for sports clubs.
//!
//! Reconciles field permits, team blackouts, team availability
//! declarations and committed matches. Every routine is a pure function
//! over immutable snapshots supplied by the caller: no I/O, no shared
//! state, safe to call from any number of threads and to re-run on every
//! store update.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `TimeWindow`, `Permit`, `Blackout`,
//!   `Match`, `MatchProposal`, `TeamRef`, `Venue`, `AvailabilityDeclaration`
//! - **`slots`**: Advisory kickoff times for a field, date and duration
//! - **`validation`**: Authoritative commit-time checks (permit, field, blackout)
//! - **`availability`**: Per-day public projection of a team's open dates
//! - **`agenda`**: Upcoming club schedule grouped by day
//! - **`ingest`**: Store records with sentinel ids → typed models
//! - **`config`**: Slot scan grid
//!
//! # Consistency
//!
//! Slots are advisory; [`validation::validate_match`] is the gate. Two
//! submissions checked against the same stale snapshot can both pass.
//! The persisting store decides which write wins.

pub mod agenda;
pub mod availability;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod slots;
pub mod validation;

pub use config::SlotGrid;
pub use error::{Error, Result};
pub use slots::enumerate_slots;
pub use validation::{validate_match, MatchValidation};
