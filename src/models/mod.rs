//! Field-scheduling domain models.
//!
//! Immutable snapshots of the club's stores: field permits, committed
//! matches, blackouts and availability declarations, all positioned by a
//! [`TimeWindow`].
//!
//! # Store Mapping
//!
//! | fieldplan | Store record |
//! |-----------|--------------|
//! | Permit | permit granted by the facility owner |
//! | Match | committed game, home/away teams |
//! | Blackout | team or club unavailability ("ALL" scope) |
//! | AvailabilityDeclaration | team's open dates |

mod blackout;
mod declaration;
mod fixture;
mod participant;
mod permit;
mod window;

pub use blackout::{Blackout, BlackoutScope, CLUB_SCOPE};
pub use declaration::AvailabilityDeclaration;
pub use fixture::{Match, MatchProposal};
pub use participant::{TeamRef, Venue};
pub use permit::Permit;
pub use window::TimeWindow;
