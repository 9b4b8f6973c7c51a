//! Team availability declarations.

use serde::{Deserialize, Serialize};

use super::TimeWindow;

/// A team's self-declared openness to schedule games.
///
/// Declarations never expire; readers drop past days themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityDeclaration {
    /// Declaration identifier.
    pub id: String,
    /// Declaring team.
    pub team_id: String,
    /// Declared open window, possibly spanning several days.
    pub window: TimeWindow,
    /// Free-text note shown next to each open day.
    #[serde(default)]
    pub note: Option<String>,
}

impl AvailabilityDeclaration {
    /// Creates a declaration.
    pub fn new(id: impl Into<String>, team_id: impl Into<String>, window: TimeWindow) -> Self {
        Self {
            id: id.into(),
            team_id: team_id.into(),
            window,
            note: None,
        }
    }

    /// Sets the note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
