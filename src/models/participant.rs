//! Teams and venues referenced by a match.
//!
//! Opponents and venues the club does not track are still valid match
//! participants. They carry a display name but no store identity.

use serde::{Deserialize, Serialize};

/// A team taking part in a match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TeamRef {
    /// A team backed by the team store.
    Existing {
        /// Team identifier.
        id: String,
        /// Display name (may be empty).
        #[serde(default)]
        name: String,
    },
    /// An ad hoc opponent known only by name.
    Temporary {
        /// Display name.
        name: String,
    },
}

impl TeamRef {
    /// References a stored team.
    pub fn existing(id: impl Into<String>) -> Self {
        TeamRef::Existing {
            id: id.into(),
            name: String::new(),
        }
    }

    /// References an ad hoc opponent.
    pub fn temporary(name: impl Into<String>) -> Self {
        TeamRef::Temporary { name: name.into() }
    }

    /// Sets the display name of a stored team.
    pub fn with_name(self, new_name: impl Into<String>) -> Self {
        match self {
            TeamRef::Existing { id, .. } => TeamRef::Existing {
                id,
                name: new_name.into(),
            },
            TeamRef::Temporary { .. } => TeamRef::Temporary {
                name: new_name.into(),
            },
        }
    }

    /// Store identifier, if this team is tracked.
    pub fn id(&self) -> Option<&str> {
        match self {
            TeamRef::Existing { id, .. } => Some(id),
            TeamRef::Temporary { .. } => None,
        }
    }

    /// Human-readable label: the name, or the id when no name is known.
    pub fn label(&self) -> &str {
        match self {
            TeamRef::Existing { id, name } if name.is_empty() => id,
            TeamRef::Existing { name, .. } | TeamRef::Temporary { name } => name,
        }
    }

    /// Whether this is the stored team `team_id`.
    pub fn is(&self, team_id: &str) -> bool {
        self.id() == Some(team_id)
    }
}

/// Where a match is played.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Venue {
    /// A club field, subject to permits and field conflicts.
    Field {
        /// Field identifier.
        id: String,
    },
    /// A venue outside the club's control.
    External {
        /// Display name.
        name: String,
    },
}

impl Venue {
    /// A club field.
    pub fn field(id: impl Into<String>) -> Self {
        Venue::Field { id: id.into() }
    }

    /// A venue outside the club's control.
    pub fn external(name: impl Into<String>) -> Self {
        Venue::External { name: name.into() }
    }

    /// Field identifier, if this is a club field.
    pub fn field_id(&self) -> Option<&str> {
        match self {
            Venue::Field { id } => Some(id),
            Venue::External { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_ref_identity() {
        let a = TeamRef::existing("t1").with_name("Rovers U12");
        assert_eq!(a.id(), Some("t1"));
        assert_eq!(a.label(), "Rovers U12");
        assert!(a.is("t1"));
        assert!(!a.is("t2"));

        let bare = TeamRef::existing("t9");
        assert_eq!(bare.label(), "t9");

        let guest = TeamRef::temporary("Visiting FC");
        assert_eq!(guest.id(), None);
        assert_eq!(guest.label(), "Visiting FC");
        assert!(!guest.is("Visiting FC"));
    }

    #[test]
    fn test_team_ref_serde_tagged() {
        let json = serde_json::to_value(TeamRef::temporary("Guests")).unwrap();
        assert_eq!(json["type"], "temporary");
        assert_eq!(json["name"], "Guests");

        let back: TeamRef =
            serde_json::from_str(r#"{"type":"existing","id":"t1"}"#).unwrap();
        assert_eq!(back, TeamRef::existing("t1"));
    }

    #[test]
    fn test_venue() {
        assert_eq!(Venue::field("F1").field_id(), Some("F1"));
        assert_eq!(Venue::external("City Park").field_id(), None);
    }
}
