//! Participant model.
//!
//! A participant is one entry of the class roster: the unit that gets placed
//! into collaboration groups. Participants are identified by an external ID
//! (e.g., a university NetID); the display name is carried along for reports.

use serde::{Deserialize, Serialize};

/// A roster entry to be grouped.
///
/// Two participants are the same person iff their `id`s are equal. The name
/// plays no part in identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    /// Unique external identifier.
    pub id: String,
    /// Human-readable display name.
    pub name: String,
}

impl Participant {
    /// Creates a participant with the given ID and an empty name.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Display name, falling back to the ID when no name is set.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}
