//! Extracurricular activity model.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Activities keyed by their display name (e.g. `"Chess Club"`).
pub type Catalog = BTreeMap<String, Activity>;

/// A single extracurricular activity and its current roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct Activity {
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    /// Student emails in signup order.
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Activity {
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        schedule: impl Into<String>,
        max_participants: u32,
    ) -> Self {
        Self {
            description: description.into(),
            schedule: schedule.into(),
            max_participants,
            participants: Vec::new(),
        }
    }

    /// Adds initial participants, skipping duplicates.
    #[must_use]
    pub fn with_participants<I, S>(mut self, emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for email in emails {
            let email = email.into();
            if !self.has_participant(&email) {
                self.participants.push(email);
            }
        }
        self
    }

    #[must_use]
    pub fn has_participant(&self, email: &str) -> bool {
        self.participants.iter().any(|p| p == email)
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.spots_left() == 0
    }

    /// Remaining capacity; zero when the roster is at or over the limit.
    #[must_use]
    pub fn spots_left(&self) -> usize {
        usize::try_from(self.max_participants)
            .unwrap_or(usize::MAX)
            .saturating_sub(self.participants.len())
    }
}
