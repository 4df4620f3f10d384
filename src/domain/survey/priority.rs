//! Priority tiers derived from deadline proximity.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Urgency tier attached to a submitted ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Blocker,
    Critical,
    Major,
    Normal,
}

impl Priority {
    /// Maps a deadline to a tier by whole-day distance from `today`.
    ///
    /// Boundaries are half-open on the lower side: exactly 3, 7 or 14 days
    /// out falls to the less urgent tier.
    pub fn from_deadline(deadline: NaiveDate, today: NaiveDate) -> Self {
        let days = (deadline - today).num_days();
        if days < 3 {
            Self::Blocker
        } else if days < 7 {
            Self::Critical
        } else if days < 14 {
            Self::Major
        } else {
            Self::Normal
        }
    }

    /// The tracker API's lowercase name for this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blocker => "blocker",
            Self::Critical => "critical",
            Self::Major => "major",
            Self::Normal => "normal",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
