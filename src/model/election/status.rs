use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// States in the election lifecycle, derived from the clock and the voting window.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElectionStatus {
    /// The voting window has not opened yet.
    NotStarted,
    /// Votes may be cast. Both window bounds are inclusive.
    Active,
    /// The voting window has closed.
    Ended,
}

impl ElectionStatus {
    /// Derive the status at `now` for a window running from `start` to `end`.
    pub fn at(now: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if now < start {
            Self::NotStarted
        } else if now <= end {
            Self::Active
        } else {
            Self::Ended
        }
    }
}

impl Display for ElectionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::NotStarted => "not-started",
                Self::Active => "active",
                Self::Ended => "ended",
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use rocket::serde::json::serde_json;

    use super::*;

    #[test]
    fn derive_from_window() {
        let now = Utc::now();
        let hour = Duration::hours(1);

        assert_eq!(
            ElectionStatus::at(now, now - hour, now + hour),
            ElectionStatus::Active
        );
        assert_eq!(
            ElectionStatus::at(now, now + hour, now + hour * 2),
            ElectionStatus::NotStarted
        );
        assert_eq!(
            ElectionStatus::at(now, now - hour * 2, now - hour),
            ElectionStatus::Ended
        );
    }

    #[test]
    fn bounds_are_inclusive() {
        let now = Utc::now();
        let later = now + Duration::minutes(5);

        assert_eq!(ElectionStatus::at(now, now, later), ElectionStatus::Active);
        assert_eq!(ElectionStatus::at(later, now, later), ElectionStatus::Active);
        assert_eq!(
            ElectionStatus::at(later + Duration::milliseconds(1), now, later),
            ElectionStatus::Ended
        );
    }

    #[test]
    fn wire_names() {
        let encoded = serde_json::to_string(&ElectionStatus::NotStarted).unwrap();
        assert_eq!(encoded, "\"not-started\"");
        assert_eq!(ElectionStatus::Ended.to_string(), "ended");
    }
}
