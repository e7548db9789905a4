use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::model::store::StoreError;

use super::ElectionStatus;

/// The window during which votes may be cast.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VotingPeriod {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
}

impl VotingPeriod {
    /// Create a new voting period, rejecting windows that close before they open.
    pub fn new(start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> Result<Self, StoreError> {
        if end_time <= start_time {
            return Err(StoreError::InvalidWindow {
                start: start_time,
                end: end_time,
            });
        }
        Ok(Self {
            start_time,
            end_time,
        })
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    /// The election status at the given instant.
    pub fn status_at(&self, now: DateTime<Utc>) -> ElectionStatus {
        ElectionStatus::at(now, self.start_time, self.end_time)
    }

    /// Time left until the window closes, if it is currently open.
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Option<TimeRemaining> {
        match self.status_at(now) {
            ElectionStatus::Active => Some(TimeRemaining::from(self.end_time - now)),
            _ => None,
        }
    }
}

/// Countdown shown to voters while the election is running.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRemaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
}

impl From<Duration> for TimeRemaining {
    fn from(left: Duration) -> Self {
        Self {
            days: left.num_days(),
            hours: left.num_hours() % 24,
            minutes: left.num_minutes() % 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_and_empty_windows() {
        let now = Utc::now();
        assert!(matches!(
            VotingPeriod::new(now, now - Duration::hours(1)),
            Err(StoreError::InvalidWindow { .. })
        ));
        assert!(matches!(
            VotingPeriod::new(now, now),
            Err(StoreError::InvalidWindow { .. })
        ));
        assert!(VotingPeriod::new(now, now + Duration::seconds(1)).is_ok());
    }

    #[test]
    fn countdown_only_while_active() {
        let now = Utc::now();
        let period = VotingPeriod::new(
            now - Duration::hours(1),
            now + Duration::days(2) + Duration::hours(3) + Duration::minutes(7),
        )
        .unwrap();

        assert_eq!(
            period.remaining_at(now),
            Some(TimeRemaining {
                days: 2,
                hours: 3,
                minutes: 7,
            })
        );
        assert_eq!(period.remaining_at(now + Duration::days(3)), None);
        assert_eq!(period.remaining_at(now - Duration::days(1)), None);
    }
}
