use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::election::{ElectionStatus, TimeRemaining};

use super::ElectionStore;

/// Everything the dashboards show about the election as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectionSummary {
    pub status: ElectionStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub total_voters: u64,
    pub total_votes: u64,
    /// Votes as a rounded percentage of registered voters.
    pub turnout: u64,
    pub candidate_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_remaining: Option<TimeRemaining>,
}

impl ElectionStore {
    /// Snapshot the election as seen at one clock reading.
    pub fn summary(&self) -> ElectionSummary {
        let now = self.now();
        let period = self.voting_period();
        ElectionSummary {
            status: period.status_at(now),
            start_time: period.start_time(),
            end_time: period.end_time(),
            total_voters: self.total_voters,
            total_votes: self.total_votes,
            turnout: turnout(self.total_votes, self.total_voters),
            candidate_count: self.candidates.len(),
            time_remaining: period.remaining_at(now),
        }
    }
}

/// Rounded percentage, half up; zero when nobody is registered.
fn turnout(votes: u64, voters: u64) -> u64 {
    if voters == 0 {
        return 0;
    }
    (votes * 200 + voters) / (voters * 2)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Duration;

    use crate::model::{clock::FixedClock, profile::ProfilePins};

    use super::*;

    #[test]
    fn turnout_rounding() {
        assert_eq!(turnout(0, 0), 0);
        assert_eq!(turnout(87, 150), 58);
        assert_eq!(turnout(1, 8), 13); // 12.5 rounds up
        assert_eq!(turnout(1, 3), 33);
        assert_eq!(turnout(3, 3), 100);
    }

    #[test]
    fn demo_summary() {
        let now = Utc::now();
        let clock = Arc::new(FixedClock::at(now));
        let store = ElectionStore::seeded(clock.clone(), &mut ProfilePins::new()).unwrap();

        let summary = store.summary();
        assert_eq!(summary.status, ElectionStatus::Active);
        assert_eq!(summary.turnout, 58);
        assert_eq!(summary.candidate_count, 3);
        assert_eq!(summary.start_time, now - Duration::days(1));
        assert_eq!(
            summary.time_remaining,
            Some(TimeRemaining {
                days: 2,
                hours: 0,
                minutes: 0,
            })
        );

        clock.advance(Duration::days(3));
        let summary = store.summary();
        assert_eq!(summary.status, ElectionStatus::Ended);
        assert_eq!(summary.time_remaining, None);
    }
}
