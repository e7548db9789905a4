use std::sync::Arc;

use chrono::Duration;

use crate::model::{
    candidate::CandidateProfile,
    clock::Clock,
    election::VotingPeriod,
    profile::ProfilePins,
    voter::WalletAddress,
};

use super::{ElectionStore, Result};

/// Wallets registered to vote in the demo election.
pub const DEMO_VOTERS: [&str; 2] = [
    "0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb",
    "0xdD2FD4581271e230360230F9337D5c0430Bf44C0",
];

/// Student wallets handed out by the mock wallet connection. The last one is
/// deliberately not registered.
pub const DEMO_STUDENT_WALLETS: [&str; 3] = [
    DEMO_VOTERS[0],
    DEMO_VOTERS[1],
    "0x8626f6940E2eb28930eFb4CeF49B2d1F2C9C1199",
];

const DEMO_TOTAL_VOTERS: u64 = 150;
const DEMO_TOTAL_VOTES: u64 = 87;

impl ElectionStore {
    /// A store pre-populated with the demo election: three candidates, two
    /// registered voters, and a window that opened a day ago and closes in two.
    ///
    /// Candidate profiles are pinned into `pins` so that their hashes resolve.
    pub fn seeded(clock: Arc<dyn Clock>, pins: &mut ProfilePins) -> Result<Self> {
        let now = clock.now();
        let period = VotingPeriod::new(now - Duration::days(1), now + Duration::days(2))?;
        let mut store = Self::new(period, clock);

        for (name, profile) in demo_candidates() {
            let hash = pins.pin(profile.clone());
            store.add_candidate(name.to_string(), hash, profile);
        }

        store
            .registry
            .register(DEMO_VOTERS.iter().copied().map(WalletAddress::from));
        // The demo counters are illustrative and intentionally independent of
        // the registry and the per-candidate tallies.
        store.total_voters = DEMO_TOTAL_VOTERS;
        store.total_votes = DEMO_TOTAL_VOTES;

        Ok(store)
    }
}

fn demo_candidates() -> [(&'static str, CandidateProfile); 3] {
    [
        (
            "Sarah Johnson",
            CandidateProfile {
                photo_url: "/professional-student-leader-portrait.jpg".to_string(),
                biography: "Senior in Political Science with 3 years of student government \
experience. Passionate about creating an inclusive campus environment."
                    .to_string(),
                vision_mission: "Vision: A campus where every student voice matters. Mission: \
Establish transparent communication channels between students and administration, implement \
eco-friendly campus initiatives, and increase funding for student organizations by 30%."
                    .to_string(),
                work_plan: "1. Launch monthly town halls with administration\n\
2. Implement campus-wide recycling program\n\
3. Create emergency fund for students in financial distress\n\
4. Establish mental health awareness week\n\
5. Improve campus Wi-Fi infrastructure"
                    .to_string(),
            },
        ),
        (
            "Michael Chen",
            CandidateProfile {
                photo_url: "/asian-student-leader-portrait.jpg".to_string(),
                biography: "Computer Science major and president of Tech Innovation Club. \
Focused on modernizing campus systems and student engagement."
                    .to_string(),
                vision_mission: "Vision: A technologically advanced campus that prepares \
students for the future. Mission: Digitize student services, expand STEM opportunities, and \
create partnerships with tech companies for internships."
                    .to_string(),
                work_plan: "1. Develop mobile app for campus services\n\
2. Host quarterly hackathons and tech workshops\n\
3. Establish coding bootcamp for non-CS majors\n\
4. Secure partnerships with 5+ tech companies\n\
5. Upgrade computer labs with latest hardware"
                    .to_string(),
            },
        ),
        (
            "Emily Rodriguez",
            CandidateProfile {
                photo_url: "/latina-student-leader-portrait.jpg".to_string(),
                biography: "Business Administration student and founder of the Campus \
Diversity Initiative. Committed to equity, inclusion, and student wellness."
                    .to_string(),
                vision_mission: "Vision: A diverse, equitable, and supportive campus community. \
Mission: Champion diversity initiatives, improve mental health resources, and ensure all \
students have equal access to opportunities."
                    .to_string(),
                work_plan: "1. Double funding for diversity and inclusion programs\n\
2. Establish 24/7 mental health hotline\n\
3. Create scholarship fund for underrepresented students\n\
4. Host cultural awareness events monthly\n\
5. Implement bias training for faculty and staff"
                    .to_string(),
            },
        ),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::model::{clock::FixedClock, election::ElectionStatus};

    use super::*;

    #[test]
    fn demo_election() {
        let mut pins = ProfilePins::new();
        let store = ElectionStore::seeded(Arc::new(FixedClock::at(Utc::now())), &mut pins).unwrap();

        assert_eq!(store.status(), ElectionStatus::Active);
        assert_eq!(store.candidates().len(), 3);
        assert_eq!(pins.len(), 3);
        for candidate in store.candidates() {
            assert_eq!(candidate.vote_count, 0);
            assert_eq!(pins.fetch(&candidate.profile_hash), Some(&candidate.profile));
        }
        assert_eq!(store.total_voters(), DEMO_TOTAL_VOTERS);
        assert_eq!(store.total_votes(), DEMO_TOTAL_VOTES);
        assert_eq!(store.registered_voters().len(), DEMO_VOTERS.len());
        assert!(!store.is_registered_voter(&WalletAddress::from(DEMO_STUDENT_WALLETS[2])));
    }
}
