use rocket::http::RawStr;
use serde::{Deserialize, Serialize};

use super::profile::ProfileHash;

/// Candidate IDs are positive integers, allocated in increasing order and never reused.
pub type CandidateId = u32;

/// The profile document a candidate publishes, addressed by its [`ProfileHash`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
    pub photo_url: String,
    pub biography: String,
    pub vision_mission: String,
    pub work_plan: String,
}

impl CandidateProfile {
    /// Placeholder portrait for candidates registered without a photo.
    pub fn placeholder_photo(name: &str) -> String {
        format!(
            "/placeholder.svg?height=200&width=300&query={}",
            RawStr::new(name).percent_encode()
        )
    }

    /// Stand-in profile for a candidate whose hash could not be resolved from the pin store.
    pub fn unresolved(name: &str) -> Self {
        Self {
            photo_url: Self::placeholder_photo(name),
            biography: "Profile fetched from IPFS hash".to_string(),
            vision_mission: "Vision and mission retrieved from decentralized storage".to_string(),
            work_plan: "Work programs loaded from IPFS".to_string(),
        }
    }
}

/// A candidate standing in the election, with their running tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
    pub profile_hash: ProfileHash,
    pub profile: CandidateProfile,
    pub vote_count: u64,
}

#[cfg(test)]
mod examples {
    use super::*;

    impl CandidateProfile {
        pub fn example() -> Self {
            Self {
                photo_url: "/portraits/ada.jpg".to_string(),
                biography: "Mathematics major and chess club treasurer.".to_string(),
                vision_mission: "Vision: a campus that computes. Mission: open labs.".to_string(),
                work_plan: "1. Extend library hours\n2. Free printing credits".to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_photo_is_escaped() {
        let url = CandidateProfile::placeholder_photo("Ana María");
        assert!(url.starts_with("/placeholder.svg?height=200&width=300&query="));
        assert!(!url.contains(' '));
    }

    #[test]
    fn unresolved_profile_keeps_name_in_photo() {
        let profile = CandidateProfile::unresolved("Budi");
        assert!(profile.photo_url.ends_with("query=Budi"));
        assert_eq!(profile.biography, "Profile fetched from IPFS hash");
    }
}
