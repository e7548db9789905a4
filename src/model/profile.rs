use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use data_encoding::BASE32_NOPAD;
use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::candidate::CandidateProfile;

/// Prefix shared by all simulated content addresses.
const HASH_PREFIX: &str = "Qm";

/// A simulated content address for a candidate profile document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileHash(String);

impl ProfileHash {
    /// Compute the content address of a profile.
    /// Each field is length-prefixed so that field boundaries cannot be shifted.
    pub fn of(profile: &CandidateProfile) -> Self {
        let mut hasher = Sha256::new();
        for field in [
            &profile.photo_url,
            &profile.biography,
            &profile.vision_mission,
            &profile.work_plan,
        ] {
            hasher.update((field.len() as u64).to_le_bytes());
            hasher.update(field.as_bytes());
        }
        let digest = hasher.finalize();
        Self(format!("{HASH_PREFIX}{}", BASE32_NOPAD.encode(&digest)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ProfileHash {
    /// Wrap a hash supplied by an admin. No format is enforced.
    fn from(hash: String) -> Self {
        Self(hash)
    }
}

impl Display for ProfileHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// In-memory stand-in for a pinning service: profiles stored by content address.
#[derive(Debug, Default)]
pub struct ProfilePins {
    pins: HashMap<ProfileHash, CandidateProfile>,
}

impl ProfilePins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pin a profile, returning its content address. Pinning the same profile twice is harmless.
    pub fn pin(&mut self, profile: CandidateProfile) -> ProfileHash {
        let hash = ProfileHash::of(&profile);
        debug!("Pinned profile {hash}");
        self.pins.insert(hash.clone(), profile);
        hash
    }

    /// Look up a pinned profile.
    pub fn fetch(&self, hash: &ProfileHash) -> Option<&CandidateProfile> {
        self.pins.get(hash)
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }
}
