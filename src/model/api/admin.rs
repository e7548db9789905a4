use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{candidate::CandidateProfile, intake::IntakeReport, profile::ProfileHash};

/// A candidate entered by hand. The profile is pinned and the candidate is
/// registered under the resulting hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateSpec {
    pub name: String,
    /// Optional; a placeholder portrait is used when blank.
    #[serde(default)]
    pub photo_url: String,
    pub biography: String,
    pub vision_mission: String,
    pub work_plan: String,
}

impl CandidateSpec {
    /// Check the required fields and build the profile to pin.
    /// Returns the trimmed name alongside the profile.
    pub fn into_profile(self) -> Result<(String, CandidateProfile)> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(Error::bad_request("Please enter candidate name"));
        }
        if [&self.biography, &self.vision_mission, &self.work_plan]
            .iter()
            .any(|field| field.trim().is_empty())
        {
            return Err(Error::bad_request(
                "Please fill in all candidate profile fields",
            ));
        }

        let photo_url = if self.photo_url.trim().is_empty() {
            CandidateProfile::placeholder_photo(&name)
        } else {
            self.photo_url
        };
        let profile = CandidateProfile {
            photo_url,
            biography: self.biography,
            vision_mission: self.vision_mission,
            work_plan: self.work_plan,
        };
        Ok((name, profile))
    }
}

/// A candidate registered directly from an existing profile hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashCandidateSpec {
    pub name: String,
    pub profile_hash: String,
}

impl HashCandidateSpec {
    /// Check both fields are present, returning the trimmed name and hash.
    pub fn validate(self) -> Result<(String, ProfileHash)> {
        let name = self.name.trim();
        let hash = self.profile_hash.trim();
        if name.is_empty() || hash.is_empty() {
            return Err(Error::bad_request(
                "Please enter both candidate name and IPFS hash",
            ));
        }
        Ok((name.to_string(), ProfileHash::from(hash.to_string())))
    }
}

/// A new voting window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodSpec {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Result of a voter registration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReport {
    /// How many addresses were registered by this request.
    pub registered: usize,
    /// How many records were rejected by validation.
    pub invalid_count: usize,
    /// The registered voter counter after this request.
    pub total_voters: u64,
}

impl RegistrationReport {
    pub fn new(intake: &IntakeReport, total_voters: u64) -> Self {
        Self {
            registered: intake.valid_count(),
            invalid_count: intake.invalid_count,
            total_voters,
        }
    }
}

#[cfg(test)]
mod examples {
    use super::*;

    impl CandidateSpec {
        pub fn example() -> Self {
            let profile = CandidateProfile::example();
            Self {
                name: "Ada Lovelace".to_string(),
                photo_url: profile.photo_url,
                biography: profile.biography,
                vision_mission: profile.vision_mission,
                work_plan: profile.work_plan,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_rejected() {
        let mut spec = CandidateSpec::example();
        spec.name = "   ".to_string();
        assert!(matches!(spec.into_profile(), Err(Error::BadRequest(_))));

        let mut spec = CandidateSpec::example();
        spec.work_plan = "\n".to_string();
        assert!(matches!(spec.into_profile(), Err(Error::BadRequest(_))));

        let spec = HashCandidateSpec {
            name: "Budi".to_string(),
            profile_hash: " ".to_string(),
        };
        assert!(matches!(spec.validate(), Err(Error::BadRequest(_))));
    }

    #[test]
    fn missing_photo_gets_placeholder() {
        let mut spec = CandidateSpec::example();
        spec.photo_url = String::new();
        spec.name = " Ada ".to_string();
        let (name, profile) = spec.into_profile().unwrap();
        assert_eq!(name, "Ada");
        assert_eq!(profile.photo_url, CandidateProfile::placeholder_photo("Ada"));
    }
}
