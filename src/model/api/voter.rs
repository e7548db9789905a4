use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{candidate::CandidateId, voter::WalletAddress};

/// What a connected student needs to know before voting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoterStatus {
    pub address: WalletAddress,
    pub registered: bool,
    pub has_voted: bool,
}

/// Acknowledgement of a recorded vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoteReceipt {
    pub candidate_id: CandidateId,
    pub voter: WalletAddress,
    pub cast_at: DateTime<Utc>,
}
