use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{candidate::CandidateId, election::ElectionStatus, voter::WalletAddress};

/// Reasons a store operation can be refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("No candidate with ID {0}")]
    NotFound(CandidateId),
    #[error("Voting period must end after it starts (start {start}, end {end})")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    #[error("Wallet {0} has already voted")]
    AlreadyVoted(WalletAddress),
    #[error("Wallet {0} is not registered to vote")]
    NotRegistered(WalletAddress),
    #[error("Voting is not open: election is {0}")]
    ElectionNotActive(ElectionStatus),
}
