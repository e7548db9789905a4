//! The election state store: the single owner of candidates, tallies, the
//! voter registry and the voting window.
//!
//! All mutation goes through [`ElectionStore`]'s methods. Election status is
//! never stored; it is derived from the injected [`Clock`] and the current
//! [`VotingPeriod`] whenever it is read.

mod errors;
mod seed;
mod summary;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, info};
use rocket::tokio::sync::Mutex;

use super::{
    candidate::{Candidate, CandidateId, CandidateProfile},
    clock::Clock,
    election::{ElectionStatus, VotingPeriod},
    profile::ProfileHash,
    voter::{VoterRegistry, WalletAddress},
};

pub use errors::StoreError;
pub use seed::{DEMO_STUDENT_WALLETS, DEMO_VOTERS};
pub use summary::ElectionSummary;

pub type Result<T> = std::result::Result<T, StoreError>;

/// The store as shared between request handlers and the status watcher.
pub type SharedStore = Arc<Mutex<ElectionStore>>;

pub struct ElectionStore {
    candidates: Vec<Candidate>,
    /// Highest ID ever allocated, so removed IDs are never handed out again.
    last_candidate_id: CandidateId,
    registry: VoterRegistry,
    period: VotingPeriod,
    total_votes: u64,
    total_voters: u64,
    clock: Arc<dyn Clock>,
}

impl ElectionStore {
    /// Create an empty store for the given voting period.
    pub fn new(period: VotingPeriod, clock: Arc<dyn Clock>) -> Self {
        Self {
            candidates: Vec::new(),
            last_candidate_id: 0,
            registry: VoterRegistry::new(),
            period,
            total_votes: 0,
            total_voters: 0,
            clock,
        }
    }

    /// Wrap this store for sharing.
    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    /// Cast `voter`'s vote for a candidate.
    ///
    /// The election must be active, the voter registered and not yet voted,
    /// and the candidate must exist. On success exactly one tally and the
    /// global vote count are incremented.
    pub fn cast_vote(
        &mut self,
        voter: &WalletAddress,
        candidate_id: CandidateId,
    ) -> Result<&Candidate> {
        let status = self.status();
        if status != ElectionStatus::Active {
            return Err(StoreError::ElectionNotActive(status));
        }
        if !self.registry.is_registered(voter) {
            return Err(StoreError::NotRegistered(voter.clone()));
        }
        if self.registry.has_voted(voter) {
            return Err(StoreError::AlreadyVoted(voter.clone()));
        }
        let candidate = self
            .candidates
            .iter_mut()
            .find(|c| c.id == candidate_id)
            .ok_or(StoreError::NotFound(candidate_id))?;

        candidate.vote_count += 1;
        self.registry.mark_voted(voter);
        self.total_votes += 1;
        debug!("Vote recorded for candidate {candidate_id} by {}", voter.short());
        Ok(candidate)
    }

    /// Add a new candidate with a fresh ID and a zero tally.
    pub fn add_candidate(
        &mut self,
        name: String,
        profile_hash: ProfileHash,
        profile: CandidateProfile,
    ) -> &Candidate {
        self.last_candidate_id += 1;
        let candidate = Candidate {
            id: self.last_candidate_id,
            name,
            profile_hash,
            profile,
            vote_count: 0,
        };
        info!("Added candidate {} ({})", candidate.id, candidate.name);
        self.candidates.push(candidate);
        &self.candidates[self.candidates.len() - 1]
    }

    /// Remove a candidate. Its ID is retired.
    pub fn remove_candidate(&mut self, candidate_id: CandidateId) -> Result<Candidate> {
        let index = self
            .candidates
            .iter()
            .position(|c| c.id == candidate_id)
            .ok_or(StoreError::NotFound(candidate_id))?;
        let removed = self.candidates.remove(index);
        info!("Removed candidate {} ({})", removed.id, removed.name);
        Ok(removed)
    }

    /// Register voters without deduplication. `total_voters` grows by the
    /// number submitted, whether or not they were already present.
    pub fn register_voters<I>(&mut self, addresses: I) -> usize
    where
        I: IntoIterator<Item = WalletAddress>,
    {
        let added = self.registry.register(addresses);
        self.total_voters += added as u64;
        info!("Registered {added} voters ({} total)", self.total_voters);
        added
    }

    /// Replace the voting window.
    pub fn set_voting_period(&mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<()> {
        self.period = VotingPeriod::new(start, end)?;
        info!("Voting period set to {start} .. {end}");
        Ok(())
    }

    pub fn is_registered_voter(&self, address: &WalletAddress) -> bool {
        self.registry.is_registered(address)
    }

    pub fn has_voted(&self, address: &WalletAddress) -> bool {
        self.registry.has_voted(address)
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn candidate(&self, candidate_id: CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| c.id == candidate_id)
    }

    pub fn registered_voters(&self) -> &[WalletAddress] {
        self.registry.addresses()
    }

    pub fn voting_period(&self) -> VotingPeriod {
        self.period
    }

    pub fn total_votes(&self) -> u64 {
        self.total_votes
    }

    pub fn total_voters(&self) -> u64 {
        self.total_voters
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Current election status according to the store's clock.
    pub fn status(&self) -> ElectionStatus {
        self.status_at(self.now())
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> ElectionStatus {
        self.period.status_at(now)
    }
}
