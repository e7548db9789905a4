use std::collections::HashSet;

use super::WalletAddress;

/// Addresses allowed to vote, and the ledger of those who already have.
///
/// Registration appends without deduplication, so an address registered twice
/// appears twice in [`VoterRegistry::addresses`]. Membership and the voted
/// ledger are unaffected by duplicates.
#[derive(Debug, Default, Clone)]
pub struct VoterRegistry {
    addresses: Vec<WalletAddress>,
    voted: HashSet<WalletAddress>,
}

impl VoterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the given addresses, returning how many were submitted.
    pub fn register<I>(&mut self, addresses: I) -> usize
    where
        I: IntoIterator<Item = WalletAddress>,
    {
        let before = self.addresses.len();
        self.addresses.extend(addresses);
        self.addresses.len() - before
    }

    pub fn is_registered(&self, address: &WalletAddress) -> bool {
        self.addresses.contains(address)
    }

    pub fn has_voted(&self, address: &WalletAddress) -> bool {
        self.voted.contains(address)
    }

    /// Record that `address` has voted. Returns false if it already had.
    pub fn mark_voted(&mut self, address: &WalletAddress) -> bool {
        self.voted.insert(address.clone())
    }

    /// Registered addresses in registration order, duplicates included.
    pub fn addresses(&self) -> &[WalletAddress] {
        &self.addresses
    }

    pub fn votes_recorded(&self) -> usize {
        self.voted.len()
    }
}
