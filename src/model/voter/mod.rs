mod address;
mod registry;

pub use address::WalletAddress;
pub use registry::VoterRegistry;
