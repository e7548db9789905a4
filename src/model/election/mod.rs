mod period;
mod status;

pub use period::{TimeRemaining, VotingPeriod};
pub use status::ElectionStatus;
