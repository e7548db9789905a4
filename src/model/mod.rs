//! Data model for the campus election: candidates, voters, the voting
//! window and the store that owns them, plus the API-facing request and
//! response types.

pub mod api;
pub mod candidate;
pub mod clock;
pub mod election;
pub mod intake;
pub mod profile;
pub mod store;
pub mod voter;
