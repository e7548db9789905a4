//! Simulated chain and storage latency.
//!
//! Every mutating endpoint waits for the delay configured for its operation
//! before touching the store, mimicking a transaction round trip. Delays
//! always complete; there is no failure, retry or cancellation. Tests use
//! [`Latency::none`].

use std::fmt::{Display, Formatter};

use log::debug;
use rocket::tokio::time::{sleep, Duration};
use serde::{Deserialize, Serialize};

/// Operations that incur simulated latency.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChainOp {
    Connect,
    Vote,
    Pin,
    Fetch,
    SetPeriod,
    Remove,
    Register,
    Intake,
}

impl Display for ChainOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Connect => "wallet connection",
                Self::Vote => "vote transaction",
                Self::Pin => "profile pinning",
                Self::Fetch => "profile fetch",
                Self::SetPeriod => "voting period transaction",
                Self::Remove => "candidate removal",
                Self::Register => "voter registration",
                Self::Intake => "voter file processing",
            }
        )
    }
}

/// Per-operation delays in milliseconds.
/// Configured via the `latency` table; missing entries take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Latency {
    connect: u64,
    vote: u64,
    pin: u64,
    fetch: u64,
    set_period: u64,
    remove: u64,
    register: u64,
    intake: u64,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            connect: 1500,
            vote: 2000,
            pin: 2000,
            fetch: 1500,
            set_period: 1500,
            remove: 500,
            register: 1500,
            intake: 1000,
        }
    }
}

impl Latency {
    /// No delays at all.
    pub fn none() -> Self {
        Self {
            connect: 0,
            vote: 0,
            pin: 0,
            fetch: 0,
            set_period: 0,
            remove: 0,
            register: 0,
            intake: 0,
        }
    }

    /// The delay configured for an operation.
    pub fn delay(&self, op: ChainOp) -> Duration {
        let millis = match op {
            ChainOp::Connect => self.connect,
            ChainOp::Vote => self.vote,
            ChainOp::Pin => self.pin,
            ChainOp::Fetch => self.fetch,
            ChainOp::SetPeriod => self.set_period,
            ChainOp::Remove => self.remove,
            ChainOp::Register => self.register,
            ChainOp::Intake => self.intake,
        };
        Duration::from_millis(millis)
    }

    /// Wait out the simulated latency of an operation.
    pub async fn settle(&self, op: ChainOp) {
        let delay = self.delay(op);
        if delay.is_zero() {
            return;
        }
        debug!("Simulating {op} ({} ms)", delay.as_millis());
        sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use rocket::tokio::time::Instant;

    use super::*;

    #[test]
    fn defaults_match_mock_timings() {
        let latency = Latency::default();
        assert_eq!(latency.delay(ChainOp::Vote), Duration::from_millis(2000));
        assert_eq!(latency.delay(ChainOp::Remove), Duration::from_millis(500));
        assert_eq!(latency.delay(ChainOp::Intake), Duration::from_millis(1000));
    }

    #[rocket::async_test]
    async fn none_does_not_wait() {
        let start = Instant::now();
        Latency::none().settle(ChainOp::Vote).await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[rocket::async_test]
    async fn configured_delay_is_awaited() {
        let latency = Latency {
            remove: 30,
            ..Latency::none()
        };
        let start = Instant::now();
        latency.settle(ChainOp::Remove).await;
        assert!(start.elapsed() >= Duration::from_millis(30));
    }
}
