use std::sync::Arc;

use chrono::{Duration, Utc};
use log::{error, info, warn};
use rocket::{
    data::{ByteUnit, ToByteUnit},
    fairing::{Fairing, Info, Kind},
    tokio::{sync::Mutex, time::Duration as StdDuration},
    Build, Orbit, Rocket,
};
use serde::Deserialize;

use crate::latency::Latency;
use crate::model::{
    clock::{Clock, SystemClock},
    election::VotingPeriod,
    profile::ProfilePins,
    store::ElectionStore,
    voter::WalletAddress,
};
use crate::status_watcher::StatusWatcher;

/// Wallet that the mock connection treats as the election administrator.
pub const DEFAULT_ADMIN_ADDRESS: &str = "0xAdmin123456789abcdef";

/// Profile pins as shared between request handlers.
pub type SharedPins = Arc<Mutex<ProfilePins>>;

/// Application configuration, derived from `Rocket.toml` and `ROCKET_*`
/// environment variables. This struct becomes managed state and can be
/// inspected by any endpoint.
#[derive(Deserialize)]
pub struct Config {
    // non-secrets
    auth_ttl: u32,
    #[serde(default = "default_admin_address")]
    admin_address: String,
    #[serde(default = "default_seed_demo_data")]
    seed_demo_data: bool,
    #[serde(default = "default_status_poll_ms")]
    status_poll_ms: u64,
    #[serde(default = "default_voter_file_limit")]
    voter_file_limit: ByteUnit,
    #[serde(default)]
    latency: Latency,
    // secrets
    jwt_secret: String,
}

fn default_admin_address() -> String {
    DEFAULT_ADMIN_ADDRESS.to_string()
}

fn default_seed_demo_data() -> bool {
    true
}

fn default_status_poll_ms() -> u64 {
    1000
}

fn default_voter_file_limit() -> ByteUnit {
    1.mebibytes()
}

impl Config {
    /// Valid lifetime of wallet session cookies in seconds.
    pub fn auth_ttl(&self) -> Duration {
        Duration::seconds(self.auth_ttl.into())
    }

    /// Secret key used to sign session JWTs.
    pub fn jwt_secret(&self) -> &[u8] {
        self.jwt_secret.as_bytes()
    }

    /// The wallet address that is routed to the admin views.
    pub fn admin_address(&self) -> WalletAddress {
        WalletAddress::from(self.admin_address.as_str())
    }

    /// Whether to start from the demo election or an empty one.
    pub fn seed_demo_data(&self) -> bool {
        self.seed_demo_data
    }

    /// How often the election status is re-derived.
    pub fn status_poll_interval(&self) -> StdDuration {
        StdDuration::from_millis(self.status_poll_ms)
    }

    /// Largest voter file accepted by the CSV upload.
    pub fn voter_file_limit(&self) -> ByteUnit {
        self.voter_file_limit
    }

    /// Simulated chain latency per operation.
    pub fn latency(&self) -> &Latency {
        &self.latency
    }
}

/// A fairing that loads the application config and puts it in managed state.
pub struct ConfigFairing;

#[rocket::async_trait]
impl Fairing for ConfigFairing {
    fn info(&self) -> Info {
        Info {
            name: "Config",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        // Load the config.
        let config = match rocket.figment().extract::<Config>() {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load application config");
                rocket::config::pretty_print_error(e);
                return Err(rocket);
            }
        };
        if config.status_poll_ms == 0 {
            error!("status_poll_ms must be at least 1");
            return Err(rocket);
        }
        if WalletAddress::parse(&config.admin_address).is_none() {
            warn!(
                "Admin address {} is not a well-formed wallet address; nobody can connect as admin",
                config.admin_address
            );
        }

        // Manage the state.
        rocket = rocket.manage(config);
        Ok(rocket)
    }
}

/// A fairing that builds the in-memory election: the store, the profile pins
/// and the status watcher, placing all three into managed state.
/// Must be attached after [`ConfigFairing`]. The watcher is stopped on shutdown.
pub struct StoreFairing;

#[rocket::async_trait]
impl Fairing for StoreFairing {
    fn info(&self) -> Info {
        Info {
            name: "Election store",
            kind: Kind::Ignite | Kind::Shutdown,
        }
    }

    async fn on_ignite(&self, mut rocket: Rocket<Build>) -> rocket::fairing::Result {
        let (seed, poll_interval) = match rocket.state::<Config>() {
            Some(config) => (config.seed_demo_data(), config.status_poll_interval()),
            None => {
                error!("Election store requires the application config");
                return Err(rocket);
            }
        };

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let mut pins = ProfilePins::new();
        let store = if seed {
            info!("Seeding demo election");
            ElectionStore::seeded(clock, &mut pins)
        } else {
            let now = Utc::now();
            VotingPeriod::new(now, now + Duration::days(1))
                .map(|period| ElectionStore::new(period, clock))
        };
        let store = match store {
            Ok(store) => store,
            Err(e) => {
                error!("Failed to create the election: {e}");
                return Err(rocket);
            }
        };
        let initial = store.status();
        info!(
            "Election ready with {} candidates, status {initial}",
            store.candidates().len()
        );

        let store = store.into_shared();
        let watcher = StatusWatcher::spawn(store.clone(), initial, poll_interval);
        let pins: SharedPins = Arc::new(Mutex::new(pins));

        // Manage the state.
        rocket = rocket.manage(store).manage(pins).manage(watcher);
        Ok(rocket)
    }

    async fn on_shutdown(&self, rocket: &Rocket<Orbit>) {
        if let Some(watcher) = rocket.state::<StatusWatcher>() {
            watcher.stop();
            info!("Stopped election status watcher");
        }
    }
}
