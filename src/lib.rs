#[macro_use]
extern crate rocket;

#[cfg(test)]
#[macro_use]
extern crate backend_test;

use rocket::{Build, Rocket};

pub mod api;
pub mod config;
pub mod error;
pub mod latency;
pub mod logging;
pub mod model;
pub mod status_watcher;

pub use config::Config;

use config::{ConfigFairing, StoreFairing};
use logging::LoggerFairing;

/// Build the server from `Rocket.toml` and `ROCKET_*` environment variables.
pub fn build() -> Rocket<Build> {
    assemble(rocket::build())
}

/// Mount the routes and attach the fairings. The config fairing must come
/// before the store fairing, which reads it.
fn assemble(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .mount("/", api::routes())
        .attach(LoggerFairing)
        .attach(ConfigFairing)
        .attach(StoreFairing)
}

/// A server for tests: demo data, no simulated latency, fixed secrets.
#[cfg(test)]
pub(crate) fn test_rocket() -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("jwt_secret", "test-jwt-secret"))
        .merge(("auth_ttl", 3600))
        .merge(("admin_address", config::DEFAULT_ADMIN_ADDRESS))
        .merge(("seed_demo_data", true))
        .merge(("status_poll_ms", 50))
        .merge(("voter_file_limit", "64 KiB"))
        .merge(("latency", latency::Latency::none()))
        .merge(("log_level", "off"));
    assemble(rocket::custom(figment))
}
