use log::{info, warn};
use rocket::{serde::json::Json, Data, Route, State};

use crate::{
    config::SharedPins,
    error::{Error, Result},
    latency::ChainOp,
    model::{
        api::{
            admin::{CandidateSpec, HashCandidateSpec, PeriodSpec, RegistrationReport},
            auth::{Admin, AuthToken},
        },
        candidate::{Candidate, CandidateId, CandidateProfile},
        intake::IntakeReport,
        store::{ElectionSummary, SharedStore},
        voter::WalletAddress,
    },
    status_watcher::StatusWatcher,
    Config,
};

pub fn routes() -> Vec<Route> {
    routes![
        add_candidate,
        add_candidate_by_hash,
        remove_candidate,
        register_voters,
        register_voters_csv,
        get_voters,
        set_period
    ]
}

#[post("/admin/candidates", data = "<spec>", format = "json")]
async fn add_candidate(
    _token: AuthToken<Admin>,
    spec: Json<CandidateSpec>,
    store: &State<SharedStore>,
    pins: &State<SharedPins>,
    config: &State<Config>,
) -> Result<Json<Candidate>> {
    let (name, profile) = spec.0.into_profile()?;

    // Upload the profile, then register the candidate under its hash.
    config.latency().settle(ChainOp::Pin).await;
    let hash = pins.lock().await.pin(profile.clone());
    config.latency().settle(ChainOp::Register).await;

    let mut store = store.lock().await;
    Ok(Json(store.add_candidate(name, hash, profile).clone()))
}

#[post("/admin/candidates/hash", data = "<spec>", format = "json")]
async fn add_candidate_by_hash(
    _token: AuthToken<Admin>,
    spec: Json<HashCandidateSpec>,
    store: &State<SharedStore>,
    pins: &State<SharedPins>,
    config: &State<Config>,
) -> Result<Json<Candidate>> {
    let (name, hash) = spec.0.validate()?;

    config.latency().settle(ChainOp::Fetch).await;
    let profile = match pins.lock().await.fetch(&hash) {
        Some(profile) => profile.clone(),
        None => {
            warn!("Profile {hash} is not pinned, using a placeholder");
            CandidateProfile::unresolved(&name)
        }
    };
    config.latency().settle(ChainOp::Register).await;

    let mut store = store.lock().await;
    Ok(Json(store.add_candidate(name, hash, profile).clone()))
}

#[delete("/admin/candidates/<candidate_id>")]
async fn remove_candidate(
    _token: AuthToken<Admin>,
    candidate_id: CandidateId,
    store: &State<SharedStore>,
    config: &State<Config>,
) -> Result<Json<Candidate>> {
    config.latency().settle(ChainOp::Remove).await;
    let removed = store.lock().await.remove_candidate(candidate_id)?;
    Ok(Json(removed))
}

#[post("/admin/voters", data = "<addresses>", format = "json")]
async fn register_voters(
    _token: AuthToken<Admin>,
    addresses: Json<Vec<String>>,
    store: &State<SharedStore>,
    config: &State<Config>,
) -> Result<Json<RegistrationReport>> {
    let intake = IntakeReport::from_records(addresses.0);
    register(intake, store, config).await.map(Json)
}

#[post("/admin/voters/csv", data = "<csv>")]
async fn register_voters_csv(
    _token: AuthToken<Admin>,
    csv: Data<'_>,
    store: &State<SharedStore>,
    config: &State<Config>,
) -> Result<Json<RegistrationReport>> {
    let limit = config.voter_file_limit();
    let csv = csv
        .open(limit)
        .into_string()
        .await
        .map_err(|e| Error::bad_request(format!("Unreadable voter file: {e}")))?;
    if !csv.is_complete() {
        return Err(Error::PayloadTooLarge(format!(
            "Voter file exceeds the {limit} limit"
        )));
    }

    config.latency().settle(ChainOp::Intake).await;
    let intake = IntakeReport::from_csv(&csv);
    info!(
        "Processed voter file: {} valid, {} invalid",
        intake.valid_count(),
        intake.invalid_count
    );
    register(intake, store, config).await.map(Json)
}

async fn register(
    intake: IntakeReport,
    store: &SharedStore,
    config: &Config,
) -> Result<RegistrationReport> {
    if intake.is_empty() {
        return Err(Error::bad_request("No valid wallet addresses found"));
    }

    config.latency().settle(ChainOp::Register).await;
    let mut store = store.lock().await;
    store.register_voters(intake.valid_addresses.iter().cloned());
    Ok(RegistrationReport::new(&intake, store.total_voters()))
}

#[get("/admin/voters")]
async fn get_voters(
    _token: AuthToken<Admin>,
    store: &State<SharedStore>,
) -> Json<Vec<WalletAddress>> {
    Json(store.lock().await.registered_voters().to_vec())
}

#[put("/admin/period", data = "<period>", format = "json")]
async fn set_period(
    _token: AuthToken<Admin>,
    period: Json<PeriodSpec>,
    store: &State<SharedStore>,
    watcher: &State<StatusWatcher>,
    config: &State<Config>,
) -> Result<Json<ElectionSummary>> {
    config.latency().settle(ChainOp::SetPeriod).await;

    let mut store = store.lock().await;
    store.set_voting_period(period.start, period.end)?;
    watcher.refresh(&store);
    Ok(Json(store.summary()))
}
