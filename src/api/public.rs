use rocket::{serde::json::Json, Route, State};

use crate::{
    config::SharedPins,
    error::{Error, Result},
    latency::ChainOp,
    model::{
        candidate::{Candidate, CandidateId, CandidateProfile},
        profile::ProfileHash,
        store::{ElectionSummary, SharedStore},
    },
    Config,
};

pub fn routes() -> Vec<Route> {
    routes![election_summary, get_candidates, get_candidate, get_profile]
}

#[get("/election")]
async fn election_summary(store: &State<SharedStore>) -> Json<ElectionSummary> {
    Json(store.lock().await.summary())
}

#[get("/candidates")]
async fn get_candidates(store: &State<SharedStore>) -> Json<Vec<Candidate>> {
    Json(store.lock().await.candidates().to_vec())
}

#[get("/candidates/<candidate_id>")]
async fn get_candidate(
    candidate_id: CandidateId,
    store: &State<SharedStore>,
) -> Result<Json<Candidate>> {
    store
        .lock()
        .await
        .candidate(candidate_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Error::not_found(format!("Candidate {candidate_id}")))
}

#[get("/profiles/<hash>")]
async fn get_profile(
    hash: String,
    pins: &State<SharedPins>,
    config: &State<Config>,
) -> Result<Json<CandidateProfile>> {
    config.latency().settle(ChainOp::Fetch).await;
    let hash = ProfileHash::from(hash);
    pins.lock()
        .await
        .fetch(&hash)
        .cloned()
        .map(Json)
        .ok_or_else(|| Error::not_found(format!("Profile {hash}")))
}
