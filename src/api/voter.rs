use log::info;
use rocket::{serde::json::Json, Route, State};

use crate::{
    error::Result,
    latency::ChainOp,
    model::{
        api::{
            auth::{AuthToken, Student},
            voter::{VoteReceipt, VoterStatus},
        },
        candidate::CandidateId,
        store::SharedStore,
    },
    status_watcher::StatusWatcher,
    Config,
};

pub fn routes() -> Vec<Route> {
    routes![voter_status, vote]
}

#[get("/voter/status")]
async fn voter_status(token: AuthToken<Student>, store: &State<SharedStore>) -> Json<VoterStatus> {
    let store = store.lock().await;
    Json(VoterStatus {
        registered: store.is_registered_voter(&token.address),
        has_voted: store.has_voted(&token.address),
        address: token.address,
    })
}

#[post("/voter/vote/<candidate_id>")]
async fn vote(
    token: AuthToken<Student>,
    candidate_id: CandidateId,
    store: &State<SharedStore>,
    watcher: &State<StatusWatcher>,
    config: &State<Config>,
) -> Result<Json<VoteReceipt>> {
    config.latency().settle(ChainOp::Vote).await;

    let mut store = store.lock().await;
    // Publish a transition the clock may have crossed since the last tick.
    watcher.refresh(&store);
    store.cast_vote(&token.address, candidate_id)?;
    info!("Vote recorded on chain from {}", token.address.short());

    Ok(Json(VoteReceipt {
        candidate_id,
        cast_at: store.now(),
        voter: token.address,
    }))
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use rocket::{
        http::{ContentType, Status},
        local::asynchronous::Client,
        serde::json::serde_json::{self, json},
    };

    use crate::model::{
        api::auth::WalletRequest, store::DEMO_STUDENT_WALLETS, voter::WalletAddress,
    };

    use super::*;

    async fn status_of(client: &Client) -> VoterStatus {
        let response = client.get(uri!(voter_status)).dispatch().await;
        assert_eq!(Status::Ok, response.status());
        serde_json::from_str(&response.into_string().await.unwrap()).unwrap()
    }

    async fn vote_expect_status(client: &Client, candidate_id: CandidateId, expected: Status) {
        let response = client.post(uri!(vote(candidate_id))).dispatch().await;
        assert_eq!(expected, response.status());
    }

    #[backend_test(student)]
    async fn vote_once(client: Client, store: SharedStore) {
        let before = status_of(&client).await;
        assert!(before.registered);
        assert!(!before.has_voted);

        let response = client.post(uri!(vote(3))).dispatch().await;
        assert_eq!(Status::Ok, response.status());
        let receipt: VoteReceipt =
            serde_json::from_str(&response.into_string().await.unwrap()).unwrap();
        assert_eq!(receipt.candidate_id, 3);
        assert_eq!(receipt.voter, before.address);

        {
            let store = store.lock().await;
            let tallies: Vec<u64> = store.candidates().iter().map(|c| c.vote_count).collect();
            assert_eq!(tallies, vec![0, 0, 1]);
            assert_eq!(store.total_votes(), 88);
        }
        assert!(status_of(&client).await.has_voted);

        // A second vote, for anyone, is refused.
        vote_expect_status(&client, 1, Status::Forbidden).await;
        vote_expect_status(&client, 3, Status::Forbidden).await;
        assert_eq!(store.lock().await.total_votes(), 88);
    }

    #[backend_test(student)]
    async fn vote_for_missing_candidate(client: Client, store: SharedStore) {
        vote_expect_status(&client, 42, Status::NotFound).await;
        assert!(!status_of(&client).await.has_voted);
        assert_eq!(store.lock().await.total_votes(), 87);
    }

    #[backend_test(student)]
    async fn vote_after_election_ended(client: Client, store: SharedStore) {
        let now = Utc::now();
        store
            .lock()
            .await
            .set_voting_period(now - Duration::days(2), now - Duration::days(1))
            .unwrap();

        vote_expect_status(&client, 1, Status::Forbidden).await;
        assert!(!status_of(&client).await.has_voted);
    }

    #[backend_test]
    async fn unregistered_student_cannot_vote(client: Client) {
        let unregistered = DEMO_STUDENT_WALLETS[2];
        client
            .post(uri!(crate::api::auth::connect))
            .header(ContentType::JSON)
            .body(
                json!(WalletRequest {
                    address: Some(unregistered.to_string()),
                })
                .to_string(),
            )
            .dispatch()
            .await;

        let status = status_of(&client).await;
        assert_eq!(status.address, WalletAddress::from(unregistered));
        assert!(!status.registered);
        vote_expect_status(&client, 1, Status::Forbidden).await;
    }

    #[backend_test]
    async fn vote_requires_wallet(client: Client) {
        // Without a session no route matches.
        vote_expect_status(&client, 1, Status::NotFound).await;
    }

    #[backend_test(admin)]
    async fn admin_cannot_vote(client: Client) {
        vote_expect_status(&client, 1, Status::NotFound).await;
    }
}
