use log::info;
use rand::Rng;
use rocket::{
    http::{Cookie, CookieJar, Status},
    serde::json::Json,
    Route, State,
};

use crate::{
    error::{Error, Result},
    latency::ChainOp,
    model::{
        api::auth::{
            Admin, AuthToken, Rights, Student, WalletRequest, WalletSession, AUTH_TOKEN_COOKIE,
        },
        store::DEMO_STUDENT_WALLETS,
        voter::WalletAddress,
    },
    Config,
};

pub fn routes() -> Vec<Route> {
    routes![connect, disconnect]
}

#[post("/auth/wallet", data = "<request>", format = "json")]
pub async fn connect(
    cookies: &CookieJar<'_>,
    request: Json<WalletRequest>,
    config: &State<Config>,
) -> Result<Json<WalletSession>> {
    config.latency().settle(ChainOp::Connect).await;

    let address = match request.0.address {
        Some(raw) => WalletAddress::parse(&raw)
            .ok_or_else(|| Error::bad_request(format!("Malformed wallet address {raw:?}")))?,
        None => mock_wallet(config),
    };

    // Route based on wallet address.
    let rights = Rights::for_wallet(&address, config);
    let cookie = match rights {
        Rights::Admin => AuthToken::<Admin>::new(address.clone()).into_cookie(config),
        Rights::Student => AuthToken::<Student>::new(address.clone()).into_cookie(config),
    };
    cookies.add(cookie);
    info!("Wallet {} connected as {rights}", address.short());

    Ok(Json(WalletSession::new(address, rights)))
}

#[delete("/auth")]
pub fn disconnect(cookies: &CookieJar) -> Status {
    cookies.remove(Cookie::named(AUTH_TOKEN_COOKIE));
    Status::Ok
}

/// Pick one of the demo wallets at random, admin included.
fn mock_wallet(config: &Config) -> WalletAddress {
    let pick = rand::thread_rng().gen_range(0..=DEMO_STUDENT_WALLETS.len());
    match DEMO_STUDENT_WALLETS.get(pick) {
        Some(wallet) => WalletAddress::from(*wallet),
        None => config.admin_address(),
    }
}
