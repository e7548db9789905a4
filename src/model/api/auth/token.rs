use std::marker::PhantomData;

use chrono::{serde::ts_seconds, DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation};
use rocket::{
    http::{Cookie, SameSite},
    outcome::{try_outcome, IntoOutcome},
    request::{FromRequest, Outcome},
    time::Duration,
    Request, State,
};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Error;
use crate::model::voter::WalletAddress;

use super::user::{Rights, User};

pub const AUTH_TOKEN_COOKIE: &str = "wallet_session";

/// A wallet session token: a connected wallet address with specific rights.
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthToken<U> {
    #[serde(rename = "sub")]
    pub address: WalletAddress,
    #[serde(rename = "rgt")]
    pub rights: Rights,
    #[serde(skip)]
    phantom: PhantomData<U>,
}

impl<U> AuthToken<U> {
    /// Does this token permit the given rights?
    pub fn permits(&self, target: Rights) -> bool {
        self.rights == target
    }
}

impl<U> AuthToken<U>
where
    U: User,
{
    /// Create a new [`AuthToken`] for the given wallet, with the rights of this user type.
    pub fn new(address: WalletAddress) -> Self {
        Self {
            address,
            rights: U::RIGHTS,
            phantom: PhantomData,
        }
    }

    #[allow(clippy::missing_panics_doc)]
    /// Serialize this token into a cookie.
    pub fn into_cookie(self, config: &Config) -> Cookie<'static> {
        let claims = Claims {
            token: self,
            expire_at: Utc::now() + config.auth_ttl(),
        };

        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret()),
        )
        .expect("JWT encoding is infallible with default settings");

        Cookie::build(AUTH_TOKEN_COOKIE, token)
            .max_age(Duration::seconds(config.auth_ttl().num_seconds()))
            .http_only(true)
            .same_site(SameSite::Strict)
            .finish()
    }

    /// Deserialize a token from a cookie.
    pub fn from_cookie(cookie: &Cookie<'_>, config: &Config) -> Result<Self, Error> {
        let token = jsonwebtoken::decode(
            cookie.value(),
            &DecodingKey::from_secret(config.jwt_secret()),
            &Validation::default(),
        )
        .map(|claims: TokenData<Claims<U>>| claims.claims.token)?;
        Ok(token)
    }
}

/// Cookie claims: the token itself plus an expiry datetime.
#[derive(Serialize, Deserialize)]
struct Claims<U> {
    #[serde(flatten, bound = "")]
    token: AuthToken<U>,
    #[serde(rename = "exp", with = "ts_seconds")]
    expire_at: DateTime<Utc>,
}

#[rocket::async_trait]
impl<'r, U> FromRequest<'r> for AuthToken<U>
where
    U: User + Send,
{
    type Error = Error;

    /// Get an [`AuthToken`] from the cookie and verify that it has the correct rights for this user
    /// type.
    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        // Unwrap is safe as `Config` is always managed.
        let config = req.guard::<&State<Config>>().await.unwrap();

        // Forward to any routes that do not require a wallet session.
        let cookie = try_outcome!(req.cookies().get(AUTH_TOKEN_COOKIE).or_forward(()));

        // Decode the token.
        let token: Self = try_outcome!(Self::from_cookie(cookie, config).or_forward(()));

        // Check it represents the correct rights.
        if !token.permits(U::RIGHTS) {
            return Outcome::Forward(());
        }

        // Check the wallet still qualifies, e.g. the admin address has not changed.
        if !U::admits(&token.address, config) {
            return Outcome::Forward(());
        }

        Outcome::Success(token)
    }
}

#[cfg(test)]
mod tests {
    use rocket::figment::Figment;

    use crate::model::api::auth::{Admin, Student};

    use super::*;

    fn config() -> Config {
        Figment::from(("auth_ttl", 60))
            .merge(("jwt_secret", "token-test-secret"))
            .extract()
            .unwrap()
    }

    #[test]
    fn cookie_round_trip() {
        let config = config();
        let address = WalletAddress::from("0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb");
        let cookie = AuthToken::<Student>::new(address.clone()).into_cookie(&config);
        assert_eq!(cookie.name(), AUTH_TOKEN_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));

        let token = AuthToken::<Student>::from_cookie(&cookie, &config).unwrap();
        assert_eq!(token.address, address);
        assert!(token.permits(Rights::Student));
        assert!(!token.permits(Rights::Admin));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let config = config();
        let cookie = AuthToken::<Admin>::new(config.admin_address()).into_cookie(&config);

        let other: Config = Figment::from(("auth_ttl", 60))
            .merge(("jwt_secret", "another-secret"))
            .extract()
            .unwrap();
        assert!(AuthToken::<Admin>::from_cookie(&cookie, &other).is_err());
    }
}
