use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use log::warn;
use rocket::{
    http::Status,
    response::{status::Custom, Responder},
    serde::json::{serde_json::json, Json},
    Request,
};
use thiserror::Error;

use crate::model::store::StoreError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Jwt(#[from] JwtError),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn bad_request(why: impl Into<String>) -> Self {
        Self::BadRequest(why.into())
    }

    /// The HTTP status this error is reported with.
    pub fn status(&self) -> Status {
        match self {
            Self::Store(err) => match err {
                StoreError::NotFound(_) => Status::NotFound,
                StoreError::InvalidWindow { .. } => Status::BadRequest,
                StoreError::AlreadyVoted(_)
                | StoreError::NotRegistered(_)
                | StoreError::ElectionNotActive(_) => Status::Forbidden,
            },
            Self::Jwt(err) => match err.kind() {
                JwtErrorKind::ExpiredSignature | JwtErrorKind::ImmatureSignature => {
                    Status::Unauthorized
                }
                _ => Status::BadRequest,
            },
            Self::BadRequest(_) => Status::BadRequest,
            Self::PayloadTooLarge(_) => Status::PayloadTooLarge,
            Self::NotFound(_) => Status::NotFound,
        }
    }
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        warn!("{} {} failed: {self}", req.method(), req.uri());
        Custom(status, Json(json!({ "error": self.to_string() }))).respond_to(req)
    }
}
