mod request;
mod token;
mod user;

pub use request::{Role, WalletRequest, WalletSession};
pub use token::{AuthToken, AUTH_TOKEN_COOKIE};
pub use user::{Admin, Rights, Student, User};
