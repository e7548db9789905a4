use serde::{Deserialize, Serialize};

use crate::model::voter::WalletAddress;

use super::Rights;

/// A request to connect a wallet. Without an address, a mock wallet is picked.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WalletRequest {
    #[serde(default)]
    pub address: Option<String>,
}

/// The view a connected wallet is routed to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

impl From<Rights> for Role {
    fn from(rights: Rights) -> Self {
        match rights {
            Rights::Student => Self::Student,
            Rights::Admin => Self::Admin,
        }
    }
}

/// The connected wallet and the view it is routed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSession {
    pub address: WalletAddress,
    pub role: Role,
}

impl WalletSession {
    pub fn new(address: WalletAddress, rights: Rights) -> Self {
        Self {
            address,
            role: rights.into(),
        }
    }
}
