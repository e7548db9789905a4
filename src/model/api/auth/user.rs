use std::fmt::Display;

use serde_repr::{Deserialize_repr, Serialize_repr};

use crate::{config::Config, model::voter::WalletAddress};

/// A kind of user of our application, having defined rights.
pub trait User {
    /// The rights of this user type.
    const RIGHTS: Rights;

    /// Does this wallet still qualify for these rights under the current config?
    fn admits(address: &WalletAddress, config: &Config) -> bool;
}

/// Different privilege levels.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Rights {
    Student = 0,
    Admin = 1,
}

impl Rights {
    /// Route a wallet to its rights: the configured admin wallet gets admin
    /// rights, everyone else is a student.
    pub fn for_wallet(address: &WalletAddress, config: &Config) -> Self {
        if *address == config.admin_address() {
            Self::Admin
        } else {
            Self::Student
        }
    }
}

impl Display for Rights {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            formatter,
            "{}",
            match self {
                Self::Student => "student",
                Self::Admin => "admin",
            }
        )
    }
}

/// A student wallet, allowed to vote.
#[derive(Debug)]
pub struct Student;

/// The admin wallet, allowed to manage the election.
#[derive(Debug)]
pub struct Admin;

impl User for Student {
    const RIGHTS: Rights = Rights::Student;

    fn admits(address: &WalletAddress, config: &Config) -> bool {
        Rights::for_wallet(address, config) == Rights::Student
    }
}

impl User for Admin {
    const RIGHTS: Rights = Rights::Admin;

    fn admits(address: &WalletAddress, config: &Config) -> bool {
        Rights::for_wallet(address, config) == Rights::Admin
    }
}
