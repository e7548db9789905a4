use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Required prefix of a well-formed wallet address.
pub const ADDRESS_PREFIX: &str = "0x";
/// Minimum length of a well-formed wallet address, prefix included.
pub const MIN_ADDRESS_LENGTH: usize = 10;

/// A wallet address identifying a voter or admin.
///
/// The store treats addresses as opaque strings; well-formedness is only
/// checked at the edges via [`WalletAddress::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WalletAddress(String);

impl WalletAddress {
    /// Trim and validate a raw address: it must start with `0x` and be at least
    /// ten characters long.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        (trimmed.starts_with(ADDRESS_PREFIX) && trimmed.chars().count() >= MIN_ADDRESS_LENGTH)
            .then(|| Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated form for display, e.g. `0x742d...0bEb`.
    pub fn short(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 10 {
            return self.0.clone();
        }
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    }
}

impl From<&str> for WalletAddress {
    fn from(address: &str) -> Self {
        Self(address.to_string())
    }
}

impl From<String> for WalletAddress {
    fn from(address: String) -> Self {
        Self(address)
    }
}

impl Display for WalletAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_applies_prefix_and_length() {
        assert_eq!(
            WalletAddress::parse("  0x1234567890abcdef "),
            Some(WalletAddress::from("0x1234567890abcdef"))
        );
        assert_eq!(
            WalletAddress::parse("0x12345678"),
            Some(WalletAddress::from("0x12345678"))
        );
        assert_eq!(WalletAddress::parse("0x1234567"), None);
        assert_eq!(WalletAddress::parse("0xabc"), None);
        assert_eq!(WalletAddress::parse("1x1234567890"), None);
        assert_eq!(WalletAddress::parse(""), None);
    }

    #[test]
    fn short_form() {
        let address = WalletAddress::from("0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb");
        assert_eq!(address.short(), "0x742d...0bEb");
        assert_eq!(WalletAddress::from("0xabc").short(), "0xabc");
    }
}
