//! Voter intake: turning an uploaded address list into the validated
//! addresses that get registered.
//!
//! Records are separated by newlines or commas and trimmed. Blank records
//! are skipped; every other record is either a valid [`WalletAddress`] or
//! counted as invalid and dropped.

use serde::{Deserialize, Serialize};

use super::voter::WalletAddress;

/// Outcome of validating a batch of voter records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeReport {
    /// Well-formed addresses, in input order.
    pub valid_addresses: Vec<WalletAddress>,
    /// Number of non-blank records that were rejected.
    pub invalid_count: usize,
}

impl IntakeReport {
    /// Validate records that have already been split apart.
    pub fn from_records<I, S>(records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut report = Self::default();
        for record in records {
            let record = record.as_ref().trim();
            if record.is_empty() {
                continue;
            }
            match WalletAddress::parse(record) {
                Some(address) => report.valid_addresses.push(address),
                None => report.invalid_count += 1,
            }
        }
        report
    }

    /// Split a CSV text blob on newlines and commas, then validate each record.
    pub fn from_csv(text: &str) -> Self {
        Self::from_records(text.split(|c| c == '\n' || c == ','))
    }

    pub fn valid_count(&self) -> usize {
        self.valid_addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valid_addresses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_line() {
        let report = IntakeReport::from_csv("0x1234567890abcdef,bad,0xabc");
        assert_eq!(
            report.valid_addresses,
            vec![WalletAddress::from("0x1234567890abcdef")]
        );
        assert_eq!(report.valid_count(), 1);
        assert_eq!(report.invalid_count, 2);
    }

    #[test]
    fn newlines_commas_and_blanks() {
        let text = concat!(
            "0x1234567890abcdef1234567890abcdef12345678\r\n",
            "\n",
            "0xabcdefabcdefabcdefabcdefabcdefabcdefabcd,",
            " 0x9876543210fedcba9876543210fedcba98765432 ,\n",
            ",,\n",
        );
        let report = IntakeReport::from_csv(text);
        assert_eq!(report.valid_count(), 3);
        assert_eq!(report.invalid_count, 0);
        assert_eq!(
            report.valid_addresses[2].as_str(),
            "0x9876543210fedcba9876543210fedcba98765432"
        );
    }

    #[test]
    fn nothing_valid() {
        let report = IntakeReport::from_csv("address\nnot-an-address\n0x123");
        assert!(report.is_empty());
        assert_eq!(report.invalid_count, 3);

        assert_eq!(IntakeReport::from_csv(""), IntakeReport::default());
    }

    #[test]
    fn pre_split_records() {
        let report =
            IntakeReport::from_records(["0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb", " ", "x"]);
        assert_eq!(report.valid_count(), 1);
        assert_eq!(report.invalid_count, 1);
    }
}
