//! Fixed-length proposal names.
//!
//! Names are stored as 32 raw bytes, right-padded with zeros. The text
//! form is everything up to the first zero byte.

use crate::error::TypesError;
use std::fmt;
use std::str::FromStr;

/// 32-byte fixed-length proposal name.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "borsh", derive(borsh::BorshSerialize, borsh::BorshDeserialize))]
pub struct ProposalName([u8; 32]);

impl ProposalName {
    pub const MAX_LEN: usize = 32;

    /// Encode a UTF-8 name, padding with zero bytes.
    ///
    /// Zero bytes inside the name are rejected since zero marks the end of
    /// the text form.
    pub fn new(name: &str) -> Result<Self, TypesError> {
        let raw = name.as_bytes();
        if raw.len() > Self::MAX_LEN {
            return Err(TypesError::ProposalNameTooLong {
                max: Self::MAX_LEN,
                actual: raw.len(),
            });
        }
        if let Some(position) = raw.iter().position(|&b| b == 0) {
            return Err(TypesError::ProposalNameContainsNul(position));
        }
        let mut bytes = [0u8; 32];
        bytes[..raw.len()].copy_from_slice(raw);
        Ok(Self(bytes))
    }

    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Number of meaningful bytes before the zero padding.
    pub fn len(&self) -> usize {
        self.0.iter().position(|&b| b == 0).unwrap_or(Self::MAX_LEN)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decoded name. Invalid UTF-8 is replaced lossily.
    pub fn as_str(&self) -> String {
        String::from_utf8_lossy(&self.0[..self.len()]).into_owned()
    }

    /// Raw 32 bytes as hex with 0x prefix
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for ProposalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

impl fmt::Debug for ProposalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProposalName({:?})", self.as_str())
    }
}

impl FromStr for ProposalName {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for ProposalName {
    type Error = TypesError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_padding() {
        let name = ProposalName::new("Proposal 1").unwrap();
        assert_eq!(&name.as_bytes()[..10], b"Proposal 1");
        assert!(name.as_bytes()[10..].iter().all(|&b| b == 0));
        assert_eq!(name.len(), 10);
        assert_eq!(name.to_string(), "Proposal 1");
    }

    #[test]
    fn test_name_exactly_32_bytes() {
        let text = "a".repeat(32);
        let name = ProposalName::new(&text).unwrap();
        assert_eq!(name.len(), 32);
        assert_eq!(name.as_str(), text);
    }

    #[test]
    fn test_name_too_long() {
        let text = "a".repeat(33);
        assert_eq!(
            ProposalName::new(&text),
            Err(TypesError::ProposalNameTooLong { max: 32, actual: 33 })
        );
    }

    #[test]
    fn test_empty_name() {
        let name = ProposalName::new("").unwrap();
        assert!(name.is_empty());
        assert_eq!(name, ProposalName::default());
    }

    #[test]
    fn test_multibyte_length_counts_bytes() {
        // 17 chars, 33 bytes
        let text = "é".repeat(16) + "x";
        assert!(ProposalName::new(&text).is_err());
    }

    #[test]
    fn test_interior_nul_rejected() {
        assert_eq!(
            ProposalName::new("a\0b"),
            Err(TypesError::ProposalNameContainsNul(1))
        );
        assert!(ProposalName::new("trailing\0").is_err());
        assert!("\0".parse::<ProposalName>().is_err());
    }

    #[test]
    fn test_to_hex() {
        let name = ProposalName::new("A").unwrap();
        assert_eq!(name.to_hex(), format!("0x41{}", "00".repeat(31)));
    }
}
