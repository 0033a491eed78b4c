//! Serde implementations for ballot-types.
//!
//! Both types serialize as their text form so they can be used as JSON
//! map keys and read back by hand.

#[cfg(feature = "serde")]
mod serde_impls {
    use crate::{Address, ProposalName};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    // Address
    impl Serialize for Address {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            self.to_string().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Address {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            Address::from_str(&s).map_err(serde::de::Error::custom)
        }
    }

    // ProposalName
    impl Serialize for ProposalName {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            self.as_str().serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for ProposalName {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            ProposalName::new(&s).map_err(serde::de::Error::custom)
        }
    }
}
