use std::{fmt, str::FromStr};

use thiserror::Error;

/// An externally owned Ethereum account.
///
/// [`Address::ZERO`] stands for "no connected account".
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; 20]);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AddressError {
    #[error("Address `{0}' is missing the 0x prefix")]
    MissingPrefix(String),
    #[error("Invalid address `{address}': {error}")]
    InvalidHex {
        address: String,
        error: hex::FromHexError,
    },
}

impl Address {
    pub const ZERO: Self = Self([0; 20]);

    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// parse the `0x` prefixed hexadecimal representation of the address.
    ///
    /// Mixed case (EIP-55 checksummed) addresses are accepted but the
    /// checksum is not verified.
    pub fn from_hex(address: &str) -> Result<Self, AddressError> {
        let digits = address
            .strip_prefix("0x")
            .or_else(|| address.strip_prefix("0X"))
            .ok_or_else(|| AddressError::MissingPrefix(address.to_owned()))?;

        let mut bytes = [0; 20];
        hex::decode_to_slice(digits, &mut bytes).map_err(|error| AddressError::InvalidHex {
            address: address.to_owned(),
            error,
        })?;
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Address").field(&self.to_hex()).finish()
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl serde::Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
