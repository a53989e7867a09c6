use std::{fmt, str::FromStr};

use thiserror::Error;

const WEI_PER_ETHER: u128 = 1_000_000_000_000_000_000;

/// An amount in the smallest unit of the native currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Wei(u128);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid quantity `{0}': expecting a 0x prefixed hexadecimal integer")]
pub struct QuantityError(String);

impl Wei {
    pub const fn new(wei: u128) -> Self {
        Self(wei)
    }

    /// parse a JSON-RPC quantity (e.g. the result of `eth_getBalance`)
    pub fn from_quantity(quantity: &str) -> Result<Self, QuantityError> {
        let invalid = || QuantityError(quantity.to_owned());

        let digits = quantity.strip_prefix("0x").ok_or_else(invalid)?;
        if digits.is_empty() {
            return Err(invalid());
        }
        u128::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| invalid())
    }

    pub fn value(&self) -> u128 {
        self.0
    }

    /// convert to ether units (`wei / 10^18`)
    ///
    /// The integer and fractional parts are converted separately so large
    /// balances keep their whole ether exactly.
    pub fn to_ether(&self) -> f64 {
        let whole = (self.0 / WEI_PER_ETHER) as f64;
        let fraction = (self.0 % WEI_PER_ETHER) as f64 / WEI_PER_ETHER as f64;
        whole + fraction
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} wei", self.0)
    }
}

impl FromStr for Wei {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_quantity(s)
    }
}

/// Outcome of [`WalletAdapter::request_balance`].
///
/// When `failed` is set the balance is always `0.0` and should be read as
/// "not connected" rather than as an empty account.
///
/// [`WalletAdapter::request_balance`]: crate::WalletAdapter::request_balance
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize)]
pub struct BalanceResult {
    pub balance: f64,
    pub failed: bool,
}

impl BalanceResult {
    pub fn ok(balance: Wei) -> Self {
        Self {
            balance: balance.to_ether(),
            failed: false,
        }
    }

    pub fn failed() -> Self {
        Self {
            balance: 0.0,
            failed: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_ether() {
        let wei = Wei::from_quantity("0xde0b6b3a7640000").unwrap();

        assert_eq!(wei, Wei::new(WEI_PER_ETHER));
        assert_eq!(wei.to_ether(), 1.0);
    }

    #[test]
    fn fractional_ether() {
        // 0.5 ETH
        assert_eq!(Wei::from_quantity("0x6f05b59d3b20000").unwrap().to_ether(), 0.5);
        assert_eq!(Wei::from_quantity("0x0").unwrap().to_ether(), 0.0);
        assert!(Wei::new(1).to_ether() > 0.0);
    }

    #[test]
    fn large_balance_keeps_whole_ether() {
        let wei = Wei::new(123_456_789 * WEI_PER_ETHER);
        assert_eq!(wei.to_ether(), 123_456_789.0);
    }

    #[test]
    fn invalid_quantities() {
        assert!(Wei::from_quantity("").is_err());
        assert!(Wei::from_quantity("0x").is_err());
        assert!(Wei::from_quantity("de0b6b3a7640000").is_err());
        assert!(Wei::from_quantity("0xnothex").is_err());
        // more than 128 bits
        assert!(Wei::from_quantity("0x1000000000000000000000000000000000").is_err());
    }

    #[test]
    fn balance_result() {
        assert_eq!(
            BalanceResult::ok(Wei::new(WEI_PER_ETHER * 2)),
            BalanceResult {
                balance: 2.0,
                failed: false
            }
        );
        assert_eq!(
            BalanceResult::failed(),
            BalanceResult {
                balance: 0.0,
                failed: true
            }
        );
    }
}
