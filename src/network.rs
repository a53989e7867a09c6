use std::{fmt, str::FromStr};

use thiserror::Error;

/// Identifier of an Ethereum compatible network.
///
/// Wallets exchange it as a `0x` prefixed hexadecimal string, two chain ids
/// are the same if their numeric values are the same (`"0xAA36A7"` and
/// `"0xaa36a7"` are both Sepolia).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChainId(u64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetworkConfigError {
    #[error("Invalid chain id `{0}': expecting a 0x prefixed hexadecimal string")]
    InvalidChainId(String),
    #[error("Network `{0}' has no RPC url")]
    NoRpcUrl(String),
    #[error("Invalid network descriptor: {0}")]
    Json(String),
}

impl ChainId {
    pub const MAINNET: Self = Self(1);
    pub const SEPOLIA: Self = Self(11_155_111);

    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl FromStr for ChainId {
    type Err = NetworkConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NetworkConfigError::InvalidChainId(s.to_owned());

        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .ok_or_else(invalid)?;
        if digits.is_empty() {
            return Err(invalid());
        }

        u64::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|_| invalid())
    }
}

impl serde::Serialize for ChainId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for ChainId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

/// Description of the network the application expects the wallet to be on.
///
/// It is serialized exactly as the parameter of `wallet_addEthereumChain`
/// ([EIP-3085](https://eips.ethereum.org/EIPS/eip-3085)).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDescriptor {
    pub chain_id: ChainId,
    pub chain_name: String,
    pub native_currency: NativeCurrency,
    pub rpc_urls: Vec<String>,
}

impl NetworkDescriptor {
    /// The Sepolia test network, with ETH as native currency and the public
    /// Infura endpoint.
    pub fn sepolia() -> Self {
        let chain_name = "Ethereum Sepolia".to_owned();
        Self {
            chain_id: ChainId::SEPOLIA,
            native_currency: NativeCurrency {
                name: chain_name.clone(),
                symbol: "ETH".to_owned(),
                decimals: 18,
            },
            chain_name,
            rpc_urls: vec!["https://sepolia.infura.io".to_owned()],
        }
    }

    /// load a network from its JSON description (same layout as the
    /// `wallet_addEthereumChain` parameter)
    ///
    /// ```
    /// # use eth_wallet_connector::NetworkDescriptor;
    /// let network = NetworkDescriptor::from_json(r#"{
    ///     "chainId": "0x1",
    ///     "chainName": "Ethereum Mainnet",
    ///     "nativeCurrency": { "name": "Ether", "symbol": "ETH", "decimals": 18 },
    ///     "rpcUrls": ["https://mainnet.infura.io"]
    /// }"#).unwrap();
    /// assert_eq!(network.chain_id.to_string(), "0x1");
    /// ```
    pub fn from_json(json: &str) -> Result<Self, NetworkConfigError> {
        let network: Self =
            serde_json::from_str(json).map_err(|error| NetworkConfigError::Json(error.to_string()))?;

        if network.rpc_urls.is_empty() {
            return Err(NetworkConfigError::NoRpcUrl(network.chain_name));
        }

        Ok(network)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn chain_id_parse() {
        assert_eq!("0xaa36a7".parse::<ChainId>().unwrap(), ChainId::SEPOLIA);
        assert_eq!("0xAA36A7".parse::<ChainId>().unwrap(), ChainId::SEPOLIA);
        assert_eq!("0x1".parse::<ChainId>().unwrap(), ChainId::MAINNET);

        assert!("aa36a7".parse::<ChainId>().is_err());
        assert!("0x".parse::<ChainId>().is_err());
        assert!("0xzz".parse::<ChainId>().is_err());
        assert!("11155111".parse::<ChainId>().is_err());
    }

    #[test]
    fn chain_id_display() {
        assert_eq!(ChainId::SEPOLIA.to_string(), "0xaa36a7");
        assert_eq!(ChainId::MAINNET.to_string(), "0x1");
    }

    #[test]
    fn sepolia_add_chain_parameter() -> anyhow::Result<()> {
        assert_eq!(
            serde_json::to_value(NetworkDescriptor::sepolia())?,
            json! { {
                "chainId": "0xaa36a7",
                "chainName": "Ethereum Sepolia",
                "nativeCurrency": {
                    "name": "Ethereum Sepolia",
                    "symbol": "ETH",
                    "decimals": 18,
                },
                "rpcUrls": ["https://sepolia.infura.io"],
            }}
        );
        Ok(())
    }

    #[test]
    fn from_json_rejects_invalid_networks() {
        let no_rpc = r#"{
            "chainId": "0x1",
            "chainName": "Ethereum Mainnet",
            "nativeCurrency": { "name": "Ether", "symbol": "ETH", "decimals": 18 },
            "rpcUrls": []
        }"#;
        assert_eq!(
            NetworkDescriptor::from_json(no_rpc),
            Err(NetworkConfigError::NoRpcUrl("Ethereum Mainnet".to_owned()))
        );

        let bad_chain = r#"{
            "chainId": "1",
            "chainName": "Ethereum Mainnet",
            "nativeCurrency": { "name": "Ether", "symbol": "ETH", "decimals": 18 },
            "rpcUrls": ["https://mainnet.infura.io"]
        }"#;
        assert!(matches!(
            NetworkDescriptor::from_json(bad_chain),
            Err(NetworkConfigError::Json(_))
        ));
    }
}
