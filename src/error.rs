use crate::network::ChainId;

/// Error codes a wallet provider rejects a request with.
///
/// The 4xxx codes are the EIP-1193 provider errors, the negative ones are
/// the JSON-RPC 2.0 codes wallets forward from their node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
pub enum ProviderErrorCode {
    #[error("The user rejected the request.")]
    UserRejectedRequest,
    #[error("The requested method and/or account has not been authorized by the user.")]
    Unauthorized,
    #[error("The provider does not support the requested method.")]
    UnsupportedMethod,
    #[error("The provider is disconnected from all chains.")]
    Disconnected,
    #[error("The provider is not connected to the requested chain.")]
    ChainDisconnected,
    /// `wallet_switchEthereumChain` was called for a chain the wallet does
    /// not know about yet, `wallet_addEthereumChain` needs to run first.
    #[error("Unrecognized chain.")]
    UnrecognizedChain,
    /// Typically a previous request (e.g. a permission prompt) is still
    /// pending in the wallet.
    #[error("The requested resource is not available.")]
    ResourceUnavailable,
    #[error("Invalid method parameters.")]
    InvalidParams,
    #[error("Internal error.")]
    InternalError,
    #[error("Unknown error code `{0}'")]
    Unknown(i64),
}

impl ProviderErrorCode {
    pub fn code(&self) -> i64 {
        match self {
            ProviderErrorCode::UserRejectedRequest => 4001,
            ProviderErrorCode::Unauthorized => 4100,
            ProviderErrorCode::UnsupportedMethod => 4200,
            ProviderErrorCode::Disconnected => 4900,
            ProviderErrorCode::ChainDisconnected => 4901,
            ProviderErrorCode::UnrecognizedChain => 4902,
            ProviderErrorCode::ResourceUnavailable => -32002,
            ProviderErrorCode::InvalidParams => -32602,
            ProviderErrorCode::InternalError => -32603,
            ProviderErrorCode::Unknown(code) => *code,
        }
    }
}

impl From<i64> for ProviderErrorCode {
    fn from(code: i64) -> Self {
        match code {
            4001 => ProviderErrorCode::UserRejectedRequest,
            4100 => ProviderErrorCode::Unauthorized,
            4200 => ProviderErrorCode::UnsupportedMethod,
            4900 => ProviderErrorCode::Disconnected,
            4901 => ProviderErrorCode::ChainDisconnected,
            4902 => ProviderErrorCode::UnrecognizedChain,
            -32002 => ProviderErrorCode::ResourceUnavailable,
            -32602 => ProviderErrorCode::InvalidParams,
            -32603 => ProviderErrorCode::InternalError,
            unknown => ProviderErrorCode::Unknown(unknown),
        }
    }
}

/// The error object a provider's `request` promise rejects with.
#[derive(Debug, Clone, PartialEq, thiserror::Error, serde::Deserialize)]
#[error("{code} {message}")]
pub struct ProviderError {
    pub code: ProviderErrorCode,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl ProviderError {
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InternalError, message)
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == ProviderErrorCode::UserRejectedRequest
    }
}

/// Why the adapter could not complete an operation.
///
/// The degrading operations of [`WalletAdapter`] only log these, the lower
/// level ones return them.
///
/// [`WalletAdapter`]: crate::WalletAdapter
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AdapterError {
    #[error("No Ethereum wallet provider detected")]
    ProviderAbsent,
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error("Wallet is on chain {actual}, expected {expected}")]
    NetworkMismatch { expected: ChainId, actual: String },
    #[error("Unexpected response from the wallet provider: {0}")]
    InvalidResponse(String),
}

impl<'de> serde::Deserialize<'de> for ProviderErrorCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct Visitor;
        impl serde::de::Visitor<'_> for Visitor {
            type Value = ProviderErrorCode;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                write!(formatter, "Expecting an integer ProviderErrorCode")
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Ok(ProviderErrorCode::from(v))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                i64::try_from(v)
                    .map(ProviderErrorCode::from)
                    .map_err(|_| E::custom(format!("error code out of range: {v}")))
            }

            // javascript numbers may reach us as floats
            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if v.fract() == 0.0 && v.abs() <= i64::MAX as f64 {
                    Ok(ProviderErrorCode::from(v as i64))
                } else {
                    Err(E::custom(format!("error code is not an integer: {v}")))
                }
            }
        }

        deserializer.deserialize_i64(Visitor)
    }
}
