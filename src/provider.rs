use std::fmt;

use async_trait::async_trait;
use serde::Serialize as _;
use serde_json::Value;
use wasm_bindgen::JsValue;

use crate::{error::ProviderError, ffi};

/// The wallet methods the adapter relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub enum Method {
    #[serde(rename = "eth_chainId")]
    ChainId,
    #[serde(rename = "eth_accounts")]
    Accounts,
    #[serde(rename = "eth_requestAccounts")]
    RequestAccounts,
    #[serde(rename = "eth_getBalance")]
    GetBalance,
    #[serde(rename = "wallet_addEthereumChain")]
    AddEthereumChain,
    #[serde(rename = "wallet_switchEthereumChain")]
    SwitchEthereumChain,
    #[serde(rename = "wallet_requestPermissions")]
    RequestPermissions,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::ChainId => "eth_chainId",
            Method::Accounts => "eth_accounts",
            Method::RequestAccounts => "eth_requestAccounts",
            Method::GetBalance => "eth_getBalance",
            Method::AddEthereumChain => "wallet_addEthereumChain",
            Method::SwitchEthereumChain => "wallet_switchEthereumChain",
            Method::RequestPermissions => "wallet_requestPermissions",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The `{ method, params? }` object given to the provider's `request`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RequestArguments {
    pub method: Method,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<Value>>,
}

impl RequestArguments {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            params: None,
        }
    }

    pub fn with_params(method: Method, params: Vec<Value>) -> Self {
        Self {
            method,
            params: Some(params),
        }
    }
}

/// A wallet exposing the EIP-1193 request interface.
///
/// In the browser this is [`InjectedProvider`]. Any other implementation
/// (see `MockProvider` with the `testing` feature) can be handed to the
/// [`WalletAdapter`] instead.
///
/// Requests may wait on the user (approval dialogs) and have no timeout.
///
/// [`WalletAdapter`]: crate::WalletAdapter
#[async_trait(?Send)]
pub trait Provider {
    /// whether the wallet identifies itself as MetaMask
    fn is_metamask(&self) -> bool;

    async fn request(&self, args: RequestArguments) -> Result<Value, ProviderError>;
}

/// The provider injected by the wallet extension as `window.ethereum`.
#[derive(Clone, PartialEq)]
pub struct InjectedProvider {
    eip1193: ffi::Eip1193Provider,
}

/// Look for the wallet provider injected in the page.
///
/// Returns `None` if no wallet extension is installed. The extension may
/// also not have injected `window.ethereum` yet: call this once the page is
/// fully loaded (or again later).
pub fn injected() -> Option<InjectedProvider> {
    ffi::eip1193::ETHEREUM.with(|ethereum| {
        // re-read window.ethereum in case it was injected after the initial check
        let fresh = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("window"))
            .ok()
            .and_then(|win| js_sys::Reflect::get(&win, &JsValue::from_str("ethereum")).ok())
            .filter(looks_like_eip1193_provider)
            .map(ffi::Eip1193Provider::from);

        fresh.or_else(|| ethereum.clone()).map(InjectedProvider::new)
    })
}

fn looks_like_eip1193_provider(value: &JsValue) -> bool {
    value.is_object()
        && js_sys::Reflect::get(value, &JsValue::from_str("request"))
            .ok()
            .map(|v| v.is_function())
            .unwrap_or(false)
}

impl InjectedProvider {
    fn new(eip1193: ffi::Eip1193Provider) -> Self {
        Self { eip1193 }
    }
}

#[async_trait(?Send)]
impl Provider for InjectedProvider {
    fn is_metamask(&self) -> bool {
        self.eip1193.is_metamask().unwrap_or(false)
    }

    async fn request(&self, args: RequestArguments) -> Result<Value, ProviderError> {
        // plain objects, not `Map`s, as wallets expect JSON
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let js_args = args.serialize(&serializer).map_err(|error| {
            ProviderError::internal(format!("Couldn't encode the `{}' request: {error}", args.method))
        })?;

        match self.eip1193.request(js_args).await {
            Ok(result) => serde_wasm_bindgen::from_value(result).map_err(|decode_error| {
                ProviderError::internal(format!(
                    "Couldn't decode the `{}' result: {decode_error}",
                    args.method
                ))
            }),
            Err(error) => serde_wasm_bindgen::from_value(error.clone())
                .map_err(|decode_error| {
                    ProviderError::internal(format!(
                        "Couldn't decode the error content: {decode_error} ({error:?})"
                    ))
                })
                .and_then(Err),
        }
    }
}
