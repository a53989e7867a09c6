use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(thread_local_v2, js_namespace = ["window"], js_name = "ethereum")]
    pub static ETHEREUM: Option<Eip1193Provider>;
}

#[wasm_bindgen]
extern "C" {
    #[derive(Clone, PartialEq)]
    pub type Eip1193Provider;

    /// Set to `true` by the MetaMask extension (and by a few wallets
    /// impersonating it). `None` if the property is not defined.
    #[wasm_bindgen(method, getter, js_name = "isMetaMask")]
    pub fn is_metamask(this: &Eip1193Provider) -> Option<bool>;

    /// Submit an RPC request to the wallet.
    ///
    /// `args` is a `{ method, params? }` object. The promise resolves with the
    /// method's result or rejects with a `ProviderRpcError`
    /// (`{ code, message, data? }`).
    ///
    /// More details [EIP-1193](https://eips.ethereum.org/EIPS/eip-1193#request-1)
    ///
    #[wasm_bindgen(method, catch)]
    pub async fn request(this: &Eip1193Provider, args: JsValue) -> Result<JsValue, JsValue>;
}
