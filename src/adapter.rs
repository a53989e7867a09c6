use serde_json::{Value, json};

use crate::{
    account::Address,
    balance::{BalanceResult, Wei},
    error::{AdapterError, ProviderError},
    network::{ChainId, NetworkDescriptor},
    provider::{self, InjectedProvider, Method, Provider, RequestArguments},
};

/// Connects the application to the user's wallet and keeps it on the
/// expected network.
///
/// The adapter holds no state of its own: every operation is a sequence of
/// requests to the provider, each awaited before the next is sent. The
/// operations the UI calls directly ([`request_account`], [`request_balance`],
/// [`ensure_network`] and [`check_network`]) never fail, they log the error
/// and degrade to "not connected" values instead.
///
/// [`request_account`]: WalletAdapter::request_account
/// [`request_balance`]: WalletAdapter::request_balance
/// [`ensure_network`]: WalletAdapter::ensure_network
/// [`check_network`]: WalletAdapter::check_network
#[derive(Clone)]
pub struct WalletAdapter<P> {
    provider: Option<P>,
    network: NetworkDescriptor,
}

impl WalletAdapter<InjectedProvider> {
    /// adapter for the wallet injected in the page as `window.ethereum`, if
    /// any
    pub fn injected(network: NetworkDescriptor) -> Self {
        Self::new(provider::injected(), network)
    }
}

impl<P: Provider> WalletAdapter<P> {
    pub fn new(provider: Option<P>, network: NetworkDescriptor) -> Self {
        Self { provider, network }
    }

    /// the network the wallet is expected to be on
    pub fn network(&self) -> &NetworkDescriptor {
        &self.network
    }

    pub fn provider(&self) -> Option<&P> {
        self.provider.as_ref()
    }

    /// whether a wallet provider is present
    pub fn detect_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// The chain id the wallet is currently on, exactly as the wallet
    /// reports it.
    ///
    /// `None` means there is no wallet provider.
    pub async fn chain_id(&self) -> Result<Option<String>, AdapterError> {
        match self.provider.as_ref() {
            Some(provider) => self.chain_id_of(provider).await.map(Some),
            None => Ok(None),
        }
    }

    /// Returns `existing` if it is not empty, otherwise asks the wallet to
    /// reveal its accounts (this may prompt the user).
    pub async fn resolve_accounts(
        &self,
        existing: Vec<Address>,
    ) -> Result<Vec<Address>, AdapterError> {
        if !existing.is_empty() {
            return Ok(existing);
        }

        let provider = self.provider.as_ref().ok_or(AdapterError::ProviderAbsent)?;
        let accounts = self
            .request(provider, RequestArguments::new(Method::RequestAccounts))
            .await?;
        parse_accounts(accounts)
    }

    /// The first account of the wallet, requesting access to it if the
    /// application was not approved yet.
    ///
    /// Returns [`Address::ZERO`] if there is no wallet, no account or the
    /// wallet failed the request.
    pub async fn request_account(&self) -> Address {
        match self.try_request_account().await {
            Ok(account) => account,
            Err(AdapterError::ProviderAbsent) => Address::ZERO,
            Err(error) => {
                tracing::warn!(%error, "Couldn't resolve the wallet account");
                Address::ZERO
            }
        }
    }

    async fn try_request_account(&self) -> Result<Address, AdapterError> {
        let provider = self.provider.as_ref().ok_or(AdapterError::ProviderAbsent)?;

        if self.chain_id().await?.is_none() {
            return Ok(Address::ZERO);
        }

        let accounts = self
            .request(provider, RequestArguments::new(Method::Accounts))
            .await?;
        let accounts = self.resolve_accounts(parse_accounts(accounts)?).await?;

        Ok(accounts.first().copied().unwrap_or(Address::ZERO))
    }

    /// The balance, in ether, of the account returned by
    /// [`request_account`](WalletAdapter::request_account) at the latest
    /// block.
    pub async fn request_balance(&self) -> BalanceResult {
        let account = match self.try_request_account().await {
            Ok(account) => account,
            Err(AdapterError::ProviderAbsent) => return BalanceResult::failed(),
            Err(error) => {
                tracing::warn!(%error, "Couldn't resolve the wallet account");
                return BalanceResult::failed();
            }
        };

        let Some(provider) = self.provider.as_ref() else {
            return BalanceResult::failed();
        };
        if account.is_zero() {
            tracing::debug!("no connected account, not querying the balance");
            return BalanceResult::failed();
        }

        match self.balance_of(provider, &account).await {
            Ok(balance) => BalanceResult::ok(balance),
            Err(error) => {
                tracing::warn!(%error, %account, "Couldn't get the balance");
                BalanceResult::failed()
            }
        }
    }

    /// Add the configured network to the wallet and switch to it.
    ///
    /// Returns `false` as soon as the wallet rejects one of the two
    /// requests.
    pub async fn ensure_network(&self) -> bool {
        let Some(provider) = self.provider.as_ref() else {
            tracing::error!("No wallet provider to add the network to");
            return false;
        };

        match self.add_and_switch(provider).await {
            Ok(()) => true,
            Err(error) => {
                tracing::error!(
                    %error,
                    chain_id = %self.network.chain_id,
                    "Error adding the network to the wallet"
                );
                false
            }
        }
    }

    /// Make sure MetaMask is on the configured network and that the
    /// application can access its accounts.
    ///
    /// If the wallet is on another chain it is asked to switch, if it is
    /// already on the configured chain the network is added and switched to
    /// again (see [`ensure_network`](WalletAdapter::ensure_network)). The
    /// user is then asked to grant access to the accounts. Should any of it
    /// fail, falls back to `ensure_network`.
    pub async fn check_network(&self) {
        let Some(provider) = self.provider.as_ref().filter(|p| p.is_metamask()) else {
            tracing::error!("MetaMask extension not detected");
            return;
        };

        if let Err(error) = self.try_check_network(provider).await {
            tracing::warn!(%error, "Network check failed, adding the network");
            self.ensure_network().await;
        }
    }

    async fn try_check_network(&self, provider: &P) -> Result<(), AdapterError> {
        let chain_id = self.chain_id_of(provider).await?;

        if chain_id.parse::<ChainId>().ok() != Some(self.network.chain_id) {
            let mismatch = AdapterError::NetworkMismatch {
                expected: self.network.chain_id,
                actual: chain_id,
            };
            tracing::info!(%mismatch, "Switching network");
            self.switch_chain(provider).await?;
        } else {
            // TODO: confirm with product whether this branch and the one
            // above are meant to be the other way around
            self.ensure_network().await;
        }

        self.request(
            provider,
            RequestArguments::with_params(
                Method::RequestPermissions,
                vec![json!({ "eth_accounts": {} })],
            ),
        )
        .await?;
        self.request(provider, RequestArguments::new(Method::RequestAccounts))
            .await?;

        Ok(())
    }

    async fn add_and_switch(&self, provider: &P) -> Result<(), AdapterError> {
        let network = serde_json::to_value(&self.network).map_err(|error| {
            ProviderError::internal(format!("Couldn't encode the network: {error}"))
        })?;

        self.request(
            provider,
            RequestArguments::with_params(Method::AddEthereumChain, vec![network]),
        )
        .await?;
        self.switch_chain(provider).await
    }

    async fn switch_chain(&self, provider: &P) -> Result<(), AdapterError> {
        let chain_id = self.network.chain_id.to_string();
        self.request(
            provider,
            RequestArguments::with_params(
                Method::SwitchEthereumChain,
                vec![json!({ "chainId": chain_id })],
            ),
        )
        .await?;
        Ok(())
    }

    async fn chain_id_of(&self, provider: &P) -> Result<String, AdapterError> {
        match self
            .request(provider, RequestArguments::new(Method::ChainId))
            .await?
        {
            Value::String(chain_id) => Ok(chain_id),
            other => Err(AdapterError::InvalidResponse(format!(
                "chain id is not a string: {other}"
            ))),
        }
    }

    async fn balance_of(&self, provider: &P, account: &Address) -> Result<Wei, AdapterError> {
        let balance = self
            .request(
                provider,
                RequestArguments::with_params(
                    Method::GetBalance,
                    vec![json!(account.to_hex()), json!("latest")],
                ),
            )
            .await?;

        let Some(quantity) = balance.as_str() else {
            return Err(AdapterError::InvalidResponse(format!(
                "balance is not a string: {balance}"
            )));
        };
        Wei::from_quantity(quantity).map_err(|error| AdapterError::InvalidResponse(error.to_string()))
    }

    async fn request(&self, provider: &P, args: RequestArguments) -> Result<Value, AdapterError> {
        tracing::debug!(method = %args.method, "wallet request");
        Ok(provider.request(args).await?)
    }
}

fn parse_accounts(accounts: Value) -> Result<Vec<Address>, AdapterError> {
    serde_json::from_value(accounts)
        .map_err(|error| AdapterError::InvalidResponse(format!("Invalid account list: {error}")))
}
