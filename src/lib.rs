/*!

# Ethereum Wallet Connector for EIP-1193 wallets

This library is meant to be used by web applications that need to interact with the
Ethereum wallet injected in the browser (`window.ethereum`, e.g. MetaMask).

## Features

- Detect the wallet
- Retrieve (or request access to) the wallet's account
- Retrieve the account's balance
- Make sure the wallet is on the network the application runs on

## Usage

Describe the network the application expects and build a [`WalletAdapter`] over
the injected wallet:

```no_run
use eth_wallet_connector::{NetworkDescriptor, WalletAdapter};

# async fn test() {
let adapter = WalletAdapter::injected(NetworkDescriptor::sepolia());

if !adapter.detect_provider() {
    println!("Please install a wallet extension");
}

// add/switch the network and ask for access to the accounts
adapter.check_network().await;

let balance = adapter.request_balance().await;
if !balance.failed {
    println!("{} has {} ETH", adapter.request_account().await, balance.balance);
}
# }
```

The operations used by the UI never fail: a missing wallet, a rejected prompt or
a wallet error are logged (through [`tracing`]) and turned into "not connected"
values such as [`Address::ZERO`] or a [`BalanceResult`] with `failed` set.

Any [`Provider`] can be used in place of the injected wallet, enable the `testing`
feature to get a scripted `MockProvider`.

*/

mod account;
mod adapter;
mod balance;
pub mod error;
pub mod ffi;
pub mod network;
pub mod provider;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use self::{
    account::{Address, AddressError},
    adapter::WalletAdapter,
    balance::{BalanceResult, QuantityError, Wei},
    network::{ChainId, NativeCurrency, NetworkDescriptor},
    provider::{InjectedProvider, Method, Provider, RequestArguments, injected},
};
