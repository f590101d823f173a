use async_trait::async_trait;
use serde::Deserialize;
use tc_api_types::{ChainId, NetworkConfig, WalletAddress};
use thiserror::Error;

/// EIP-1193 method names used by the claim page.
pub mod methods {
    pub const ETH_REQUEST_ACCOUNTS: &str = "eth_requestAccounts";
    pub const ETH_ACCOUNTS: &str = "eth_accounts";
    pub const ETH_CHAIN_ID: &str = "eth_chainId";
    pub const ETH_CALL: &str = "eth_call";
    pub const ETH_SEND_TRANSACTION: &str = "eth_sendTransaction";
    pub const ETH_GET_TRANSACTION_RECEIPT: &str = "eth_getTransactionReceipt";
    pub const WALLET_SWITCH_ETHEREUM_CHAIN: &str = "wallet_switchEthereumChain";
    pub const WALLET_ADD_ETHEREUM_CHAIN: &str = "wallet_addEthereumChain";
}

/// EIP-1193 provider event names.
pub mod events {
    pub const ACCOUNTS_CHANGED: &str = "accountsChanged";
    pub const CHAIN_CHANGED: &str = "chainChanged";
}

/// The user rejected the request in the wallet UI.
pub const USER_REJECTED_REQUEST: i64 = 4001;
/// `wallet_switchEthereumChain` targeted a chain the wallet does not know.
pub const UNRECOGNIZED_CHAIN: i64 = 4902;

/// A rejected provider request, carrying the EIP-1193 error code when present.
#[derive(Debug, Clone, Error, PartialEq, Eq, Deserialize)]
#[error("{message}")]
pub struct ProviderError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

impl ProviderError {
    pub fn new(code: Option<i64>, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn user_rejected() -> Self {
        Self::new(Some(USER_REJECTED_REQUEST), "User rejected the request.")
    }

    pub fn unrecognized_chain(chain_id: &ChainId) -> Self {
        Self::new(
            Some(UNRECOGNIZED_CHAIN),
            format!("Unrecognized chain ID \"{chain_id}\". Try adding the chain using wallet_addEthereumChain first."),
        )
    }

    pub fn is_user_rejected(&self) -> bool {
        self.code == Some(USER_REJECTED_REQUEST)
    }

    pub fn is_unrecognized_chain(&self) -> bool {
        self.code == Some(UNRECOGNIZED_CHAIN)
    }
}

/// Notifications pushed by the wallet for the rest of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderEvent {
    AccountsChanged(Vec<WalletAddress>),
    ChainChanged(ChainId),
}

pub type EventHandler = Box<dyn Fn(&ProviderEvent)>;

/// An injected wallet (`window.ethereum`).
///
/// The browser runtime is single-threaded, so futures are not `Send`.
#[async_trait(?Send)]
pub trait WalletProvider {
    fn is_available(&self) -> bool;

    /// Prompts the user for account access.
    async fn request_accounts(&self) -> Result<Vec<WalletAddress>, ProviderError>;

    /// Accounts already authorized for this origin; never prompts.
    async fn accounts(&self) -> Result<Vec<WalletAddress>, ProviderError>;

    async fn chain_id(&self) -> Result<ChainId, ProviderError>;

    async fn switch_chain(&self, chain_id: &ChainId) -> Result<(), ProviderError>;

    async fn add_chain(&self, network: &NetworkConfig) -> Result<(), ProviderError>;

    /// Registers `handler` for both `accountsChanged` and `chainChanged`.
    fn subscribe(&self, handler: EventHandler) -> Result<(), ProviderError>;
}

/// Parses the payload of an `accountsChanged` notification.
pub fn parse_accounts(value: &serde_json::Value) -> Vec<WalletAddress> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.as_str())
                .map(|addr| WalletAddress(addr.to_owned()))
                .collect()
        })
        .unwrap_or_default()
}
