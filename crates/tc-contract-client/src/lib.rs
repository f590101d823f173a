use async_trait::async_trait;
use tc_api_types::{ContractConfig, TxHash, WalletAddress};
use thiserror::Error;

pub mod abi;

pub use abi::{ClaimTxRequest, TxReceipt};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContractError {
    #[error("invalid contract address: {0}")]
    InvalidAddress(String),
    #[error("contract ABI has no `{0}` function")]
    MissingFunction(String),
    /// The wallet or node refused the call; carries its message verbatim.
    #[error("{0}")]
    Rejected(String),
    #[error("transaction {0} reverted")]
    Reverted(TxHash),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// A submitted transaction that has not been confirmed yet.
#[async_trait(?Send)]
pub trait PendingTx {
    fn hash(&self) -> &TxHash;

    /// Resolves once the transaction is mined; fails if it reverted.
    async fn wait(&self) -> Result<TxReceipt, ContractError>;
}

/// A handle on the deployed claim contract, bound to one signing account.
#[async_trait(?Send)]
pub trait ClaimContract {
    type Pending: PendingTx;

    fn signer(&self) -> &WalletAddress;

    async fn claim(&self) -> Result<Self::Pending, ContractError>;

    async fn has_claimed(&self, account: &WalletAddress) -> Result<bool, ContractError>;
}

/// Builds contract handles for whichever account is currently connected.
pub trait ContractFactory {
    type Handle: ClaimContract;

    fn build(
        &self,
        config: &ContractConfig,
        signer: &WalletAddress,
    ) -> Result<Self::Handle, ContractError>;
}
