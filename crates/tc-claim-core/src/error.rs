use tc_contract_client::ContractError;
use tc_provider::ProviderError;
use thiserror::Error;

/// Everything that can go wrong in the claim flow.
///
/// `Display` is the exact status text shown to the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClaimError {
    #[error("Please install MetaMask to continue")]
    ProviderMissing,
    #[error("Failed to connect wallet: {0}")]
    UserRejected(ProviderError),
    #[error("Failed to connect wallet: {0}")]
    Connect(ProviderError),
    #[error("Failed to switch to {network}: {source}")]
    ChainSwitch {
        network: String,
        source: ProviderError,
    },
    #[error("Failed to add {network}: {source}")]
    ChainRegistration {
        network: String,
        source: ProviderError,
    },
    #[error("Please switch to {network}")]
    WrongNetwork { network: String },
    #[error("Please connect your wallet first")]
    NotConnected,
    #[error("Failed to initialize contract")]
    ContractInit(#[source] ContractError),
    #[error("Transaction failed: {0}")]
    ContractCall(ContractError),
    #[error("Transaction failed: {0}")]
    Confirmation(ContractError),
    #[error("Claim already in progress")]
    ClaimInFlight,
    #[error("Tokens already claimed")]
    AlreadyClaimed,
}

impl ClaimError {
    pub(crate) fn connect(err: ProviderError) -> Self {
        if err.is_user_rejected() {
            ClaimError::UserRejected(err)
        } else {
            ClaimError::Connect(err)
        }
    }

    /// Errors that correspond to clicking an already-disabled control; they
    /// leave the status region alone.
    pub fn is_silent(&self) -> bool {
        matches!(self, ClaimError::ClaimInFlight | ClaimError::AlreadyClaimed)
    }
}
