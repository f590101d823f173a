//! Claim contract over the wallet's own JSON-RPC channel.
//!
//! Transactions are signed by the wallet (`eth_sendTransaction`); no key
//! material ever reaches the page.

use async_trait::async_trait;
use gloo_timers::future::TimeoutFuture;
use tc_api_types::{ContractConfig, TxHash, WalletAddress};
use tc_contract_client::abi::{self, ClaimTxRequest};
use tc_contract_client::{ClaimContract, ContractError, ContractFactory, PendingTx, TxReceipt};
use tc_provider::{ProviderError, methods};

use crate::ethereum::InjectedProvider;

fn rejected(err: ProviderError) -> ContractError {
    ContractError::Rejected(err.message)
}

pub struct RpcContractFactory {
    provider: InjectedProvider,
    poll_ms: u32,
}

impl RpcContractFactory {
    pub fn new(provider: InjectedProvider, poll_ms: u32) -> Self {
        Self { provider, poll_ms }
    }
}

impl ContractFactory for RpcContractFactory {
    type Handle = RpcClaimContract;

    fn build(
        &self,
        config: &ContractConfig,
        signer: &WalletAddress,
    ) -> Result<RpcClaimContract, ContractError> {
        abi::validate_address(&config.address)?;
        let claim_data = abi::encode_claim(config)?;
        Ok(RpcClaimContract {
            config: config.clone(),
            signer: signer.clone(),
            claim_data,
            provider: self.provider,
            poll_ms: self.poll_ms,
        })
    }
}

pub struct RpcClaimContract {
    config: ContractConfig,
    signer: WalletAddress,
    claim_data: String,
    provider: InjectedProvider,
    poll_ms: u32,
}

#[async_trait(?Send)]
impl ClaimContract for RpcClaimContract {
    type Pending = RpcPendingTx;

    fn signer(&self) -> &WalletAddress {
        &self.signer
    }

    async fn claim(&self) -> Result<RpcPendingTx, ContractError> {
        let params = [ClaimTxRequest {
            from: Some(self.signer.0.clone()),
            to: self.config.address.clone(),
            data: self.claim_data.clone(),
        }];
        let result = self
            .provider
            .request(methods::ETH_SEND_TRANSACTION, Some(&params))
            .await
            .map_err(rejected)?;
        let hash = result
            .as_string()
            .ok_or_else(|| ContractError::Decode("transaction hash is not a string".to_owned()))?;

        Ok(RpcPendingTx {
            hash: TxHash(hash),
            provider: self.provider,
            poll_ms: self.poll_ms,
        })
    }

    async fn has_claimed(&self, account: &WalletAddress) -> Result<bool, ContractError> {
        let call = ClaimTxRequest {
            from: None,
            to: self.config.address.clone(),
            data: abi::encode_has_claimed(&self.config, account)?,
        };
        let params = (call, "latest");
        let result = self
            .provider
            .request(methods::ETH_CALL, Some(&params))
            .await
            .map_err(rejected)?;
        let raw = result
            .as_string()
            .ok_or_else(|| ContractError::Decode("eth_call result is not a string".to_owned()))?;
        abi::decode_bool(&raw)
    }
}

pub struct RpcPendingTx {
    hash: TxHash,
    provider: InjectedProvider,
    poll_ms: u32,
}

#[async_trait(?Send)]
impl PendingTx for RpcPendingTx {
    fn hash(&self) -> &TxHash {
        &self.hash
    }

    /// Polls for the receipt until the transaction is mined.
    async fn wait(&self) -> Result<TxReceipt, ContractError> {
        let params = [self.hash.0.as_str()];
        loop {
            let result = self
                .provider
                .request(methods::ETH_GET_TRANSACTION_RECEIPT, Some(&params))
                .await
                .map_err(rejected)?;

            if result.is_null() || result.is_undefined() {
                TimeoutFuture::new(self.poll_ms).await;
                continue;
            }

            let receipt: TxReceipt = serde_wasm_bindgen::from_value(result)
                .map_err(|e| ContractError::Decode(e.to_string()))?;
            if !receipt.succeeded() {
                return Err(ContractError::Reverted(self.hash.clone()));
            }
            return Ok(receipt);
        }
    }
}
