use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tc_api_types::{ContractConfig, NetworkConfig};
use tc_contract_client::abi;

/// Balance shown before any claim on a fresh page load.
pub const DEFAULT_INITIAL_BALANCE: u64 = 1_000_000;
/// Tokens deducted from the displayed balance per successful claim.
pub const DEFAULT_CLAIM_AMOUNT: u64 = 100;
pub const DEFAULT_TOKEN_SYMBOL: &str = "TKN";
pub const DEFAULT_CONFIRMATION_POLL_MS: u32 = 2_000;

/// Static page configuration.
///
/// Every field has a default; a page can override any subset by embedding
/// a JSON object (see [`ClaimConfig::from_json`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClaimConfig {
    pub network: NetworkConfig,
    pub contract: ContractConfig,
    pub initial_balance: u64,
    pub claim_amount: u64,
    pub token_symbol: String,
    pub confirmation_poll_ms: u32,
}

impl Default for ClaimConfig {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            // Unset until the deployment is known; a page config must supply it.
            contract: ContractConfig::default(),
            initial_balance: DEFAULT_INITIAL_BALANCE,
            claim_amount: DEFAULT_CLAIM_AMOUNT,
            token_symbol: DEFAULT_TOKEN_SYMBOL.to_owned(),
            confirmation_poll_ms: DEFAULT_CONFIRMATION_POLL_MS,
        }
    }
}

impl ClaimConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: ClaimConfig = serde_json::from_str(raw).context("parse claim config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let chain = &self.network.chain_id.0;
        let Some(digits) = chain.strip_prefix("0x") else {
            bail!("chain id must be 0x-prefixed hex, got {chain:?}");
        };
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("chain id must be 0x-prefixed hex, got {chain:?}");
        }
        if self.network.network_name.trim().is_empty() {
            bail!("network name is required");
        }
        abi::validate_address(&self.contract.address)
            .context("contract address must be 0x-prefixed 20-byte hex")?;
        if self.contract.function("claim").is_none() {
            bail!("contract ABI must include claim()");
        }
        if self.claim_amount == 0 {
            bail!("claim amount must be positive");
        }
        if self.token_symbol.trim().is_empty() {
            bail!("token symbol is required");
        }
        if self.confirmation_poll_ms == 0 {
            bail!("confirmation poll interval must be positive");
        }
        Ok(())
    }
}
