//! Minimal ABI encoding for the two functions the claim page calls.

use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use tc_api_types::{AbiFunction, ContractConfig, TxHash, WalletAddress};

use crate::ContractError;

/// First four bytes of `keccak256(signature)`.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Checks for a `0x`-prefixed 20-byte hex address.
pub fn validate_address(address: &str) -> Result<(), ContractError> {
    let Some(body) = address.strip_prefix("0x").or_else(|| address.strip_prefix("0X")) else {
        return Err(ContractError::InvalidAddress(address.to_owned()));
    };
    if body.len() != 40 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ContractError::InvalidAddress(address.to_owned()));
    }
    Ok(())
}

fn function<'a>(config: &'a ContractConfig, name: &str) -> Result<&'a AbiFunction, ContractError> {
    config
        .function(name)
        .ok_or_else(|| ContractError::MissingFunction(name.to_owned()))
}

/// Calldata for `claim()`.
pub fn encode_claim(config: &ContractConfig) -> Result<String, ContractError> {
    let claim = function(config, "claim")?;
    Ok(format!("0x{}", hex::encode(selector(&claim.signature()))))
}

/// Calldata for `hasClaimed(address)`: selector followed by the left-padded address word.
pub fn encode_has_claimed(
    config: &ContractConfig,
    account: &WalletAddress,
) -> Result<String, ContractError> {
    let has_claimed = function(config, "hasClaimed")?;
    validate_address(account.as_str())?;
    let body = &account.as_str()[2..];
    Ok(format!(
        "0x{}{:0>64}",
        hex::encode(selector(&has_claimed.signature())),
        body.to_ascii_lowercase()
    ))
}

/// Decodes a single ABI `bool` word returned by `eth_call`.
pub fn decode_bool(raw: &str) -> Result<bool, ContractError> {
    let body = raw.trim_start_matches("0x");
    let bytes = hex::decode(body).map_err(|e| ContractError::Decode(e.to_string()))?;
    if bytes.len() != 32 {
        return Err(ContractError::Decode(format!("expected 32 bytes, got {}", bytes.len())));
    }
    Ok(bytes[31] == 1 && bytes[..31].iter().all(|b| *b == 0))
}

/// Object passed to `eth_sendTransaction` / `eth_call`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ClaimTxRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    pub to: String,
    pub data: String,
}

/// The subset of `eth_getTransactionReceipt` the page cares about.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TxReceipt {
    pub transaction_hash: TxHash,
    #[serde(default)]
    pub block_number: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

impl TxReceipt {
    /// Pre-Byzantium receipts carry no status; those count as success.
    pub fn succeeded(&self) -> bool {
        !matches!(self.status.as_deref(), Some("0x0") | Some("0x00"))
    }
}
