use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WalletAddress(pub String);

impl WalletAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hex chain identifier as reported by `eth_chainId` (e.g. `0x38`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChainId(pub String);

impl ChainId {
    /// Wallets are not consistent about hex casing, so compare case-insensitively.
    pub fn matches(&self, other: &ChainId) -> bool {
        self.0.trim().eq_ignore_ascii_case(other.0.trim())
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TxHash(pub String);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NativeCurrency {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Default for NativeCurrency {
    fn default() -> Self {
        Self {
            name: "BNB".to_owned(),
            symbol: "BNB".to_owned(),
            decimals: 18,
        }
    }
}

/// The network the claim page requires the wallet to be on.
///
/// Missing fields fall back to BSC mainnet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NetworkConfig {
    pub chain_id: ChainId,
    pub rpc_url: String,
    pub network_name: String,
    pub native_currency: NativeCurrency,
}

impl NetworkConfig {
    pub fn bsc_mainnet() -> Self {
        Self {
            chain_id: ChainId("0x38".to_owned()),
            rpc_url: "https://bsc-dataseed.binance.org/".to_owned(),
            network_name: "BSC Mainnet".to_owned(),
            native_currency: NativeCurrency::default(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self::bsc_mainnet()
    }
}

/// Params object for `wallet_switchEthereumChain`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SwitchEthereumChainParameter {
    pub chain_id: String,
}

/// Params object for `wallet_addEthereumChain` (EIP-3085).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddEthereumChainParameter {
    pub chain_id: String,
    pub chain_name: String,
    pub rpc_urls: Vec<String>,
    pub native_currency: NativeCurrency,
}

impl From<&NetworkConfig> for AddEthereumChainParameter {
    fn from(network: &NetworkConfig) -> Self {
        Self {
            chain_id: network.chain_id.0.clone(),
            chain_name: network.network_name.clone(),
            rpc_urls: vec![network.rpc_url.clone()],
            native_currency: network.native_currency.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    Pure,
    View,
    Nonpayable,
    Payable,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AbiParam {
    #[serde(default)]
    pub internal_type: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

impl AbiParam {
    pub fn new(name: &str, ty: &str) -> Self {
        Self {
            internal_type: ty.to_owned(),
            name: name.to_owned(),
            ty: ty.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AbiFunction {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
    #[serde(default)]
    pub outputs: Vec<AbiParam>,
    pub state_mutability: StateMutability,
}

impl AbiFunction {
    /// Canonical signature used for selector hashing, e.g. `hasClaimed(address)`.
    pub fn signature(&self) -> String {
        let types: Vec<&str> = self.inputs.iter().map(|p| p.ty.as_str()).collect();
        format!("{}({})", self.name, types.join(","))
    }
}

/// Deployed claim contract and the functions the page may call on it.
///
/// An omitted `abi` means the standard `claim()`/`hasClaimed(address)` pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ContractConfig {
    pub address: String,
    pub abi: Vec<AbiFunction>,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self::with_claim_abi("")
    }
}

impl ContractConfig {
    pub fn with_claim_abi(address: &str) -> Self {
        Self {
            address: address.to_owned(),
            abi: vec![
                AbiFunction {
                    name: "claim".to_owned(),
                    inputs: Vec::new(),
                    outputs: Vec::new(),
                    state_mutability: StateMutability::Nonpayable,
                },
                AbiFunction {
                    name: "hasClaimed".to_owned(),
                    inputs: vec![AbiParam::new("account", "address")],
                    outputs: vec![AbiParam::new("", "bool")],
                    state_mutability: StateMutability::View,
                },
            ],
        }
    }

    pub fn function(&self, name: &str) -> Option<&AbiFunction> {
        self.abi.iter().find(|f| f.name == name)
    }
}
