//! Page configuration.
//!
//! Defaults come from `ClaimConfig::default()`; a page overrides them with
//! `<script type="application/json" id="claimConfig">{ ... }</script>`.

use tc_claim_core::ClaimConfig;
use tracing::{error, info, warn};

use crate::dom;

pub const CONFIG_ELEMENT_ID: &str = "claimConfig";

pub fn load() -> ClaimConfig {
    let Some(el) = dom::by_id(CONFIG_ELEMENT_ID) else {
        warn!("no #{CONFIG_ELEMENT_ID} block, contract address is unset");
        return ClaimConfig::default();
    };
    let raw = el.text_content().unwrap_or_default();
    match ClaimConfig::from_json(&raw) {
        Ok(config) => {
            info!(contract = %config.contract.address, chain_id = %config.network.chain_id, "loaded page config");
            config
        }
        Err(err) => {
            error!(error = %format!("{err:#}"), "invalid #{CONFIG_ELEMENT_ID}, using defaults");
            ClaimConfig::default()
        }
    }
}
