//! TokenClaim WASM frontend
//!
//! Connects the page to the injected wallet and drives the claim flow.
//! The flow itself lives in `tc-claim-core`; this crate supplies the browser
//! implementations of its provider, contract and view seams.

pub mod contract;
pub mod dom;
pub mod ethereum;
pub mod events;
pub mod logging;
pub mod settings;

use tc_claim_core::ClaimController;
use wasm_bindgen::prelude::*;

use crate::contract::RpcContractFactory;
use crate::dom::Elements;
use crate::ethereum::InjectedProvider;

pub type PageController = ClaimController<InjectedProvider, RpcContractFactory, Elements>;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    // Improve panic messages in the browser console
    console_error_panic_hook::set_once();
    logging::init();

    init().await
}

async fn init() -> Result<(), JsValue> {
    let els = Elements::bind()?;
    let config = settings::load();

    let provider = InjectedProvider;
    let factory = RpcContractFactory::new(provider, config.confirmation_poll_ms);
    let controller = ClaimController::new(config, provider, factory, els.clone());

    events::bind_events(&els, &controller)?;

    // Pick up a wallet that already authorized this page
    controller.restore_session().await;

    Ok(())
}
