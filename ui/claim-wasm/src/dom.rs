//! DOM element bindings.
//!
//! All fields are resolved once at startup. `Elements` is also the
//! controller's view: it renders status, controls, wallet info and balance.

use tc_api_types::WalletAddress;
use tc_claim_core::{ClaimView, ControlState, StatusKind};
use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlButtonElement, HtmlElement};

/// Marker class for a control that must look disabled for the rest of the session.
pub const DISABLED_BUTTON_CLASS: &str = "disabled-button";

// ── Helpers ──

pub fn by_id(id: &str) -> Option<Element> {
    gloo_utils::document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn query(selector: &str) -> Option<Element> {
    gloo_utils::document().query_selector(selector).ok()?
}

pub fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn set_display(el: &HtmlElement, value: &str) {
    let _ = el.style().set_property("display", value);
}

// ── Elements struct ──

/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    pub connect_btn: HtmlButtonElement,
    pub claim_btn: HtmlButtonElement,
    pub status: Element,
    pub wallet_info: HtmlElement,
    pub wallet_address: Element,
    pub balance: Element,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_typed {
    ($ty:ty, $id:expr) => {
        by_id_typed::<$ty>($id)
            .ok_or_else(|| JsValue::from_str(&format!("missing {} #{}", stringify!($ty), $id)))?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after the document is parsed.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            connect_btn: get_typed!(HtmlButtonElement, "connectWallet"),
            claim_btn: get_typed!(HtmlButtonElement, "claimButton"),
            status: get_el!("status"),
            wallet_info: get_typed!(HtmlElement, "walletInfo"),
            wallet_address: get_el!("walletAddress"),
            balance: query(".balance").ok_or_else(|| JsValue::from_str("missing .balance"))?,
        })
    }
}

fn apply_control(btn: &HtmlButtonElement, state: &ControlState) {
    if let Some(text) = &state.text {
        set_text(btn, text);
    }
    btn.set_disabled(!state.enabled);
    toggle_class(btn, DISABLED_BUTTON_CLASS, state.disabled_marker);
}

impl ClaimView for Elements {
    fn show_status(&self, message: &str, kind: StatusKind) {
        set_text(&self.status, message);
        self.status.set_class_name(&format!("status {kind}"));
    }

    fn set_connect_control(&self, state: &ControlState) {
        apply_control(&self.connect_btn, state);
    }

    fn set_claim_control(&self, state: &ControlState) {
        apply_control(&self.claim_btn, state);
    }

    fn show_wallet_info(&self, account: Option<&WalletAddress>) {
        match account {
            Some(account) => {
                set_text(&self.wallet_address, account.as_str());
                set_display(&self.wallet_info, "block");
            }
            None => {
                set_text(&self.wallet_address, "");
                set_display(&self.wallet_info, "none");
            }
        }
    }

    fn show_balance(&self, text: &str) {
        set_text(&self.balance, text);
    }
}
