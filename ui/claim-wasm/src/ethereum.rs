//! `window.ethereum` (EIP-1193) provider.

use std::rc::Rc;

use async_trait::async_trait;
use js_sys::{Function, Object, Promise, Reflect};
use serde::Serialize;
use tc_api_types::{
    AddEthereumChainParameter, ChainId, NetworkConfig, SwitchEthereumChainParameter, WalletAddress,
};
use tc_provider::{
    EventHandler, ProviderError, ProviderEvent, WalletProvider, events, methods, parse_accounts,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

/// Global the wallet extension injects into the page.
const INJECTION_KEY: &str = "ethereum";

fn ethereum() -> Option<JsValue> {
    let window = web_sys::window()?;
    let value = Reflect::get(&window, &JsValue::from_str(INJECTION_KEY)).ok()?;
    if value.is_undefined() || value.is_null() {
        None
    } else {
        Some(value)
    }
}

fn field(value: &JsValue, name: &str) -> Option<JsValue> {
    if !value.is_object() {
        return None;
    }
    Reflect::get(value, &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn code_of(value: &JsValue) -> Option<i64> {
    field(value, "code").and_then(|c| c.as_f64()).map(|c| c as i64)
}

/// Converts a rejected request into a [`ProviderError`].
///
/// Some wallets (MetaMask mobile among them) report 4902 nested under
/// `data.originalError` with an outer internal-error code.
pub fn provider_error(value: JsValue) -> ProviderError {
    let nested = field(&value, "data")
        .and_then(|data| field(&data, "originalError"))
        .and_then(|original| code_of(&original));
    let code = match (code_of(&value), nested) {
        (_, Some(nested)) if nested == tc_provider::UNRECOGNIZED_CHAIN => Some(nested),
        (outer, _) => outer,
    };

    let message = field(&value, "message")
        .and_then(|m| m.as_string())
        .or_else(|| value.as_string())
        .unwrap_or_else(|| format!("{value:?}"));

    ProviderError::new(code, message)
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, ProviderError> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| ProviderError::new(None, format!("encode params: {e}")))
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InjectedProvider;

impl InjectedProvider {
    /// `ethereum.request({ method, params })`.
    pub async fn request<T: Serialize + ?Sized>(
        &self,
        method: &str,
        params: Option<&T>,
    ) -> Result<JsValue, ProviderError> {
        let ethereum =
            ethereum().ok_or_else(|| ProviderError::new(None, "wallet provider not found"))?;

        let args = Object::new();
        Reflect::set(&args, &JsValue::from_str("method"), &JsValue::from_str(method))
            .map_err(provider_error)?;
        if let Some(params) = params {
            Reflect::set(&args, &JsValue::from_str("params"), &to_js(params)?)
                .map_err(provider_error)?;
        }

        let request_fn = Reflect::get(&ethereum, &JsValue::from_str("request"))
            .map_err(provider_error)?
            .dyn_into::<Function>()
            .map_err(|_| ProviderError::new(None, "ethereum.request is not a function"))?;

        let result = request_fn.call1(&ethereum, &args).map_err(provider_error)?;
        let promise = result
            .dyn_into::<Promise>()
            .map_err(|_| ProviderError::new(None, "ethereum.request did not return a promise"))?;

        JsFuture::from(promise).await.map_err(provider_error)
    }

    async fn request_accounts_with(&self, method: &str) -> Result<Vec<WalletAddress>, ProviderError> {
        let result = self.request::<()>(method, None).await?;
        let value: serde_json::Value = serde_wasm_bindgen::from_value(result)
            .map_err(|e| ProviderError::new(None, format!("decode accounts: {e}")))?;
        Ok(parse_accounts(&value))
    }
}

#[async_trait(?Send)]
impl WalletProvider for InjectedProvider {
    fn is_available(&self) -> bool {
        ethereum().is_some()
    }

    async fn request_accounts(&self) -> Result<Vec<WalletAddress>, ProviderError> {
        self.request_accounts_with(methods::ETH_REQUEST_ACCOUNTS).await
    }

    async fn accounts(&self) -> Result<Vec<WalletAddress>, ProviderError> {
        self.request_accounts_with(methods::ETH_ACCOUNTS).await
    }

    async fn chain_id(&self) -> Result<ChainId, ProviderError> {
        let result = self.request::<()>(methods::ETH_CHAIN_ID, None).await?;
        result
            .as_string()
            .map(ChainId)
            .ok_or_else(|| ProviderError::new(None, "eth_chainId returned a non-string"))
    }

    async fn switch_chain(&self, chain_id: &ChainId) -> Result<(), ProviderError> {
        let params = [SwitchEthereumChainParameter {
            chain_id: chain_id.0.clone(),
        }];
        self.request(methods::WALLET_SWITCH_ETHEREUM_CHAIN, Some(&params))
            .await
            .map(|_| ())
    }

    async fn add_chain(&self, network: &NetworkConfig) -> Result<(), ProviderError> {
        let params = [AddEthereumChainParameter::from(network)];
        self.request(methods::WALLET_ADD_ETHEREUM_CHAIN, Some(&params))
            .await
            .map(|_| ())
    }

    fn subscribe(&self, handler: EventHandler) -> Result<(), ProviderError> {
        let ethereum =
            ethereum().ok_or_else(|| ProviderError::new(None, "wallet provider not found"))?;
        let on = Reflect::get(&ethereum, &JsValue::from_str("on"))
            .map_err(provider_error)?
            .dyn_into::<Function>()
            .map_err(|_| ProviderError::new(None, "ethereum.on is not a function"))?;

        let handler = Rc::new(handler);

        let accounts_handler = Rc::clone(&handler);
        let accounts_cb = Closure::wrap(Box::new(move |payload: JsValue| {
            let value: serde_json::Value =
                serde_wasm_bindgen::from_value(payload).unwrap_or_default();
            (*accounts_handler)(&ProviderEvent::AccountsChanged(parse_accounts(&value)));
        }) as Box<dyn FnMut(JsValue)>);
        on.call2(
            &ethereum,
            &JsValue::from_str(events::ACCOUNTS_CHANGED),
            accounts_cb.as_ref().unchecked_ref(),
        )
        .map_err(provider_error)?;
        accounts_cb.forget();

        let chain_cb = Closure::wrap(Box::new(move |payload: JsValue| {
            if let Some(chain_id) = payload.as_string() {
                (*handler)(&ProviderEvent::ChainChanged(ChainId(chain_id)));
            }
        }) as Box<dyn FnMut(JsValue)>);
        on.call2(
            &ethereum,
            &JsValue::from_str(events::CHAIN_CHANGED),
            chain_cb.as_ref().unchecked_ref(),
        )
        .map_err(provider_error)?;
        chain_cb.forget();

        Ok(())
    }
}
