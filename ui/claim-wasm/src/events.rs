//! Event binding.
//!
//! Wires the two page controls to the controller. Wallet notifications are
//! subscribed by the controller itself once a wallet connects.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::PageController;
use crate::dom::Elements;

/// Helper: attach a click handler that runs a controller action to completion.
///
/// Every outcome is already reported to the status region, so the result is dropped.
macro_rules! on_click_async {
    ($el:expr, $controller:expr, $action:ident) => {{
        let controller = $controller.clone();
        let cb = Closure::wrap(Box::new(move |_: web_sys::MouseEvent| {
            let controller = controller.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let _ = controller.$action().await;
            });
        }) as Box<dyn FnMut(_)>);
        $el.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
        cb.forget();
    }};
}

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(els: &Elements, controller: &PageController) -> Result<(), JsValue> {
    on_click_async!(els.connect_btn, controller, connect);
    on_click_async!(els.claim_btn, controller, claim);
    Ok(())
}
