//! jsbridge as a WASM module for browser and Node hosts.
//!
//! Linking this crate pulls in the trampoline entry points
//! (`jsbridge_prepare_host_call`, `jsbridge_call_host_function`,
//! `jsbridge_cleanup_host_call`) and adds a small `wasm-bindgen` surface the
//! JavaScript runtime glue uses to check it speaks the same wire protocol.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { wire_layout } from 'jsbridge-wasm';
//!
//! await init();
//!
//! const layout = JSON.parse(wire_layout());
//! // { value_size: 32, kind_offset: 0, payload_offsets: [8, 16, 24],
//! //   kinds: { boolean: 0, string: 1, ... }, import_module: "jsbridge", ... }
//! ```

pub mod layout;

pub use jsbridge;
pub use layout::WireLayout;

use wasm_bindgen::prelude::*;

/// Return the crate version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Return the wire layout as a JSON string.
///
/// See [`WireLayout`] for the fields.
#[wasm_bindgen]
pub fn wire_layout() -> String {
    WireLayout::current().to_json()
}

/// Return the wire layout as a plain JavaScript object.
#[wasm_bindgen]
pub fn wire_layout_value() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&WireLayout::current()).map_err(JsValue::from)
}
