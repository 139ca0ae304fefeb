use anyhow::{anyhow, Result};
use js_sys::Uint8Array;
use wasm_bindgen::{JsCast, JsValue};

pub(crate) fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Accept either a string (fetched text) or a Uint8Array-like value (fetched bytes).
pub(crate) fn js_bytes(value: &JsValue, what: &str) -> Result<Vec<u8>> {
    if let Some(text) = value.as_string() {
        return Ok(text.into_bytes());
    }
    let array: &Uint8Array = value.dyn_ref()
        .ok_or_else(|| anyhow!("{what} must be a string or a Uint8Array"))?;
    Ok(array.to_vec())
}
