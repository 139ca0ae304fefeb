use anyhow::Result;
use serde::Serialize;
use wasm_bindgen::{JsValue, prelude::wasm_bindgen};

use crate::common::*;

#[wasm_bindgen]
pub struct WasmChoropleth {
    inner: loanmap_core::ViewController,
}

/// Tooltip handed to the page: plain lines plus ready-made HTML.
#[derive(Serialize)]
struct HoverInfo<'a> {
    title: &'a str,
    lines: &'a [String],
    html: String,
}

#[wasm_bindgen]
impl WasmChoropleth {
    /// Construct from the dataset CSV and the two boundary topologies, each a string or bytes.
    /// config: optional JSON map configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(csv: JsValue, states: JsValue, counties: JsValue, config: Option<String>) -> Result<WasmChoropleth, JsValue> {
        let config = match config {
            Some(json) => loanmap_core::MapConfig::from_json_str(&json).map_err(js_err)?,
            None => loanmap_core::MapConfig::default(),
        };
        let atlas = build_atlas(&csv, &states, &counties, &config).map_err(js_err)?;
        Ok(WasmChoropleth { inner: loanmap_core::ViewController::new(atlas, config) })
    }

    /// Return categories in selector order as an array of strings.
    pub fn categories(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.inner.categories()).map_err(|e| e.into())
    }

    pub fn category(&self) -> String {
        self.inner.category().to_string()
    }

    /// Switch category, keeping the current view. Unknown categories are rejected.
    pub fn set_category(&mut self, category: &str) -> Result<bool, JsValue> {
        self.inner.set_category(category).map_err(js_err)
    }

    /// Click at canvas coordinates; returns true if the view changed.
    pub fn click(&mut self, x: f64, y: f64) -> Result<bool, JsValue> {
        self.inner.click(x, y).map_err(js_err)
    }

    /// Return to the national view; returns true if the view changed.
    pub fn back(&mut self) -> Result<bool, JsValue> {
        self.inner.back().map_err(js_err)
    }

    /// Tooltip under canvas coordinates as { title, lines, html }, or undefined.
    pub fn hover(&self, x: f64, y: f64) -> Result<JsValue, JsValue> {
        match self.inner.hover(x, y) {
            Some(tooltip) => {
                let info = HoverInfo { title: &tooltip.title, lines: &tooltip.lines, html: tooltip.html() };
                serde_wasm_bindgen::to_value(&info).map_err(|e| e.into())
            }
            None => Ok(JsValue::UNDEFINED),
        }
    }

    pub fn back_visible(&self) -> bool {
        self.inner.scene().back_visible()
    }

    /// "national" or "state:SS".
    pub fn view(&self) -> String {
        self.inner.view().to_string()
    }

    /// Generate SVG text for the current scene.
    /// Returns SVG XML string (UI can set innerHTML or create Blob).
    #[wasm_bindgen(js_name = "to_svg")]
    pub fn to_svg(&self) -> Result<String, JsValue> {
        self.inner.scene().to_svg_string().map_err(js_err)
    }
}

fn build_atlas(csv: &JsValue, states: &JsValue, counties: &JsValue, config: &loanmap_core::MapConfig) -> Result<loanmap_core::Atlas> {
    loanmap_core::Atlas::from_bytes(
        &js_bytes(csv, "csv")?,
        &js_bytes(states, "states")?,
        &js_bytes(counties, "counties")?,
        config,
    )
}
