use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config override is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("at least one tile layer is required")]
    EmptyLayers,
    #[error("tile url template {url:?} must contain {{x}}, {{y}} and {{z}}")]
    BadTemplate { url: String },
    #[error("layer {layer:?} opacity {opacity} is outside [0, 1]")]
    BadOpacity { layer: String, opacity: f64 },
    #[error("lens bounds are inconsistent (min {min}, max {max}, step {step})")]
    BadLensBounds { min: f64, max: f64, step: f64 },
    #[error("view zoom {zoom} is outside [{min}, {max}]")]
    BadZoom { zoom: f64, min: f64, max: f64 },
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error("no global window")]
    MissingWindow,
    #[error("window has no document")]
    MissingDocument,
    #[error("element not mounted: {0}")]
    MissingElement(&'static str),
    #[error("canvas has no 2d context")]
    NoContext,
    #[error("dom call failed: {0}")]
    Js(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<JsValue> for MapError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .dyn_ref::<js_sys::Error>()
            .map(|e| String::from(e.message()))
            .or_else(|| value.as_string())
            .unwrap_or_else(|| format!("{value:?}"));
        MapError::Js(msg)
    }
}
