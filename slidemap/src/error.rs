//! Error types used by the crate.

use slidemap_style::StyleError;
use thiserror::Error;

/// Error reported by a [`MapEngine`](crate::engine::MapEngine) implementation.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The engine refused a style change.
    #[error("style rejected: {0}")]
    Style(#[from] StyleError),
    /// The engine refused the operation for another reason.
    #[error("{0}")]
    Rejected(String),
    /// Error interacting with WASM runtime.
    #[error("wasm error: {0:?}")]
    Wasm(Option<String>),
}

/// Slidemap error type.
#[derive(Debug, Error)]
pub enum SlidemapError {
    /// Invalid style document.
    #[error(transparent)]
    Style(#[from] StyleError),
    /// Map engine failure.
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// Invalid map configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Configuration could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigFormat(#[from] serde_json::Error),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for EngineError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        EngineError::Wasm(Some(format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<serde_wasm_bindgen::Error> for EngineError {
    fn from(value: serde_wasm_bindgen::Error) -> Self {
        EngineError::Wasm(Some(value.to_string()))
    }
}
