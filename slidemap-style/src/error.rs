//! Error type used by the crate.

use thiserror::Error;

/// Error returned when a style document or one of its parts is invalid.
#[derive(Debug, Error)]
pub enum StyleError {
    /// A source with the same name is already registered.
    #[error("source '{0}' is already registered")]
    DuplicateSource(String),
    /// A layer with the same id is already in the layer list.
    #[error("layer '{0}' is already registered")]
    DuplicateLayer(String),
    /// A layer references a source that is not declared.
    #[error("layer '{layer}' references unknown source '{source_name}'")]
    UnknownSource {
        /// Id of the layer.
        layer: String,
        /// Name of the missing source.
        source_name: String,
    },
    /// A layer with the given id does not exist.
    #[error("layer '{0}' does not exist")]
    UnknownLayer(String),
    /// A layer of a type that draws data has no source.
    #[error("layer '{0}' requires a source")]
    MissingSource(String),
    /// Tile source URL is not a valid `{z}/{x}/{y}` template.
    #[error("invalid tile url template: {0}")]
    InvalidTileUrl(String),
    /// Source definition is incomplete.
    #[error("invalid source '{0}': {1}")]
    InvalidSource(String, String),
    /// Expression could not be parsed.
    #[error("invalid expression: {0}")]
    InvalidExpression(String),
    /// Color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),
    /// Only version 8 of the style specification is supported.
    #[error("unsupported style version {0}")]
    UnsupportedVersion(u8),
    /// Failed to read or write JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
