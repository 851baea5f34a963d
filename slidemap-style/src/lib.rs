//! Typed style documents for map rendering engines that follow the MapLibre/Mapbox style specification v8.
//!
//! A [`StyleDocument`] owns a registry of named [`Source`]s and an ordered list of [`Layer`]s. Paint and layout
//! properties are [`PropertyValue`]s, which can be constants or functions of the zoom level. Zoom functions can be
//! evaluated in Rust, so style rules like "flowlines fade in between zoom 9 and 17" are testable without an
//! engine.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

mod color;
mod document;
pub mod error;
pub mod expression;
mod filter;
mod layer;
mod sky;
pub mod source;

pub use color::Color;
pub use document::{StyleDocument, STYLE_VERSION};
pub use error::StyleError;
pub use expression::{Interpolate, InterpolationKind, PropertyValue, ZoomFunction};
pub use filter::Filter;
pub use layer::{Layer, LayerKind, Properties};
pub use sky::Sky;
pub use source::{GeoJsonData, GeoJsonSource, Source, TerrainSource, TileService};
