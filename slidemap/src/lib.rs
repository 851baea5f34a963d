//! Slidemap is an interactive map of landslides recorded by the Kentucky Geological Survey in Kentucky
//! Transportation Cabinet district 12, drawn over hillshade, NHD hydrography and county boundaries.
//!
//! The map itself is rendered by an external engine (MapLibre GL in the browser). This crate describes what the
//! engine should draw and how the map reacts to the user:
//!
//! * [`style`] builds the [`StyleDocument`](slidemap_style::StyleDocument) the map is created with, and the
//!   layers added after it is loaded.
//! * [`MapConfigurator`] owns the [`MapEngine`] instance, adds controls, and reacts to engine events: it adds the
//!   landslide and county layers on load, changes the cursor over landslide markers and opens a popup with the
//!   landslide record when a marker is clicked.
//! * [`HeadlessEngine`] is a [`MapEngine`] without a screen, used to export the complete style and in tests.
//!
//! On `wasm32` targets the [`platform`] module binds [`MapEngine`] to MapLibre GL.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod config;
mod configurator;
pub mod control;
pub mod engine;
pub mod error;
pub mod platform;
pub mod popup;
pub mod style;
pub mod telemetry;

pub use config::{CameraOptions, DataFiles, LngLat, MapConfig};
pub use configurator::MapConfigurator;
pub use control::{ClickEvent, Cursor, EventPropagation, MapEvent};
pub use engine::{HeadlessEngine, MapEngine};
pub use error::{EngineError, SlidemapError};
pub use popup::Popup;

// Reexport style types
pub use slidemap_style;
