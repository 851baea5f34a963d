//! The map rendering engine the configurator drives.
//!
//! Tile fetching, rendering, hit-testing and terrain are done by the engine. This crate only tells the engine
//! what to draw through [`MapEngine`] and reacts to the events it reports.

use slidemap_style::{Layer, Sky, Source, StyleDocument};

use crate::config::{CameraOptions, LngLat};
use crate::control::{Control, ControlPosition, Cursor, EventKind};
use crate::error::EngineError;
use crate::popup::Popup;

mod headless;

pub use headless::HeadlessEngine;

/// Style and event API of a map engine instance.
///
/// Errors returned from these methods mean the engine refused the call synchronously. Resource failures (tiles that
/// could not be loaded, unreachable services) are handled inside the engine and never reported here.
pub trait MapEngine {
    /// Creates a map instance in the given container.
    fn create(
        container: &str,
        camera: &CameraOptions,
        style: &StyleDocument,
    ) -> Result<Self, EngineError>
    where
        Self: Sized;

    /// Registers a source.
    fn add_source(&mut self, name: &str, source: &Source) -> Result<(), EngineError>;

    /// Adds a layer on top, or directly below the `before` layer.
    fn add_layer(&mut self, layer: &Layer, before: Option<&str>) -> Result<(), EngineError>;

    /// Sets sky and fog parameters.
    fn set_sky(&mut self, sky: &Sky) -> Result<(), EngineError>;

    /// Adds a UI control. `None` position puts it in the engine's default corner.
    fn add_control(
        &mut self,
        control: &Control,
        position: Option<ControlPosition>,
    ) -> Result<(), EngineError>;

    /// Asks the engine to report events of the given kind, optionally only for features of one layer.
    fn subscribe(&mut self, kind: EventKind, layer: Option<&str>) -> Result<(), EngineError>;

    /// Changes the mouse cursor over the map.
    fn set_cursor(&mut self, cursor: Cursor);

    /// Opens a popup.
    fn show_popup(&mut self, popup: &Popup) -> Result<(), EngineError>;

    /// Current center of the camera.
    fn center(&self) -> LngLat;

    /// Current zoom level.
    fn zoom(&self) -> f64;
}
