use slidemap_style::{Layer, Sky, Source, StyleDocument};

use crate::config::{CameraOptions, LngLat};
use crate::control::{Control, ControlPosition, Cursor, EventKind};
use crate::engine::MapEngine;
use crate::error::EngineError;
use crate::popup::Popup;

/// Map engine without a screen.
///
/// It keeps the style document and everything registered on it in memory, which makes it useful for exporting a
/// complete style and for testing the interaction logic.
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessEngine {
    container: String,
    camera: CameraOptions,
    style: StyleDocument,
    controls: Vec<(Control, Option<ControlPosition>)>,
    subscriptions: Vec<(EventKind, Option<String>)>,
    cursor: Cursor,
    popups: Vec<Popup>,
}

impl HeadlessEngine {
    /// Creates an engine with an empty style.
    pub fn new(container: &str, camera: &CameraOptions) -> Self {
        Self {
            container: container.to_string(),
            camera: camera.clone(),
            style: StyleDocument::new(),
            controls: Vec::new(),
            subscriptions: Vec::new(),
            cursor: Cursor::Default,
            popups: Vec::new(),
        }
    }

    /// Container id the map was created in.
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Current style, including sources and layers added after creation.
    pub fn style(&self) -> &StyleDocument {
        &self.style
    }

    /// Added controls in order.
    pub fn controls(&self) -> &[(Control, Option<ControlPosition>)] {
        &self.controls
    }

    /// Whether the engine reports the events of the given kind and layer.
    pub fn is_subscribed(&self, kind: EventKind, layer: Option<&str>) -> bool {
        self.subscriptions
            .iter()
            .any(|(k, l)| *k == kind && l.as_deref() == layer)
    }

    /// Current mouse cursor.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Popups opened so far, the latest last.
    pub fn popups(&self) -> &[Popup] {
        &self.popups
    }

    /// Camera options the map currently uses.
    pub fn camera(&self) -> &CameraOptions {
        &self.camera
    }

    /// Moves the camera without animation.
    pub fn jump_to(&mut self, center: LngLat, zoom: f64) {
        self.camera.center = center;
        self.camera.zoom = zoom;
    }
}

impl MapEngine for HeadlessEngine {
    fn create(
        container: &str,
        camera: &CameraOptions,
        style: &StyleDocument,
    ) -> Result<Self, EngineError> {
        style.validate()?;

        let mut engine = Self::new(container, camera);
        engine.style = style.clone();
        Ok(engine)
    }

    fn add_source(&mut self, name: &str, source: &Source) -> Result<(), EngineError> {
        Ok(self.style.add_source(name, source.clone())?)
    }

    fn add_layer(&mut self, layer: &Layer, before: Option<&str>) -> Result<(), EngineError> {
        Ok(self.style.add_layer(layer.clone(), before)?)
    }

    fn set_sky(&mut self, sky: &Sky) -> Result<(), EngineError> {
        self.style.set_sky(Some(sky.clone()));
        Ok(())
    }

    fn add_control(
        &mut self,
        control: &Control,
        position: Option<ControlPosition>,
    ) -> Result<(), EngineError> {
        if let Control::Terrain { source, .. } = control {
            if self.style.source(source).is_none() {
                return Err(EngineError::Rejected(format!(
                    "terrain source '{source}' does not exist"
                )));
            }
        }

        self.controls.push((control.clone(), position));
        Ok(())
    }

    fn subscribe(&mut self, kind: EventKind, layer: Option<&str>) -> Result<(), EngineError> {
        if let Some(layer) = layer {
            log::trace!("subscribing to '{}' events of layer '{layer}'", kind.as_str());
        }

        self.subscriptions.push((kind, layer.map(str::to_string)));
        Ok(())
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn show_popup(&mut self, popup: &Popup) -> Result<(), EngineError> {
        self.popups.push(popup.clone());
        Ok(())
    }

    fn center(&self) -> LngLat {
        self.camera.center
    }

    fn zoom(&self) -> f64 {
        self.camera.zoom
    }
}
