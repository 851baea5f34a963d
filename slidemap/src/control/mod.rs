//! Interactivity of the map.
//!
//! The engine reports lifecycle and pointer signals as [`MapEvent`]s. The
//! [`MapConfigurator`](crate::MapConfigurator) passes each event to an [`EventDispatcher`], which calls every
//! [`EventHandler`] registered for the event kind and, for pointer events, the layer under the pointer.
//!
//! UI widgets the engine draws on top of the map (zoom buttons, scale bar, ...) are described by [`Control`].

use geojson::Feature;
use maybe_sync::{MaybeSend, MaybeSync};

use crate::config::LngLat;
use crate::engine::MapEngine;

mod dispatcher;
mod widgets;

pub use dispatcher::EventDispatcher;
pub use widgets::{Control, ControlKind, ControlPosition, ScaleUnit};

/// Event handler.
pub trait EventHandler:
    (Fn(&MapEvent, &mut dyn MapEngine) -> EventPropagation) + MaybeSend + MaybeSync
{
}

impl<T: Fn(&MapEvent, &mut dyn MapEngine) -> EventPropagation> EventHandler for T where
    T: MaybeSync + MaybeSend
{
}

/// Kind of a [`MapEvent`], used to subscribe to events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Initial style and resources are loaded.
    Load,
    /// Camera changed.
    Move,
    /// Zoom animation finished.
    ZoomEnd,
    /// Pointer entered a feature of a layer.
    MouseEnter,
    /// Pointer left the features of a layer.
    MouseLeave,
    /// A feature of a layer was clicked.
    Click,
}

impl EventKind {
    /// Name of the event in the engine API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Move => "move",
            Self::ZoomEnd => "zoomend",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
            Self::Click => "click",
        }
    }
}

/// Signal from the map engine.
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Initial style and resources are loaded. The engine fires it once.
    Load,
    /// Camera changed.
    Move,
    /// Zoom animation finished.
    ZoomEnd,
    /// Pointer entered a feature of the layer.
    MouseEnter {
        /// Layer id.
        layer: String,
    },
    /// Pointer left the features of the layer.
    MouseLeave {
        /// Layer id.
        layer: String,
    },
    /// Features of the layer were clicked.
    Click(ClickEvent),
}

impl MapEvent {
    /// Kind of the event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Load => EventKind::Load,
            Self::Move => EventKind::Move,
            Self::ZoomEnd => EventKind::ZoomEnd,
            Self::MouseEnter { .. } => EventKind::MouseEnter,
            Self::MouseLeave { .. } => EventKind::MouseLeave,
            Self::Click(_) => EventKind::Click,
        }
    }

    /// Layer the event happened on, for pointer events.
    pub fn layer(&self) -> Option<&str> {
        match self {
            Self::MouseEnter { layer } | Self::MouseLeave { layer } => Some(layer),
            Self::Click(click) => Some(&click.layer),
            Self::Load | Self::Move | Self::ZoomEnd => None,
        }
    }
}

/// Details of a click on a layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    /// Layer id.
    pub layer: String,
    /// Geographic position of the pointer.
    pub lng_lat: LngLat,
    /// Features under the pointer, topmost first.
    pub features: Vec<Feature>,
}

/// Value returned by an [`EventHandler`] to indicate the status of the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPropagation {
    /// Event should be propagated to the next handler.
    Propagate,
    /// Event should not be propagated to the next handler.
    Stop,
}

/// Mouse cursor over the map canvas.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// Whatever the engine shows by default (a grab hand for MapLibre).
    #[default]
    Default,
    /// Pointing hand.
    Pointer,
}

impl Cursor {
    /// CSS `cursor` value. The default cursor is set by clearing the property.
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Pointer => "pointer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_layers() {
        assert_eq!(MapEvent::Load.layer(), None);
        assert_eq!(
            MapEvent::MouseEnter {
                layer: "landslides".into()
            }
            .layer(),
            Some("landslides")
        );

        let click = MapEvent::Click(ClickEvent {
            layer: "landslides".into(),
            lng_lat: LngLat::new(-82.7, 37.5),
            features: vec![],
        });
        assert_eq!(click.kind(), EventKind::Click);
        assert_eq!(click.kind().as_str(), "click");
        assert_eq!(click.layer(), Some("landslides"));
    }
}
