use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::expression::PropertyValue;
use crate::filter::Filter;

/// Paint or layout properties of a layer, keyed by property name (`line-color`, `visibility`, ...).
pub type Properties = BTreeMap<String, PropertyValue>;

/// Render type of a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// Solid color or pattern under everything else. Doesn't use a source.
    Background,
    /// Raster imagery.
    Raster,
    /// Stroked lines.
    Line,
    /// Filled polygons.
    Fill,
    /// Circles at point features.
    Circle,
    /// Text labels and icons.
    Symbol,
}

impl LayerKind {
    /// Whether layers of this kind draw data from a source.
    pub fn requires_source(&self) -> bool {
        !matches!(self, Self::Background)
    }
}

/// A single render pass over a source (or a sub-layer of a vector source).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    /// Unique id of the layer.
    pub id: String,
    /// Render type.
    #[serde(rename = "type")]
    pub kind: LayerKind,
    /// Name of the source the layer draws.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Layer inside a vector tile source.
    #[serde(rename = "source-layer", default, skip_serializing_if = "Option::is_none")]
    pub source_layer: Option<String>,
    /// Only features passing the filter are drawn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    /// The layer is hidden below this zoom.
    #[serde(rename = "minzoom", default, skip_serializing_if = "Option::is_none")]
    pub min_zoom: Option<f64>,
    /// The layer is hidden at and above this zoom.
    #[serde(rename = "maxzoom", default, skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<f64>,
    /// Layout properties.
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub layout: Properties,
    /// Paint properties.
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub paint: Properties,
}

impl Layer {
    /// Creates a layer without source, filter or properties.
    pub fn new(id: impl Into<String>, kind: LayerKind) -> Self {
        Self {
            id: id.into(),
            kind,
            source: None,
            source_layer: None,
            filter: None,
            min_zoom: None,
            max_zoom: None,
            layout: Properties::new(),
            paint: Properties::new(),
        }
    }

    /// Sets the source of the layer.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the vector tile sub-layer.
    pub fn with_source_layer(mut self, source_layer: impl Into<String>) -> Self {
        self.source_layer = Some(source_layer.into());
        self
    }

    /// Sets the feature filter.
    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets minimum zoom.
    pub fn with_min_zoom(mut self, zoom: f64) -> Self {
        self.min_zoom = Some(zoom);
        self
    }

    /// Sets a layout property.
    pub fn with_layout(mut self, name: &str, value: impl Into<PropertyValue>) -> Self {
        self.layout.insert(name.to_string(), value.into());
        self
    }

    /// Sets a paint property.
    pub fn with_paint(mut self, name: &str, value: impl Into<PropertyValue>) -> Self {
        self.paint.insert(name.to_string(), value.into());
        self
    }

    /// Sets the `visibility` layout property.
    pub fn with_visibility(self, visible: bool) -> Self {
        self.with_layout("visibility", if visible { "visible" } else { "none" })
    }

    /// A layer is visible unless its `visibility` layout property is `none`.
    pub fn is_visible(&self) -> bool {
        self.layout
            .get("visibility")
            .and_then(PropertyValue::as_str)
            != Some("none")
    }

    /// Whether the layer is drawn at the given zoom.
    pub fn is_visible_at(&self, zoom: f64) -> bool {
        self.is_visible()
            && self.min_zoom.map_or(true, |min| zoom >= min)
            && self.max_zoom.map_or(true, |max| zoom < max)
    }

    /// Returns a paint property.
    pub fn paint(&self, name: &str) -> Option<&PropertyValue> {
        self.paint.get(name)
    }

    /// Returns a layout property.
    pub fn layout(&self, name: &str) -> Option<&PropertyValue> {
        self.layout.get(name)
    }
}
