use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::StyleError;
use crate::layer::Layer;
use crate::sky::Sky;
use crate::source::Source;

/// Version of the style specification this crate produces.
pub const STYLE_VERSION: u8 = 8;

/// Declarative description of map sources and layers consumed by a map rendering engine.
///
/// Layers are stored in render order: a layer later in the list is drawn on top of the earlier ones. A layer can
/// only be added after the source it references has been registered.
///
/// ```
/// use slidemap_style::{Layer, LayerKind, Source, StyleDocument};
///
/// let mut style = StyleDocument::new();
/// style.add_source("points", Source::geojson_url("points.geojson")).unwrap();
/// style.add_layer(Layer::new("markers", LayerKind::Circle).with_source("points"), None).unwrap();
/// style.add_layer(Layer::new("background", LayerKind::Background), Some("markers")).unwrap();
///
/// assert_eq!(style.layer_ids().collect::<Vec<_>>(), ["background", "markers"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleDocument {
    /// Style specification version. Always `8`.
    pub version: u8,
    /// Base URL of the sprite sheet for icons and patterns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
    /// URL template of SDF glyph ranges: `{fontstack}` and `{range}` placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyphs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sky: Option<Sky>,
    sources: BTreeMap<String, Source>,
    layers: Vec<Layer>,
}

impl Default for StyleDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl StyleDocument {
    /// Creates an empty style document.
    pub fn new() -> Self {
        Self {
            version: STYLE_VERSION,
            sprite: None,
            glyphs: None,
            sky: None,
            sources: BTreeMap::new(),
            layers: Vec::new(),
        }
    }

    /// Sets the sprite URL.
    pub fn with_sprite(mut self, sprite: impl Into<String>) -> Self {
        self.sprite = Some(sprite.into());
        self
    }

    /// Sets the glyphs URL template.
    pub fn with_glyphs(mut self, glyphs: impl Into<String>) -> Self {
        self.glyphs = Some(glyphs.into());
        self
    }

    /// Registers a new source.
    ///
    /// Fails if a source with the same name already exists or the source connection parameters are invalid.
    pub fn add_source(&mut self, name: impl Into<String>, source: Source) -> Result<(), StyleError> {
        let name = name.into();
        if self.sources.contains_key(&name) {
            return Err(StyleError::DuplicateSource(name));
        }

        source.validate(&name)?;
        self.sources.insert(name, source);
        Ok(())
    }

    /// Returns a registered source.
    pub fn source(&self, name: &str) -> Option<&Source> {
        self.sources.get(name)
    }

    /// Iterates over registered sources ordered by name.
    pub fn sources(&self) -> impl Iterator<Item = (&str, &Source)> {
        self.sources.iter().map(|(name, source)| (name.as_str(), source))
    }

    /// Adds a layer to the layer list.
    ///
    /// If `before` is set, the layer is inserted directly below the layer with that id. Otherwise it is added on
    /// top of all other layers.
    pub fn add_layer(&mut self, layer: Layer, before: Option<&str>) -> Result<(), StyleError> {
        if self.layer_index(&layer.id).is_some() {
            return Err(StyleError::DuplicateLayer(layer.id));
        }

        self.check_layer_source(&layer)?;

        match before {
            Some(anchor) => {
                let index = self
                    .layer_index(anchor)
                    .ok_or_else(|| StyleError::UnknownLayer(anchor.to_string()))?;
                self.layers.insert(index, layer);
            }
            None => self.layers.push(layer),
        }

        Ok(())
    }

    /// Moves an existing layer below `before`, or to the top if `before` is `None`. Moving a layer below itself
    /// does nothing.
    pub fn move_layer(&mut self, id: &str, before: Option<&str>) -> Result<(), StyleError> {
        let index = self
            .layer_index(id)
            .ok_or_else(|| StyleError::UnknownLayer(id.to_string()))?;

        if before == Some(id) {
            return Ok(());
        }

        if let Some(anchor) = before {
            if self.layer_index(anchor).is_none() {
                return Err(StyleError::UnknownLayer(anchor.to_string()));
            }
        }

        let layer = self.layers.remove(index);
        let target = match before {
            Some(anchor) => self.layer_index(anchor).unwrap_or(self.layers.len()),
            None => self.layers.len(),
        };
        self.layers.insert(target, layer);

        Ok(())
    }

    /// Layers in render order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Layer ids in render order.
    pub fn layer_ids(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|layer| layer.id.as_str())
    }

    /// Returns a layer by id.
    pub fn layer(&self, id: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    /// Position of a layer in render order.
    pub fn layer_index(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id == id)
    }

    /// Sky settings.
    pub fn sky(&self) -> Option<&Sky> {
        self.sky.as_ref()
    }

    /// Replaces sky settings.
    pub fn set_sky(&mut self, sky: Option<Sky>) {
        self.sky = sky;
    }

    /// Checks invariants of a document that was not built through this API (e.g. read from JSON).
    pub fn validate(&self) -> Result<(), StyleError> {
        if self.version != STYLE_VERSION {
            return Err(StyleError::UnsupportedVersion(self.version));
        }

        for (name, source) in &self.sources {
            source.validate(name)?;
        }

        let mut ids = HashSet::new();
        for layer in &self.layers {
            if !ids.insert(layer.id.as_str()) {
                return Err(StyleError::DuplicateLayer(layer.id.clone()));
            }
            self.check_layer_source(layer)?;
        }

        Ok(())
    }

    /// Writes the document as style JSON.
    pub fn to_json(&self) -> Result<String, StyleError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads and validates a style JSON document.
    pub fn from_json(json: &str) -> Result<Self, StyleError> {
        let document: Self = serde_json::from_str(json)?;
        document.validate()?;
        Ok(document)
    }

    fn check_layer_source(&self, layer: &Layer) -> Result<(), StyleError> {
        match &layer.source {
            Some(source) if !self.sources.contains_key(source) => Err(StyleError::UnknownSource {
                layer: layer.id.clone(),
                source_name: source.clone(),
            }),
            None if layer.kind.requires_source() => {
                Err(StyleError::MissingSource(layer.id.clone()))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::layer::LayerKind;

    fn points_style() -> StyleDocument {
        let mut style = StyleDocument::new();
        style
            .add_source("points", Source::geojson_url("points.geojson"))
            .unwrap();
        style
            .add_source("lines", Source::geojson_url("lines.geojson"))
            .unwrap();
        style
            .add_layer(Layer::new("background", LayerKind::Background), None)
            .unwrap();
        style
            .add_layer(
                Layer::new("markers", LayerKind::Circle).with_source("points"),
                None,
            )
            .unwrap();
        style
    }

    #[test]
    fn before_anchor_inserts_below() {
        let mut style = points_style();
        style
            .add_layer(
                Layer::new("outline", LayerKind::Line).with_source("lines"),
                Some("markers"),
            )
            .unwrap();

        assert_eq!(
            style.layer_ids().collect::<Vec<_>>(),
            ["background", "outline", "markers"]
        );
        assert!(style.layer_index("outline") < style.layer_index("markers"));
    }

    #[test]
    fn layer_errors() {
        let mut style = points_style();

        assert_matches!(
            style.add_layer(Layer::new("markers", LayerKind::Circle).with_source("points"), None),
            Err(StyleError::DuplicateLayer(id)) if id == "markers"
        );
        assert_matches!(
            style.add_layer(Layer::new("roads", LayerKind::Line).with_source("roads"), None),
            Err(StyleError::UnknownSource { source_name, .. }) if source_name == "roads"
        );
        assert_matches!(
            style.add_layer(Layer::new("lines", LayerKind::Line), None),
            Err(StyleError::MissingSource(_))
        );
        assert_matches!(
            style.add_layer(
                Layer::new("outline", LayerKind::Line).with_source("lines"),
                Some("missing")
            ),
            Err(StyleError::UnknownLayer(_))
        );
        assert_eq!(style.layers().len(), 2);
    }

    #[test]
    fn duplicate_source() {
        let mut style = points_style();
        assert_matches!(
            style.add_source("points", Source::geojson_url("other.geojson")),
            Err(StyleError::DuplicateSource(_))
        );
    }

    #[test]
    fn move_layer() {
        let mut style = points_style();
        style.move_layer("background", None).unwrap();
        assert_eq!(
            style.layer_ids().collect::<Vec<_>>(),
            ["markers", "background"]
        );

        style.move_layer("background", Some("markers")).unwrap();
        assert_eq!(
            style.layer_ids().collect::<Vec<_>>(),
            ["background", "markers"]
        );

        assert_matches!(
            style.move_layer("background", Some("missing")),
            Err(StyleError::UnknownLayer(_))
        );
        assert_eq!(style.layers().len(), 2);
    }

    #[test]
    fn move_layer_below_itself() {
        let mut style = points_style();
        style.move_layer("background", Some("background")).unwrap();
        assert_eq!(
            style.layer_ids().collect::<Vec<_>>(),
            ["background", "markers"]
        );

        assert_matches!(
            style.move_layer("missing", Some("missing")),
            Err(StyleError::UnknownLayer(_))
        );
    }

    #[test]
    fn invalid_zoom_function_is_rejected() {
        let mut style = points_style();
        style.layers[1] = style.layers[1]
            .clone()
            .with_paint("circle-radius", 6.0);
        let json = style.to_json().unwrap();
        assert!(StyleDocument::from_json(&json).is_ok());

        let empty = json.replace("\"circle-radius\": 6.0", "\"circle-radius\": {\"stops\": []}");
        assert_ne!(empty, json);
        assert_matches!(StyleDocument::from_json(&empty), Err(StyleError::Json(_)));

        let descending = json.replace(
            "\"circle-radius\": 6.0",
            "\"circle-radius\": {\"stops\": [[12, 8], [9, 4]]}",
        );
        assert_matches!(
            StyleDocument::from_json(&descending),
            Err(StyleError::Json(_))
        );
    }

    #[test]
    fn json_round_trip_validates() {
        let style = points_style().with_glyphs("https://example.com/{fontstack}/{range}.pbf");
        let json = style.to_json().unwrap();
        assert_eq!(StyleDocument::from_json(&json).unwrap(), style);

        let broken = json.replace("\"source\": \"points\"", "\"source\": \"renamed\"");
        assert_matches!(
            StyleDocument::from_json(&broken),
            Err(StyleError::UnknownSource { .. })
        );

        let old = json.replace("\"version\": 8", "\"version\": 7");
        assert_matches!(
            StyleDocument::from_json(&old),
            Err(StyleError::UnsupportedVersion(7))
        );
    }
}
