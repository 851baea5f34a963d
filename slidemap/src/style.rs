//! Style of the landslide hazard map.
//!
//! [`base_style`] is the document the map is created with: hillshade and imagery from KyFromAbove, NHD
//! hydrography and a mask over everything outside Kentucky. Landslide markers and county outlines are added in
//! [`hazard_layers`] once the map is loaded.

use serde_json::json;
use slidemap_style::{
    Color, Filter, Interpolate, Layer, LayerKind, PropertyValue, Sky, Source, StyleDocument,
    StyleError, ZoomFunction,
};

use crate::config::{DataFiles, MapConfig};

/// Sprite sheet for icons.
pub const SPRITE_URL: &str = "https://nyc3.digitaloceanspaces.com/astoria/tiles/sprite/sprite";
/// SDF glyphs for labels.
pub const GLYPHS_URL: &str =
    "https://nyc3.digitaloceanspaces.com/astoria/tiles/fonts/{fontstack}/{range}.pbf";

const HILLSHADE_TILES: &str = "https://kygisserver.ky.gov/arcgis/rest/services/WGS84WM_Services/Ky_MultiDirectional_Hillshade_WGS84WM/MapServer/tile/{z}/{y}/{x}";
const AERIAL_TILES: &str = "https://kygisserver.ky.gov/arcgis/rest/services/WGS84WM_Services/Ky_Imagery_Phase3_3IN_WGS84WM/MapServer/tile/{z}/{y}/{x}";
const HYDRO_TILES: &str = "https://vectortileservices.arcgis.com/vQ8kO5zdqETeirEL/arcgis/rest/services/NHDHydro_WM/VectorTileServer/tile/{z}/{y}/{x}.pbf";
const MASK_TILES: &str = "https://vectortileservices.arcgis.com/vQ8kO5zdqETeirEL/arcgis/rest/services/ky_mask/VectorTileServer/tile/{z}/{y}/{x}.pbf";

/// Raster DEM source used for terrain.
pub const TERRAIN_SOURCE: &str = "terrainSource";
/// NHD hydrography vector tiles.
pub const HYDRO_SOURCE: &str = "NHDHydro_WM";
/// GeoJSON source with landslide points.
pub const HAZARD_SOURCE: &str = "landslides";
/// GeoJSON source with county polygons.
pub const BOUNDARY_SOURCE: &str = "counties";

/// Circle layer with landslide markers.
pub const HAZARD_LAYER: &str = "landslides";
/// County outlines, drawn under the markers.
pub const BOUNDARY_LAYER: &str = "counties-outline";
/// Landslide id labels.
pub const LABEL_LAYER: &str = "landslides-labels";
/// NHD flowlines.
pub const FLOWLINE_LAYER: &str = "NHDFlowline";

const HYDRO_LINE: Color = Color::from_hex("#43BCFDFF");
const HYDRO_FILL: Color = Color::from_hex("#60C7FFFF");

/// Initial style the map is created with.
pub fn base_style(config: &MapConfig) -> Result<StyleDocument, StyleError> {
    let mut style = StyleDocument::new()
        .with_sprite(SPRITE_URL)
        .with_glyphs(GLYPHS_URL);

    style.add_source("hillshade", Source::raster(HILLSHADE_TILES, 256, 20))?;
    style.add_source("aerial", Source::raster(AERIAL_TILES, 256, 21))?;
    style.add_source(HYDRO_SOURCE, Source::vector(HYDRO_TILES))?;
    style.add_source("ky_mask", Source::vector(MASK_TILES))?;
    style.add_source(
        TERRAIN_SOURCE,
        Source::raster_dem(config.data.terrain.as_str(), 256),
    )?;

    for layer in base_layers(config.aerial_imagery)? {
        style.add_layer(layer, None)?;
    }

    Ok(style)
}

fn base_layers(aerial_imagery: bool) -> Result<Vec<Layer>, StyleError> {
    Ok(vec![
        Layer::new("background", LayerKind::Background)
            .with_paint(
                "background-color",
                Color::rgba(195, 175, 165, 255),
            )
            .with_paint("background-opacity", 1.0),
        Layer::new("hillshade", LayerKind::Raster)
            .with_source("hillshade")
            .with_visibility(true)
            .with_paint("raster-brightness-min", 0.5)
            .with_paint("raster-opacity", 0.75),
        Layer::new("aerial", LayerKind::Raster)
            .with_source("aerial")
            .with_visibility(aerial_imagery)
            .with_paint("raster-brightness-min", 0.3)
            .with_paint("raster-saturation", 0.5)
            .with_paint("raster-hue-rotate", 20.0)
            .with_paint("raster-opacity", 0.3),
        Layer::new(FLOWLINE_LAYER, LayerKind::Line)
            .with_source(HYDRO_SOURCE)
            .with_source_layer("NHDFlowline")
            .with_min_zoom(9.0)
            .with_layout("line-cap", "round")
            .with_layout("line-join", "round")
            // invisible at 9, fully opaque from 17
            .with_paint(
                "line-opacity",
                ZoomFunction::linear([(9.0, 0.0), (12.0, 0.25), (14.0, 0.5), (17.0, 1.0)])?,
            )
            .with_paint("line-color", HYDRO_LINE)
            .with_paint("line-width", 1.33333),
        // `_symbol` 8 is how the hydrography service encodes inundation areas
        Layer::new("NHDArea/Inundation Area", LayerKind::Fill)
            .with_source(HYDRO_SOURCE)
            .with_source_layer("NHDArea")
            .with_filter(Filter::Eq("_symbol".into(), json!(8)))
            .with_paint("fill-opacity", 0.4)
            .with_paint("fill-color", Color::from_hex("#A2DBF9FF")),
        Layer::new("NHDArea", LayerKind::Fill)
            .with_source(HYDRO_SOURCE)
            .with_source_layer("NHDArea")
            .with_filter(Filter::Ne("_symbol".into(), json!(8)))
            .with_paint("fill-color", HYDRO_FILL)
            .with_paint("fill-outline-color", HYDRO_LINE),
        Layer::new("NHDWaterbody", LayerKind::Fill)
            .with_source(HYDRO_SOURCE)
            .with_source_layer("NHDWaterbody")
            .with_paint("fill-color", HYDRO_FILL)
            .with_paint("fill-outline-color", HYDRO_LINE),
        Layer::new("ky_mask_polygons", LayerKind::Fill)
            .with_source("ky_mask")
            .with_source_layer("ky_mask_polygons")
            .with_visibility(true)
            .with_paint(
                "fill-opacity",
                ZoomFunction::linear([(7.0, 1.0), (10.0, 0.75)])?,
            )
            .with_paint("fill-color", Color::from_hex("#e3e3e3")),
    ])
}

/// Atmosphere over the horizon. Fully atmospheric up to zoom 10, gone from zoom 12.
pub fn sky() -> Result<Sky, StyleError> {
    Ok(Sky {
        sky_color: Some(Color::from_hex("#61C2FEFF")),
        sky_horizon_blend: Some(PropertyValue::number(0.5)),
        horizon_color: Some(Color::from_hex("#EBF1F4FF")),
        horizon_fog_blend: Some(PropertyValue::number(0.5)),
        fog_color: Some(Color::from_hex("#B5B5B5FF")),
        fog_ground_blend: Some(PropertyValue::number(0.5)),
        atmosphere_blend: Some(
            Interpolate::linear([(0.0, 1.0), (10.0, 1.0), (12.0, 0.0)])?.into(),
        ),
    })
}

/// GeoJSON sources registered once the map is loaded.
pub fn hazard_sources(data: &DataFiles) -> Vec<(&'static str, Source)> {
    vec![
        (HAZARD_SOURCE, Source::geojson_url(data.landslides.as_str())),
        (BOUNDARY_SOURCE, Source::geojson_url(data.counties.as_str())),
    ]
}

/// Layers added once the map is loaded, each with the layer it must be inserted before.
pub fn hazard_layers(config: &MapConfig) -> Result<Vec<(Layer, Option<&'static str>)>, StyleError> {
    let markers = Layer::new(HAZARD_LAYER, LayerKind::Circle)
        .with_source(HAZARD_SOURCE)
        .with_paint("circle-radius", 6.0)
        .with_paint("circle-color", Color::from_hex("#CD0101FF"))
        .with_paint("circle-stroke-color", Color::WHITE)
        .with_paint("circle-stroke-width", 1.0)
        .with_paint("circle-opacity", 0.75);

    let outlines = Layer::new(BOUNDARY_LAYER, LayerKind::Line)
        .with_source(BOUNDARY_SOURCE)
        .with_layout("line-cap", "round")
        .with_layout("line-join", "round")
        .with_paint("line-color", Color::from_hex("#53555c"))
        .with_paint("line-opacity", 0.9)
        .with_paint(
            "line-width",
            Interpolate::linear([
                (5.0, 0.6),
                (8.0, 1.2),
                (10.0, 1.8),
                (12.0, 2.4),
                (14.0, 3.0),
            ])?,
        );

    let mut layers = vec![(markers, None), (outlines, Some(HAZARD_LAYER))];
    if config.labels {
        layers.push((label_layer()?, None));
    }

    Ok(layers)
}

fn label_layer() -> Result<Layer, StyleError> {
    Ok(Layer::new(LABEL_LAYER, LayerKind::Symbol)
        .with_source(HAZARD_SOURCE)
        .with_layout("text-field", PropertyValue::Constant(json!(["get", "ID"])))
        .with_layout("text-font", PropertyValue::Constant(json!(["Open Sans Bold"])))
        .with_layout("text-size", 12.0)
        .with_layout("text-offset", PropertyValue::Constant(json!([0, 1.2])))
        .with_layout("text-anchor", "top")
        .with_paint("text-color", Color::BLACK)
        .with_paint("text-halo-color", Color::WHITE)
        .with_paint("text-halo-width", 1.0)
        .with_paint("text-halo-blur", 1.0)
        // labels pop in at zoom 17
        .with_paint(
            "text-opacity",
            ZoomFunction::linear([(17.0, 0.0), (17.1, 1.0)])?,
        ))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn number(layer: &Layer, property: &str, zoom: f64) -> f64 {
        layer
            .paint(property)
            .and_then(|value| value.evaluate_number(zoom))
            .unwrap()
    }

    #[test]
    fn base_style_is_valid() {
        let style = base_style(&MapConfig::default()).unwrap();
        assert!(style.validate().is_ok());
        assert_eq!(style.sources().count(), 5);
        assert_eq!(
            style.layer_ids().collect::<Vec<_>>(),
            [
                "background",
                "hillshade",
                "aerial",
                "NHDFlowline",
                "NHDArea/Inundation Area",
                "NHDArea",
                "NHDWaterbody",
                "ky_mask_polygons",
            ]
        );
    }

    #[test]
    fn flowline_opacity_fades_in() {
        let style = base_style(&MapConfig::default()).unwrap();
        let flowlines = style.layer(FLOWLINE_LAYER).unwrap();

        assert_relative_eq!(number(flowlines, "line-opacity", 9.0), 0.0);
        assert_relative_eq!(number(flowlines, "line-opacity", 12.0), 0.25);
        assert_relative_eq!(number(flowlines, "line-opacity", 14.0), 0.5);
        assert_relative_eq!(number(flowlines, "line-opacity", 17.0), 1.0);
        assert_relative_eq!(number(flowlines, "line-opacity", 20.0), 1.0);
        assert!(!flowlines.is_visible_at(8.0));
    }

    #[test]
    fn aerial_imagery_flag() {
        let style = base_style(&MapConfig::default()).unwrap();
        assert!(!style.layer("aerial").unwrap().is_visible());

        let config = MapConfig {
            aerial_imagery: true,
            ..MapConfig::default()
        };
        let style = base_style(&config).unwrap();
        assert!(style.layer("aerial").unwrap().is_visible());
    }

    #[test]
    fn atmosphere_blend_by_zoom() {
        let blend = sky().unwrap().atmosphere_blend.unwrap();
        assert_relative_eq!(blend.evaluate_number(5.0).unwrap(), 1.0);
        assert_relative_eq!(blend.evaluate_number(10.0).unwrap(), 1.0);
        assert_relative_eq!(blend.evaluate_number(11.0).unwrap(), 0.5);
        assert_relative_eq!(blend.evaluate_number(12.0).unwrap(), 0.0);
        assert_relative_eq!(blend.evaluate_number(16.0).unwrap(), 0.0);
    }

    #[test]
    fn county_outline_width() {
        let layers = hazard_layers(&MapConfig::default()).unwrap();
        let (outlines, before) = &layers[1];

        assert_eq!(outlines.id, BOUNDARY_LAYER);
        assert_eq!(*before, Some(HAZARD_LAYER));
        assert_relative_eq!(number(outlines, "line-width", 4.0), 0.6);
        assert_relative_eq!(number(outlines, "line-width", 9.0), 1.5);
        assert_relative_eq!(number(outlines, "line-width", 14.0), 3.0);
    }

    #[test]
    fn labels_are_optional() {
        let without = hazard_layers(&MapConfig::default()).unwrap();
        assert!(without.iter().all(|(layer, _)| layer.id != LABEL_LAYER));

        let config = MapConfig {
            labels: true,
            ..MapConfig::default()
        };
        let with = hazard_layers(&config).unwrap();
        assert_eq!(with.last().map(|(layer, _)| layer.id.as_str()), Some(LABEL_LAYER));
    }
}
