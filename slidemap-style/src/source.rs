use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StyleError;

/// A named data provider referenced by layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Source {
    /// Raster tile service.
    Raster(TileService),
    /// Mapbox vector tile service. A single source can contain several sub-layers.
    Vector(TileService),
    /// Raster elevation tiles used for terrain.
    RasterDem(TerrainSource),
    /// GeoJSON data, either inline or fetched from a URL.
    Geojson(GeoJsonSource),
}

impl Source {
    /// Raster tile source for a single `{z}/{y}/{x}` URL template.
    pub fn raster(url_template: impl Into<String>, tile_size: u32, max_zoom: u8) -> Self {
        Self::Raster(TileService {
            tiles: vec![url_template.into()],
            tile_size: Some(tile_size),
            max_zoom: Some(max_zoom),
            min_zoom: None,
        })
    }

    /// Vector tile source for a single URL template.
    pub fn vector(url_template: impl Into<String>) -> Self {
        Self::Vector(TileService {
            tiles: vec![url_template.into()],
            tile_size: None,
            max_zoom: None,
            min_zoom: None,
        })
    }

    /// Terrain source described by a TileJSON document at `url`.
    pub fn raster_dem(url: impl Into<String>, tile_size: u32) -> Self {
        Self::RasterDem(TerrainSource {
            url: url.into(),
            tile_size: Some(tile_size),
        })
    }

    /// GeoJSON source fetched from `url`.
    pub fn geojson_url(url: impl Into<String>) -> Self {
        Self::Geojson(GeoJsonSource {
            data: GeoJsonData::Url(url.into()),
        })
    }

    /// Checks connection parameters of the source.
    pub fn validate(&self, name: &str) -> Result<(), StyleError> {
        match self {
            Self::Raster(service) | Self::Vector(service) => service.validate(name),
            Self::RasterDem(terrain) => {
                if terrain.url.is_empty() {
                    return Err(StyleError::InvalidSource(
                        name.to_string(),
                        "terrain url is empty".into(),
                    ));
                }
                validate_tile_size(name, terrain.tile_size)
            }
            Self::Geojson(GeoJsonSource {
                data: GeoJsonData::Url(url),
            }) if url.is_empty() => Err(StyleError::InvalidSource(
                name.to_string(),
                "geojson data url is empty".into(),
            )),
            Self::Geojson(_) => Ok(()),
        }
    }
}

/// Connection parameters of a tile service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileService {
    /// URL templates with `{z}`, `{x}` and `{y}` placeholders.
    pub tiles: Vec<String>,
    /// Tile size in pixels.
    #[serde(rename = "tileSize", default, skip_serializing_if = "Option::is_none")]
    pub tile_size: Option<u32>,
    /// Maximum zoom level the service provides tiles for.
    #[serde(rename = "maxzoom", default, skip_serializing_if = "Option::is_none")]
    pub max_zoom: Option<u8>,
    /// Minimum zoom level the service provides tiles for.
    #[serde(rename = "minzoom", default, skip_serializing_if = "Option::is_none")]
    pub min_zoom: Option<u8>,
}

impl TileService {
    fn validate(&self, name: &str) -> Result<(), StyleError> {
        if self.tiles.is_empty() {
            return Err(StyleError::InvalidSource(
                name.to_string(),
                "no tile url templates".into(),
            ));
        }

        if let Some(template) = self
            .tiles
            .iter()
            .find(|template| !is_tile_template(template))
        {
            return Err(StyleError::InvalidTileUrl(template.clone()));
        }

        if let (Some(min), Some(max)) = (self.min_zoom, self.max_zoom) {
            if min > max {
                return Err(StyleError::InvalidSource(
                    name.to_string(),
                    format!("minzoom {min} is greater than maxzoom {max}"),
                ));
            }
        }

        validate_tile_size(name, self.tile_size)
    }
}

fn is_tile_template(template: &str) -> bool {
    ["{z}", "{x}", "{y}"]
        .iter()
        .all(|placeholder| template.contains(placeholder))
}

fn validate_tile_size(name: &str, tile_size: Option<u32>) -> Result<(), StyleError> {
    match tile_size {
        Some(size) if size == 0 || !size.is_power_of_two() => Err(StyleError::InvalidSource(
            name.to_string(),
            format!("tile size {size} is not a power of two"),
        )),
        _ => Ok(()),
    }
}

/// Raster DEM source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainSource {
    /// URL of the TileJSON document that references the elevation tiles.
    pub url: String,
    /// Tile size in pixels.
    #[serde(rename = "tileSize", default, skip_serializing_if = "Option::is_none")]
    pub tile_size: Option<u32>,
}

/// GeoJSON source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoJsonSource {
    /// Data reference.
    pub data: GeoJsonData,
}

/// Data of a GeoJSON source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeoJsonData {
    /// URL the engine fetches the document from.
    Url(String),
    /// Inline GeoJSON object.
    Inline(Value),
}
