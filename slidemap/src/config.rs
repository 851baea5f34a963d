//! Map configuration: initial camera, data file locations and feature flags.

use serde::{Deserialize, Serialize};

use crate::error::SlidemapError;

/// Maximum pitch supported by the engine, in degrees.
pub const MAX_PITCH: f64 = 85.0;
/// Maximum zoom level supported by the engine.
pub const MAX_ZOOM: f64 = 24.0;

/// Geographic coordinate. Written as `[lng, lat]` the same way GeoJSON positions are.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    /// Longitude in degrees.
    pub lng: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

impl LngLat {
    /// Creates a new coordinate.
    pub const fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// Whether the coordinate lies within the valid longitude and latitude ranges.
    pub fn is_valid(&self) -> bool {
        (-180.0..=180.0).contains(&self.lng) && (-90.0..=90.0).contains(&self.lat)
    }
}

impl From<[f64; 2]> for LngLat {
    fn from([lng, lat]: [f64; 2]) -> Self {
        Self { lng, lat }
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(value: LngLat) -> Self {
        [value.lng, value.lat]
    }
}

/// Initial camera of the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraOptions {
    /// Center of the map.
    pub center: LngLat,
    /// Zoom level.
    pub zoom: f64,
    /// Maximum pitch the user can tilt the map to, in degrees.
    pub max_pitch: f64,
    /// Keep the camera position in sync with the URL hash.
    pub hash: bool,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            center: LngLat::new(-82.7673, 37.5716),
            zoom: 9.0,
            max_pitch: MAX_PITCH,
            hash: true,
        }
    }
}

/// Locations of the static documents the engine loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataFiles {
    /// GeoJSON with landslide points.
    pub landslides: String,
    /// GeoJSON with county polygons.
    pub counties: String,
    /// TileJSON descriptor of the elevation tiles.
    pub terrain: String,
}

impl Default for DataFiles {
    fn default() -> Self {
        Self {
            landslides: "/assets/data/d12_KGS_landslides.geojson".into(),
            counties: "/assets/data/kytc-d12-counties.geojson".into(),
            terrain: "terrain.json".into(),
        }
    }
}

/// Full configuration of a hazard map.
///
/// Written in JSON with camelCase keys. Missing fields take the [`MapConfig::district_12`] values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MapConfig {
    /// Id of the DOM element the map is rendered into.
    pub container: String,
    /// Initial camera.
    pub camera: CameraOptions,
    /// Static data documents.
    pub data: DataFiles,
    /// Log camera position on every move and zoom level after zooming.
    pub debug_logging: bool,
    /// Draw landslide ids next to the markers.
    pub labels: bool,
    /// Show aerial imagery over the hillshade.
    pub aerial_imagery: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::district_12()
    }
}

impl MapConfig {
    /// KYTC district 12 landslide map.
    pub fn district_12() -> Self {
        Self {
            container: "map".into(),
            camera: CameraOptions::default(),
            data: DataFiles::default(),
            debug_logging: true,
            labels: false,
            aerial_imagery: false,
        }
    }

    /// Reads the configuration from JSON. Missing fields take default values.
    pub fn from_json(json: &str) -> Result<Self, SlidemapError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the camera and data references are usable.
    pub fn validate(&self) -> Result<(), SlidemapError> {
        if self.container.is_empty() {
            return Err(SlidemapError::Config("container id is empty".into()));
        }

        let camera = &self.camera;
        if !camera.center.is_valid() {
            return Err(SlidemapError::Config(format!(
                "center {:?} is out of range",
                camera.center
            )));
        }

        if !(0.0..=MAX_ZOOM).contains(&camera.zoom) {
            return Err(SlidemapError::Config(format!(
                "zoom {} is out of range 0..={MAX_ZOOM}",
                camera.zoom
            )));
        }

        if !(0.0..=MAX_PITCH).contains(&camera.max_pitch) {
            return Err(SlidemapError::Config(format!(
                "max pitch {} is out of range 0..={MAX_PITCH}",
                camera.max_pitch
            )));
        }

        for (name, path) in [
            ("landslides", &self.data.landslides),
            ("counties", &self.data.counties),
            ("terrain", &self.data.terrain),
        ] {
            if path.is_empty() {
                return Err(SlidemapError::Config(format!("{name} data path is empty")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn defaults_are_district_12() {
        let config = MapConfig::default();
        assert_eq!(config.container, "map");
        assert_eq!(config.camera.center, LngLat::new(-82.7673, 37.5716));
        assert_eq!(config.camera.zoom, 9.0);
        assert_eq!(config.camera.max_pitch, 85.0);
        assert!(config.camera.hash);
        assert!(!config.labels);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json() {
        let config = MapConfig::from_json(
            r#"{
                "camera": {"center": [-83.1, 37.2], "zoom": 11, "maxPitch": 60, "hash": false},
                "labels": true,
                "debugLogging": false,
                "aerialImagery": true
            }"#,
        )
        .unwrap();

        assert_eq!(config.camera.center, LngLat::new(-83.1, 37.2));
        assert_eq!(config.camera.max_pitch, 60.0);
        assert!(config.labels);
        assert!(!config.debug_logging);
        assert!(config.aerial_imagery);
        assert_eq!(config.data, DataFiles::default());
    }

    #[test]
    fn partial_camera_json() {
        let config = MapConfig::from_json(r#"{"camera": {"zoom": 11}}"#).unwrap();
        assert_eq!(config.camera.zoom, 11.0);
        assert_eq!(config.camera.center, CameraOptions::default().center);
        assert!(config.camera.hash);

        let json = serde_json::to_value(MapConfig::default()).unwrap();
        assert_eq!(json["debugLogging"], true);
        assert_eq!(json["aerialImagery"], false);
        assert_eq!(json["camera"]["maxPitch"], 85.0);
        assert!(json.get("debug_logging").is_none());
    }

    #[test]
    fn invalid_values() {
        let mut config = MapConfig::default();
        config.camera.max_pitch = 90.0;
        assert_matches!(config.validate(), Err(SlidemapError::Config(_)));

        let mut config = MapConfig::default();
        config.camera.center = LngLat::new(37.5, -182.7);
        assert_matches!(config.validate(), Err(SlidemapError::Config(_)));

        let mut config = MapConfig::default();
        config.data.counties.clear();
        assert_matches!(config.validate(), Err(SlidemapError::Config(_)));

        assert_matches!(
            MapConfig::from_json("{\"camera\": 5}"),
            Err(SlidemapError::ConfigFormat(_))
        );
    }
}
