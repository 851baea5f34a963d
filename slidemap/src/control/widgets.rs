use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Corner of the map a control is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControlPosition {
    /// Top left corner.
    TopLeft,
    /// Top right corner. This is where the engine puts controls by default.
    TopRight,
    /// Bottom left corner.
    BottomLeft,
    /// Bottom right corner.
    BottomRight,
}

impl ControlPosition {
    /// Name of the position in the engine API.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
        }
    }
}

/// Units of a scale bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleUnit {
    /// Feet and miles.
    Imperial,
    /// Meters and kilometers.
    Metric,
    /// Nautical miles.
    Nautical,
}

/// Widget drawn by the engine on top of the map.
#[derive(Debug, Clone, PartialEq)]
pub enum Control {
    /// Zoom buttons and compass.
    Navigation,
    /// Fullscreen toggle.
    Fullscreen,
    /// Scale bar.
    Scale {
        /// Maximum length of the bar in pixels.
        max_width: u32,
        /// Distance units.
        unit: ScaleUnit,
    },
    /// Button that centers the map on the user's location.
    Geolocate {
        /// Request a GPS-grade position.
        high_accuracy: bool,
        /// Keep following the user after the first fix.
        track_user_location: bool,
        /// Show the direction the device points to.
        show_user_heading: bool,
    },
    /// 3D terrain toggle.
    Terrain {
        /// Raster DEM source the terrain is built from.
        source: String,
        /// Vertical exaggeration factor.
        exaggeration: f64,
    },
}

/// Kind of a [`Control`]. A map has at most one control of every kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    /// [`Control::Navigation`]
    Navigation,
    /// [`Control::Fullscreen`]
    Fullscreen,
    /// [`Control::Scale`]
    Scale,
    /// [`Control::Geolocate`]
    Geolocate,
    /// [`Control::Terrain`]
    Terrain,
}

impl Control {
    /// Kind of the control.
    pub fn kind(&self) -> ControlKind {
        match self {
            Self::Navigation => ControlKind::Navigation,
            Self::Fullscreen => ControlKind::Fullscreen,
            Self::Scale { .. } => ControlKind::Scale,
            Self::Geolocate { .. } => ControlKind::Geolocate,
            Self::Terrain { .. } => ControlKind::Terrain,
        }
    }

    /// Constructor options of the control in the engine API.
    pub fn options(&self) -> Value {
        match self {
            Self::Navigation | Self::Fullscreen => json!({}),
            Self::Scale { max_width, unit } => json!({
                "maxWidth": max_width,
                "unit": unit,
            }),
            Self::Geolocate {
                high_accuracy,
                track_user_location,
                show_user_heading,
            } => json!({
                "positionOptions": {"enableHighAccuracy": high_accuracy},
                "trackUserLocation": track_user_location,
                "showUserHeading": show_user_heading,
            }),
            Self::Terrain {
                source,
                exaggeration,
            } => json!({
                "source": source,
                "exaggeration": exaggeration,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_options() {
        let scale = Control::Scale {
            max_width: 80,
            unit: ScaleUnit::Imperial,
        };
        assert_eq!(scale.options(), json!({"maxWidth": 80, "unit": "imperial"}));

        let geolocate = Control::Geolocate {
            high_accuracy: true,
            track_user_location: true,
            show_user_heading: true,
        };
        assert_eq!(
            geolocate.options(),
            json!({
                "positionOptions": {"enableHighAccuracy": true},
                "trackUserLocation": true,
                "showUserHeading": true,
            })
        );

        let terrain = Control::Terrain {
            source: "terrainSource".into(),
            exaggeration: 2.0,
        };
        assert_eq!(terrain.kind(), ControlKind::Terrain);
        assert_eq!(
            terrain.options(),
            json!({"source": "terrainSource", "exaggeration": 2.0})
        );
    }
}
