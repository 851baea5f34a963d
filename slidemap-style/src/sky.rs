use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::expression::PropertyValue;

/// Atmospheric sky and fog rendered above the horizon when the map is pitched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Sky {
    /// Base color of the sky.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sky_color: Option<Color>,
    /// Blend between sky color and horizon color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sky_horizon_blend: Option<PropertyValue>,
    /// Color at the horizon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizon_color: Option<Color>,
    /// Blend between horizon color and fog color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizon_fog_blend: Option<PropertyValue>,
    /// Color of the fog over the ground.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fog_color: Option<Color>,
    /// How far the fog extends over the ground.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fog_ground_blend: Option<PropertyValue>,
    /// Strength of the atmosphere effect. `1` is fully atmospheric, `0` disables it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atmosphere_blend: Option<PropertyValue>,
}
