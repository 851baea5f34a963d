//! Property values of style layers.
//!
//! A paint or layout property can be set to a constant, to a legacy zoom function
//! (`{"base": 1, "stops": [[9, 0], [12, 0.25]]}`) or to an interpolation expression
//! (`["interpolate", ["linear"], ["zoom"], 5, 0.6, 8, 1.2]`). Zoom-dependent values are modelled only for
//! numeric outputs, everything else is kept as an opaque JSON constant which the engine evaluates itself.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::color::Color;
use crate::error::StyleError;

/// Value of a paint or layout property.
///
/// Objects made of `base` and `stops` are read as [`ZoomFunction`]s and `interpolate` expressions over
/// `["zoom"]` as [`Interpolate`]. Invalid stops in either of them make the whole value invalid.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Legacy zoom function with stops.
    Function(ZoomFunction),
    /// `interpolate` expression over the zoom level.
    Interpolate(Interpolate),
    /// Any other value: number, string, color, array or an expression this crate doesn't evaluate.
    Constant(Value),
}

impl PropertyValue {
    /// Numeric constant.
    pub fn number(value: f64) -> Self {
        Self::Constant(json!(value))
    }

    /// String constant, e.g. `"round"` or `"visible"`.
    pub fn string(value: impl Into<String>) -> Self {
        Self::Constant(Value::String(value.into()))
    }

    /// Evaluates the value at the given zoom level. Returns `None` if the value is not numeric.
    pub fn evaluate_number(&self, zoom: f64) -> Option<f64> {
        match self {
            Self::Function(function) => Some(function.evaluate(zoom)),
            Self::Interpolate(interpolate) => Some(interpolate.evaluate(zoom)),
            Self::Constant(value) => value.as_f64(),
        }
    }

    /// Returns the constant value as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Constant(Value::String(s)) => Some(s),
            _ => None,
        }
    }
}

impl TryFrom<Value> for PropertyValue {
    type Error = StyleError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        if is_zoom_function(&value) {
            return Ok(Self::Function(serde_json::from_value(value)?));
        }

        if is_zoom_interpolation(&value) {
            return Ok(Self::Interpolate(Interpolate::try_from(value)?));
        }

        Ok(Self::Constant(value))
    }
}

impl<'de> Deserialize<'de> for PropertyValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}

fn is_zoom_function(value: &Value) -> bool {
    value.as_object().is_some_and(|object| {
        object.contains_key("stops") && object.keys().all(|key| key == "base" || key == "stops")
    })
}

fn is_zoom_interpolation(value: &Value) -> bool {
    match value.as_array().map(Vec::as_slice) {
        Some([operator, kind, input, ..]) => {
            let curve = kind.get(0).and_then(Value::as_str);
            operator.as_str() == Some("interpolate")
                && matches!(curve, Some("linear" | "exponential"))
                && *input == json!(["zoom"])
        }
        _ => false,
    }
}

impl From<Color> for PropertyValue {
    fn from(value: Color) -> Self {
        Self::Constant(Value::String(value.to_hex()))
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::number(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::string(value)
    }
}

impl From<ZoomFunction> for PropertyValue {
    fn from(value: ZoomFunction) -> Self {
        Self::Function(value)
    }
}

impl From<Interpolate> for PropertyValue {
    fn from(value: Interpolate) -> Self {
        Self::Interpolate(value)
    }
}

/// Legacy zoom function: `{"base": 1, "stops": [[zoom, value], ...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawZoomFunction")]
pub struct ZoomFunction {
    base: f64,
    stops: Vec<(f64, f64)>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawZoomFunction {
    #[serde(default = "default_base")]
    base: f64,
    stops: Vec<(f64, f64)>,
}

fn default_base() -> f64 {
    1.0
}

impl TryFrom<RawZoomFunction> for ZoomFunction {
    type Error = StyleError;

    fn try_from(value: RawZoomFunction) -> Result<Self, Self::Error> {
        Self::new(value.base, value.stops)
    }
}

impl ZoomFunction {
    /// Creates a zoom function with the given exponential base.
    ///
    /// Returns an error if `stops` is empty or zoom levels are not ascending.
    pub fn new(base: f64, stops: Vec<(f64, f64)>) -> Result<Self, StyleError> {
        validate_stops("zoom function", &stops)?;
        Ok(Self { base, stops })
    }

    /// Creates a linear zoom function.
    pub fn linear(stops: impl Into<Vec<(f64, f64)>>) -> Result<Self, StyleError> {
        Self::new(1.0, stops.into())
    }

    /// Exponential base of the interpolation curve. `1` means linear interpolation.
    pub fn base(&self) -> f64 {
        self.base
    }

    /// `(zoom, value)` stops, ordered by zoom.
    pub fn stops(&self) -> &[(f64, f64)] {
        &self.stops
    }

    /// Value of the function at the given zoom.
    pub fn evaluate(&self, zoom: f64) -> f64 {
        interpolate_stops(&self.stops, self.base, zoom)
    }
}

/// Interpolation curve of an [`Interpolate`] expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InterpolationKind {
    /// `["linear"]`
    Linear,
    /// `["exponential", base]`
    Exponential(f64),
}

impl InterpolationKind {
    fn base(&self) -> f64 {
        match self {
            Self::Linear => 1.0,
            Self::Exponential(base) => *base,
        }
    }
}

/// `["interpolate", <kind>, ["zoom"], z0, v0, z1, v1, ...]` expression with numeric outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Interpolate {
    kind: InterpolationKind,
    stops: Vec<(f64, f64)>,
}

impl Interpolate {
    /// Creates a linear interpolation over zoom.
    ///
    /// Returns an error if `stops` is empty or zoom levels are not ascending.
    pub fn linear(stops: impl Into<Vec<(f64, f64)>>) -> Result<Self, StyleError> {
        Self::new(InterpolationKind::Linear, stops.into())
    }

    /// Creates an interpolation over zoom with the given curve.
    pub fn new(kind: InterpolationKind, stops: Vec<(f64, f64)>) -> Result<Self, StyleError> {
        validate_stops("interpolate", &stops)?;
        Ok(Self { kind, stops })
    }

    /// Interpolation curve.
    pub fn kind(&self) -> InterpolationKind {
        self.kind
    }

    /// `(zoom, value)` stops.
    pub fn stops(&self) -> &[(f64, f64)] {
        &self.stops
    }

    /// Value of the expression at the given zoom.
    pub fn evaluate(&self, zoom: f64) -> f64 {
        interpolate_stops(&self.stops, self.kind.base(), zoom)
    }
}

impl TryFrom<Value> for Interpolate {
    type Error = StyleError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let invalid = |reason: &str| StyleError::InvalidExpression(format!("{reason}: {value}"));

        let Some(items) = value.as_array() else {
            return Err(invalid("expected an array"));
        };

        let [operator, kind, input, rest @ ..] = items.as_slice() else {
            return Err(invalid("expected interpolate expression"));
        };

        if operator.as_str() != Some("interpolate") {
            return Err(invalid("expected interpolate operator"));
        }

        let kind = match kind.as_array().map(Vec::as_slice) {
            Some([name]) if name.as_str() == Some("linear") => InterpolationKind::Linear,
            Some([name, base]) if name.as_str() == Some("exponential") => {
                InterpolationKind::Exponential(
                    base.as_f64().ok_or_else(|| invalid("exponential base must be a number"))?,
                )
            }
            _ => return Err(invalid("unsupported interpolation type")),
        };

        match input.as_array().map(Vec::as_slice) {
            Some([name]) if name.as_str() == Some("zoom") => {}
            _ => return Err(invalid("only zoom input is supported")),
        }

        if rest.len() % 2 != 0 {
            return Err(invalid("stops must come in pairs"));
        }

        let stops = rest
            .chunks(2)
            .map(|pair| match (pair[0].as_f64(), pair[1].as_f64()) {
                (Some(zoom), Some(output)) => Ok((zoom, output)),
                _ => Err(invalid("stops must be numeric")),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(kind, stops)
    }
}

impl From<Interpolate> for Value {
    fn from(value: Interpolate) -> Self {
        let kind = match value.kind {
            InterpolationKind::Linear => json!(["linear"]),
            InterpolationKind::Exponential(base) => json!(["exponential", base]),
        };

        let mut items = vec![json!("interpolate"), kind, json!(["zoom"])];
        for (zoom, output) in value.stops {
            items.push(json!(zoom));
            items.push(json!(output));
        }

        Value::Array(items)
    }
}

fn validate_stops(name: &str, stops: &[(f64, f64)]) -> Result<(), StyleError> {
    if stops.is_empty() {
        return Err(StyleError::InvalidExpression(format!(
            "{name} requires at least one stop"
        )));
    }

    if stops.windows(2).any(|pair| pair[0].0 >= pair[1].0) {
        return Err(StyleError::InvalidExpression(format!(
            "{name} stops must be in strictly ascending order"
        )));
    }

    Ok(())
}

/// Interpolates between stops. Values outside of the stop range are clamped to the first/last output.
fn interpolate_stops(stops: &[(f64, f64)], base: f64, zoom: f64) -> f64 {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return 0.0;
    };

    if zoom <= first.0 {
        return first.1;
    }
    if zoom >= last.0 {
        return last.1;
    }

    let upper = stops.partition_point(|(stop_zoom, _)| *stop_zoom <= zoom);
    let (z0, v0) = stops[upper - 1];
    let (z1, v1) = stops[upper];

    v0 + (v1 - v0) * interpolation_factor(base, zoom - z0, z1 - z0)
}

fn interpolation_factor(base: f64, progress: f64, range: f64) -> f64 {
    if range == 0.0 {
        return 0.0;
    }

    if (base - 1.0).abs() < f64::EPSILON {
        progress / range
    } else {
        (base.powf(progress) - 1.0) / (base.powf(range) - 1.0)
    }
}
