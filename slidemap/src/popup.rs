//! Landslide information popups.

use std::borrow::Cow;

use geojson::{Feature, JsonObject};
use serde_json::Value;

use crate::config::LngLat;
use crate::control::ClickEvent;

/// Text shown in place of missing feature data.
pub const UNKNOWN: &str = "Unknown";

/// Popup anchored at a map coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    /// Anchor of the popup.
    pub lng_lat: LngLat,
    /// HTML content.
    pub html: String,
}

/// Text representation of a feature property.
///
/// Missing properties, `null` and empty strings become [`UNKNOWN`]. Strings are returned as they are, other
/// values are printed as JSON.
pub fn display_value(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(UNKNOWN),
        Some(Value::String(s)) if s.is_empty() => Cow::Borrowed(UNKNOWN),
        Some(Value::String(s)) => Cow::Borrowed(s),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

/// Fields of a KGS landslide record shown in the popup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LandslideReport {
    /// KGS landslide id.
    pub id: String,
    /// County name.
    pub county: String,
    /// Geologic unit (formation) the landslide occurred in.
    pub geologic_unit: String,
    /// Bedrock lithology.
    pub lithology: String,
    /// Surficial geology.
    pub surficial_geology: String,
    /// Position on the slope.
    pub geomorphic_position: String,
    /// Direction the slope faces.
    pub aspect: String,
    /// What triggered or contributed to the slide.
    pub contributing_factor: String,
}

impl LandslideReport {
    /// Collects the report fields from the feature properties.
    pub fn from_properties(properties: Option<&JsonObject>) -> Self {
        let field = |name: &str| {
            display_value(properties.and_then(|properties| properties.get(name))).into_owned()
        };

        Self {
            id: field("ID"),
            county: field("County"),
            geologic_unit: field("GeologicUnit"),
            lithology: field("Lithology"),
            surficial_geology: field("Surficial_Geology"),
            geomorphic_position: field("Geomorphic_Position"),
            aspect: field("Aspect"),
            contributing_factor: field("Contributing_Factor"),
        }
    }

    /// Popup content.
    pub fn to_html(&self) -> String {
        format!(
            "<h2 class=\"text-xl\">KGS Landslide ID: {id}</h2>\
             <p>Landslide in {county} County, occurred in {unit}<br>\
             <br>Aspect: {aspect}\
             <br>Factors: {factor} <br>\
             <br>Lithology: {lithology}; {surficial} surficial geology\
             <br>Geomorphic Position: {position}</p>",
            id = escape_html(&self.id),
            county = escape_html(&self.county),
            unit = escape_html(&self.geologic_unit),
            aspect = escape_html(&self.aspect),
            factor = escape_html(&self.contributing_factor),
            lithology = escape_html(&self.lithology),
            surficial = escape_html(&self.surficial_geology),
            position = escape_html(&self.geomorphic_position),
        )
    }
}

/// Builds the popup for the topmost clicked feature. Returns `None` if no feature was clicked.
pub fn landslide_popup(click: &ClickEvent) -> Option<Popup> {
    let feature = click.features.first()?;
    let report = LandslideReport::from_properties(feature.properties.as_ref());

    Some(Popup {
        lng_lat: point_position(feature).unwrap_or(click.lng_lat),
        html: report.to_html(),
    })
}

// Point features are anchored at the point itself rather than at the pointer, so the popup tip touches the marker.
fn point_position(feature: &Feature) -> Option<LngLat> {
    match &feature.geometry.as_ref()?.value {
        geojson::Value::Point(position) => match position.as_slice() {
            [lng, lat, ..] => Some(LngLat::new(*lng, *lat)),
            _ => None,
        },
        _ => None,
    }
}

fn escape_html(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }

    Cow::Owned(escaped)
}
