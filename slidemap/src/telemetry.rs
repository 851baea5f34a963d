//! Diagnostic logging of the camera position.

use crate::config::LngLat;
use crate::control::{EventPropagation, MapEvent};
use crate::engine::MapEngine;

/// Formats the camera center with 4 decimal places: `Longitude: -82.7673 Latitude: 37.5716`.
///
/// Halfway values are rounded away from zero.
pub fn format_center(center: LngLat) -> String {
    format!(
        "Longitude: {:.4} Latitude: {:.4}",
        round_to(center.lng, 4),
        round_to(center.lat, 4)
    )
}

/// Formats the zoom level with 2 decimal places: `Zoom: 9.00`.
pub fn format_zoom(zoom: f64) -> String {
    format!("Zoom: {:.2}", round_to(zoom, 2))
}

// `{:.N}` rounds exact ties to even, `f64::round` rounds them away from zero.
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

pub(crate) fn log_center(_event: &MapEvent, engine: &mut dyn MapEngine) -> EventPropagation {
    log::debug!("{}", format_center(engine.center()));
    EventPropagation::Propagate
}

pub(crate) fn log_zoom(_event: &MapEvent, engine: &mut dyn MapEngine) -> EventPropagation {
    log::debug!("{}", format_zoom(engine.zoom()));
    EventPropagation::Propagate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_has_four_decimals() {
        assert_eq!(
            format_center(LngLat::new(-82.76731, 37.57159)),
            "Longitude: -82.7673 Latitude: 37.5716"
        );
        assert_eq!(
            format_center(LngLat::new(-83.00005001, 37.0)),
            "Longitude: -83.0001 Latitude: 37.0000"
        );
    }

    #[test]
    fn center_ties_round_away_from_zero() {
        assert_eq!(
            format_center(LngLat::new(-82.03125, 37.03125)),
            "Longitude: -82.0313 Latitude: 37.0313"
        );
        assert_eq!(
            format_center(LngLat::new(-82.90625, 37.59375)),
            "Longitude: -82.9063 Latitude: 37.5938"
        );
    }

    #[test]
    fn zoom_has_two_decimals() {
        assert_eq!(format_zoom(9.0), "Zoom: 9.00");
        assert_eq!(format_zoom(12.3456), "Zoom: 12.35");
        assert_eq!(format_zoom(9.125), "Zoom: 9.13");
    }
}
