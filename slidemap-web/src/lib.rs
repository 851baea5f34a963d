//! Browser entry points of the landslide hazard map.
//!
//! Build with `wasm-pack build slidemap-web --target web` and call `main()` from the page after the
//! `maplibre-gl` script is loaded.

use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use slidemap::platform::web;
use slidemap::MapConfig;

/// Starts the district 12 map in the `map` element.
#[wasm_bindgen]
pub fn main() -> Result<(), JsValue> {
    start(preset())
}

/// Starts a map with configuration given as a JSON document. Missing fields take district 12 values.
#[wasm_bindgen(js_name = runWithConfig)]
pub fn run_with_config(config: &str) -> Result<(), JsValue> {
    let config = MapConfig::from_json(config).map_err(|err| JsValue::from_str(&err.to_string()))?;
    start(config)
}

fn preset() -> MapConfig {
    MapConfig {
        labels: cfg!(feature = "labels"),
        aerial_imagery: cfg!(feature = "aerial_imagery"),
        debug_logging: !cfg!(feature = "quiet"),
        ..MapConfig::district_12()
    }
}

#[cfg(target_arch = "wasm32")]
fn start(config: MapConfig) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let level = if config.debug_logging {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    web::init_logging(level);

    web::run(config).map_err(|err| JsValue::from_str(&err.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn start(config: MapConfig) -> Result<(), JsValue> {
    Err(JsValue::from_str(&format!(
        "map in '{}' can only be started in a browser",
        config.container
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_is_district_12() {
        let config = preset();
        assert_eq!(config.camera, MapConfig::district_12().camera);
        assert_eq!(config.labels, cfg!(feature = "labels"));
    }
}
