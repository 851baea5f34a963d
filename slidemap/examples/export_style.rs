//! This example builds the complete map style, as it looks after the map is loaded, and prints it to stdout.
//!
//! An optional argument is a path to a JSON map configuration. Without it the district 12 map is exported.
//!
//! ```shell
//! cargo run --example export_style -- ./config.json > style.json
//! ```

use anyhow::Result;
use slidemap::{HeadlessEngine, MapConfig, MapConfigurator, MapEvent};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => MapConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => MapConfig::district_12(),
    };

    let mut configurator = MapConfigurator::<HeadlessEngine>::new(config)?;
    configurator.handle_event(MapEvent::Load);

    let style = configurator.engine().style();
    log::info!(
        "Exporting {} sources and {} layers",
        style.sources().count(),
        style.layers().len()
    );

    println!("{}", style.to_json()?);
    Ok(())
}
