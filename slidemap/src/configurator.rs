use std::collections::HashSet;

use crate::config::MapConfig;
use crate::control::{
    Control, ControlKind, ControlPosition, Cursor, EventDispatcher, EventHandler, EventKind,
    EventPropagation, MapEvent, ScaleUnit,
};
use crate::engine::MapEngine;
use crate::error::SlidemapError;
use crate::popup::landslide_popup;
use crate::style::{self, HAZARD_LAYER, TERRAIN_SOURCE};
use crate::telemetry;

const SCALE_MAX_WIDTH: u32 = 80;
const TERRAIN_EXAGGERATION: f64 = 2.0;

/// Owns a map engine instance and drives it: creates the map with the base style, adds controls, and adds the
/// hazard layers and their interactions once the engine reports that the map is loaded.
///
/// The configurator does not listen to the engine by itself. Whoever owns it must pass engine signals to
/// [`MapConfigurator::handle_event`].
///
/// ```
/// use slidemap::{HeadlessEngine, MapConfig, MapConfigurator, MapEvent};
///
/// let mut configurator = MapConfigurator::<HeadlessEngine>::new(MapConfig::district_12()).unwrap();
/// configurator.handle_event(MapEvent::Load);
///
/// let style = configurator.engine().style();
/// assert!(style.layer_index("counties-outline") < style.layer_index("landslides"));
/// ```
pub struct MapConfigurator<E: MapEngine> {
    engine: E,
    config: MapConfig,
    dispatcher: EventDispatcher,
    controls: HashSet<ControlKind>,
    loaded: bool,
}

impl<E: MapEngine> MapConfigurator<E> {
    /// Creates the map with the base style and registers controls.
    pub fn new(config: MapConfig) -> Result<Self, SlidemapError> {
        config.validate()?;

        let style = style::base_style(&config)?;
        let engine = E::create(&config.container, &config.camera, &style)?;

        let mut configurator = Self {
            engine,
            config,
            dispatcher: EventDispatcher::default(),
            controls: HashSet::new(),
            loaded: false,
        };

        configurator.subscribe(EventKind::Load, None);
        configurator.register_controls();
        if configurator.config.debug_logging {
            configurator.on(EventKind::Move, None, telemetry::log_center);
            configurator.on(EventKind::ZoomEnd, None, telemetry::log_zoom);
        }

        Ok(configurator)
    }

    /// Adds the standard controls. Controls that are already on the map are skipped, so calling this again does
    /// nothing.
    pub fn register_controls(&mut self) {
        for (control, position) in standard_controls() {
            let kind = control.kind();
            if self.controls.contains(&kind) {
                continue;
            }

            match self.engine.add_control(&control, position) {
                Ok(()) => {
                    self.controls.insert(kind);
                }
                Err(err) => log::warn!("Failed to add {kind:?} control: {err}"),
            }
        }
    }

    /// Processes a signal from the engine.
    pub fn handle_event(&mut self, event: MapEvent) {
        if event == MapEvent::Load {
            self.on_load();
        }

        self.dispatcher.dispatch(&event, &mut self.engine);
    }

    /// Whether the load event was processed.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Configuration the map was created with.
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// The engine instance.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable reference to the engine instance.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Registered event handlers.
    pub fn dispatcher(&self) -> &EventDispatcher {
        &self.dispatcher
    }

    fn on_load(&mut self) {
        if self.loaded {
            log::debug!("Map is already loaded, ignoring the load event");
            return;
        }
        self.loaded = true;

        match style::sky() {
            Ok(sky) => {
                if let Err(err) = self.engine.set_sky(&sky) {
                    log::warn!("Failed to set sky: {err}");
                }
            }
            Err(err) => log::warn!("Invalid sky definition: {err}"),
        }

        for (name, source) in style::hazard_sources(&self.config.data) {
            if let Err(err) = self.engine.add_source(name, &source) {
                log::warn!("Failed to add source '{name}': {err}");
            }
        }

        match style::hazard_layers(&self.config) {
            Ok(layers) => {
                for (layer, before) in layers {
                    if let Err(err) = self.engine.add_layer(&layer, before) {
                        log::warn!("Failed to add layer '{}': {err}", layer.id);
                    }
                }
            }
            Err(err) => log::warn!("Invalid hazard layer definition: {err}"),
        }

        self.register_hazard_handlers();
        log::info!("Hazard layers are ready");
    }

    fn register_hazard_handlers(&mut self) {
        self.on(EventKind::MouseEnter, Some(HAZARD_LAYER), |_, engine| {
            engine.set_cursor(Cursor::Pointer);
            EventPropagation::Propagate
        });

        self.on(EventKind::MouseLeave, Some(HAZARD_LAYER), |_, engine| {
            engine.set_cursor(Cursor::Default);
            EventPropagation::Propagate
        });

        self.on(EventKind::Click, Some(HAZARD_LAYER), |event, engine| {
            let MapEvent::Click(click) = event else {
                return EventPropagation::Propagate;
            };

            if let Some(feature) = click.features.first() {
                log::debug!("Clicked feature: {:?}", feature.properties);
            }

            if let Some(popup) = landslide_popup(click) {
                if let Err(err) = engine.show_popup(&popup) {
                    log::warn!("Failed to show popup: {err}");
                }
            }

            EventPropagation::Propagate
        });
    }

    fn on(&mut self, kind: EventKind, layer: Option<&str>, handler: impl EventHandler + 'static) {
        self.subscribe(kind, layer);
        self.dispatcher.add_handler(kind, layer, handler);
    }

    fn subscribe(&mut self, kind: EventKind, layer: Option<&str>) {
        if let Err(err) = self.engine.subscribe(kind, layer) {
            log::warn!("Failed to subscribe to '{}' events: {err}", kind.as_str());
        }
    }
}

fn standard_controls() -> Vec<(Control, Option<ControlPosition>)> {
    vec![
        (Control::Navigation, Some(ControlPosition::TopLeft)),
        (Control::Fullscreen, None),
        (
            Control::Scale {
                max_width: SCALE_MAX_WIDTH,
                unit: ScaleUnit::Imperial,
            },
            None,
        ),
        (
            Control::Geolocate {
                high_accuracy: true,
                track_user_location: true,
                show_user_heading: true,
            },
            None,
        ),
        (
            Control::Terrain {
                source: TERRAIN_SOURCE.to_string(),
                exaggeration: TERRAIN_EXAGGERATION,
            },
            None,
        ),
    ]
}
