//! [`MapEngine`] implementation backed by MapLibre GL JS.
//!
//! The page must load the `maplibre-gl` script, so that the `maplibregl` global is available, and contain the
//! container element named in [`MapConfig::container`].

use std::cell::RefCell;
use std::rc::Rc;

use geojson::Feature;
use js_sys::{Array, Reflect, JSON};
use serde::Serialize;
use slidemap_style::{Layer, Sky, Source, StyleDocument};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::config::{CameraOptions, LngLat, MapConfig};
use crate::control::{ClickEvent, Control, ControlPosition, Cursor, EventKind, MapEvent};
use crate::engine::MapEngine;
use crate::error::{EngineError, SlidemapError};
use crate::popup::Popup;
use crate::MapConfigurator;

mod bindings {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = maplibregl)]
        pub type Map;

        #[wasm_bindgen(constructor, catch, js_namespace = maplibregl, js_class = "Map")]
        pub fn new(options: &JsValue) -> Result<Map, JsValue>;

        #[wasm_bindgen(method, catch, js_name = addSource)]
        pub fn add_source(this: &Map, id: &str, source: &JsValue) -> Result<(), JsValue>;

        #[wasm_bindgen(method, catch, js_name = addLayer)]
        pub fn add_layer(this: &Map, layer: &JsValue, before: Option<String>)
            -> Result<(), JsValue>;

        #[wasm_bindgen(method, catch, js_name = setSky)]
        pub fn set_sky(this: &Map, sky: &JsValue) -> Result<(), JsValue>;

        #[wasm_bindgen(method, catch, js_name = addControl)]
        pub fn add_control(this: &Map, control: &JsValue, position: Option<String>)
            -> Result<(), JsValue>;

        #[wasm_bindgen(method, js_name = on)]
        pub fn on(this: &Map, event: &str, listener: &Closure<dyn FnMut(JsValue)>);

        #[wasm_bindgen(method, js_name = on)]
        pub fn on_layer(
            this: &Map,
            event: &str,
            layer: &str,
            listener: &Closure<dyn FnMut(JsValue)>,
        );

        #[wasm_bindgen(method, js_name = getCanvas)]
        pub fn get_canvas(this: &Map) -> web_sys::HtmlCanvasElement;

        #[wasm_bindgen(method, js_name = getCenter)]
        pub fn get_center(this: &Map) -> LngLat;

        #[wasm_bindgen(method, js_name = getZoom)]
        pub fn get_zoom(this: &Map) -> f64;
    }

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = maplibregl)]
        pub type LngLat;

        #[wasm_bindgen(method, getter)]
        pub fn lng(this: &LngLat) -> f64;

        #[wasm_bindgen(method, getter)]
        pub fn lat(this: &LngLat) -> f64;
    }

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = maplibregl)]
        pub type Popup;

        #[wasm_bindgen(constructor, js_namespace = maplibregl, js_class = "Popup")]
        pub fn new() -> Popup;

        #[wasm_bindgen(method, js_name = setLngLat)]
        pub fn set_lng_lat(this: &Popup, lng_lat: &JsValue) -> Popup;

        #[wasm_bindgen(method, js_name = setHTML)]
        pub fn set_html(this: &Popup, html: &str) -> Popup;

        #[wasm_bindgen(method, js_name = addTo)]
        pub fn add_to(this: &Popup, map: &Map) -> Popup;
    }

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = maplibregl)]
        pub type NavigationControl;

        #[wasm_bindgen(constructor, js_namespace = maplibregl, js_class = "NavigationControl")]
        pub fn new(options: &JsValue) -> NavigationControl;
    }

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = maplibregl)]
        pub type FullscreenControl;

        #[wasm_bindgen(constructor, js_namespace = maplibregl, js_class = "FullscreenControl")]
        pub fn new(options: &JsValue) -> FullscreenControl;
    }

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = maplibregl)]
        pub type ScaleControl;

        #[wasm_bindgen(constructor, js_namespace = maplibregl, js_class = "ScaleControl")]
        pub fn new(options: &JsValue) -> ScaleControl;
    }

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = maplibregl)]
        pub type GeolocateControl;

        #[wasm_bindgen(constructor, js_namespace = maplibregl, js_class = "GeolocateControl")]
        pub fn new(options: &JsValue) -> GeolocateControl;
    }

    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(js_namespace = maplibregl)]
        pub type TerrainControl;

        #[wasm_bindgen(constructor, js_namespace = maplibregl, js_class = "TerrainControl")]
        pub fn new(options: &JsValue) -> TerrainControl;
    }
}

type EventSink = Rc<dyn Fn(MapEvent)>;

/// A MapLibre GL map instance.
pub struct MaplibreEngine {
    map: bindings::Map,
    sink: Rc<RefCell<Option<EventSink>>>,
    listeners: Vec<Closure<dyn FnMut(JsValue)>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MapOptions<'a> {
    container: &'a str,
    center: LngLat,
    zoom: f64,
    max_pitch: f64,
    hash: bool,
    style: &'a StyleDocument,
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, EngineError> {
    Ok(value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}

impl MaplibreEngine {
    /// Sets the function that receives the events the engine is subscribed to.
    pub fn set_event_sink(&self, sink: impl Fn(MapEvent) + 'static) {
        *self.sink.borrow_mut() = Some(Rc::new(sink));
    }

    fn control_object(control: &Control) -> JsValue {
        let options = match to_js(&control.options()) {
            Ok(options) => options,
            Err(err) => {
                log::warn!("Failed to convert control options: {err}");
                JsValue::UNDEFINED
            }
        };

        match control {
            Control::Navigation => bindings::NavigationControl::new(&options).into(),
            Control::Fullscreen => bindings::FullscreenControl::new(&options).into(),
            Control::Scale { .. } => bindings::ScaleControl::new(&options).into(),
            Control::Geolocate { .. } => bindings::GeolocateControl::new(&options).into(),
            Control::Terrain { .. } => bindings::TerrainControl::new(&options).into(),
        }
    }
}

impl MapEngine for MaplibreEngine {
    fn create(
        container: &str,
        camera: &CameraOptions,
        style: &StyleDocument,
    ) -> Result<Self, EngineError> {
        let options = to_js(&MapOptions {
            container,
            center: camera.center,
            zoom: camera.zoom,
            max_pitch: camera.max_pitch,
            hash: camera.hash,
            style,
        })?;

        let map = bindings::Map::new(&options)?;
        log::debug!("Map is created in '{container}'");

        Ok(Self {
            map,
            sink: Rc::new(RefCell::new(None)),
            listeners: Vec::new(),
        })
    }

    fn add_source(&mut self, name: &str, source: &Source) -> Result<(), EngineError> {
        Ok(self.map.add_source(name, &to_js(source)?)?)
    }

    fn add_layer(&mut self, layer: &Layer, before: Option<&str>) -> Result<(), EngineError> {
        Ok(self
            .map
            .add_layer(&to_js(layer)?, before.map(str::to_string))?)
    }

    fn set_sky(&mut self, sky: &Sky) -> Result<(), EngineError> {
        Ok(self.map.set_sky(&to_js(sky)?)?)
    }

    fn add_control(
        &mut self,
        control: &Control,
        position: Option<ControlPosition>,
    ) -> Result<(), EngineError> {
        let object = Self::control_object(control);
        Ok(self
            .map
            .add_control(&object, position.map(|p| p.as_str().to_string()))?)
    }

    fn subscribe(&mut self, kind: EventKind, layer: Option<&str>) -> Result<(), EngineError> {
        if kind == EventKind::Click && layer.is_none() {
            return Err(EngineError::Rejected(
                "click events are only reported for layers".into(),
            ));
        }

        let sink = self.sink.clone();
        let layer_name = layer.map(str::to_string);
        let listener = Closure::wrap(Box::new(move |event: JsValue| {
            let map_event = match to_map_event(kind, layer_name.as_deref(), &event) {
                Ok(map_event) => map_event,
                Err(err) => {
                    log::warn!("Failed to read '{}' event: {err}", kind.as_str());
                    return;
                }
            };

            // Cloned out of the cell so a handler can replace the sink.
            let sink = sink.borrow().clone();
            if let Some(sink) = sink {
                sink(map_event);
            }
        }) as Box<dyn FnMut(JsValue)>);

        match layer {
            Some(layer) => self.map.on_layer(kind.as_str(), layer, &listener),
            None => self.map.on(kind.as_str(), &listener),
        }

        self.listeners.push(listener);
        Ok(())
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        let canvas = self.map.get_canvas();
        if let Err(err) = canvas.style().set_property("cursor", cursor.as_css()) {
            log::warn!("Failed to set cursor: {err:?}");
        }
    }

    fn show_popup(&mut self, popup: &Popup) -> Result<(), EngineError> {
        let lng_lat = Array::of2(
            &JsValue::from_f64(popup.lng_lat.lng),
            &JsValue::from_f64(popup.lng_lat.lat),
        );

        bindings::Popup::new()
            .set_lng_lat(&lng_lat)
            .set_html(&popup.html)
            .add_to(&self.map);

        Ok(())
    }

    fn center(&self) -> LngLat {
        let center = self.map.get_center();
        LngLat::new(center.lng(), center.lat())
    }

    fn zoom(&self) -> f64 {
        self.map.get_zoom()
    }
}

fn to_map_event(
    kind: EventKind,
    layer: Option<&str>,
    event: &JsValue,
) -> Result<MapEvent, EngineError> {
    let layer_id = || {
        layer.map(str::to_string).ok_or_else(|| {
            EngineError::Rejected(format!("'{}' event without a layer", kind.as_str()))
        })
    };

    Ok(match kind {
        EventKind::Load => MapEvent::Load,
        EventKind::Move => MapEvent::Move,
        EventKind::ZoomEnd => MapEvent::ZoomEnd,
        EventKind::MouseEnter => MapEvent::MouseEnter { layer: layer_id()? },
        EventKind::MouseLeave => MapEvent::MouseLeave { layer: layer_id()? },
        EventKind::Click => {
            let lng_lat: bindings::LngLat = Reflect::get(event, &"lngLat".into())?.unchecked_into();
            let features = Reflect::get(event, &"features".into())?;
            let features = if features.is_undefined() {
                Vec::new()
            } else {
                Array::from(&features)
                    .iter()
                    .filter_map(|feature| to_feature(&feature))
                    .collect()
            };

            MapEvent::Click(ClickEvent {
                layer: layer_id()?,
                lng_lat: LngLat::new(lng_lat.lng(), lng_lat.lat()),
                features,
            })
        }
    })
}

// Rendered features are JS class instances, their `toJSON` gives a plain GeoJSON feature.
fn to_feature(value: &JsValue) -> Option<Feature> {
    let json = String::from(JSON::stringify(value).ok()?);
    match serde_json::from_str(&json) {
        Ok(feature) => Some(feature),
        Err(err) => {
            log::warn!("Failed to read clicked feature: {err}");
            None
        }
    }
}

/// Sends log records to the browser console.
pub fn init_logging(level: log::Level) {
    if console_log::init_with_level(level).is_err() {
        log::debug!("Logger is already initialized");
    }
}

/// Creates the map and wires MapLibre events to a [`MapConfigurator`]. The map lives until the page is closed.
pub fn run(config: MapConfig) -> Result<(), SlidemapError> {
    let configurator = Rc::new(RefCell::new(MapConfigurator::<MaplibreEngine>::new(
        config,
    )?));

    let weak = Rc::downgrade(&configurator);
    configurator
        .borrow()
        .engine()
        .set_event_sink(move |event: MapEvent| {
            let Some(configurator) = weak.upgrade() else {
                return;
            };

            match configurator.try_borrow_mut() {
                Ok(mut configurator) => configurator.handle_event(event),
                Err(_) => log::warn!(
                    "Dropping '{}' event fired while the map was being updated",
                    event.kind().as_str()
                ),
            }
        });

    std::mem::forget(configurator);
    Ok(())
}
