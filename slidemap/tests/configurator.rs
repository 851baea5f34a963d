use assert_matches::assert_matches;
use geojson::Feature;
use serde_json::json;
use slidemap::control::{ControlKind, EventKind};
use slidemap::popup::UNKNOWN;
use slidemap::slidemap_style::PropertyValue;
use slidemap::style::{self, BOUNDARY_LAYER, HAZARD_LAYER, LABEL_LAYER};
use slidemap::{
    ClickEvent, Cursor, HeadlessEngine, LngLat, MapConfig, MapConfigurator, MapEngine, MapEvent,
    SlidemapError,
};

type Configurator = MapConfigurator<HeadlessEngine>;

fn loaded(config: MapConfig) -> Configurator {
    let mut configurator = Configurator::new(config).unwrap();
    configurator.handle_event(MapEvent::Load);
    configurator
}

fn landslide(properties: serde_json::Value) -> Feature {
    serde_json::from_value(json!({
        "type": "Feature",
        "geometry": { "type": "Point", "coordinates": [-82.9, 37.4] },
        "properties": properties,
    }))
    .unwrap()
}

fn click(features: Vec<Feature>) -> MapEvent {
    MapEvent::Click(ClickEvent {
        layer: HAZARD_LAYER.to_string(),
        lng_lat: LngLat::new(-82.91, 37.41),
        features,
    })
}

#[test]
fn same_config_gives_same_map() {
    let first = loaded(MapConfig::district_12());
    let second = loaded(MapConfig::district_12());

    assert_eq!(first.engine(), second.engine());
    assert_eq!(
        first.engine().style().to_json().unwrap(),
        second.engine().style().to_json().unwrap()
    );
}

#[test]
fn boundaries_are_drawn_under_landslides() {
    let configurator = loaded(MapConfig::district_12());
    let style = configurator.engine().style();

    let boundary = style.layer_index(BOUNDARY_LAYER).unwrap();
    let hazard = style.layer_index(HAZARD_LAYER).unwrap();
    assert_eq!(boundary + 1, hazard);
    assert_eq!(hazard, style.layers().len() - 1);
    assert!(style.sky().is_some());
}

#[test]
fn draw_order_does_not_depend_on_source_order() {
    let config = MapConfig::district_12();
    let mut sources = style::hazard_sources(&config.data);

    for _ in 0..2 {
        sources.reverse();

        let base = style::base_style(&config).unwrap();
        let mut engine = HeadlessEngine::create(&config.container, &config.camera, &base).unwrap();
        for (name, source) in &sources {
            engine.add_source(name, source).unwrap();
        }
        for (layer, before) in style::hazard_layers(&config).unwrap() {
            engine.add_layer(&layer, before).unwrap();
        }

        let ids: Vec<_> = engine.style().layer_ids().collect();
        assert_eq!(ids[ids.len() - 2..], [BOUNDARY_LAYER, HAZARD_LAYER]);
    }
}

#[test]
fn layers_are_added_only_after_load() {
    let mut configurator = Configurator::new(MapConfig::district_12()).unwrap();
    assert!(configurator.engine().style().layer(HAZARD_LAYER).is_none());
    assert!(!configurator.is_loaded());

    configurator.handle_event(MapEvent::Load);
    assert!(configurator.is_loaded());
    assert!(configurator.engine().style().layer(HAZARD_LAYER).is_some());
}

#[test]
fn hover_changes_cursor() {
    let mut configurator = loaded(MapConfig::district_12());
    assert_eq!(configurator.engine().cursor(), Cursor::Default);

    configurator.handle_event(MapEvent::MouseEnter {
        layer: HAZARD_LAYER.to_string(),
    });
    assert_eq!(configurator.engine().cursor(), Cursor::Pointer);

    configurator.handle_event(MapEvent::MouseLeave {
        layer: HAZARD_LAYER.to_string(),
    });
    assert_eq!(configurator.engine().cursor(), Cursor::Default);
}

#[test]
fn hover_over_other_layers_is_ignored() {
    let mut configurator = loaded(MapConfig::district_12());
    configurator.handle_event(MapEvent::MouseEnter {
        layer: BOUNDARY_LAYER.to_string(),
    });
    assert_eq!(configurator.engine().cursor(), Cursor::Default);
}

#[test]
fn click_opens_popup_at_the_marker() {
    let mut configurator = loaded(MapConfig::district_12());
    configurator.handle_event(click(vec![landslide(json!({
        "ID": "42",
        "County": "",
        "Lithology": null,
        "Aspect": "NW",
    }))]));

    let popups = configurator.engine().popups();
    assert_eq!(popups.len(), 1);
    assert_eq!(popups[0].lng_lat, LngLat::new(-82.9, 37.4));

    let html = &popups[0].html;
    assert!(html.contains("KGS Landslide ID: 42"));
    assert!(html.contains(&format!("Landslide in {UNKNOWN} County")));
    assert!(html.contains(&format!("Lithology: {UNKNOWN};")));
    assert!(html.contains("Aspect: NW"));
}

#[test]
fn click_without_features_opens_nothing() {
    let mut configurator = loaded(MapConfig::district_12());
    configurator.handle_event(click(Vec::new()));
    assert!(configurator.engine().popups().is_empty());
}

#[test]
fn clicks_before_load_are_not_handled() {
    let mut configurator = Configurator::new(MapConfig::district_12()).unwrap();
    configurator.handle_event(click(vec![landslide(json!({ "ID": "1" }))]));
    assert!(configurator.engine().popups().is_empty());
}

#[test]
fn labels_follow_config() {
    let configurator = loaded(MapConfig::district_12());
    assert!(configurator.engine().style().layer(LABEL_LAYER).is_none());

    let configurator = loaded(MapConfig {
        labels: true,
        ..MapConfig::district_12()
    });
    let style = configurator.engine().style();
    let label = style.layer(LABEL_LAYER).unwrap();
    assert_eq!(
        label.layout("text-field"),
        Some(&PropertyValue::Constant(json!(["get", "ID"])))
    );
    assert!(style.layer_index(LABEL_LAYER) > style.layer_index(HAZARD_LAYER));
}

#[test]
fn interactions_are_subscribed_on_load() {
    let configurator = loaded(MapConfig::district_12());
    let engine = configurator.engine();

    assert!(engine.is_subscribed(EventKind::Load, None));
    for kind in [EventKind::MouseEnter, EventKind::MouseLeave, EventKind::Click] {
        assert!(engine.is_subscribed(kind, Some(HAZARD_LAYER)));
    }
    assert!(engine
        .controls()
        .iter()
        .any(|(control, _)| control.kind() == ControlKind::Terrain));
}

#[test]
fn config_from_json() {
    let config = MapConfig::from_json(r#"{ "camera": { "zoom": 30 } }"#);
    assert_matches!(config, Err(SlidemapError::Config(_)));

    let config = MapConfig::from_json(
        r#"{ "labels": true, "aerialImagery": true, "camera": { "center": [-83.0, 37.0], "zoom": 11 } }"#,
    )
    .unwrap();
    assert!(config.labels);
    assert!(config.aerial_imagery);
    assert_eq!(config.container, "map");

    let configurator = loaded(config);
    let engine = configurator.engine();
    assert_eq!(engine.container(), "map");
    assert_eq!(engine.camera().zoom, 11.0);
    assert_eq!(engine.camera().max_pitch, 85.0);
    assert!(engine.style().layer(LABEL_LAYER).is_some());
    assert!(engine.style().layer("aerial").unwrap().is_visible());
}
