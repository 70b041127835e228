use std::rc::Rc;

use globe_rs::api::{GeometrySource, GlobeConfig, GlobeEngine, GlobeMount, PLACEHOLDER_TEXT};
use globe_rs::core::Viewport;
use globe_rs::host::{HostBindings, InstanceStateCache, ManualScheduler, RecordingSelectionHost};
use globe_rs::render::NullRenderer;
use globe_rs::GlobeError;

const WORLD_GEOJSON: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "properties": { "name": "Alpha" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[-10, 15], [10, 15], [10, 35], [-10, 35], [-10, 15]]]
            }
        },
        {
            "type": "Feature",
            "properties": { "name": "Archipelago" },
            "geometry": {
                "type": "MultiPolygon",
                "coordinates": [
                    [[[20, 15], [30, 15], [30, 25], [20, 25], [20, 15]]],
                    [[[32, 27], [40, 27], [40, 35], [32, 35], [32, 27]]]
                ]
            }
        },
        {
            "type": "Feature",
            "properties": { "name": "Line Island" },
            "geometry": { "type": "LineString", "coordinates": [[0, 0], [1, 1]] }
        }
    ]
}"#;

fn mount(geometry: GeometrySource) -> (GlobeEngine<NullRenderer>, ManualScheduler) {
    let scheduler = ManualScheduler::new();
    let host = HostBindings::new(
        Box::new(scheduler.clone()),
        Box::new(RecordingSelectionHost::new()),
        InstanceStateCache::shared(),
    );
    let mount = GlobeMount::new("geometry", Viewport::new(500, 500), geometry)
        .with_config(GlobeConfig::default().without_intro());
    let engine = GlobeEngine::new(NullRenderer::default(), mount, host).expect("engine init");
    (engine, scheduler)
}

#[test]
fn geojson_source_is_parsed_at_first_paint() {
    let (mut engine, scheduler) = mount(GeometrySource::GeoJson(WORLD_GEOJSON.to_owned()));
    assert_eq!(engine.renderer().frames_rendered, 0);

    engine.paint(None).expect("paint");
    let frame = engine.renderer().last_frame.clone().expect("frame");
    let keys: Vec<&str> = frame.paths.iter().map(|path| path.key.as_str()).collect();
    assert_eq!(keys, vec!["ALPHA", "ARCHIPELAGO"]);
    assert_eq!(frame.path("ARCHIPELAGO").map(|path| path.rings.len()), Some(2));
    assert!(scheduler.has_pending_frame());
    assert!(engine.input_enabled());
}

#[test]
fn unchanged_pose_reuses_projected_rings() {
    let (mut engine, _) = mount(GeometrySource::GeoJson(WORLD_GEOJSON.to_owned()));
    engine.paint(None).expect("paint");
    let first = engine.renderer().last_frame.clone().expect("first frame");

    engine.render().expect("second render");
    let second = engine.renderer().last_frame.clone().expect("second frame");
    let rings = |frame: &globe_rs::render::RenderFrame| {
        frame.path("ALPHA").map(|path| Rc::clone(&path.rings)).expect("alpha path")
    };
    assert!(Rc::ptr_eq(&rings(&first), &rings(&second)));

    engine.set_scale(engine.scale() * 1.1);
    let moved = engine.renderer().last_frame.clone().expect("moved frame");
    assert!(!Rc::ptr_eq(&rings(&first), &rings(&moved)));
}

#[test]
fn broken_asset_draws_placeholder_and_disables_input() {
    let (mut engine, scheduler) = mount(GeometrySource::GeoJson("{\"features\": 7".to_owned()));

    let err = engine.paint(None).expect_err("broken geometry");
    assert!(matches!(err, GlobeError::GeometryAsset(_)));
    assert_eq!(engine.renderer().last_texts(), vec![PLACEHOLDER_TEXT.to_owned()]);
    let frame = engine.renderer().last_frame.clone().expect("placeholder frame");
    assert!(frame.paths.is_empty());
    assert!(frame.ocean.is_none());

    assert!(!engine.input_enabled());
    assert!(!engine.drag_start(250.0, 250.0));
    assert!(!engine.zoom_in());
    assert!(!scheduler.has_pending_frame());

    assert!(engine.paint(None).is_err());
    assert_eq!(engine.renderer().frames_rendered, 2);
}

#[test]
fn asset_without_usable_features_is_an_error() {
    let json = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "properties": {"name": ""},
         "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}}
    ]}"#;
    let (mut engine, _) = mount(GeometrySource::GeoJson(json.to_owned()));
    assert!(matches!(
        engine.paint(None),
        Err(GlobeError::GeometryAsset(_))
    ));
    assert!(!engine.input_enabled());
}
