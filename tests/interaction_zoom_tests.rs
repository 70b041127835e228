use std::rc::Rc;

use approx::assert_abs_diff_eq;
use globe_rs::api::{
    ClickOutcome, GeometrySource, GlobeConfig, GlobeEngine, GlobeMount, WHEEL_END_DELAY_MS,
    ZoomConfig,
};
use globe_rs::core::{DEFAULT_ROTATION, GeoFeature, GeoPoint, GeoPolygon, Viewport, WorldGeometry};
use globe_rs::host::{
    HostBindings, InstanceStateCache, ManualScheduler, RecordingSelectionHost,
    SharedInstanceCache,
};
use globe_rs::interaction::{GestureMode, TouchPoint, WheelDeltaMode};
use globe_rs::render::NullRenderer;
use globe_rs::style::{ZoomControl, ZoomControlsLayout, ZoomControlsVisibility};

fn world() -> Rc<WorldGeometry> {
    let outer = vec![
        GeoPoint::new(-10.0, 15.0),
        GeoPoint::new(10.0, 15.0),
        GeoPoint::new(10.0, 35.0),
        GeoPoint::new(-10.0, 35.0),
        GeoPoint::new(-10.0, 15.0),
    ];
    Rc::new(
        WorldGeometry::from_features(vec![GeoFeature::new(
            "Alpha",
            vec![GeoPolygon::from_outer(outer)],
        )])
        .expect("fixture geometry"),
    )
}

struct Harness {
    engine: GlobeEngine<NullRenderer>,
    scheduler: ManualScheduler,
    cache: SharedInstanceCache,
}

fn painted(viewport: Viewport, config: GlobeConfig) -> Harness {
    let scheduler = ManualScheduler::new();
    let cache = InstanceStateCache::shared();
    let host = HostBindings::new(
        Box::new(scheduler.clone()),
        Box::new(RecordingSelectionHost::new()),
        Rc::clone(&cache),
    );
    let mount = GlobeMount::new("zoom", viewport, GeometrySource::Loaded(world()))
        .with_config(config.without_intro());
    let mut engine = GlobeEngine::new(NullRenderer::default(), mount, host).expect("engine init");
    engine.paint(None).expect("paint");
    Harness {
        engine,
        scheduler,
        cache,
    }
}

fn button_center(viewport: Viewport, control: ZoomControl) -> (f64, f64) {
    let (x, y, width, height) = ZoomControlsLayout::new(viewport).button_rect(control);
    (x + width / 2.0, y + height / 2.0)
}

#[test]
fn two_zoom_in_clicks_multiply_default_scale() {
    // radius 80, default scale 100, max scale 200
    let viewport = Viewport::new(200, 200);
    let mut h = painted(viewport, GlobeConfig::default());
    assert_abs_diff_eq!(h.engine.scale(), 100.0, epsilon = 1e-9);

    assert!(h.engine.zoom_in());
    assert!(h.engine.zoom_in());
    assert_abs_diff_eq!(h.engine.scale(), 144.0, epsilon = 1e-9);
    assert_eq!(h.engine.zoom_percent(), 144);

    let entry = h.cache.borrow().get("zoom").expect("cache written by zoom");
    assert_abs_diff_eq!(entry.scale, 144.0, epsilon = 1e-9);

    for _ in 0..5 {
        h.engine.zoom_in();
    }
    assert_abs_diff_eq!(h.engine.scale(), 200.0, epsilon = 1e-9);
    for _ in 0..20 {
        h.engine.zoom_out();
    }
    assert_abs_diff_eq!(h.engine.scale(), 40.0, epsilon = 1e-9);
}

#[test]
fn zoom_buttons_are_clickable_and_indicator_tracks_scale() {
    let viewport = Viewport::new(200, 200);
    let mut h = painted(viewport, GlobeConfig::default());
    let (x, y) = button_center(viewport, ZoomControl::ZoomIn);

    assert_eq!(
        h.engine.click(x, y),
        ClickOutcome::ZoomControl(ZoomControl::ZoomIn)
    );
    assert_abs_diff_eq!(h.engine.scale(), 120.0, epsilon = 1e-9);
    assert!(h.engine.renderer().last_texts().contains(&"120%".to_owned()));

    let (x, y) = button_center(viewport, ZoomControl::Reset);
    h.engine.drag_start(100.0, 100.0);
    h.engine.drag_move(140.0, 60.0);
    h.engine.drag_end();
    assert_eq!(
        h.engine.click(x, y),
        ClickOutcome::ZoomControl(ZoomControl::Reset)
    );
    assert_eq!(h.engine.rotation(), DEFAULT_ROTATION);
    assert_abs_diff_eq!(h.engine.scale(), 100.0, epsilon = 1e-9);
    assert!(h.engine.renderer().last_texts().contains(&"100%".to_owned()));
}

#[test]
fn drag_on_zoom_button_is_not_a_rotation() {
    let viewport = Viewport::new(400, 400);
    let mut h = painted(viewport, GlobeConfig::default());
    let (x, y) = button_center(viewport, ZoomControl::ZoomOut);
    assert!(!h.engine.drag_start(x, y));
    assert_eq!(h.engine.gesture_mode(), GestureMode::Idle);
}

#[test]
fn disabled_zoom_ignores_every_zoom_input_and_hides_controls() {
    let viewport = Viewport::new(500, 500);
    let config = GlobeConfig::default().with_zoom(ZoomConfig::default().with_enabled(false));
    let mut h = painted(viewport, config);
    let before = h.engine.scale();

    assert!(!h.engine.zoom_in());
    assert!(!h.engine.zoom_out());
    assert!(!h.engine.wheel(-200.0, WheelDeltaMode::Pixel));
    assert!(!h.engine.touch_start(&[
        TouchPoint::new(1, 200.0, 250.0),
        TouchPoint::new(2, 300.0, 250.0),
    ]));
    assert_eq!(h.engine.scale(), before);

    let frame = h.engine.renderer().last_frame.clone().expect("frame");
    assert!(frame.rects.is_empty());
    assert!(!frame.texts.iter().any(|text| text.text.ends_with('%')));

    assert!(h.engine.reset_view());
}

#[test]
fn touchpad_toggle_keeps_buttons() {
    let config =
        GlobeConfig::default().with_zoom(ZoomConfig::default().with_touchpad_enabled(false));
    let mut h = painted(Viewport::new(500, 500), config);
    assert!(!h.engine.wheel(-100.0, WheelDeltaMode::Pixel));
    assert!(h.engine.zoom_in());
    assert_abs_diff_eq!(h.engine.scale(), 300.0, epsilon = 1e-9);
}

#[test]
fn wheel_zoom_accumulates_and_ends_after_quiet_period() {
    let mut h = painted(Viewport::new(500, 500), GlobeConfig::default());
    assert!(h.engine.wheel(-100.0, WheelDeltaMode::Pixel));
    assert_eq!(h.engine.gesture_mode(), GestureMode::WheelZooming);
    assert!(!h.scheduler.has_pending_frame());
    assert_abs_diff_eq!(h.engine.scale(), 250.0 * 0.2_f64.exp2(), epsilon = 1e-9);

    assert!(h.engine.wheel(-100.0, WheelDeltaMode::Pixel));
    assert_abs_diff_eq!(h.engine.scale(), 250.0 * 0.4_f64.exp2(), epsilon = 1e-9);
    assert_eq!(h.scheduler.pending_timers().len(), 1);

    assert!(h.scheduler.take_due_timers(WHEEL_END_DELAY_MS - 1.0).is_empty());
    for timer in h.scheduler.take_due_timers(WHEEL_END_DELAY_MS) {
        h.engine.on_timer(timer, WHEEL_END_DELAY_MS);
    }
    assert_eq!(h.engine.gesture_mode(), GestureMode::Idle);
    assert!(h.scheduler.has_pending_frame());

    for _ in 0..50 {
        h.engine.wheel(-500.0, WheelDeltaMode::Line);
    }
    assert_abs_diff_eq!(h.engine.scale(), 500.0, epsilon = 1e-9);
    assert_abs_diff_eq!(h.engine.snapshot().zoom_factor, 2.0, epsilon = 1e-9);
}

#[test]
fn button_zoom_resynchronizes_wheel_factor() {
    let mut h = painted(Viewport::new(500, 500), GlobeConfig::default());
    h.engine.zoom_in();
    assert_abs_diff_eq!(h.engine.snapshot().zoom_factor, 1.2, epsilon = 1e-9);
    h.engine.wheel(-100.0, WheelDeltaMode::Pixel);
    assert_abs_diff_eq!(h.engine.scale(), 250.0 * 1.2 * 0.2_f64.exp2(), epsilon = 1e-9);
}

#[test]
fn pinch_scales_by_finger_distance_with_sensitivity() {
    let config =
        GlobeConfig::default().with_zoom(ZoomConfig::default().with_pinch_sensitivity(0.5));
    let mut h = painted(Viewport::new(500, 500), config);

    assert!(h.engine.touch_start(&[
        TouchPoint::new(1, 200.0, 250.0),
        TouchPoint::new(2, 300.0, 250.0),
    ]));
    assert_eq!(h.engine.gesture_mode(), GestureMode::Pinching);

    assert!(h.engine.touch_move(&[TouchPoint::new(2, 350.0, 250.0)]));
    // ratio 1.5 softened to 1.25
    assert_abs_diff_eq!(h.engine.scale(), 312.5, epsilon = 1e-9);

    h.engine.touch_end(&[2]);
    assert_eq!(h.engine.gesture_mode(), GestureMode::Pinching);
    h.engine.touch_end(&[1]);
    assert_eq!(h.engine.gesture_mode(), GestureMode::Idle);

    let idle = h.engine.snapshot().idle;
    assert_eq!((idle.stats.suspends, idle.stats.resumes), (1, 1));
}

#[test]
fn second_finger_turns_touch_drag_into_pinch() {
    let mut h = painted(Viewport::new(500, 500), GlobeConfig::default());
    assert!(h.engine.touch_start(&[TouchPoint::new(7, 250.0, 250.0)]));
    assert_eq!(h.engine.gesture_mode(), GestureMode::Dragging);

    assert!(h.engine.touch_move(&[TouchPoint::new(7, 270.0, 250.0)]));
    assert_abs_diff_eq!(h.engine.rotation()[0], 20.0 * 75.0 / 250.0, epsilon = 1e-9);

    assert!(h.engine.touch_start(&[TouchPoint::new(8, 370.0, 250.0)]));
    assert_eq!(h.engine.gesture_mode(), GestureMode::Pinching);
    h.engine.touch_move(&[TouchPoint::new(8, 470.0, 250.0)]);
    assert_abs_diff_eq!(h.engine.scale(), 500.0, epsilon = 1e-9);

    h.engine.touch_end(&[7, 8]);
    assert_eq!(h.engine.gesture_mode(), GestureMode::Idle);
    let idle = h.engine.snapshot().idle;
    assert_eq!((idle.stats.suspends, idle.stats.resumes), (1, 1));
}

#[test]
fn stray_touch_end_leaves_mouse_drag_running() {
    let mut h = painted(Viewport::new(500, 500), GlobeConfig::default());
    assert!(h.engine.drag_start(250.0, 250.0));
    h.engine.touch_end(&[42]);
    assert_eq!(h.engine.gesture_mode(), GestureMode::Dragging);

    h.engine.drag_move(270.0, 250.0);
    assert_abs_diff_eq!(h.engine.rotation()[0], 20.0 * 75.0 / 250.0, epsilon = 1e-9);
    h.engine.drag_end();
    assert_eq!(h.engine.gesture_mode(), GestureMode::Idle);
    let idle = h.engine.snapshot().idle;
    assert_eq!((idle.stats.suspends, idle.stats.resumes), (1, 1));
}

#[test]
fn drag_tilt_is_clamped() {
    let mut h = painted(Viewport::new(500, 500), GlobeConfig::default());
    h.engine.drag_start(250.0, 250.0);
    h.engine.drag_move(250.0, 100_250.0);
    assert_eq!(h.engine.rotation()[1], -90.0);
    h.engine.drag_move(250.0, -500_000.0);
    assert_eq!(h.engine.rotation()[1], 90.0);
    h.engine.drag_end();
    let entry = h.cache.borrow().get("zoom").expect("cache written on drag");
    assert_eq!(entry.rotation[1], 90.0);
}

#[test]
fn hover_only_controls_follow_pointer() {
    let config = GlobeConfig::default().with_zoom(
        ZoomConfig::default().with_controls_visibility(ZoomControlsVisibility::Hover),
    );
    let mut h = painted(Viewport::new(500, 500), config);
    let frame = h.engine.renderer().last_frame.clone().expect("frame");
    assert!(frame.rects.is_empty());

    h.engine.pointer_move(400.0, 100.0);
    let frame = h.engine.renderer().last_frame.clone().expect("frame");
    assert_eq!(frame.rects.len(), 3);

    h.engine.pointer_leave();
    let frame = h.engine.renderer().last_frame.clone().expect("frame");
    assert!(frame.rects.is_empty());
}
