use globe_rs::core::{
    GeoPoint, MAX_TILT, MIN_TILT, OrthographicProjection, ProjectionState, ScaleBounds, Viewport,
    globe_radius,
};
use globe_rs::interaction::drag_rotation;
use proptest::prelude::*;

fn bounds_for(viewport: Viewport) -> ScaleBounds {
    ScaleBounds::from_radius(globe_radius(viewport), 0.5, 2.5, 1.25)
}

fn any_scale() -> impl Strategy<Value = f64> {
    prop_oneof![
        -1.0e6..1.0e6_f64,
        Just(0.0),
        Just(f64::NAN),
        Just(f64::INFINITY),
        Just(f64::NEG_INFINITY),
        Just(f64::MAX),
    ]
}

proptest! {
    #[test]
    fn scale_always_within_bounds(
        width in 10u32..4000,
        height in 10u32..4000,
        requests in proptest::collection::vec(any_scale(), 1..20),
    ) {
        let viewport = Viewport::new(width, height);
        let bounds = bounds_for(viewport);
        let mut state = ProjectionState::new([0.0, -25.0, 0.0], bounds.default, bounds);
        for request in requests {
            let scale = state.set_scale(request);
            prop_assert!(scale >= bounds.min && scale <= bounds.max);
            prop_assert!(scale.is_finite());
        }
    }

    #[test]
    fn drag_never_tilts_past_poles(
        steps in proptest::collection::vec((-5000.0..5000.0_f64, -5000.0..5000.0_f64), 1..40),
        scale in 50.0..1500.0_f64,
    ) {
        let bounds = ScaleBounds { min: 10.0, max: 2000.0, default: scale };
        let mut state = ProjectionState::new([0.0, -25.0, 0.0], scale, bounds);
        for (dx, dy) in steps {
            state.set_rotation(drag_rotation(state.rotation(), dx, dy, state.scale()));
            let phi = state.rotation()[1];
            prop_assert!((MIN_TILT..=MAX_TILT).contains(&phi));
        }
    }

    #[test]
    fn rebound_preserves_zoom_ratio(
        from in 100u32..2000,
        to in 100u32..2000,
        factor in 0.5..2.5_f64,
    ) {
        let old = Viewport::new(from, from);
        let new = Viewport::new(to, to);
        let old_bounds = bounds_for(old);
        let mut state = ProjectionState::new(
            [10.0, 5.0, 0.0],
            globe_radius(old) * factor,
            old_bounds,
        );
        let zoom_before = state.zoom_factor();
        state.rebound(bounds_for(new), globe_radius(new) / globe_radius(old));
        prop_assert!((state.zoom_factor() - zoom_before).abs() < 1e-9);
        prop_assert_eq!(state.rotation(), [10.0, 5.0, 0.0]);
    }

    #[test]
    fn visible_points_project_inside_the_disc(
        lon in -180.0..180.0_f64,
        lat in -90.0..90.0_f64,
        lambda in -720.0..720.0_f64,
        phi in -90.0..90.0_f64,
    ) {
        let viewport = Viewport::new(600, 400);
        let projection = OrthographicProjection::new(viewport, [lambda, phi, 0.0], 150.0);
        if let Some((x, y)) = projection.project(GeoPoint::new(lon, lat)) {
            let (cx, cy) = viewport.center();
            prop_assert!((x - cx).hypot(y - cy) <= 150.0 + 1e-6);
        }
    }
}
