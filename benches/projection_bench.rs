use std::hint::black_box;
use std::rc::Rc;

use criterion::{Criterion, criterion_group, criterion_main};
use globe_rs::api::{GeometrySource, GlobeConfig, GlobeEngine, GlobeMount};
use globe_rs::core::{
    GeoFeature, GeoPoint, GeoPolygon, OrthographicProjection, Viewport, WorldGeometry,
};
use globe_rs::host::{HostBindings, InstanceStateCache, ManualScheduler, RecordingSelectionHost};
use globe_rs::render::NullRenderer;

/// A grid of 10x10 degree cells standing in for a country layer.
fn synthetic_world() -> WorldGeometry {
    let features: Vec<GeoFeature> = (-18..18)
        .flat_map(|col| (-8..8).map(move |row| (col, row)))
        .map(|(col, row)| {
            let lon = f64::from(col) * 10.0;
            let lat = f64::from(row) * 10.0;
            let mut ring: Vec<GeoPoint> = (0..=10)
                .map(|i| GeoPoint::new(lon + f64::from(i), lat))
                .chain((0..=10).map(|i| GeoPoint::new(lon + 10.0, lat + f64::from(i))))
                .chain((0..=10).rev().map(|i| GeoPoint::new(lon + f64::from(i), lat + 10.0)))
                .chain((0..=10).rev().map(|i| GeoPoint::new(lon, lat + f64::from(i))))
                .collect();
            ring.dedup();
            GeoFeature::new(format!("Cell {col} {row}"), vec![GeoPolygon::from_outer(ring)])
        })
        .collect();
    WorldGeometry::from_features(features).expect("synthetic world")
}

fn bench_project_world(c: &mut Criterion) {
    let world = synthetic_world();
    let viewport = Viewport::new(1280, 1280);
    let projection = OrthographicProjection::new(viewport, [37.0, -25.0, 0.0], 640.0);

    c.bench_function("project_world_576_features", |b| {
        b.iter(|| {
            let mut visible = 0usize;
            for feature in black_box(&world).features() {
                for polygon in feature.polygons() {
                    for ring in &polygon.rings {
                        if projection.project_ring(ring).is_some() {
                            visible += 1;
                        }
                    }
                }
            }
            black_box(visible)
        })
    });
}

fn bench_idle_rotation_frames(c: &mut Criterion) {
    let scheduler = ManualScheduler::new();
    let host = HostBindings::new(
        Box::new(scheduler.clone()),
        Box::new(RecordingSelectionHost::new()),
        InstanceStateCache::shared(),
    );
    let mount = GlobeMount::new(
        "bench",
        Viewport::new(1280, 1280),
        GeometrySource::Loaded(Rc::new(synthetic_world())),
    )
    .with_config(GlobeConfig::default().without_intro());
    let mut engine = GlobeEngine::new(NullRenderer::default(), mount, host).expect("engine init");
    engine.paint(None).expect("paint");

    let mut ts = 0.0;
    c.bench_function("idle_rotation_frame_576_features", |b| {
        b.iter(|| {
            scheduler.take_frames();
            ts += 16.0;
            engine.on_animation_frame(black_box(ts));
        })
    });
}

criterion_group!(benches, bench_project_world, bench_idle_rotation_frames);
criterion_main!(benches);
