pub mod geometry;
pub mod projection;
pub mod projection_state;
pub mod types;

pub use geometry::{GeoFeature, GeoPolygon, WorldGeometry};
pub use hit_test::rings_contain;
pub use projection::OrthographicProjection;
pub use projection_state::{
    DEFAULT_ROTATION, GLOBE_RADIUS_FACTOR, MAX_TILT, MIN_TILT, ProjectionState, ScaleBounds,
    globe_radius,
};
pub use types::{GeoPoint, Viewport};
