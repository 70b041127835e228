use std::f64::consts::{PI, TAU};

use crate::core::{GeoPoint, Viewport};

/// Points with a view-axis component at or below this value sit behind the
/// horizon.
const HORIZON_EPSILON: f64 = 1e-9;

/// Maximum angular step used when walking the horizon between clip points.
const HORIZON_ARC_STEP_RAD: f64 = 5.0 * PI / 180.0;

/// Orthographic transform parameterized by a 3-axis rotation (degrees) and a
/// scale (globe radius in pixels), centered in the viewport.
///
/// Rotation follows the usual `[lambda, phi, gamma]` convention: the point
/// at `(-lambda, -phi)` ends up in the middle of the disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthographicProjection {
    center: (f64, f64),
    scale: f64,
    delta_lambda: f64,
    cos_delta_phi: f64,
    sin_delta_phi: f64,
    cos_delta_gamma: f64,
    sin_delta_gamma: f64,
}

impl OrthographicProjection {
    #[must_use]
    pub fn new(viewport: Viewport, rotation: [f64; 3], scale: f64) -> Self {
        let [lambda, phi, gamma] = rotation.map(f64::to_radians);
        Self {
            center: viewport.center(),
            scale,
            delta_lambda: lambda,
            cos_delta_phi: phi.cos(),
            sin_delta_phi: phi.sin(),
            cos_delta_gamma: gamma.cos(),
            sin_delta_gamma: gamma.sin(),
        }
    }

    #[must_use]
    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Rotates a geographic point onto the unit sphere in view space.
    ///
    /// Component 0 points at the viewer; components 1 and 2 are the screen
    /// right/up axes.
    #[must_use]
    pub fn rotate(&self, point: GeoPoint) -> [f64; 3] {
        let lambda = point.lon.to_radians() + self.delta_lambda;
        let phi = point.lat.to_radians();
        let cos_phi = phi.cos();
        let x = lambda.cos() * cos_phi;
        let y = lambda.sin() * cos_phi;
        let z = phi.sin();
        let k = z * self.cos_delta_phi + x * self.sin_delta_phi;
        [
            x * self.cos_delta_phi - z * self.sin_delta_phi,
            y * self.cos_delta_gamma - k * self.sin_delta_gamma,
            k * self.cos_delta_gamma + y * self.sin_delta_gamma,
        ]
    }

    /// Projects a point, returning `None` when it lies on the far hemisphere.
    #[must_use]
    pub fn project(&self, point: GeoPoint) -> Option<(f64, f64)> {
        let rotated = self.rotate(point);
        (rotated[0] > HORIZON_EPSILON).then(|| self.to_screen(rotated))
    }

    /// Projects a closed ring, clipping it against the horizon circle.
    ///
    /// Returns `None` when nothing of the ring is visible. Where the ring
    /// leaves and re-enters the visible hemisphere the gap is bridged along
    /// the horizon, taking the shorter way around.
    #[must_use]
    pub fn project_ring(&self, ring: &[GeoPoint]) -> Option<Vec<(f64, f64)>> {
        let rotated: Vec<[f64; 3]> = ring.iter().map(|&point| self.rotate(point)).collect();
        let visible = |p: &[f64; 3]| p[0] > HORIZON_EPSILON;

        let first_visible = rotated.iter().position(visible)?;
        if rotated.iter().all(visible) {
            return Some(rotated.iter().map(|&p| self.to_screen(p)).collect());
        }

        let count = rotated.len();
        let mut out = Vec::with_capacity(count + 8);
        let mut exit_angle: Option<f64> = None;
        out.push(self.to_screen(rotated[first_visible]));

        for step in 0..count {
            let a = rotated[(first_visible + step) % count];
            let b = rotated[(first_visible + step + 1) % count];
            match (visible(&a), visible(&b)) {
                (true, true) => out.push(self.to_screen(b)),
                (true, false) => {
                    let angle = horizon_angle(a, b);
                    out.push(self.horizon_point(angle));
                    exit_angle = Some(angle);
                }
                (false, true) => {
                    let entry = horizon_angle(b, a);
                    if let Some(exit) = exit_angle.take() {
                        self.push_horizon_arc(&mut out, exit, entry);
                    }
                    out.push(self.horizon_point(entry));
                    out.push(self.to_screen(b));
                }
                (false, false) => {}
            }
        }

        (out.len() >= 3).then_some(out)
    }

    fn to_screen(&self, rotated: [f64; 3]) -> (f64, f64) {
        (
            self.center.0 + rotated[1] * self.scale,
            self.center.1 - rotated[2] * self.scale,
        )
    }

    fn horizon_point(&self, angle: f64) -> (f64, f64) {
        (
            self.center.0 + angle.cos() * self.scale,
            self.center.1 - angle.sin() * self.scale,
        )
    }

    fn push_horizon_arc(&self, out: &mut Vec<(f64, f64)>, from: f64, to: f64) {
        let mut delta = (to - from).rem_euclid(TAU);
        if delta > PI {
            delta -= TAU;
        }
        let steps = (delta.abs() / HORIZON_ARC_STEP_RAD).ceil() as usize;
        for step in 1..steps {
            let angle = from + delta * (step as f64 / steps as f64);
            out.push(self.horizon_point(angle));
        }
    }
}

/// Screen angle of the point where segment `inside -> outside` crosses the
/// horizon plane.
fn horizon_angle(inside: [f64; 3], outside: [f64; 3]) -> f64 {
    let denominator = inside[0] - outside[0];
    let t = if denominator.abs() > f64::EPSILON {
        inside[0] / denominator
    } else {
        0.0
    };
    let y = inside[1] + (outside[1] - inside[1]) * t;
    let z = inside[2] + (outside[2] - inside[2]) * t;
    if y.abs() < f64::EPSILON && z.abs() < f64::EPSILON {
        inside[2].atan2(inside[1])
    } else {
        z.atan2(y)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::OrthographicProjection;
    use crate::core::{GeoPoint, Viewport};

    #[test]
    fn unrotated_origin_maps_to_center() {
        let projection = OrthographicProjection::new(Viewport::new(400, 200), [0.0, 0.0, 0.0], 80.0);
        let (x, y) = projection.project(GeoPoint::new(0.0, 0.0)).expect("visible");
        assert_abs_diff_eq!(x, 200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(y, 100.0, epsilon = 1e-9);

        let (x, _) = projection.project(GeoPoint::new(90.0 - 1e-6, 0.0)).expect("limb");
        assert_abs_diff_eq!(x, 280.0, epsilon = 1e-6);
        assert!(projection.project(GeoPoint::new(180.0, 0.0)).is_none());
    }

    #[test]
    fn negative_phi_brings_northern_latitude_to_center() {
        let projection =
            OrthographicProjection::new(Viewport::new(200, 200), [0.0, -25.0, 0.0], 50.0);
        let (x, y) = projection.project(GeoPoint::new(0.0, 25.0)).expect("visible");
        assert_abs_diff_eq!(x, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(y, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn lambda_shifts_longitudes() {
        let projection =
            OrthographicProjection::new(Viewport::new(200, 200), [-40.0, 0.0, 0.0], 50.0);
        let (x, y) = projection.project(GeoPoint::new(40.0, 0.0)).expect("visible");
        assert_abs_diff_eq!(x, 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(y, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn ring_crossing_horizon_is_clipped_to_disc() {
        let projection = OrthographicProjection::new(Viewport::new(200, 200), [0.0, 0.0, 0.0], 50.0);
        let ring = [
            GeoPoint::new(60.0, -10.0),
            GeoPoint::new(120.0, -10.0),
            GeoPoint::new(120.0, 10.0),
            GeoPoint::new(60.0, 10.0),
            GeoPoint::new(60.0, -10.0),
        ];
        let projected = projection.project_ring(&ring).expect("partially visible");
        for (x, y) in projected {
            let distance = ((x - 100.0).powi(2) + (y - 100.0).powi(2)).sqrt();
            assert!(distance <= 50.0 + 1e-6);
        }

        let hidden = [
            GeoPoint::new(150.0, -10.0),
            GeoPoint::new(170.0, -10.0),
            GeoPoint::new(170.0, 10.0),
            GeoPoint::new(150.0, -10.0),
        ];
        assert!(projection.project_ring(&hidden).is_none());
    }
}
