//=========================================================================
// Sphere Geometry
//=========================================================================
//
// Point type and the Fibonacci-sphere distribution used to place one
// point per note on the unit sphere.
//
// Output order is index-stable: point `i` always belongs to note `i`.
//
//=========================================================================

//=== Constants ===========================================================

/// Golden angle in radians, `π * (3 - √5)`.
pub const GOLDEN_ANGLE: f64 = std::f64::consts::PI * (3.0 - 2.236_067_977_499_79);

//=== Vec3 ================================================================

/// A point in sphere-local space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean length.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Rescales to unit length. Zero vectors are left untouched.
    pub fn normalize(&mut self) {
        let len = self.length();
        if len > f64::EPSILON {
            self.x /= len;
            self.y /= len;
            self.z /= len;
        }
    }
}

//=== fibonacci_sphere() ==================================================

/// Distributes `count` points evenly over the unit sphere.
///
/// Point 0 sits on the north pole (`y = 1`) and, for `count > 1`, the last
/// point on the south pole (`y = -1`). `count` of 0 or 1 never divides by
/// zero.
pub fn fibonacci_sphere(count: usize) -> Vec<Vec3> {
    let span = count.saturating_sub(1).max(1) as f64;

    (0..count)
        .map(|i| {
            let i = i as f64;
            let y = 1.0 - (i / span) * 2.0;
            // Clamp guards the poles against a tiny negative from rounding
            let r = (1.0 - y * y).max(0.0).sqrt();
            let theta = i * GOLDEN_ANGLE;
            Vec3::new(theta.cos() * r, y, theta.sin() * r)
        })
        .collect()
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn golden_angle_matches_closed_form() {
        let expected = std::f64::consts::PI * (3.0 - 5f64.sqrt());
        assert!((GOLDEN_ANGLE - expected).abs() < 1e-12);
    }

    #[test]
    fn empty_count_yields_no_points() {
        assert!(fibonacci_sphere(0).is_empty());
    }

    #[test]
    fn single_point_sits_on_north_pole() {
        let points = fibonacci_sphere(1);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].y, 1.0);
        assert!((points[0].length() - 1.0).abs() < EPS);
    }

    #[test]
    fn every_point_is_unit_length() {
        for count in [1, 2, 3, 7, 50, 333] {
            let points = fibonacci_sphere(count);
            assert_eq!(points.len(), count);
            for (i, p) in points.iter().enumerate() {
                assert!(
                    (p.length() - 1.0).abs() < EPS,
                    "point {} of {} has length {}",
                    i,
                    count,
                    p.length()
                );
            }
        }
    }

    #[test]
    fn poles_are_first_and_last() {
        for count in [2, 3, 10, 101] {
            let points = fibonacci_sphere(count);
            assert_eq!(points[0].y, 1.0);
            assert!((points[count - 1].y + 1.0).abs() < EPS);
        }
    }

    #[test]
    fn latitude_decreases_monotonically() {
        let points = fibonacci_sphere(25);
        for pair in points.windows(2) {
            assert!(pair[0].y > pair[1].y);
        }
    }

    #[test]
    fn distribution_is_deterministic() {
        assert_eq!(fibonacci_sphere(40), fibonacci_sphere(40));
    }

    #[test]
    fn normalize_leaves_zero_vector_alone() {
        let mut v = Vec3::default();
        v.normalize();
        assert_eq!(v, Vec3::default());
    }

    #[test]
    fn normalize_restores_unit_length() {
        let mut v = Vec3::new(3.0, 4.0, 12.0);
        v.normalize();
        assert!((v.length() - 1.0).abs() < EPS);
    }
}
