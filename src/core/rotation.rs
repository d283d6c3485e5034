//=========================================================================
// Rotation Engine
//=========================================================================
//
// Incremental sphere rotation, one step per animation tick.
//
// Flow:
//   InputState → tick_angles() → (angle_x, angle_y)
//              → RotationEngine::step() → rotate_x, rotate_y per point
//
// Rotations compose onto the current positions every tick; no absolute
// angle is stored. Points are renormalized periodically to bound the
// floating-point drift that composition accumulates.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::geometry::Vec3;
use super::input::InputState;

//=== RotationParams ======================================================

/// Control-law constants for the rotation engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationParams {
    /// Radians per pixel of pointer offset (`k`).
    pub sensitivity: f64,

    /// Idle rotation about the X axis, radians per tick.
    pub auto_rate_x: f64,

    /// Idle rotation about the Y axis, radians per tick.
    pub auto_rate_y: f64,

    /// Renormalize every N ticks. 0 disables renormalization.
    pub renormalize_every: u32,
}

impl Default for RotationParams {
    fn default() -> Self {
        Self {
            sensitivity: 0.0001,
            auto_rate_x: 0.002,
            auto_rate_y: 0.003,
            renormalize_every: 60,
        }
    }
}

//=== Rotation Primitives =================================================

/// Rotates `p` about the X axis by `a` radians.
pub fn rotate_x(p: Vec3, a: f64) -> Vec3 {
    let (sin, cos) = a.sin_cos();
    Vec3::new(p.x, p.y * cos - p.z * sin, p.y * sin + p.z * cos)
}

/// Rotates `p` about the Y axis by `a` radians.
pub fn rotate_y(p: Vec3, a: f64) -> Vec3 {
    let (sin, cos) = a.sin_cos();
    Vec3::new(p.x * cos + p.z * sin, p.y, -p.x * sin + p.z * cos)
}

//=== tick_angles() =======================================================

/// Computes this tick's `(angle_x, angle_y)`.
///
/// While the pointer is active the angles follow its offset (vertical
/// offset tilts about X, horizontal offset spins about Y). Otherwise the
/// idle auto-rates apply.
pub fn tick_angles(input: &InputState, params: &RotationParams) -> (f64, f64) {
    if input.active {
        let (dx, dy) = input.pointer_offset;
        (dy * params.sensitivity, dx * params.sensitivity)
    } else {
        (params.auto_rate_x, params.auto_rate_y)
    }
}

//=== RotationEngine ======================================================

/// Applies per-tick rotation to a point set and tracks the tick count
/// used for periodic renormalization.
#[derive(Debug, Clone, Default)]
pub struct RotationEngine {
    params: RotationParams,
    ticks: u64,
}

impl RotationEngine {
    pub fn new(params: RotationParams) -> Self {
        Self { params, ticks: 0 }
    }

    pub fn params(&self) -> &RotationParams {
        &self.params
    }

    /// Number of steps applied so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    //--- step() -----------------------------------------------------------

    /// Rotates every point for one tick and returns the angles used.
    ///
    /// All points are updated before this returns, so a projection pass
    /// afterwards never mixes stale and fresh positions.
    pub fn step(&mut self, points: &mut [Vec3], input: &InputState) -> (f64, f64) {
        let angles = tick_angles(input, &self.params);
        self.rotate_all(points, angles);
        angles
    }

    /// Rotates every point by explicit angles (X first, then Y).
    pub fn rotate_all(&mut self, points: &mut [Vec3], (angle_x, angle_y): (f64, f64)) {
        self.ticks += 1;
        let renormalize = self.params.renormalize_every != 0
            && self.ticks % u64::from(self.params.renormalize_every) == 0;

        for p in points.iter_mut() {
            *p = rotate_y(rotate_x(*p, angle_x), angle_y);
            if renormalize {
                p.normalize();
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::fibonacci_sphere;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const EPS: f64 = 1e-12;

    //--- Test Helpers -----------------------------------------------------

    fn active(dx: f64, dy: f64) -> InputState {
        InputState {
            pointer_offset: (dx, dy),
            active: true,
        }
    }

    //=====================================================================
    // Primitive Tests
    //=====================================================================

    #[test]
    fn rotate_x_quarter_turn() {
        let p = rotate_x(Vec3::new(0.0, 1.0, 0.0), std::f64::consts::FRAC_PI_2);
        assert!(p.x.abs() < EPS);
        assert!(p.y.abs() < EPS);
        assert!((p.z - 1.0).abs() < EPS);
    }

    #[test]
    fn rotate_y_quarter_turn() {
        let p = rotate_y(Vec3::new(1.0, 0.0, 0.0), std::f64::consts::FRAC_PI_2);
        assert!(p.x.abs() < EPS);
        assert!(p.y.abs() < EPS);
        assert!((p.z + 1.0).abs() < EPS);
    }

    #[test]
    fn rotate_x_keeps_x_and_rotate_y_keeps_y() {
        let p = Vec3::new(0.3, -0.4, 0.5);
        assert_eq!(rotate_x(p, 0.7).x, 0.3);
        assert_eq!(rotate_y(p, 0.7).y, -0.4);
    }

    //=====================================================================
    // Control Law Tests
    //=====================================================================

    #[test]
    fn idle_uses_auto_rates() {
        let params = RotationParams::default();
        let angles = tick_angles(&InputState::new(), &params);
        assert_eq!(angles, (params.auto_rate_x, params.auto_rate_y));
    }

    #[test]
    fn active_pointer_drives_angles() {
        let params = RotationParams::default();
        let (ax, ay) = tick_angles(&active(120.0, -40.0), &params);
        assert_eq!(ax, -40.0 * params.sensitivity);
        assert_eq!(ay, 120.0 * params.sensitivity);
    }

    #[test]
    fn inactive_pointer_offset_is_ignored() {
        let params = RotationParams::default();
        let input = InputState {
            pointer_offset: (500.0, 500.0),
            active: false,
        };
        assert_eq!(
            tick_angles(&input, &params),
            (params.auto_rate_x, params.auto_rate_y)
        );
    }

    //=====================================================================
    // Engine Tests
    //=====================================================================

    #[test]
    fn step_counts_ticks() {
        let mut engine = RotationEngine::new(RotationParams::default());
        let mut points = fibonacci_sphere(4);
        engine.step(&mut points, &InputState::new());
        engine.step(&mut points, &InputState::new());
        assert_eq!(engine.ticks(), 2);
    }

    #[test]
    fn idle_rotation_is_deterministic() {
        let run = || {
            let mut engine = RotationEngine::new(RotationParams::default());
            let mut points = fibonacci_sphere(30);
            for _ in 0..500 {
                engine.step(&mut points, &InputState::new());
            }
            points
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn renormalized_random_rotation_stays_on_sphere() {
        let params = RotationParams {
            renormalize_every: 10,
            ..RotationParams::default()
        };
        let mut engine = RotationEngine::new(params);
        let mut rng = StdRng::seed_from_u64(0x9E37_79B9_7F4A_7C15);
        let mut points = fibonacci_sphere(16);

        for _ in 0..10_000 {
            let angles = (rng.gen_range(-0.05..0.05), rng.gen_range(-0.05..0.05));
            engine.rotate_all(&mut points, angles);
        }

        for p in &points {
            assert!((p.length() - 1.0).abs() < 1e-4, "drifted to {}", p.length());
        }
    }

    #[test]
    fn renormalize_disabled_still_rotates() {
        let params = RotationParams {
            renormalize_every: 0,
            ..RotationParams::default()
        };
        let mut engine = RotationEngine::new(params);
        let mut points = vec![Vec3::new(0.0, 0.0, 1.0)];
        engine.step(&mut points, &InputState::new());
        assert!(points[0].z < 1.0);
        assert!((points[0].length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn three_points_one_idle_tick_keep_latitudes() {
        let mut engine = RotationEngine::new(RotationParams::default());
        let mut points = fibonacci_sphere(3);
        engine.step(&mut points, &InputState::new());

        assert!((points[0].y - 1.0).abs() < 1e-5);
        assert!(points[1].y.abs() < 1e-2);
        assert!((points[2].y + 1.0).abs() < 1e-5);
    }
}
