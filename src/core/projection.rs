//=========================================================================
// Projector
//=========================================================================
//
// Orthographic projection with a depth cue. x/y map straight to screen
// offsets scaled by the projection radius; z only drives scale, opacity,
// stacking order and font size. There is no perspective divide.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::geometry::Vec3;

//=== VisualState =========================================================

/// Per-point visual state for one frame. Derived every tick, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisualState {
    /// Horizontal offset from the scene center, in pixels.
    pub offset_x: f64,
    /// Vertical offset from the scene center, in pixels.
    pub offset_y: f64,
    pub scale: f64,
    pub opacity: f64,
    /// Higher values draw on top.
    pub stack_order: i32,
    pub font_size_em: f64,
}

//=== depth() =============================================================

/// Maps `z` to `[0, 1]`, 1 being nearest to the viewer.
pub fn depth(z: f64) -> f64 {
    ((z + 1.0) / 2.0).clamp(0.0, 1.0)
}

//=== project() ===========================================================

/// Projects one rotated point for a scene of radius `radius`.
pub fn project(p: &Vec3, radius: f64) -> VisualState {
    let d = depth(p.z);
    VisualState {
        offset_x: p.x * radius,
        offset_y: p.y * radius,
        scale: 0.6 + d * 0.5,
        opacity: 0.3 + d * 0.7,
        stack_order: (d * 1000.0).floor() as i32,
        font_size_em: 0.75 + d * 0.3,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
