//=========================================================================
// Scene Surface
//=========================================================================
//
// The mount point a cloud scene renders into: a DOM-like container that
// owns one element per note plus the focus overlay.
//
// Element `i` always represents note `i`. Hosts report activations by
// that index through the scene's input channel.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::note::{Note, NoteDetail};
use super::projection::VisualState;

//=== SceneSurface Trait ==================================================

/// Host-side rendering target for one mounted view.
pub trait SceneSurface {
    /// Scene center in the coordinate space input events use.
    fn center(&self) -> (f64, f64);

    /// Default projection radius in pixels.
    fn radius(&self) -> f64;

    /// Creates one point element per note, in order.
    fn build_points(&mut self, notes: &[Note]);

    /// Applies one frame's visual state to element `index`.
    fn write_point(&mut self, index: usize, state: &VisualState);

    /// Shows the modal backdrop and the expanded note.
    fn show_detail(&mut self, detail: &NoteDetail);

    /// Removes the backdrop and the expanded note.
    fn hide_detail(&mut self);

    /// Replaces the view with an empty-state message.
    fn show_empty(&mut self, message: &str);

    /// Removes every element and listener this surface created.
    fn clear(&mut self);
}

//=== Sizing ==============================================================

/// Share of the shorter side used as the sphere radius.
pub const RADIUS_FRACTION: f64 = 0.35;

/// Sphere radius for a surface of `size`, falling back to `fallback`
/// (typically the viewport) when the surface has not been laid out.
pub fn fit_radius(size: (f64, f64), fallback: Option<(f64, f64)>) -> f64 {
    let side = size.0.min(size.1);
    if side > 0.0 {
        return side * RADIUS_FRACTION;
    }
    fallback
        .map(|(w, h)| w.min(h).max(0.0) * RADIUS_FRACTION)
        .unwrap_or(0.0)
}

//=========================================================================
// Unit Tests
//=========================================================================
