//=========================================================================
// Scene Input Events
//
// Host-neutral representation of everything a host can report to a
// mounted cloud scene. Platform layers (winit, DOM) translate their own
// events into these and push them through the scene's input channel.
//
// Responsibilities:
// - Represent pointer and touch motion in window/page coordinates
// - Represent point selection and overlay activation by index
//
//=========================================================================

//=== InputEvent ==========================================================

/// A single host event delivered to a cloud scene.
///
/// Positions are absolute (window or page space). The scene converts them
/// to center-relative offsets when the event is consumed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    //--- Continuous -------------------------------------------------------
    /// Pointer moved inside the scene bounds.
    PointerMoved { x: f64, y: f64 },

    /// First touch point moved inside the scene bounds.
    TouchMoved { x: f64, y: f64 },

    //--- Discrete ---------------------------------------------------------
    /// Pointer left the scene bounds.
    PointerLeft,

    /// Last touch lifted.
    TouchEnded,

    /// The point element at this index was activated.
    PointSelected(usize),

    /// The modal backdrop was activated.
    BackdropActivated,
}
