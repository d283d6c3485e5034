//=========================================================================
// Input State
//
// Snapshot of pointer influence on the sphere: the latest pointer/touch
// offset from the scene center and whether that offset currently drives
// the rotation.
//
// Notes:
// Leaving the scene clears `active` but keeps the last offset. The
// rotation engine ignores the offset while inactive.
//
//=========================================================================

//=== InputState ==========================================================

/// Pointer offset relative to the scene center plus the `active` flag.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputState {
    pub pointer_offset: (f64, f64),
    pub active: bool,
}

impl InputState {
    //--- Constructor ------------------------------------------------------
    pub fn new() -> Self {
        Self::default()
    }

    //--- track() ----------------------------------------------------------
    //
    // Records a pointer/touch position and activates pointer influence.
    // Returns `true` if the state changed.
    //
    pub(super) fn track(&mut self, position: (f64, f64), center: (f64, f64)) -> bool {
        let offset = (position.0 - center.0, position.1 - center.1);
        let changed = !self.active || self.pointer_offset != offset;
        self.pointer_offset = offset;
        self.active = true;
        changed
    }

    //--- release() --------------------------------------------------------
    //
    // Deactivates pointer influence, retaining the last offset.
    // Returns `true` if the state changed.
    //
    pub(super) fn release(&mut self) -> bool {
        std::mem::replace(&mut self.active, false)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
