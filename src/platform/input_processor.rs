//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit window events into scene InputEvents.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent → InputSender (scene queue)
//
// Stateful tracking: remembers the last cursor position (clicks carry no
// position in Winit) and which touch id is the primary one. Only the
// primary touch moves the sphere.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, MouseButton, TouchPhase},
    keyboard::{KeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::InputEvent;

//=== ViewCommand =========================================================

/// Keyboard commands handled by the host rather than the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ViewCommand {
    /// Switch between the cloud and the timeline.
    ToggleView,
    /// Same as activating the backdrop.
    Dismiss,
}

//=== InputProcessor ======================================================

/// Converts Winit events to scene InputEvents with cursor/touch tracking.
pub(crate) struct InputProcessor {
    cursor: Option<(f64, f64)>,
    primary_touch: Option<u64>,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self {
            cursor: None,
            primary_touch: None,
        }
    }

    //--- Pointer ----------------------------------------------------------

    /// Records the cursor and produces a pointer-move event.
    pub(crate) fn process_cursor_moved(&mut self, x: f64, y: f64) -> InputEvent {
        self.cursor = Some((x, y));
        InputEvent::PointerMoved { x, y }
    }

    /// Forgets the cursor and produces a pointer-leave event.
    pub(crate) fn process_cursor_left(&mut self) -> InputEvent {
        self.cursor = None;
        InputEvent::PointerLeft
    }

    /// Returns the cursor position for a left-button press.
    pub(crate) fn process_click(&self, button: MouseButton, state: ElementState) -> Option<(f64, f64)> {
        match (button, state) {
            (MouseButton::Left, ElementState::Pressed) => self.cursor,
            _ => None,
        }
    }

    //--- Touch ------------------------------------------------------------

    /// Converts a touch update. Secondary touches are ignored.
    pub(crate) fn process_touch(&mut self, id: u64, phase: TouchPhase, x: f64, y: f64) -> Option<InputEvent> {
        match phase {
            TouchPhase::Started => {
                if self.primary_touch.is_some() {
                    return None;
                }
                self.primary_touch = Some(id);
                Some(InputEvent::TouchMoved { x, y })
            }
            TouchPhase::Moved if self.primary_touch == Some(id) => {
                Some(InputEvent::TouchMoved { x, y })
            }
            TouchPhase::Ended | TouchPhase::Cancelled if self.primary_touch == Some(id) => {
                self.primary_touch = None;
                Some(InputEvent::TouchEnded)
            }
            _ => None,
        }
    }

    //--- Keyboard ---------------------------------------------------------

    /// Maps a key press to a host command. Repeats are ignored.
    pub(crate) fn process_key(&self, key: PhysicalKey, state: ElementState, repeat: bool) -> Option<ViewCommand> {
        if state != ElementState::Pressed || repeat {
            return None;
        }
        match key {
            PhysicalKey::Code(KeyCode::Tab) => Some(ViewCommand::ToggleView),
            PhysicalKey::Code(KeyCode::Escape) => Some(ViewCommand::Dismiss),
            _ => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
