//=========================================================================
// Input Controller
//
// Owns the scene's `InputState` and the channel through which hosts
// deliver input asynchronously relative to the frame loop.
//
// Responsibilities:
// - Hand out `InputSender` handles to host event listeners
// - Drain queued events once per frame, before the rotation step
// - Fold pointer/touch motion into `InputState`
// - Forward selection/backdrop events to the scene untouched
//
// Notes:
// The channel decouples listeners from the scene: a listener never needs
// a borrow of the scene, it only enqueues. The tick reads the latest
// value after draining.
//
//=========================================================================

//=== Submodules ==========================================================
pub mod event;
mod input_state;

//=== External Crates =====================================================
use crossbeam_channel::{unbounded, Receiver, Sender};
use log::{debug, trace};

//=== Public API ==========================================================
pub use event::InputEvent;
pub use input_state::InputState;

//=== InputSender =========================================================

/// Cloneable handle used by host listeners to feed a scene.
///
/// Sending to a scene that has been torn down is harmless: the event is
/// dropped and `send` returns `false`.
#[derive(Debug, Clone)]
pub struct InputSender {
    tx: Sender<InputEvent>,
}

impl InputSender {
    /// Enqueues an event for the next frame.
    pub fn send(&self, event: InputEvent) -> bool {
        if self.tx.send(event).is_err() {
            trace!(target: "cloud::input", "Scene gone, dropping {:?}", event);
            return false;
        }
        true
    }
}

//=== InputController =====================================================

/// Tracks pointer influence for one mounted scene.
pub struct InputController {
    state: InputState,
    center: (f64, f64),
    tx: Sender<InputEvent>,
    rx: Receiver<InputEvent>,
}

impl InputController {
    //--- Construction -----------------------------------------------------
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self {
            state: InputState::new(),
            center: (0.0, 0.0),
            tx,
            rx,
        }
    }

    /// Returns a new sender handle for a host listener.
    pub fn sender(&self) -> InputSender {
        InputSender { tx: self.tx.clone() }
    }

    //--- Scene Geometry ---------------------------------------------------

    /// Updates the scene center used to turn positions into offsets.
    pub fn set_center(&mut self, center: (f64, f64)) {
        self.center = center;
    }

    pub fn center(&self) -> (f64, f64) {
        self.center
    }

    //--- Event Processing -------------------------------------------------

    /// Applies one event.
    ///
    /// Motion and leave events update `InputState` and return `None`.
    /// Selection and backdrop events are returned for the scene to route.
    pub fn handle(&mut self, event: InputEvent) -> Option<InputEvent> {
        match event {
            InputEvent::PointerMoved { x, y } | InputEvent::TouchMoved { x, y } => {
                if self.state.track((x, y), self.center) {
                    trace!(
                        target: "cloud::input",
                        "Pointer offset {:?}",
                        self.state.pointer_offset
                    );
                }
                None
            }
            InputEvent::PointerLeft | InputEvent::TouchEnded => {
                if self.state.release() {
                    debug!(target: "cloud::input", "Pointer influence released");
                }
                None
            }
            InputEvent::PointSelected(_) | InputEvent::BackdropActivated => Some(event),
        }
    }

    /// Drains every queued event.
    ///
    /// Events that are not pointer motion are appended to `commands` in
    /// arrival order.
    pub fn drain(&mut self, commands: &mut Vec<InputEvent>) {
        while let Ok(event) = self.rx.try_recv() {
            if let Some(command) = self.handle(event) {
                commands.push(command);
            }
        }
    }

    //--- Query ------------------------------------------------------------

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }
}

impl Default for InputController {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
