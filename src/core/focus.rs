//=========================================================================
// Focus Controller
//=========================================================================
//
// Two-state machine for the click-to-expand overlay.
//
//   Idle ──select(i)──> Focused { index: i }
//    ▲                         │
//    └──── dismiss() ◄─────────┘   (backdrop activation)
//
// At most one focused item exists. Selecting while focused and selecting
// an out-of-range index are rejected.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info};

//=== FocusState ==========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Idle,
    Focused {
        index: usize,
    },
}

//=== FocusController =====================================================

#[derive(Debug, Default)]
pub struct FocusController {
    state: FocusState,
}

impl FocusController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters `Focused` for `index` if idle and `index < count`.
    ///
    /// Returns `true` if the transition happened.
    pub fn select(&mut self, index: usize, count: usize) -> bool {
        if let FocusState::Focused { index: current } = self.state {
            debug!(
                target: "cloud::focus",
                "Selection of {} ignored, {} already focused",
                index,
                current
            );
            return false;
        }
        if index >= count {
            debug!(target: "cloud::focus", "Selection {} out of range ({})", index, count);
            return false;
        }

        info!(target: "cloud::focus", "Focused note {}", index);
        self.state = FocusState::Focused { index };
        true
    }

    /// Returns to `Idle`, yielding the index that was focused.
    pub fn dismiss(&mut self) -> Option<usize> {
        match std::mem::take(&mut self.state) {
            FocusState::Focused { index } => {
                info!(target: "cloud::focus", "Dismissed note {}", index);
                Some(index)
            }
            FocusState::Idle => None,
        }
    }

    pub fn state(&self) -> FocusState {
        self.state
    }

    pub fn focused(&self) -> Option<usize> {
        match self.state {
            FocusState::Focused { index } => Some(index),
            FocusState::Idle => None,
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused().is_some()
    }
}

//=== Tests ===============================================================
