//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use thought_cloud::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Configuration facade
pub use crate::engine::{CloudBuilder, Engine};

// Notes
pub use crate::core::note::{load_notes, parse_notes, Note, NoteLoadError};

// Host seams
pub use crate::core::scheduler::{FrameRequest, FrameScheduler, FrameStep};
pub use crate::core::surface::SceneSurface;

// Input
pub use crate::core::input::{InputEvent, InputSender};

// Scene lifecycle
pub use crate::core::scene::{CloudScene, ViewSwitcher};
pub use crate::core::projection::VisualState;
