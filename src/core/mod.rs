//=========================================================================
// Cloud Core
//
// Host-independent tag-cloud engine.
//
// Responsibilities:
// - Place notes on a sphere (geometry)
// - Rotate the sphere every tick from auto-rate or pointer input (rotation)
// - Project points to screen offset and depth cues (projection)
// - Drive ticks through the host's frame facility (scheduler)
// - Expand a selected note and pause the animation (focus)
// - Own scene lifecycle and view switching (scene)
//
// Notes:
// Nothing here touches a window or a DOM. Hosts implement
// `SceneSurface` and `FrameScheduler` and feed `InputEvent`s.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod config;
pub mod focus;
pub mod geometry;
pub mod input;
pub mod markup;
pub mod note;
pub mod projection;
pub mod rotation;
pub mod scene;
pub mod scheduler;
pub mod surface;

#[cfg(test)]
pub(crate) mod test_support;

//=== Re-exports ==========================================================

pub use config::CloudConfig;
pub use focus::{FocusController, FocusState};
pub use geometry::{fibonacci_sphere, Vec3};
pub use input::{InputController, InputEvent, InputSender, InputState};
pub use note::{load_notes, parse_notes, Note, NoteDetail, NoteLoadError, StickyStyle};
pub use projection::{project, VisualState};
pub use rotation::{RotationEngine, RotationParams};
pub use scene::{CloudScene, ViewSwitcher};
pub use scheduler::{Animator, FrameRequest, FrameScheduler, FrameStep};
pub use surface::SceneSurface;
