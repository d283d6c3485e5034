//=========================================================================
// Scene System
//=========================================================================
//
// Cloud scene lifecycle and view switching.
//
// Architecture:
//   ViewSwitcher
//     └─ scene: Option<CloudScene>
//          ├─ notes / points (shared index space)
//          ├─ surface: SceneSurface
//          ├─ frames: FrameScheduler
//          └─ RotationEngine, InputController, FocusController, Animator
//
// Flow:
//   mount() → create() → start() → on_frame()* → teardown() → drop
//
//=========================================================================

//=== Module Declarations =================================================

mod cloud_scene;
mod view_switcher;

//=== Public API ==========================================================

pub use cloud_scene::CloudScene;
pub use view_switcher::ViewSwitcher;
