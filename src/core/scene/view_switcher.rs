//=========================================================================
// View Switcher
//=========================================================================
//
// Owns the currently mounted cloud scene, if any, and is the only place
// scenes are created and destroyed.
//
// Mounting always tears the previous scene down first. A scene is never
// reused across mounts: its points, notes and elements belong together.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, info, warn};

//=== Internal Dependencies ===============================================

use super::CloudScene;
use crate::core::config::CloudConfig;
use crate::core::input::InputSender;
use crate::core::note::{Note, NoteLoadError};
use crate::core::scheduler::{FrameRequest, FrameScheduler, FrameStep};
use crate::core::surface::SceneSurface;

//=== ViewSwitcher ========================================================

/// Mount/teardown entry points used by a host's theme selection.
pub struct ViewSwitcher<S: SceneSurface, F: FrameScheduler> {
    config: CloudConfig,
    scene: Option<CloudScene<S, F>>,
}

impl<S: SceneSurface, F: FrameScheduler> ViewSwitcher<S, F> {
    //--- Construction -----------------------------------------------------

    pub fn new(config: CloudConfig) -> Self {
        Self {
            config,
            scene: None,
        }
    }

    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    //--- Mounting ---------------------------------------------------------

    /// Builds the point elements for `notes` and starts the engine.
    ///
    /// A missing mount point short-circuits: nothing is built, nothing is
    /// scheduled. An empty list shows the empty-state message instead.
    /// Returns `true` if a scene is now running.
    pub fn mount(&mut self, surface: Option<S>, frames: F, notes: Vec<Note>) -> bool {
        self.teardown();

        let Some(mut surface) = surface else {
            debug!(target: "cloud", "No mount point, cloud view skipped");
            return false;
        };

        if notes.is_empty() {
            surface.show_empty(&self.config.empty_message);
            return false;
        }

        match CloudScene::create(surface, frames, notes, &self.config) {
            Some(mut scene) => {
                scene.start();
                self.scene = Some(scene);
                true
            }
            None => false,
        }
    }

    /// Like [`ViewSwitcher::mount`], treating a load failure as "no data".
    pub fn mount_loaded(
        &mut self,
        surface: Option<S>,
        frames: F,
        notes: Result<Vec<Note>, NoteLoadError>,
    ) -> bool {
        match notes {
            Ok(notes) => self.mount(surface, frames, notes),
            Err(e) => {
                warn!(target: "cloud", "{}", e);
                self.teardown();
                if let Some(mut surface) = surface {
                    surface.show_empty(&self.config.failure_message);
                }
                false
            }
        }
    }

    /// Stops and discards the mounted scene. Safe to call when unmounted.
    pub fn teardown(&mut self) {
        if let Some(scene) = self.scene.take() {
            info!(target: "cloud", "Tearing down cloud view");
            scene.dispose();
        }
    }

    //--- Frame Entry ------------------------------------------------------

    /// Routes a fired frame request to the mounted scene.
    pub fn on_frame(&mut self, request: FrameRequest) -> FrameStep {
        match self.scene.as_mut() {
            Some(scene) => scene.on_frame(request),
            None => FrameStep::Stale,
        }
    }

    /// Applies queued input to the mounted scene outside a frame.
    pub fn pump_input(&mut self) {
        if let Some(scene) = self.scene.as_mut() {
            scene.pump_input();
        }
    }

    //--- Query ------------------------------------------------------------

    pub fn is_mounted(&self) -> bool {
        self.scene.is_some()
    }

    pub fn scene(&self) -> Option<&CloudScene<S, F>> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut CloudScene<S, F>> {
        self.scene.as_mut()
    }

    /// Input handle for the mounted scene.
    pub fn input_sender(&self) -> Option<InputSender> {
        self.scene.as_ref().map(CloudScene::input_sender)
    }
}

impl<S: SceneSurface, F: FrameScheduler> Drop for ViewSwitcher<S, F> {
    fn drop(&mut self) {
        self.teardown();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{DEFAULT_EMPTY_MESSAGE, DEFAULT_FAILURE_MESSAGE};
    use crate::core::input::InputEvent;
    use crate::core::note::parse_notes;
    use crate::core::test_support::{RecordingSurface, SpyFrames};

    //--- Test Helpers -----------------------------------------------------

    fn notes(count: usize) -> Vec<Note> {
        (0..count)
            .map(|i| Note::new(format!("n{}", i), "2024-05-05T05:05:05"))
            .collect()
    }

    fn switcher() -> ViewSwitcher<RecordingSurface, SpyFrames> {
        ViewSwitcher::new(CloudConfig::default())
    }

    //=====================================================================
    // Mount
    //=====================================================================

    #[test]
    fn mount_starts_scene() {
        let mut views = switcher();
        let frames = SpyFrames::new();

        assert!(views.mount(Some(RecordingSurface::new()), frames.clone(), notes(3)));
        assert!(views.is_mounted());
        assert_eq!(frames.log().requested.len(), 1);
    }

    #[test]
    fn zero_notes_never_schedule() {
        let mut views = switcher();
        let frames = SpyFrames::new();
        let surface = RecordingSurface::new();

        assert!(!views.mount(Some(surface.clone()), frames.clone(), Vec::new()));
        assert!(!views.is_mounted());
        assert!(frames.log().requested.is_empty());
        assert_eq!(surface.log().empty.as_deref(), Some(DEFAULT_EMPTY_MESSAGE));
    }

    #[test]
    fn missing_mount_point_short_circuits() {
        let mut views = switcher();
        let frames = SpyFrames::new();

        assert!(!views.mount(None, frames.clone(), notes(4)));
        assert!(frames.log().requested.is_empty());
        assert!(views.input_sender().is_none());
    }

    #[test]
    fn load_failure_shows_failure_message() {
        let mut views = switcher();
        let surface = RecordingSurface::new();
        let frames = SpyFrames::new();

        let loaded = parse_notes("not json");
        assert!(!views.mount_loaded(Some(surface.clone()), frames.clone(), loaded));
        assert_eq!(surface.log().empty.as_deref(), Some(DEFAULT_FAILURE_MESSAGE));
        assert!(frames.log().requested.is_empty());
    }

    //=====================================================================
    // Teardown
    //=====================================================================

    #[test]
    fn teardown_when_unmounted_is_noop() {
        let mut views = switcher();
        views.teardown();
        views.teardown();
        assert!(!views.is_mounted());
    }

    #[test]
    fn remount_leaks_no_callback_from_previous_scene() {
        let mut views = switcher();
        let frames = SpyFrames::new();
        let first_surface = RecordingSurface::new();

        views.mount(Some(first_surface.clone()), frames.clone(), notes(3));
        for request in frames.take_outstanding() {
            views.on_frame(request);
        }
        let old_pending = views.scene().unwrap().pending_frame().unwrap();
        let old_writes = first_surface.log().writes;

        views.teardown();
        let second_surface = RecordingSurface::new();
        views.mount(Some(second_surface.clone()), frames.clone(), notes(5));

        // The old request was cancelled, never left outstanding
        assert!(frames.log().cancelled.contains(&old_pending));
        let outstanding = frames.log().outstanding();
        assert_eq!(outstanding.len(), 1);
        assert_ne!(outstanding[0], old_pending);

        // Even a host that fires it anyway reaches nothing
        assert_eq!(views.on_frame(old_pending), FrameStep::Stale);

        for request in frames.take_outstanding() {
            assert_eq!(views.on_frame(request), FrameStep::Tick);
        }
        assert_eq!(first_surface.log().writes, old_writes);
        assert_eq!(second_surface.log().built.len(), 5);
        assert_eq!(views.scene().unwrap().len(), 5);
    }

    #[test]
    fn mount_replaces_previous_scene() {
        let mut views = switcher();
        let frames = SpyFrames::new();
        let first = RecordingSurface::new();

        views.mount(Some(first.clone()), frames.clone(), notes(2));
        views.mount(Some(RecordingSurface::new()), frames.clone(), notes(7));

        assert_eq!(first.log().cleared, 1);
        assert_eq!(views.scene().unwrap().len(), 7);
        assert_eq!(frames.log().outstanding().len(), 1);
    }

    #[test]
    fn stale_sender_after_teardown_is_harmless() {
        let mut views = switcher();
        views.mount(Some(RecordingSurface::new()), SpyFrames::new(), notes(2));
        let sender = views.input_sender().unwrap();

        views.teardown();
        assert!(!sender.send(InputEvent::PointSelected(0)));
    }

    #[test]
    fn pumped_selection_needs_no_frame() {
        let mut views = switcher();
        let frames = SpyFrames::new();
        views.mount(Some(RecordingSurface::new()), frames.clone(), notes(3));
        let sender = views.input_sender().unwrap();

        sender.send(InputEvent::PointSelected(2));
        views.pump_input();

        assert_eq!(views.scene().unwrap().focused(), Some(2));
        assert_eq!(frames.log().fired.len(), 0);
    }

    #[test]
    fn pump_without_scene_is_noop() {
        let mut views = switcher();
        views.pump_input();
        assert!(!views.is_mounted());
    }

    #[test]
    fn frame_without_scene_is_stale() {
        let mut views = switcher();
        assert_eq!(views.on_frame(FrameRequest(1)), FrameStep::Stale);
    }
}
