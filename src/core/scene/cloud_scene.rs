//=========================================================================
// Cloud Scene
//=========================================================================
//
// One mounted tag cloud: notes, their sphere points, the surface they
// render into and the machinery that animates them.
//
// Per frame:
//   on_frame(req) → Animator::accept → drain input → route selections
//                 → (unless paused) rotate all → project all → write
//                 → reschedule
//
// Notes, points and point elements share one index space and live
// exactly as long as the scene. Dropping the scene stops the animator
// before anything else is released.
//
//=========================================================================

//=== External Dependencies ===============================================

use chrono::Local;
use log::{debug, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::config::CloudConfig;
use crate::core::focus::FocusController;
use crate::core::geometry::{fibonacci_sphere, Vec3};
use crate::core::input::{InputController, InputEvent, InputSender, InputState};
use crate::core::note::{Note, NoteDetail};
use crate::core::projection::project;
use crate::core::rotation::RotationEngine;
use crate::core::scheduler::{Animator, FrameRequest, FrameScheduler, FrameStep};
use crate::core::surface::SceneSurface;

//=== CloudScene ==========================================================

/// A mounted, animating tag cloud.
///
/// # Lifecycle
///
/// 1. [`CloudScene::create`] builds points and point elements
/// 2. [`CloudScene::start`] writes the first frame and begins scheduling
/// 3. The host calls [`CloudScene::on_frame`] for every fired request
/// 4. [`CloudScene::stop`] or dropping the scene ends it for good
pub struct CloudScene<S: SceneSurface, F: FrameScheduler> {
    notes: Vec<Note>,
    points: Vec<Vec3>,
    surface: S,
    frames: F,
    rotation: RotationEngine,
    input: InputController,
    focus: FocusController,
    animator: Animator,
    radius: Option<f64>,
    pick_radius: f64,
    commands: Vec<InputEvent>,
}

impl<S: SceneSurface, F: FrameScheduler> CloudScene<S, F> {
    //--- Construction -----------------------------------------------------

    /// Builds a scene for `notes`.
    ///
    /// Returns `None` for an empty list: an empty cloud never animates.
    pub fn create(mut surface: S, frames: F, notes: Vec<Note>, config: &CloudConfig) -> Option<Self> {
        if notes.is_empty() {
            debug!(target: "cloud", "No notes, cloud scene not created");
            return None;
        }

        let points = fibonacci_sphere(notes.len());
        surface.build_points(&notes);

        let mut input = InputController::new();
        input.set_center(surface.center());

        info!(target: "cloud", "Cloud scene created with {} points", points.len());

        Some(Self {
            notes,
            points,
            surface,
            frames,
            rotation: RotationEngine::new(config.rotation),
            input,
            focus: FocusController::new(),
            animator: Animator::new(),
            radius: config.radius,
            pick_radius: config.pick_radius,
            commands: Vec::new(),
        })
    }

    //--- Lifecycle --------------------------------------------------------

    /// Writes the static first frame and starts the request chain.
    pub fn start(&mut self) {
        self.render();
        self.animator.start(&mut self.frames);
    }

    /// Suspends the compute step. The heartbeat keeps running.
    pub fn pause(&mut self) {
        self.animator.pause();
    }

    /// Lifts a manual pause. Has no effect while a note is focused.
    pub fn resume(&mut self) {
        if self.focus.is_focused() {
            debug!(target: "cloud", "Resume ignored while a note is focused");
            return;
        }
        self.animator.resume();
    }

    /// Cancels scheduling permanently. Idempotent.
    pub fn stop(&mut self) {
        self.animator.stop(&mut self.frames);
    }

    /// Stops the scene and releases everything it built.
    pub fn dispose(self) {
        drop(self);
    }

    //--- Frame Entry ------------------------------------------------------

    /// Host callback for a fired frame request.
    pub fn on_frame(&mut self, request: FrameRequest) -> FrameStep {
        if self.animator.accept(request) == FrameStep::Stale {
            return FrameStep::Stale;
        }

        self.pump_input();

        let step = if self.animator.is_paused() {
            FrameStep::Paused
        } else {
            self.tick();
            FrameStep::Tick
        };

        self.animator.reschedule(&mut self.frames);
        step
    }

    /// Rotates every point once, then projects and writes every point.
    pub fn tick(&mut self) {
        let angles = self.rotation.step(&mut self.points, self.input.state());
        trace!(target: "cloud", "Tick {} angles {:?}", self.rotation.ticks(), angles);
        self.render();
    }

    //--- Focus ------------------------------------------------------------

    /// Expands note `index` and pauses the animation.
    ///
    /// Returns `false` if a note is already focused or `index` is out of
    /// range.
    pub fn select(&mut self, index: usize) -> bool {
        if !self.focus.select(index, self.notes.len()) {
            return false;
        }
        self.animator.pause();
        let detail = NoteDetail::new(index, &self.notes[index], &Local::now());
        self.surface.show_detail(&detail);
        true
    }

    /// Closes the expanded note and resumes the animation.
    pub fn dismiss(&mut self) -> bool {
        if self.focus.dismiss().is_none() {
            return false;
        }
        self.surface.hide_detail();
        self.animator.resume();
        true
    }

    /// Applies every queued input event now.
    ///
    /// Frames call this before ticking. Hosts call it after delivering a
    /// selection or backdrop event, so focus never waits on a frame.
    pub fn pump_input(&mut self) {
        self.input.set_center(self.surface.center());

        let mut commands = std::mem::take(&mut self.commands);
        self.input.drain(&mut commands);

        for command in commands.drain(..) {
            match command {
                InputEvent::PointSelected(index) => {
                    self.select(index);
                }
                InputEvent::BackdropActivated => {
                    self.dismiss();
                }
                other => trace!(target: "cloud::input", "Unrouted event {:?}", other),
            }
        }

        self.commands = commands;
    }

    //--- Hit Testing ------------------------------------------------------

    /// Front-most point whose label lies under `(x, y)`.
    pub fn pick(&self, x: f64, y: f64) -> Option<usize> {
        let (cx, cy) = self.surface.center();
        let radius = self.projection_radius();
        let (dx, dy) = (x - cx, y - cy);

        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (i, project(p, radius)))
            .filter(|(_, v)| {
                let reach = self.pick_radius * v.scale;
                let (ex, ey) = (dx - v.offset_x, dy - v.offset_y);
                ex * ex + ey * ey <= reach * reach
            })
            .max_by_key(|(_, v)| v.stack_order)
            .map(|(i, _)| i)
    }

    //--- Query ------------------------------------------------------------

    /// Handle for host listeners to deliver input.
    pub fn input_sender(&self) -> InputSender {
        self.input.sender()
    }

    pub fn input_state(&self) -> &InputState {
        self.input.state()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn focused(&self) -> Option<usize> {
        self.focus.focused()
    }

    pub fn is_paused(&self) -> bool {
        self.animator.is_paused()
    }

    pub fn is_running(&self) -> bool {
        self.animator.is_running()
    }

    pub fn pending_frame(&self) -> Option<FrameRequest> {
        self.animator.pending()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn frames(&self) -> &F {
        &self.frames
    }

    //--- Internal Helpers -------------------------------------------------

    fn projection_radius(&self) -> f64 {
        self.radius.unwrap_or_else(|| self.surface.radius())
    }

    fn render(&mut self) {
        let radius = self.projection_radius();
        for (i, p) in self.points.iter().enumerate() {
            self.surface.write_point(i, &project(p, radius));
        }
    }
}

//=== Teardown ============================================================

impl<S: SceneSurface, F: FrameScheduler> Drop for CloudScene<S, F> {
    fn drop(&mut self) {
        self.animator.stop(&mut self.frames);
        self.surface.clear();
        info!(target: "cloud", "Cloud scene torn down ({} points)", self.points.len());
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
