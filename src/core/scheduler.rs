//=========================================================================
// Animation Scheduler
//=========================================================================
//
// Frame-callback abstraction and the per-scene animation handle.
//
// Lifecycle:
//   Animator::start() ──request──> host ──callback(req)──> accept(req)
//        ▲                                                     │
//        └──────────────── reschedule() ◄──── tick (unless paused)
//
//   stop() cancels the pending request; later callbacks are stale.
//
// Pausing skips the compute step but keeps the request chain alive, so
// resume takes effect on the next frame.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, trace};

//=== FrameRequest ========================================================

/// Identity of one scheduled frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

//=== FrameScheduler Trait ================================================

/// Host frame-callback facility (`requestAnimationFrame`, winit redraw).
///
/// The host later invokes the scene's frame entry point with the request
/// it returned.
pub trait FrameScheduler {
    /// Schedules one callback for the next frame.
    ///
    /// Returns `None` if the facility is unavailable. The scene then stays
    /// on its static first frame.
    fn request_frame(&mut self) -> Option<FrameRequest>;

    /// Cancels a previously scheduled callback.
    fn cancel_frame(&mut self, request: FrameRequest);
}

//=== FrameStep ===========================================================

/// What a frame callback should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    /// Run the full tick, then reschedule.
    Tick,
    /// Skip the compute step, then reschedule.
    Paused,
    /// Not our pending request. Do nothing.
    Stale,
}

//=== AnimatorState =======================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AnimatorState {
    Idle,
    Running,
    Stopped,
}

//=== Animator ============================================================

/// Per-scene animation handle: pending request plus pause flag.
#[derive(Debug)]
pub struct Animator {
    state: AnimatorState,
    pending: Option<FrameRequest>,
    paused: bool,
}

impl Animator {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self {
            state: AnimatorState::Idle,
            pending: None,
            paused: false,
        }
    }

    //--- Lifecycle --------------------------------------------------------

    /// Begins the request chain. Has no effect once started or stopped.
    pub fn start<F: FrameScheduler>(&mut self, frames: &mut F) {
        if self.state != AnimatorState::Idle {
            debug!(target: "cloud", "Animator start ignored in state {:?}", self.state);
            return;
        }
        self.state = AnimatorState::Running;
        self.reschedule(frames);
    }

    /// Classifies an incoming callback and consumes the pending request.
    pub fn accept(&mut self, request: FrameRequest) -> FrameStep {
        if self.state != AnimatorState::Running || self.pending != Some(request) {
            trace!(target: "cloud", "Ignoring stale frame {:?}", request);
            return FrameStep::Stale;
        }
        self.pending = None;

        if self.paused {
            FrameStep::Paused
        } else {
            FrameStep::Tick
        }
    }

    /// Requests the next frame while running.
    pub fn reschedule<F: FrameScheduler>(&mut self, frames: &mut F) {
        if self.state != AnimatorState::Running || self.pending.is_some() {
            return;
        }
        self.pending = frames.request_frame();
        if self.pending.is_none() {
            debug!(target: "cloud", "Frame facility unavailable, animation halted");
        }
    }

    /// Permanently cancels the request chain. Idempotent.
    pub fn stop<F: FrameScheduler>(&mut self, frames: &mut F) {
        if self.state == AnimatorState::Stopped {
            return;
        }
        if let Some(request) = self.pending.take() {
            frames.cancel_frame(request);
        }
        self.state = AnimatorState::Stopped;
        debug!(target: "cloud", "Animator stopped");
    }

    //--- Pause Control ----------------------------------------------------

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    //--- Query ------------------------------------------------------------

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimatorState::Running
    }

    pub fn is_stopped(&self) -> bool {
        self.state == AnimatorState::Stopped
    }

    pub fn pending(&self) -> Option<FrameRequest> {
        self.pending
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::SpyFrames;

    #[test]
    fn start_requests_one_frame() {
        let mut frames = SpyFrames::new();
        let mut animator = Animator::new();

        animator.start(&mut frames);

        assert!(animator.is_running());
        assert_eq!(frames.log().requested.len(), 1);
        assert_eq!(animator.pending(), frames.log().requested.first().copied());
    }

    #[test]
    fn start_twice_does_not_double_schedule() {
        let mut frames = SpyFrames::new();
        let mut animator = Animator::new();

        animator.start(&mut frames);
        animator.start(&mut frames);

        assert_eq!(frames.log().requested.len(), 1);
    }

    #[test]
    fn accept_matches_pending_request_only() {
        let mut frames = SpyFrames::new();
        let mut animator = Animator::new();
        animator.start(&mut frames);
        let request = animator.pending().unwrap();

        assert_eq!(animator.accept(FrameRequest(request.0 + 99)), FrameStep::Stale);
        assert_eq!(animator.accept(request), FrameStep::Tick);
        assert_eq!(animator.accept(request), FrameStep::Stale, "consumed");
    }

    #[test]
    fn paused_frames_keep_heartbeat() {
        let mut frames = SpyFrames::new();
        let mut animator = Animator::new();
        animator.start(&mut frames);
        animator.pause();

        let request = animator.pending().unwrap();
        assert_eq!(animator.accept(request), FrameStep::Paused);
        animator.reschedule(&mut frames);
        assert_eq!(frames.log().requested.len(), 2);

        animator.resume();
        let request = animator.pending().unwrap();
        assert_eq!(animator.accept(request), FrameStep::Tick);
    }

    #[test]
    fn stop_cancels_pending_and_is_idempotent() {
        let mut frames = SpyFrames::new();
        let mut animator = Animator::new();
        animator.start(&mut frames);
        let request = animator.pending().unwrap();

        animator.stop(&mut frames);
        animator.stop(&mut frames);

        assert!(animator.is_stopped());
        assert_eq!(frames.log().cancelled, vec![request]);
        assert_eq!(animator.accept(request), FrameStep::Stale);
    }

    #[test]
    fn stop_before_start_is_noop() {
        let mut frames = SpyFrames::new();
        let mut animator = Animator::new();
        animator.stop(&mut frames);

        assert!(frames.log().cancelled.is_empty());
        animator.start(&mut frames);
        assert!(frames.log().requested.is_empty(), "stopped animator never restarts");
    }

    #[test]
    fn reschedule_after_stop_is_noop() {
        let mut frames = SpyFrames::new();
        let mut animator = Animator::new();
        animator.start(&mut frames);
        animator.stop(&mut frames);
        animator.reschedule(&mut frames);

        assert_eq!(frames.log().requested.len(), 1);
    }

    #[test]
    fn unavailable_facility_halts_quietly() {
        let mut frames = SpyFrames::unavailable();
        let mut animator = Animator::new();
        animator.start(&mut frames);

        assert!(animator.is_running());
        assert_eq!(animator.pending(), None);
    }
}
