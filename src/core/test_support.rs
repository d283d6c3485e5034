//=========================================================================
// Test Doubles
//
// Spy frame facility and recording surface shared by the core tests.
// Both keep their log behind `Rc<RefCell<_>>` so a test can inspect it
// after handing the double to a scene.
//
//=========================================================================

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use super::note::{Note, NoteDetail};
use super::projection::VisualState;
use super::scheduler::{FrameRequest, FrameScheduler};
use super::surface::SceneSurface;

//=== SpyFrames ===========================================================

#[derive(Debug, Default)]
pub(crate) struct FrameLog {
    next_id: u64,
    pub requested: Vec<FrameRequest>,
    pub cancelled: Vec<FrameRequest>,
    pub fired: Vec<FrameRequest>,
}

impl FrameLog {
    /// Requests neither cancelled nor fired yet.
    pub fn outstanding(&self) -> Vec<FrameRequest> {
        self.requested
            .iter()
            .copied()
            .filter(|r| !self.cancelled.contains(r) && !self.fired.contains(r))
            .collect()
    }
}

/// Frame facility that records every request and cancellation.
///
/// Clones share one log and one id counter, like a single host window.
#[derive(Debug, Clone, Default)]
pub(crate) struct SpyFrames {
    log: Rc<RefCell<FrameLog>>,
    unavailable: bool,
}

impl SpyFrames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn log(&self) -> Ref<'_, FrameLog> {
        self.log.borrow()
    }

    /// Marks every outstanding request as fired and returns them.
    pub fn take_outstanding(&self) -> Vec<FrameRequest> {
        let mut log = self.log.borrow_mut();
        let outstanding = log.outstanding();
        log.fired.extend(outstanding.iter().copied());
        outstanding
    }
}

impl FrameScheduler for SpyFrames {
    fn request_frame(&mut self) -> Option<FrameRequest> {
        if self.unavailable {
            return None;
        }
        let mut log = self.log.borrow_mut();
        log.next_id += 1;
        let request = FrameRequest(log.next_id);
        log.requested.push(request);
        Some(request)
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.log.borrow_mut().cancelled.push(request);
    }
}

//=== RecordingSurface ====================================================

#[derive(Debug, Default)]
pub(crate) struct SurfaceLog {
    pub built: Vec<Note>,
    pub points: Vec<Option<VisualState>>,
    pub writes: usize,
    pub detail: Option<NoteDetail>,
    pub empty: Option<String>,
    pub cleared: usize,
}

/// Surface that records what a scene writes into it.
#[derive(Debug, Clone)]
pub(crate) struct RecordingSurface {
    log: Rc<RefCell<SurfaceLog>>,
    center: (f64, f64),
    radius: f64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            log: Rc::default(),
            center: (200.0, 150.0),
            radius: 100.0,
        }
    }

    pub fn log(&self) -> Ref<'_, SurfaceLog> {
        self.log.borrow()
    }
}

impl SceneSurface for RecordingSurface {
    fn center(&self) -> (f64, f64) {
        self.center
    }

    fn radius(&self) -> f64 {
        self.radius
    }

    fn build_points(&mut self, notes: &[Note]) {
        let mut log = self.log.borrow_mut();
        log.built = notes.to_vec();
        log.points = vec![None; notes.len()];
        log.empty = None;
    }

    fn write_point(&mut self, index: usize, state: &VisualState) {
        let mut log = self.log.borrow_mut();
        log.points[index] = Some(*state);
        log.writes += 1;
    }

    fn show_detail(&mut self, detail: &NoteDetail) {
        self.log.borrow_mut().detail = Some(detail.clone());
    }

    fn hide_detail(&mut self) {
        self.log.borrow_mut().detail = None;
    }

    fn show_empty(&mut self, message: &str) {
        self.log.borrow_mut().empty = Some(message.to_string());
    }

    fn clear(&mut self) {
        let mut log = self.log.borrow_mut();
        log.built.clear();
        log.points.clear();
        log.detail = None;
        log.cleared += 1;
    }
}
