//=========================================================================
// Animation Frames
//
// `FrameScheduler` backed by `requestAnimationFrame`. All scenes of one
// `CloudView` share a single JS callback; the callback learns which
// request fired from the shared `pending` cell.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::cell::{Cell, RefCell};
use std::rc::Rc;

//=== External Crates =====================================================
use log::{debug, trace};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

//=== Internal Modules ====================================================
use crate::core::scheduler::{FrameRequest, FrameScheduler};

//=== Shared Handles ======================================================

pub(crate) type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;
pub(crate) type PendingFrame = Rc<Cell<Option<FrameRequest>>>;

//=== AnimationFrames =====================================================

pub(crate) struct AnimationFrames {
    window: Option<web_sys::Window>,
    callback: FrameCallback,
    pending: PendingFrame,
}

impl AnimationFrames {
    pub(crate) fn new(callback: FrameCallback, pending: PendingFrame) -> Self {
        Self {
            window: web_sys::window(),
            callback,
            pending,
        }
    }
}

impl FrameScheduler for AnimationFrames {
    fn request_frame(&mut self) -> Option<FrameRequest> {
        let window = self.window.as_ref()?;
        let callback = self.callback.borrow();
        let closure = callback.as_ref()?;

        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => {
                let request = FrameRequest(handle as u64);
                self.pending.set(Some(request));
                trace!(target: "web", "requestAnimationFrame -> {}", handle);
                Some(request)
            }
            Err(e) => {
                debug!(target: "web", "requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.pending.get() == Some(request) {
            self.pending.set(None);
        }
        if let Some(window) = &self.window {
            if let Err(e) = window.cancel_animation_frame(request.0 as i32) {
                debug!(target: "web", "cancelAnimationFrame failed: {:?}", e);
            }
        }
    }
}
