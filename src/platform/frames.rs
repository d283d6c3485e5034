//=========================================================================
// Window Frames
//
// Frame-callback facility for the native host. A request asks Winit for
// a redraw; the next `RedrawRequested` fires every outstanding request.
//
// Notes:
// Winit has no per-request cancellation, so cancelling only removes the
// id from the shared queue. The redraw still arrives but has nothing to
// fire.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

//=== External Crates =====================================================
use log::trace;
use winit::window::Window;

//=== Internal Modules ====================================================
use crate::core::scheduler::{FrameRequest, FrameScheduler};

//=== FrameQueue ==========================================================

/// Outstanding frame requests, shared between the platform and the
/// mounted scene's `WindowFrames`.
#[derive(Debug, Default)]
pub(crate) struct FrameQueue {
    next_id: u64,
    pending: Vec<FrameRequest>,
}

impl FrameQueue {
    /// Removes and returns every outstanding request.
    pub(crate) fn take(&mut self) -> Vec<FrameRequest> {
        std::mem::take(&mut self.pending)
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    fn push(&mut self) -> FrameRequest {
        self.next_id += 1;
        let request = FrameRequest(self.next_id);
        self.pending.push(request);
        request
    }

    fn remove(&mut self, request: FrameRequest) {
        self.pending.retain(|r| *r != request);
    }
}

//=== WindowFrames ========================================================

/// `FrameScheduler` backed by `Window::request_redraw`.
pub(crate) struct WindowFrames {
    window: Option<Arc<Window>>,
    queue: Rc<RefCell<FrameQueue>>,
}

impl WindowFrames {
    pub(crate) fn new(window: Option<Arc<Window>>, queue: Rc<RefCell<FrameQueue>>) -> Self {
        Self { window, queue }
    }
}

impl FrameScheduler for WindowFrames {
    fn request_frame(&mut self) -> Option<FrameRequest> {
        let window = self.window.as_ref()?;
        let request = self.queue.borrow_mut().push();
        window.request_redraw();
        trace!(target: "platform", "Requested frame {:?}", request);
        Some(request)
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.queue.borrow_mut().remove(request);
        trace!(target: "platform", "Cancelled frame {:?}", request);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn without_window_facility_is_unavailable() {
        let queue = Rc::new(RefCell::new(FrameQueue::default()));
        let mut frames = WindowFrames::new(None, queue.clone());

        assert_eq!(frames.request_frame(), None);
        assert_eq!(queue.borrow().len(), 0);
    }

    #[test]
    fn queue_ids_are_unique_and_take_drains() {
        let mut queue = FrameQueue::default();
        let a = queue.push();
        let b = queue.push();
        assert_ne!(a, b);

        assert_eq!(queue.take(), vec![a, b]);
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn cancel_removes_only_that_request() {
        let mut queue = FrameQueue::default();
        let a = queue.push();
        let b = queue.push();

        queue.remove(a);
        assert_eq!(queue.take(), vec![b]);
    }
}
