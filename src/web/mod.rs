//=========================================================================
// Web Host
//
// Browser entry point exported through wasm-bindgen. The page owns theme
// selection and data fetching; it calls `mount` with the fetched JSON
// when the cloud theme is picked and `teardown` when another theme is.
//
// ```text
//  JS                         CloudView
//  ──                         ─────────
//  new CloudView("stage") ──> frame callback installed (weak handle)
//  view.mount(json)       ──> parse -> DomSurface -> ViewSwitcher::mount
//  requestAnimationFrame  ──> pending.take() -> ViewSwitcher::on_frame
//  click in container     ──> InputSender -> ViewSwitcher::pump_input
//  view.teardown()        ──> ViewSwitcher::teardown (cancels frame)
// ```
//
//=========================================================================

//=== Submodules ==========================================================
mod dom_surface;
mod frames;

//=== Standard Library Imports ============================================
use std::cell::RefCell;
use std::rc::{Rc, Weak};

//=== External Crates =====================================================
use log::{debug, info};
use wasm_bindgen::prelude::*;

//=== Internal Modules ====================================================
use crate::core::config::CloudConfig;
use crate::core::note::parse_notes;
use crate::core::scene::ViewSwitcher;
use crate::core::surface::SceneSurface;
use dom_surface::DomSurface;
use frames::{AnimationFrames, FrameCallback, PendingFrame};

type SharedViews = Rc<RefCell<ViewSwitcher<DomSurface, AnimationFrames>>>;

//=== CloudView ===========================================================

/// Cloud theme bound to one container element.
///
/// The container should have a laid-out width and height (for example
/// through page CSS); its children are absolutely positioned and do not
/// size it. An empty container falls back to a viewport-sized radius.
#[wasm_bindgen]
pub struct CloudView {
    container_id: String,
    views: SharedViews,
    callback: FrameCallback,
    pending: PendingFrame,
}

#[wasm_bindgen]
impl CloudView {
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str) -> CloudView {
        let views: SharedViews = Rc::new(RefCell::new(ViewSwitcher::new(CloudConfig::default())));
        let pending = PendingFrame::default();
        let callback = FrameCallback::default();

        let weak: Weak<RefCell<_>> = Rc::downgrade(&views);
        let fired = pending.clone();
        *callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
            let Some(request) = fired.take() else {
                return;
            };
            let Some(views) = weak.upgrade() else {
                return;
            };
            match views.try_borrow_mut() {
                Ok(mut views) => {
                    views.on_frame(request);
                }
                Err(_) => debug!(target: "web", "View busy, frame {:?} dropped", request),
            };
        }));

        info!(target: "web", "CloudView created for #{}", container_id);
        CloudView {
            container_id: container_id.to_owned(),
            views,
            callback,
            pending,
        }
    }

    /// Mounts the cloud from a JSON array of notes. Returns `true` if the
    /// animation is running.
    pub fn mount(&mut self, notes_json: &str) -> bool {
        let surface = DomSurface::attach(&self.container_id);
        let frames = AnimationFrames::new(self.callback.clone(), self.pending.clone());

        let mut views = self.views.borrow_mut();
        let mounted = views.mount_loaded(surface, frames, parse_notes(notes_json));

        if let Some(scene) = views.scene_mut() {
            let sender = scene.input_sender();
            scene.surface_mut().bind_input(sender, self.pump());
        }
        mounted
    }

    /// Shows the failure message after the page's fetch went wrong.
    pub fn mount_failed(&mut self) {
        let mut views = self.views.borrow_mut();
        views.teardown();
        if let Some(mut surface) = DomSurface::attach(&self.container_id) {
            surface.show_empty(&views.config().failure_message);
        }
    }

    /// Stops the animation and removes every element and listener.
    pub fn teardown(&mut self) {
        self.views.borrow_mut().teardown();
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.views.borrow().is_mounted()
    }
}

impl CloudView {
    /// Handle that applies queued input to the mounted scene at once.
    fn pump(&self) -> Rc<dyn Fn()> {
        let weak = Rc::downgrade(&self.views);
        Rc::new(move || {
            let Some(views) = weak.upgrade() else {
                return;
            };
            match views.try_borrow_mut() {
                Ok(mut views) => views.pump_input(),
                Err(_) => debug!(target: "web", "View busy, input left for next frame"),
            };
        })
    }
}

impl Drop for CloudView {
    fn drop(&mut self) {
        self.views.borrow_mut().teardown();
        self.callback.borrow_mut().take();
    }
}
