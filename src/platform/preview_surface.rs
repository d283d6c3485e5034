//=========================================================================
// Preview Surface
//
// `SceneSurface` for the native window. The window has no text renderer,
// so the surface keeps the projected frame for logging, reports the
// front-most note, and shows the focused note in the title bar.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::sync::Arc;

//=== External Crates =====================================================
use chrono::Local;
use log::{debug, info, trace};
use winit::window::Window;

//=== Internal Modules ====================================================
use crate::core::markup::plain_text;
use crate::core::note::{format_time, Note, NoteDetail};
use crate::core::projection::VisualState;
use crate::core::surface::{fit_radius, SceneSurface};

//=== Constants ===========================================================

const BASE_TITLE: &str = "Thoughts";

//=== PreviewSurface ======================================================

pub(crate) struct PreviewSurface {
    window: Arc<Window>,
    labels: Vec<String>,
    frame: Vec<Option<VisualState>>,
}

impl PreviewSurface {
    pub(crate) fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            labels: Vec::new(),
            frame: Vec::new(),
        }
    }

    /// Shows the flat timeline in place of the cloud.
    pub(crate) fn show_timeline(&mut self, notes: &[Note]) {
        let now = Local::now();
        for note in notes {
            info!(
                target: "platform",
                "{}  {}",
                format_time(&note.time, &now),
                plain_text(&note.content)
            );
        }
        self.window
            .set_title(&format!("{} · timeline ({} notes)", BASE_TITLE, notes.len()));
    }

    /// Index of the nearest point in the last written frame.
    pub(crate) fn front_most(&self) -> Option<usize> {
        self.frame
            .iter()
            .enumerate()
            .filter_map(|(i, state)| state.map(|s| (i, s.stack_order)))
            .max_by_key(|&(_, order)| order)
            .map(|(i, _)| i)
    }

    fn size(&self) -> (f64, f64) {
        let size = self.window.inner_size();
        (f64::from(size.width), f64::from(size.height))
    }
}

impl SceneSurface for PreviewSurface {
    fn center(&self) -> (f64, f64) {
        let (w, h) = self.size();
        (w / 2.0, h / 2.0)
    }

    fn radius(&self) -> f64 {
        fit_radius(self.size(), None)
    }

    fn build_points(&mut self, notes: &[Note]) {
        self.labels = notes.iter().map(|n| plain_text(&n.content)).collect();
        self.frame = vec![None; notes.len()];
        self.window.set_title(BASE_TITLE);
        debug!(target: "platform", "Built {} preview points", notes.len());
    }

    fn write_point(&mut self, index: usize, state: &VisualState) {
        if let Some(slot) = self.frame.get_mut(index) {
            *slot = Some(*state);
        }
        if index + 1 == self.frame.len() {
            if let Some(front) = self.front_most() {
                trace!(target: "platform", "Front-most: {}", self.labels[front]);
            }
        }
    }

    fn show_detail(&mut self, detail: &NoteDetail) {
        let label = self.labels.get(detail.index).map(String::as_str).unwrap_or("");
        self.window
            .set_title(&format!("{} · {} · {}", BASE_TITLE, detail.time_label, label));
    }

    fn hide_detail(&mut self) {
        self.window.set_title(BASE_TITLE);
    }

    fn show_empty(&mut self, message: &str) {
        info!(target: "platform", "{}", message);
        self.window.set_title(&format!("{} · {}", BASE_TITLE, message));
    }

    fn clear(&mut self) {
        self.labels.clear();
        self.frame.clear();
        self.window.set_title(BASE_TITLE);
    }
}
