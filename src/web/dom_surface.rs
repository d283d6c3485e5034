//=========================================================================
// DOM Surface
//
// `SceneSurface` over a container element. Each note becomes one
// absolutely positioned element tagged with `data-index`; clicks are
// delegated from the container, so a single listener serves all points.
//
// Listener map:
// ```text
//  container  mousemove          -> PointerMoved
//             mouseleave         -> PointerLeft
//             touchmove (passive)-> TouchMoved
//             touchend           -> TouchEnded
//             click              -> closest([data-index]) -> PointSelected
//                                -> closest(.cloud-backdrop) -> BackdropActivated
//  detail     click              -> stopPropagation
// ```
//
// Clicks are applied right away through the host's pump; motion waits
// for the next frame. Every listener is owned by a `Listener` guard that
// unregisters itself on drop, so `clear()` leaves the container without
// handlers.
//
// The container needs a laid-out size. When its box is empty the radius
// falls back to the viewport.
//
//=========================================================================

//=== Standard Library Imports ============================================
use std::rc::Rc;

//=== External Crates =====================================================
use log::{debug, trace};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement, MouseEvent,
    TouchEvent,
};

//=== Internal Modules ====================================================
use crate::core::input::{InputEvent, InputSender};
use crate::core::markup::{escape_html, plain_text};
use crate::core::note::{Note, NoteDetail, StickyStyle};
use crate::core::projection::VisualState;
use crate::core::surface::{fit_radius, SceneSurface};

//=== Constants ===========================================================

const INDEX_ATTRIBUTE: &str = "data-index";
const BACKDROP_CLASS: &str = "cloud-backdrop";

//=== Listener ============================================================

/// Registered DOM listener, removed when dropped.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        passive: bool,
        handler: impl FnMut(Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);

        let registered = target.add_event_listener_with_callback_and_add_event_listener_options(
            kind,
            closure.as_ref().unchecked_ref(),
            &options,
        );
        if let Err(e) = registered {
            debug!(target: "web", "addEventListener({}) failed: {:?}", kind, e);
            return None;
        }

        Some(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

//=== Overlay =============================================================

/// Backdrop plus detail card, alive while a note is focused. Backdrop
/// clicks are handled by the container's delegated listener.
struct Overlay {
    backdrop: Element,
    _listeners: Vec<Listener>,
}

impl Drop for Overlay {
    fn drop(&mut self) {
        self.backdrop.remove();
    }
}

//=== DomSurface ==========================================================

pub(crate) struct DomSurface {
    document: Document,
    container: HtmlElement,
    points: Vec<Option<HtmlElement>>,
    listeners: Vec<Listener>,
    overlay: Option<Overlay>,
}

impl DomSurface {
    /// Looks up the mount point. `None` when the page has no such element.
    pub(crate) fn attach(container_id: &str) -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let container = document
            .get_element_by_id(container_id)?
            .dyn_into::<HtmlElement>()
            .ok()?;

        Some(Self {
            document,
            container,
            points: Vec::new(),
            listeners: Vec::new(),
            overlay: None,
        })
    }

    /// Wires the container's listeners to a scene's input queue. `pump`
    /// applies queued input immediately and runs after every click.
    pub(crate) fn bind_input(&mut self, sender: InputSender, pump: Rc<dyn Fn()>) {
        self.listeners.clear();
        let target: EventTarget = self.container.clone().into();
        let target = &target;

        let tx = sender.clone();
        self.push_listener(Listener::attach(target, "mousemove", false, move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                tx.send(InputEvent::PointerMoved {
                    x: f64::from(mouse.client_x()),
                    y: f64::from(mouse.client_y()),
                });
            }
        }));

        let tx = sender.clone();
        self.push_listener(Listener::attach(target, "mouseleave", false, move |_| {
            tx.send(InputEvent::PointerLeft);
        }));

        let tx = sender.clone();
        self.push_listener(Listener::attach(target, "touchmove", true, move |event| {
            let touch = event
                .dyn_ref::<TouchEvent>()
                .and_then(|t| t.touches().get(0));
            if let Some(touch) = touch {
                tx.send(InputEvent::TouchMoved {
                    x: f64::from(touch.client_x()),
                    y: f64::from(touch.client_y()),
                });
            }
        }));

        let tx = sender.clone();
        self.push_listener(Listener::attach(target, "touchend", false, move |_| {
            tx.send(InputEvent::TouchEnded);
        }));

        self.push_listener(Listener::attach(target, "click", false, move |event| {
            let Some(command) = click_command(&event) else {
                return;
            };
            trace!(target: "web", "Click -> {:?}", command);
            if sender.send(command) {
                pump();
            }
        }));
    }

    fn push_listener(&mut self, listener: Option<Listener>) {
        if let Some(listener) = listener {
            self.listeners.push(listener);
        }
    }

    fn create_div(&self, class: &str) -> Option<HtmlElement> {
        let element = self.document.create_element("div").ok()?;
        element.set_class_name(class);
        element.dyn_into::<HtmlElement>().ok()
    }
}

/// Focus command for a click inside the container, if any.
fn click_command(event: &Event) -> Option<InputEvent> {
    let target = event.target()?.dyn_into::<Element>().ok()?;

    if let Ok(Some(point)) = target.closest(&format!("[{}]", INDEX_ATTRIBUTE)) {
        let index = point.get_attribute(INDEX_ATTRIBUTE)?.parse().ok()?;
        return Some(InputEvent::PointSelected(index));
    }
    match target.closest(&format!(".{}", BACKDROP_CLASS)) {
        Ok(Some(_)) => Some(InputEvent::BackdropActivated),
        _ => None,
    }
}

fn viewport_size() -> Option<(f64, f64)> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some((width, height))
}

fn set_style(element: &HtmlElement, name: &str, value: &str) {
    if let Err(e) = element.style().set_property(name, value) {
        trace!(target: "web", "style {} rejected: {:?}", name, e);
    }
}

impl SceneSurface for DomSurface {
    fn center(&self) -> (f64, f64) {
        let rect = self.container.get_bounding_client_rect();
        (rect.left() + rect.width() / 2.0, rect.top() + rect.height() / 2.0)
    }

    fn radius(&self) -> f64 {
        let width = f64::from(self.container.client_width());
        let height = f64::from(self.container.client_height());
        if width.min(height) <= 0.0 {
            debug!(target: "web", "Container has no size ({}x{}), using viewport", width, height);
        }
        fit_radius((width, height), viewport_size())
    }

    fn build_points(&mut self, notes: &[Note]) {
        self.container.set_inner_html("");
        set_style(&self.container, "position", "relative");

        for (index, note) in notes.iter().enumerate() {
            // Slots stay aligned with note indices even when an element fails
            let Some(element) = self.create_div("cloud-item") else {
                self.points.push(None);
                continue;
            };
            if let Err(e) = element.set_attribute(INDEX_ATTRIBUTE, &index.to_string()) {
                debug!(target: "web", "Point {} not selectable, skipped: {:?}", index, e);
                self.points.push(None);
                continue;
            }
            element.set_text_content(Some(&plain_text(&note.content)));

            let sticky = StickyStyle::for_index(index);
            set_style(&element, "position", "absolute");
            set_style(&element, "left", "50%");
            set_style(&element, "top", "50%");
            set_style(&element, "cursor", "pointer");
            set_style(&element, "background", sticky.color);

            let attached = self.container.append_child(&element).is_ok();
            self.points.push(attached.then_some(element));
        }
        debug!(
            target: "web",
            "Built {} of {} point elements",
            self.points.iter().flatten().count(),
            notes.len()
        );
    }

    fn write_point(&mut self, index: usize, state: &VisualState) {
        let Some(element) = self.points.get(index).and_then(Option::as_ref) else {
            return;
        };
        let tilt = StickyStyle::for_index(index).tilt_deg;
        set_style(
            element,
            "transform",
            &format!(
                "translate(-50%, -50%) translate({:.2}px, {:.2}px) scale({:.3}) rotate({:.2}deg)",
                state.offset_x, state.offset_y, state.scale, tilt
            ),
        );
        set_style(element, "opacity", &format!("{:.3}", state.opacity));
        set_style(element, "z-index", &state.stack_order.to_string());
        set_style(element, "font-size", &format!("{:.3}em", state.font_size_em));
    }

    fn show_detail(&mut self, detail: &NoteDetail) {
        self.overlay = None;

        let (Some(backdrop), Some(card)) = (
            self.create_div(BACKDROP_CLASS),
            self.create_div("cloud-detail"),
        ) else {
            return;
        };
        card.set_inner_html(&format!(
            "<div class=\"thought-content\">{}</div><div class=\"thought-time\">{}</div>",
            detail.content_html,
            escape_html(&detail.time_label)
        ));
        if backdrop.append_child(&card).is_err() || self.container.append_child(&backdrop).is_err() {
            return;
        }

        let card_target: &EventTarget = card.as_ref();
        let listeners: Vec<Listener> = Listener::attach(card_target, "click", false, |event| {
            event.stop_propagation();
        })
        .into_iter()
        .collect();

        self.overlay = Some(Overlay {
            backdrop: backdrop.into(),
            _listeners: listeners,
        });
    }

    fn hide_detail(&mut self) {
        self.overlay = None;
    }

    fn show_empty(&mut self, message: &str) {
        self.container
            .set_inner_html(&format!("<div class=\"cloud-empty\">{}</div>", escape_html(message)));
    }

    fn clear(&mut self) {
        self.overlay = None;
        self.listeners.clear();
        for element in self.points.drain(..).flatten() {
            element.remove();
        }
        self.container.set_inner_html("");
    }
}
