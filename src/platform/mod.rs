//=========================================================================
// Platform Subsystem
//
// Native host for the cloud: a Winit window whose redraws are the frame
// callbacks and whose cursor/touch events feed the mounted scene.
//
// Architecture:
// ```text
//  Winit Event Loop
//   │
//   ├─ CursorMoved / CursorLeft / Touch
//   │     └─ InputProcessor ──> InputSender ──> scene input queue
//   │
//   ├─ MouseInput (left press)
//   │     └─ focused ? BackdropActivated : pick() ──> PointSelected
//   │           (applied immediately through pump_input)
//   │
//   ├─ KeyboardInput
//   │     ├─ Tab    ──> toggle cloud / timeline (teardown + mount)
//   │     └─ Escape ──> BackdropActivated
//   │
//   └─ RedrawRequested
//         └─ FrameQueue::take() ──> ViewSwitcher::on_frame(request)
// ```
//
// Key Design Decisions:
// - **Redraw = frame callback**: the scene asks for frames; the platform
//   never redraws on its own
// - **Input through the queue**: listeners only enqueue, the scene
//   applies input at the start of its next frame
// - **Teardown on close**: the scene is stopped before the loop exits
//
//=========================================================================

//=== Submodules ==========================================================

mod frames;
mod input_processor;
mod preview_surface;

//=== External Crates =====================================================

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::config::CloudConfig;
use crate::core::input::InputEvent;
use crate::core::note::{Note, NoteLoadError};
use crate::core::scene::ViewSwitcher;
use crate::core::surface::SceneSurface;
use frames::{FrameQueue, WindowFrames};
use input_processor::{InputProcessor, ViewCommand};
use preview_surface::PreviewSurface;

//=== PlatformError =======================================================

/// Native host errors. Both are fatal: without an event loop there is
/// nothing to show.
#[derive(Debug)]
pub enum PlatformError {
    /// Failed to create the event loop.
    EventLoopCreation(winit::error::EventLoopError),

    /// The event loop terminated with an error.
    EventLoopExecution(winit::error::EventLoopError),
}

//--- Trait Implementations -----------------------------------------------

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventLoopCreation(e) => write!(f, "Event loop creation failed: {}", e),
            Self::EventLoopExecution(e) => write!(f, "Event loop error: {}", e),
        }
    }
}

impl std::error::Error for PlatformError {}

//=== ViewMode ============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewMode {
    Cloud,
    Timeline,
}

//=== Platform ============================================================

/// Window host driving one `ViewSwitcher`.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(..)` stores config and notes
/// 2. **Execution**: `platform.run()` enters the Winit loop
/// 3. **Resume**: window created, cloud mounted
/// 4. **Shutdown**: close request tears the scene down, loop exits
pub(crate) struct Platform {
    window: Option<Arc<Window>>,
    window_size: (u32, u32),
    notes: Result<Vec<Note>, NoteLoadError>,
    views: ViewSwitcher<PreviewSurface, WindowFrames>,
    frame_queue: Rc<RefCell<FrameQueue>>,
    input_processor: InputProcessor,
    mode: ViewMode,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        config: CloudConfig,
        window_size: (u32, u32),
        notes: Result<Vec<Note>, NoteLoadError>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            window_size,
            notes,
            views: ViewSwitcher::new(config),
            frame_queue: Rc::default(),
            input_processor: InputProcessor::new(),
            mode: ViewMode::Cloud,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the Winit event loop until the window closes.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the loop cannot be created or exits
    /// with an error.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- View Management --------------------------------------------------

    fn mount_cloud(&mut self) {
        let window = self.window.clone();
        let surface = window.clone().map(PreviewSurface::new);
        let frames = WindowFrames::new(window, self.frame_queue.clone());

        match &self.notes {
            Ok(notes) => {
                self.views.mount(surface, frames, notes.clone());
            }
            Err(e) => {
                warn!(target: "platform", "{}", e);
                self.views.teardown();
                if let Some(mut surface) = surface {
                    surface.show_empty(&self.views.config().failure_message);
                }
            }
        }
        self.mode = ViewMode::Cloud;
    }

    fn mount_timeline(&mut self) {
        self.views.teardown();
        if let (Some(window), Ok(notes)) = (self.window.clone(), &self.notes) {
            PreviewSurface::new(window).show_timeline(notes);
        }
        self.mode = ViewMode::Timeline;
    }

    fn toggle_view(&mut self) {
        match self.mode {
            ViewMode::Cloud => self.mount_timeline(),
            ViewMode::Timeline => self.mount_cloud(),
        }
        info!(target: "platform", "Switched to {:?} view", self.mode);
    }

    //--- Input Routing ----------------------------------------------------

    fn send(&self, event: InputEvent) {
        if let Some(sender) = self.views.input_sender() {
            sender.send(event);
        }
    }

    /// Sends a focus event and applies it without waiting for a redraw.
    fn send_focus(&mut self, event: InputEvent) {
        self.send(event);
        self.views.pump_input();
    }

    fn click(&mut self, x: f64, y: f64) {
        let Some(scene) = self.views.scene() else {
            return;
        };

        let event = if scene.focused().is_some() {
            InputEvent::BackdropActivated
        } else if let Some(index) = scene.pick(x, y) {
            trace!(target: "platform::input", "Picked point {}", index);
            InputEvent::PointSelected(index)
        } else {
            return;
        };
        self.send_focus(event);
    }

    //--- Frames -----------------------------------------------------------

    fn fire_frames(&mut self) {
        let requests = self.frame_queue.borrow_mut().take();
        for request in requests {
            self.views.on_frame(request);
        }
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    /// Creates the window on first resume and mounts the cloud.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (mobile resume?)");
            return;
        }

        let (width, height) = self.window_size;
        let attrs = WindowAttributes::default()
            .with_title("Thoughts")
            .with_inner_size(LogicalSize::new(width, height));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                self.window = Some(Arc::new(window));
                self.mount_cloud();
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                self.views.teardown();
                event_loop.exit();
            }

            WindowEvent::CursorMoved { position, .. } => {
                let event = self.input_processor.process_cursor_moved(position.x, position.y);
                self.send(event);
            }

            WindowEvent::CursorLeft { .. } => {
                let event = self.input_processor.process_cursor_left();
                self.send(event);
            }

            WindowEvent::Touch(touch) => {
                if let Some(event) = self.input_processor.process_touch(
                    touch.id,
                    touch.phase,
                    touch.location.x,
                    touch.location.y,
                ) {
                    self.send(event);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some((x, y)) = self.input_processor.process_click(button, state) {
                    self.click(x, y);
                }
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input_processor.process_key(
                    key_event.physical_key,
                    key_event.state,
                    key_event.repeat,
                ) {
                    Some(ViewCommand::ToggleView) => self.toggle_view(),
                    Some(ViewCommand::Dismiss) => self.send_focus(InputEvent::BackdropActivated),
                    None => {}
                }
            }

            WindowEvent::RedrawRequested => self.fire_frames(),

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
