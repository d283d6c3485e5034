//=========================================================================
// Thought Cloud Engine
//
// Configuration entry point and native runner.
//
// Architecture:
// ```text
//     CloudBuilder  ──build()──>  Engine  ──run(notes)──>  [Platform]
//         │                          │
//         ├─ with_sensitivity()      ├─ config()
//         ├─ with_auto_rate()        └─ view_switcher()
//         ├─ with_radius()
//         └─ with_window_size()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::{CloudConfig, FrameScheduler, SceneSurface, ViewSwitcher};

#[cfg(not(target_arch = "wasm32"))]
use crate::core::{Note, NoteLoadError};
#[cfg(not(target_arch = "wasm32"))]
use crate::platform::{Platform, PlatformError};

//=== CloudBuilder ========================================================

/// Builder for configuring an [`Engine`].
///
/// # Default Values
///
/// - **Sensitivity**: 0.0001 rad per pixel of pointer offset
/// - **Auto-rate**: 0.002 (X), 0.003 (Y) rad per tick
/// - **Renormalization**: every 60 ticks
/// - **Radius**: taken from the surface
/// - **Window**: 960x720 (native host only)
///
/// # Examples
///
/// ```
/// use thought_cloud::CloudBuilder;
///
/// let engine = CloudBuilder::new()
///     .with_sensitivity(0.0002)
///     .with_auto_rate(0.001, 0.004)
///     .build();
///
/// assert_eq!(engine.config().rotation.auto_rate_y, 0.004);
/// ```
pub struct CloudBuilder {
    config: CloudConfig,
    window_size: (u32, u32),
}

impl CloudBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: CloudConfig::default(),
            window_size: (960, 720),
        }
    }

    /// Sets radians of rotation per pixel of pointer offset.
    ///
    /// # Panics
    ///
    /// Panics if `sensitivity` is negative or not finite.
    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        assert!(
            sensitivity.is_finite() && sensitivity >= 0.0,
            "Sensitivity must be a non-negative number, got {}",
            sensitivity
        );
        self.config.rotation.sensitivity = sensitivity;
        self
    }

    /// Sets the idle rotation per tick about X and Y.
    ///
    /// # Panics
    ///
    /// Panics if either rate is not finite.
    pub fn with_auto_rate(mut self, rate_x: f64, rate_y: f64) -> Self {
        assert!(
            rate_x.is_finite() && rate_y.is_finite(),
            "Auto-rate must be finite, got ({}, {})",
            rate_x,
            rate_y
        );
        self.config.rotation.auto_rate_x = rate_x;
        self.config.rotation.auto_rate_y = rate_y;
        self
    }

    /// Sets how many ticks pass between renormalizations. 0 disables it.
    pub fn with_renormalize_every(mut self, ticks: u32) -> Self {
        self.config.rotation.renormalize_every = ticks;
        self
    }

    /// Fixes the projection radius instead of using the surface's.
    ///
    /// # Panics
    ///
    /// Panics if `radius <= 0.0`.
    pub fn with_radius(mut self, radius: f64) -> Self {
        assert!(radius > 0.0, "Radius must be positive, got {}", radius);
        self.config.radius = Some(radius);
        self
    }

    /// Sets the hit-test radius used by hosts that pick by position.
    ///
    /// # Panics
    ///
    /// Panics if `radius <= 0.0`.
    pub fn with_pick_radius(mut self, radius: f64) -> Self {
        assert!(radius > 0.0, "Pick radius must be positive, got {}", radius);
        self.config.pick_radius = radius;
        self
    }

    /// Sets the empty-state and load-failure messages.
    pub fn with_messages(mut self, empty: impl Into<String>, failure: impl Into<String>) -> Self {
        self.config.empty_message = empty.into();
        self.config.failure_message = failure.into();
        self
    }

    /// Sets the native window size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be non-zero");
        self.window_size = (width, height);
        self
    }

    /// Builds the engine.
    pub fn build(self) -> Engine {
        info!(
            "Building cloud engine (k: {}, auto: ({}, {}))",
            self.config.rotation.sensitivity,
            self.config.rotation.auto_rate_x,
            self.config.rotation.auto_rate_y
        );

        Engine {
            config: self.config,
            window_size: self.window_size,
        }
    }
}

impl Default for CloudBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Configured cloud engine.
///
/// Hosts either take a [`ViewSwitcher`] and drive it themselves, or, on
/// native targets, call [`Engine::run`] to open a window.
pub struct Engine {
    config: CloudConfig,
    window_size: (u32, u32),
}

impl Engine {
    pub fn config(&self) -> &CloudConfig {
        &self.config
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    /// Creates a view switcher for a custom host.
    pub fn view_switcher<S: SceneSurface, F: FrameScheduler>(&self) -> ViewSwitcher<S, F> {
        ViewSwitcher::new(self.config.clone())
    }

    /// Opens a window showing `notes` and blocks until it is closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop cannot be created or
    /// fails while running.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn run(self, notes: Result<Vec<Note>, NoteLoadError>) -> Result<(), PlatformError> {
        info!("Starting native cloud host");
        let platform = Platform::new(self.config, self.window_size, notes);
        platform.run()?;
        info!("Native cloud host shut down");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
