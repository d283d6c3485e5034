//=========================================================================
// Cloud Configuration
//
// Tunables shared by every host. Built through `CloudBuilder` in the
// crate root; the core only reads it.
//
//=========================================================================

//=== Internal Modules ====================================================
use super::rotation::RotationParams;

//=== Defaults ============================================================

pub const DEFAULT_EMPTY_MESSAGE: &str = "还没有碎碎念...";
pub const DEFAULT_FAILURE_MESSAGE: &str = "加载失败，请稍后重试。";
pub const DEFAULT_PICK_RADIUS: f64 = 24.0;

//=== CloudConfig =========================================================

/// Settings for mounted cloud scenes.
#[derive(Debug, Clone, PartialEq)]
pub struct CloudConfig {
    /// Control-law constants and renormalization period.
    pub rotation: RotationParams,

    /// Projection radius override. `None` uses the surface's radius.
    pub radius: Option<f64>,

    /// Hit-test radius in pixels at scale 1.
    pub pick_radius: f64,

    /// Shown when the note list is empty.
    pub empty_message: String,

    /// Shown when the note list could not be loaded.
    pub failure_message: String,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self {
            rotation: RotationParams::default(),
            radius: None,
            pick_radius: DEFAULT_PICK_RADIUS,
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            failure_message: DEFAULT_FAILURE_MESSAGE.to_string(),
        }
    }
}
