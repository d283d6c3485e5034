//=========================================================================
// Thought Cloud: Library Root
//
// Rotating 3D tag cloud for short timestamped notes.
//
// Responsibilities:
// - Expose the host-independent cloud engine (`core`)
// - Expose the configuration facade (`CloudBuilder` / `Engine`)
// - Keep host integrations (Winit window, browser DOM) private behind
//   their entry points
//
// Typical usage:
// ```no_run
// use thought_cloud::{core::load_notes, CloudBuilder};
//
// fn main() -> Result<(), Box<dyn std::error::Error>> {
//     let notes = load_notes("data.json");
//     CloudBuilder::new().build().run(notes)?;
//     Ok(())
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds geometry, rotation, projection, scheduling, focus and the
// scene lifecycle. It never touches a window or a DOM.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` is the native Winit host, `web` the wasm-bindgen host. Only
// one of them exists per target.
//
mod engine;

#[cfg(not(target_arch = "wasm32"))]
mod platform;

#[cfg(target_arch = "wasm32")]
mod web;

//--- Public Exports ------------------------------------------------------

pub use engine::{CloudBuilder, Engine};

#[cfg(not(target_arch = "wasm32"))]
pub use platform::PlatformError;

#[cfg(target_arch = "wasm32")]
pub use web::CloudView;
