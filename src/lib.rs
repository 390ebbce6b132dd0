//=========================================================================
// Ember Engine - Library Root
//
// Public API surface of the engine.
//
// Responsibilities:
// - Expose the application driver (`Application`, `ApplicationBuilder`)
// - Expose the backend-independent systems (`core`, `renderer`, `camera`)
// - Keep the winit/glutin backend (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use ember::ApplicationBuilder;
//
// fn main() -> Result<(), ember::ApplicationError> {
//     let mut app = ApplicationBuilder::new().with_title("Sandbox").build()?;
//     app.run(|_frame, _timestep| {})
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds events, input polling, the window contract and timing.
// `renderer` holds GPU resource wrappers over the `RenderDevice` seam.
// `camera` holds the camera and its controllers.
//
pub mod camera;
pub mod core;
pub mod logging;
pub mod prelude;
pub mod renderer;

//--- Internal Modules ----------------------------------------------------
//
// `platform` implements `core::window::Window` on winit + glutin and is
// only reachable through `core::window::create()`.
//
mod application;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use application::{Application, ApplicationBuilder, ApplicationError, FrameContext};
