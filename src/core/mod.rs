//=========================================================================
// Core Systems
//
// Backend-independent engine systems.
//
// Responsibilities:
// - Typed events and the per-window dispatch table (`events`)
// - Live input state and the polling context (`input`)
// - The window contract and its configuration (`window`)
// - Frame timing (`timer`)
//
// Nothing in here names a platform type; the winit backend lives in
// `crate::platform`.
//
//=========================================================================

pub mod events;
pub mod input;
pub mod timer;
pub mod window;
