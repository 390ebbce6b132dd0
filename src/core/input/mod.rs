//=========================================================================
// Input System
//
// Live input state and the polling context built on top of it.
//
// Architecture:
// ```text
// platform backend ── apply(event) ──▶ InputState (per window, shared)
//                                           ▲
// camera / game code ── query ──▶ InputPoller (current window)
// ```
//
// Responsibilities:
// - Keep each window's held keys, held buttons and cursor sample current
// - Provide sentinel-safe queries against one selected window
//
//=========================================================================

//=== Submodules ==========================================================

mod input_poller;
mod input_state;

//=== Public API ==========================================================

pub use input_poller::{InputPoller, NO_MOUSE_POSITION};
pub use input_state::{InputSource, InputState};
