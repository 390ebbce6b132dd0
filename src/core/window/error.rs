//=========================================================================
// Window Errors
//=========================================================================

use thiserror::Error;

//=== ContextError ========================================================

/// Failures of the graphics context bound to a native window.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("graphics context creation failed: {0}")]
    Creation(String),

    #[error("window surface creation failed: {0}")]
    Surface(String),

    #[error("could not make graphics context current: {0}")]
    MakeCurrent(String),

    #[error("buffer swap failed: {0}")]
    SwapBuffers(String),

    #[error("could not set swap interval: {0}")]
    SwapInterval(String),

    #[error("graphics context used before init()")]
    NotInitialized,
}

//=== WindowError =========================================================

/// Failures reported by a [`Window`](super::Window) implementation.
#[derive(Debug, Error)]
pub enum WindowError {
    /// The native window (or its event loop) could not be created.
    #[error("window creation failed: {0}")]
    WindowCreationFailed(String),

    /// The native window exists but its graphics context did not come up.
    #[error("graphics context init failed")]
    ContextInitFailed(#[source] ContextError),

    /// Presenting a finished frame failed.
    #[error("frame presentation failed")]
    Present(#[source] ContextError),
}

//=========================================================================
// Unit Tests
//=========================================================================
