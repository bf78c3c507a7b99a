//! # Window management
//!
//! - **`system`**: the composition root. Initializes GLFW once, anchors the
//!   GL share group, and hands out windows plus the lazily created shared
//!   resource pool.
//! - **`handle`**: the public, single-owner [`Window`](handle::Window) facade.
//! - **`surface`**: one native GLFW surface + context and its event receiver.
//! - **`input`**: routing of native events to per-window actions.
//!
//! The whole subsystem is single-threaded and cooperative: the caller drives
//! a loop that presents each window in turn, and the only input handled is
//! "escape closes the window".

use thiserror::Error;

pub mod handle;
pub mod system;

pub(crate) mod input;
pub(crate) mod surface;

pub use handle::Window;
pub use system::WindowSystem;

/// Window construction errors
///
/// Every variant is fatal for the operation that raised it; none leave a
/// half-initialized window behind.
#[derive(Error, Debug)]
pub enum WindowError {
    /// The native windowing subsystem failed to start; no window can be
    /// created this process run.
    #[error("GLFW initialization failed")]
    SubsystemInit,

    /// Native surface or context creation failed for this instance.
    #[error("window creation failed")]
    CreationFailed,

    /// Shared GPU resource creation failed while constructing this window.
    #[error(transparent)]
    Graphics(#[from] crate::render::shared::GraphicsError),
}
