//! # Pixelview
//!
//! A small multi-window presentation engine: it takes externally supplied
//! RGBA8 pixel buffers and displays them in on-screen windows at interactive
//! rates, using GLFW for windowing and OpenGL 3.3 core for the upload-and-draw
//! path.
//!
//! ## Features
//!
//! - **Multiple Windows**: Any number of independently owned windows, each
//!   with its own surface and context.
//! - **Shared GPU Resources**: Quad geometry, shader program, and streaming
//!   texture are created once and shared across every window's context.
//! - **Cooperative Loop**: The caller drives presentation; an escape key or a
//!   native close request is surfaced through a caller-owned exit flag.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pixelview::{Frame, WindowSystem};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut system = WindowSystem::init()?;
//!     let mut window = system.create_window("viewer", 800, 600, true)?;
//!
//!     let pixels = vec![255u8; 800 * 600 * 4];
//!     let mut exit_requested = false;
//!
//!     while !exit_requested {
//!         let frame = Frame::from_rgba(&pixels, 800, 600)?;
//!         window.present(&frame, &mut exit_requested);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod render;
pub mod window;

mod logging;

pub use logging::init_logging;
pub use render::frame::{Frame, FrameError};
pub use render::shared::GraphicsError;
pub use window::handle::Window;
pub use window::system::WindowSystem;
pub use window::WindowError;
