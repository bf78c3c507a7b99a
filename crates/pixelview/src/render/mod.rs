//! # Presentation pipeline
//!
//! Everything between a caller's pixel buffer and the swapped back buffer:
//!
//! - **`frame`**: borrowed, validated view over a caller-owned RGBA8 buffer
//! - **`shared`**: the GPU resources (quad geometry, shader program, streaming
//!   texture) created once and shared by every window's context
//! - **`presenter`**: the per-window upload-and-draw protocol
//!
//! The pipeline draws a single textured quad per window; there is no scene
//! graph and no multi-pass rendering.

pub mod frame;
pub mod shared;

pub(crate) mod presenter;

pub use frame::{Frame, FrameError};
pub use shared::GraphicsError;
