//! Public window facade
//!
//! A [`Window`] is the single-owner object applications hold: one surface,
//! one loaded GL context, its own vertex array over the shared buffers, and
//! a strong reference into the shared resource pool. Dropping it deletes the
//! vertex array, releases the shared GPU objects when it is the last window
//! alive (deletion needs a current, still-valid context), and only then
//! tears down the native surface.

use std::rc::Rc;

use glow::HasContext;

use crate::render::frame::Frame;
use crate::render::presenter;
use crate::render::shared::{self, SharedQuadResources};
use crate::window::surface::Surface;

/// An on-screen window that displays caller-provided RGBA frames
///
/// Created through [`WindowSystem::create_window`](crate::window::system::WindowSystem::create_window).
/// Exclusively owned and intentionally not `Clone`; GLFW contexts are also
/// not safe to drive from multiple threads, so this type is not `Send`.
pub struct Window {
    surface: Surface,
    gl: glow::Context,
    resources: Rc<SharedQuadResources>,
    vertex_array: glow::NativeVertexArray,
}

impl Window {
    pub(crate) fn new(
        surface: Surface,
        gl: glow::Context,
        resources: Rc<SharedQuadResources>,
        vertex_array: glow::NativeVertexArray,
    ) -> Self {
        Self {
            surface,
            gl,
            resources,
            vertex_array,
        }
    }

    /// Upload `frame` into the shared texture and display it.
    ///
    /// If this window has been asked to close, nothing is drawn and
    /// `exit_flag` is set instead; this is the only way the caller's loop
    /// learns to stop. Never fails: per-frame driver errors are logged and
    /// the loop stays alive.
    pub fn present(&mut self, frame: &Frame<'_>, exit_flag: &mut bool) {
        presenter::present_frame(
            &self.gl,
            &self.resources,
            self.vertex_array,
            &mut self.surface,
            frame,
            exit_flag,
        );
    }

    /// Whether this window is in its terminal close-requested state.
    pub fn close_requested(&self) -> bool {
        self.surface.should_close()
    }

    /// Programmatically request this window to close.
    pub fn request_close(&mut self) {
        self.surface.request_close();
    }

    /// Current framebuffer size in pixels.
    pub fn framebuffer_size(&self) -> (i32, i32) {
        self.surface.framebuffer_size()
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        // Releasing GL objects requires a current context, and this window's
        // context is about to be the one destroyed.
        self.surface.make_current();

        // The vertex array is per-context state owned by this window alone.
        unsafe {
            self.gl.delete_vertex_array(self.vertex_array);
        }

        if shared::last_owner(&self.resources) {
            self.resources.release(&self.gl);
        }

        log::debug!("window destroyed");
        // Surface drops after this, destroying the native window.
    }
}
