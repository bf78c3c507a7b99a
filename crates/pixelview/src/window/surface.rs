//! One native GLFW surface and its event stream
//!
//! A [`Surface`] exclusively owns its `glfw::PWindow` plus the receiver GLFW
//! associates with it, so native events are always resolved to the right
//! instance without any opaque user-pointer round-tripping.

use glfw::Context as _;

use crate::window::input::{self, SurfaceEvent};

/// A live on-screen surface with its graphics context
///
/// Single-owner: not `Clone`, destroyed when dropped. The native window is
/// torn down by `PWindow`'s drop, strictly after the owning
/// [`Window`](crate::window::handle::Window) has finished its shared-resource
/// teardown.
pub(crate) struct Surface {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl Surface {
    pub(crate) fn new(
        window: glfw::PWindow,
        events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
    ) -> Self {
        Self { window, events }
    }

    /// Make this surface's GL context current on the calling thread.
    pub(crate) fn make_current(&mut self) {
        self.window.make_current();
    }

    /// Whether a close has been requested for this surface.
    pub(crate) fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Move the surface into its terminal close-requested state.
    pub(crate) fn request_close(&mut self) {
        self.window.set_should_close(true);
    }

    /// Poll native events. Process-wide side effect: this delivers pending
    /// events for every window, not just this one.
    pub(crate) fn poll_events(&mut self) {
        self.window.glfw.poll_events();
    }

    /// Drain this surface's pending events into routed actions.
    pub(crate) fn pending_events(&self) -> Vec<SurfaceEvent> {
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| input::route_event(&event))
            .collect()
    }

    /// Swap front and back buffers.
    pub(crate) fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    /// Current framebuffer size in pixels.
    pub(crate) fn framebuffer_size(&self) -> (i32, i32) {
        self.window.get_framebuffer_size()
    }
}
