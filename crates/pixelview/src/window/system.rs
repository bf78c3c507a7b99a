//! Composition root: GLFW lifetime, GL share group, and the resource pool
//!
//! [`WindowSystem`] owns what no single window can: the GLFW handle, a hidden
//! root window whose context anchors the GL share group every visible window
//! joins, and the lazily created shared resource pool. Windows themselves are
//! independent values: the system does not keep them alive and may even be
//! dropped before them.

use std::rc::{Rc, Weak};

use glfw::Context as _;

use crate::render::shared::{self, SharedQuadResources};
use crate::window::handle::Window;
use crate::window::surface::Surface;
use crate::window::WindowError;

/// Creates windows and manages the resources they share
pub struct WindowSystem {
    glfw: glfw::Glfw,
    share_root: glfw::PWindow,
    pool: Weak<SharedQuadResources>,
}

impl WindowSystem {
    /// Initialize the windowing subsystem.
    ///
    /// Fails with [`WindowError::SubsystemInit`] when GLFW cannot start;
    /// no window can be created this process run in that case. Also creates
    /// the hidden 1x1 share-root window; its context exists only so that all
    /// later windows can share GL objects.
    pub fn init() -> Result<Self, WindowError> {
        let mut glfw = glfw::init(glfw::fail_on_errors).map_err(|_| WindowError::SubsystemInit)?;

        apply_context_hints(&mut glfw);
        glfw.window_hint(glfw::WindowHint::Visible(false));

        let (share_root, _root_events) = glfw
            .create_window(1, 1, "pixelview share root", glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;

        log::debug!("windowing subsystem initialized");

        Ok(Self {
            glfw,
            share_root,
            pool: Weak::new(),
        })
    }

    /// Create an on-screen window.
    ///
    /// The surface is `width` x `height` pixels with the given title.
    /// `cap_to_display_rate` selects the frame pacing: `true` synchronizes
    /// buffer swaps to the display refresh, `false` swaps immediately.
    ///
    /// The first window triggers creation of the shared GPU resources; later
    /// windows reuse them and add only their own per-context vertex array.
    /// Any failure (surface creation, shader compile or link) aborts
    /// construction and returns the error; a `Window` is never handed out
    /// half-initialized.
    pub fn create_window(
        &mut self,
        title: &str,
        width: u32,
        height: u32,
        cap_to_display_rate: bool,
    ) -> Result<Window, WindowError> {
        apply_context_hints(&mut self.glfw);
        self.glfw.window_hint(glfw::WindowHint::SRgbCapable(true));
        // Kept hidden until setup is complete.
        self.glfw.window_hint(glfw::WindowHint::Visible(false));

        let (mut window, events) = self
            .share_root
            .create_shared(width, height, title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;

        window.make_current();

        self.glfw.set_swap_interval(if cap_to_display_rate {
            glfw::SwapInterval::Sync(1)
        } else {
            glfw::SwapInterval::None
        });

        let gl = unsafe {
            glow::Context::from_loader_function(|name| window.get_proc_address(name) as *const _)
        };

        window.set_key_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_close_polling(true);

        let resources = self.acquire_pool(&gl)?;

        // Vertex arrays are not shared between contexts; this window gets its
        // own, built over the shared buffers while its context is current.
        let vertex_array = match resources.create_vertex_array(&gl) {
            Ok(vertex_array) => vertex_array,
            Err(err) => {
                if shared::last_owner(&resources) {
                    resources.release(&gl);
                }
                return Err(err.into());
            }
        };

        window.show();

        log::info!(
            "window \"{title}\" created ({width}x{height}, vsync: {cap_to_display_rate})"
        );

        Ok(Window::new(
            Surface::new(window, events),
            gl,
            resources,
            vertex_array,
        ))
    }

    /// Hand out the shared pool, creating it on first use.
    ///
    /// Only a `Weak` is cached here, so the pool's lifetime is exactly the
    /// union of the windows holding it: the last window to drop releases the
    /// GL objects, and a failed creation publishes nothing.
    fn acquire_pool(&mut self, gl: &glow::Context) -> Result<Rc<SharedQuadResources>, WindowError> {
        if let Some(pool) = self.pool.upgrade() {
            return Ok(pool);
        }

        let pool = Rc::new(SharedQuadResources::create(gl)?);
        self.pool = Rc::downgrade(&pool);
        Ok(pool)
    }
}

/// Window hints for an OpenGL 3.3 core context.
fn apply_context_hints(glfw: &mut glfw::Glfw) {
    glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
        glfw::OpenGlProfileHint::Core,
    ));
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
}
