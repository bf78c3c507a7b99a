//! Per-window upload-and-draw protocol
//!
//! One call = one displayed frame: make the window's context current, honor
//! a pending close request, route this window's input events, re-upload the
//! whole pixel buffer into the shared texture, draw the quad, swap.
//!
//! This never fails. Driver errors are drained into the log and the loop
//! keeps running; a garbled frame beats a crashed application.

use glow::HasContext;

use crate::render::frame::Frame;
use crate::render::shared::{self, SharedQuadResources, QUAD_INDEX_COUNT};
use crate::window::input::SurfaceEvent;
use crate::window::surface::Surface;

/// Present one frame on `surface`, setting `exit_flag` instead of drawing if
/// the window has been asked to close.
///
/// Polling happens process-wide: presenting any one window delivers pending
/// native events for all of them, so callers must present every live window
/// each loop iteration to keep close/resize delivery prompt everywhere.
pub(crate) fn present_frame(
    gl: &glow::Context,
    resources: &SharedQuadResources,
    vertex_array: glow::NativeVertexArray,
    surface: &mut Surface,
    frame: &Frame<'_>,
    exit_flag: &mut bool,
) {
    // Several windows interleave presents from one thread, so the context
    // must be re-made current on every call.
    surface.make_current();

    shared::drain_gl_errors(gl, "present:begin");

    // Terminal state: observed, never reset. The exit flag is the caller's
    // only cancellation channel.
    if surface.should_close() {
        *exit_flag = true;
        return;
    }

    surface.poll_events();

    for event in surface.pending_events() {
        match event {
            SurfaceEvent::CloseRequested => surface.request_close(),
            // Applied while this window's context is current, so one window's
            // resize can never clobber another window's viewport.
            SurfaceEvent::ViewportResized(width, height) => unsafe {
                gl.viewport(0, 0, width, height);
            },
        }
    }

    unsafe {
        gl.clear(glow::COLOR_BUFFER_BIT);

        gl.use_program(Some(resources.program));

        gl.active_texture(glow::TEXTURE0);
        gl.uniform_1_i32(resources.sampler_location.as_ref(), 0);
        gl.bind_texture(glow::TEXTURE_2D, Some(resources.texture));

        // Full re-upload every frame; no sub-region updates.
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA8 as i32,
            frame.width() as i32,
            frame.height() as i32,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelUnpackData::Slice(Some(frame.pixels())),
        );

        // This window's own vertex array; its recorded element binding points
        // at the shared index buffer.
        gl.bind_vertex_array(Some(vertex_array));

        gl.draw_elements(glow::TRIANGLES, QUAD_INDEX_COUNT, glow::UNSIGNED_INT, 0);

        gl.bind_texture(glow::TEXTURE_2D, None);
        gl.use_program(None);
    }

    surface.swap_buffers();

    shared::drain_gl_errors(gl, "present:draw");
}
