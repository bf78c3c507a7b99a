//! GPU resources shared by every window
//!
//! All windows draw the same unit quad with the same shader program and
//! stream their pixels through the same texture object, so these live in a
//! single pool created once per process run. Windows hold the pool through
//! an [`Rc`]; the last surviving window releases the GL objects (while its
//! own context is still current and valid), guarded by a released flag so a
//! second teardown path can never double-free, whatever the destruction
//! order.
//!
//! Object sharing across contexts works because every window's context is
//! created in the same GL share group (see `window::system`). Share groups
//! cover buffers, textures, and programs only: vertex array objects are
//! container objects and stay per-context, so each window builds its own
//! vertex array over the shared buffers via
//! [`SharedQuadResources::create_vertex_array`] and deletes it in its own
//! teardown.

use std::cell::Cell;
use std::rc::Rc;

use glow::HasContext;
use thiserror::Error;

/// Shared-resource creation errors
///
/// All of these are fatal for the window under construction: no half-usable
/// window is ever returned to the caller.
#[derive(Error, Debug)]
pub enum GraphicsError {
    /// The driver refused to allocate a GL object.
    #[error("failed to allocate GPU object: {0}")]
    Allocate(String),

    /// Shader compilation failed; carries the driver's compiler output.
    #[error("failed to compile {stage} shader:\n{log}")]
    ShaderCompile {
        /// Which shader stage failed.
        stage: &'static str,
        /// Compiler diagnostics from the driver.
        log: String,
    },

    /// Program linking failed; carries the driver's linker output.
    #[error("failed to link shader program:\n{log}")]
    ProgramLink {
        /// Linker diagnostics from the driver.
        log: String,
    },
}

const VERTEX_SHADER_SRC: &str = "\
#version 330 core
layout (location = 0) in vec2 position;
layout (location = 1) in vec2 aTexCoord;
out vec2 TexCoord;
void main()
{
    gl_Position = vec4(position.xy, 0.0, 1.0);
    TexCoord = aTexCoord;
}
";

const FRAGMENT_SHADER_SRC: &str = "\
#version 330 core
layout (location = 0) out vec4 FragColor;
in vec2 TexCoord;
uniform sampler2D t_Texture;
void main()
{
    FragColor = texture(t_Texture, TexCoord);
}
";

// Interleaved X, Y, U, V for a full-screen quad.
const QUAD_VERTICES: [f32; 16] = [
    -1.0, -1.0, 0.0, 0.0, // 0
    1.0, -1.0, 1.0, 0.0, // 1
    1.0, 1.0, 1.0, 1.0, // 2
    -1.0, 1.0, 0.0, 1.0, // 3
];

const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Number of indices issued per draw (two triangles forming the quad).
pub(crate) const QUAD_INDEX_COUNT: i32 = QUAD_INDICES.len() as i32;

const VERTEX_STRIDE: i32 = (4 * std::mem::size_of::<f32>()) as i32;
const UV_OFFSET: i32 = (2 * std::mem::size_of::<f32>()) as i32;

/// The process-shared GL objects behind every window's presentation call
///
/// Immutable after creation except for the texture contents (re-uploaded
/// every frame) and the released flag. Holds only objects GL actually shares
/// across contexts; the per-context vertex array lives on each window.
pub struct SharedQuadResources {
    pub(crate) vertex_buffer: glow::NativeBuffer,
    pub(crate) index_buffer: glow::NativeBuffer,
    pub(crate) program: glow::NativeProgram,
    pub(crate) texture: glow::NativeTexture,
    pub(crate) sampler_location: Option<glow::NativeUniformLocation>,
    released: Cell<bool>,
}

impl SharedQuadResources {
    /// Upload the quad geometry, compile and link the shader program, and
    /// allocate the streaming texture.
    ///
    /// Requires a current GL context. On failure every object created so far
    /// is deleted before the error propagates, so a constructor aborting
    /// mid-way never leaves partially-initialized shared state behind.
    pub(crate) fn create(gl: &glow::Context) -> Result<Self, GraphicsError> {
        let buffers = unsafe { QuadBuffers::create(gl) }?;

        let program = match unsafe { link_quad_program(gl) } {
            Ok(program) => program,
            Err(err) => {
                unsafe { buffers.delete(gl) };
                return Err(err);
            }
        };

        let texture = match unsafe { gl.create_texture() } {
            Ok(texture) => texture,
            Err(msg) => {
                unsafe {
                    buffers.delete(gl);
                    gl.delete_program(program);
                }
                return Err(GraphicsError::Allocate(msg));
            }
        };

        let sampler_location;
        unsafe {
            gl.use_program(Some(program));

            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_S,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_WRAP_T,
                glow::CLAMP_TO_EDGE as i32,
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);

            sampler_location = gl.get_uniform_location(program, "t_Texture");
            if sampler_location.is_none() {
                // Not fatal: the draw still runs, the sampler just stays at unit 0.
                log::warn!("sampler uniform `t_Texture` not found in shader program");
            }
            gl.uniform_1_i32(sampler_location.as_ref(), 0);

            gl.use_program(None);
            gl.bind_texture(glow::TEXTURE_2D, None);
        }

        log::info!("shared quad resources created");

        Ok(Self {
            vertex_buffer: buffers.vertex_buffer,
            index_buffer: buffers.index_buffer,
            program,
            texture,
            sampler_location,
            released: Cell::new(false),
        })
    }

    /// Build this window's vertex array over the shared buffers.
    ///
    /// Vertex arrays are container objects and are not shared between
    /// contexts, so every window creates one in its own context (which must
    /// be current) and deletes it in its own teardown. The element buffer
    /// binding is recorded into the vertex array here, pointing at the
    /// shared index buffer.
    pub(crate) fn create_vertex_array(
        &self,
        gl: &glow::Context,
    ) -> Result<glow::NativeVertexArray, GraphicsError> {
        unsafe {
            let vertex_array = gl.create_vertex_array().map_err(GraphicsError::Allocate)?;

            gl.bind_vertex_array(Some(vertex_array));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vertex_buffer));

            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, glow::FLOAT, false, VERTEX_STRIDE, 0);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 2, glow::FLOAT, false, VERTEX_STRIDE, UV_OFFSET);

            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.index_buffer));

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(vertex_array)
        }
    }

    /// Free every shared GL object.
    ///
    /// Idempotent: only the first call deletes anything. Must run with a
    /// still-valid context current, and only once no window will draw again.
    pub(crate) fn release(&self, gl: &glow::Context) {
        if !self.mark_released() {
            return;
        }

        unsafe {
            gl.delete_buffer(self.vertex_buffer);
            gl.delete_buffer(self.index_buffer);
            gl.delete_program(self.program);
            gl.delete_texture(self.texture);
        }

        log::info!("shared quad resources released");
    }

    /// Flip the released flag, returning `true` only on the first call.
    fn mark_released(&self) -> bool {
        !self.released.replace(true)
    }
}

/// Whether `pool` is the final strong reference, i.e. the dropping window is
/// responsible for releasing the shared resources.
pub(crate) fn last_owner<T>(pool: &Rc<T>) -> bool {
    Rc::strong_count(pool) == 1
}

struct QuadBuffers {
    vertex_buffer: glow::NativeBuffer,
    index_buffer: glow::NativeBuffer,
}

impl QuadBuffers {
    unsafe fn create(gl: &glow::Context) -> Result<Self, GraphicsError> {
        let vertex_buffer = gl.create_buffer().map_err(GraphicsError::Allocate)?;
        let index_buffer = match gl.create_buffer() {
            Ok(buffer) => buffer,
            Err(msg) => {
                gl.delete_buffer(vertex_buffer);
                return Err(GraphicsError::Allocate(msg));
            }
        };

        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vertex_buffer));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&QUAD_VERTICES),
            glow::STATIC_DRAW,
        );

        // Index data also goes through the ARRAY_BUFFER target: the element
        // binding point is vertex-array state, and no vertex array exists yet.
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(index_buffer));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(&QUAD_INDICES),
            glow::STATIC_DRAW,
        );

        gl.bind_buffer(glow::ARRAY_BUFFER, None);

        Ok(Self {
            vertex_buffer,
            index_buffer,
        })
    }

    unsafe fn delete(&self, gl: &glow::Context) {
        gl.delete_buffer(self.index_buffer);
        gl.delete_buffer(self.vertex_buffer);
    }
}

unsafe fn compile_shader(
    gl: &glow::Context,
    stage: u32,
    stage_name: &'static str,
    source: &str,
) -> Result<glow::NativeShader, GraphicsError> {
    let shader = gl.create_shader(stage).map_err(GraphicsError::Allocate)?;
    gl.shader_source(shader, source);
    gl.compile_shader(shader);

    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(GraphicsError::ShaderCompile {
            stage: stage_name,
            log,
        });
    }

    Ok(shader)
}

unsafe fn link_quad_program(gl: &glow::Context) -> Result<glow::NativeProgram, GraphicsError> {
    let program = gl.create_program().map_err(GraphicsError::Allocate)?;

    let vertex_shader = match compile_shader(gl, glow::VERTEX_SHADER, "vertex", VERTEX_SHADER_SRC) {
        Ok(shader) => shader,
        Err(err) => {
            gl.delete_program(program);
            return Err(err);
        }
    };

    let fragment_shader =
        match compile_shader(gl, glow::FRAGMENT_SHADER, "fragment", FRAGMENT_SHADER_SRC) {
            Ok(shader) => shader,
            Err(err) => {
                gl.delete_shader(vertex_shader);
                gl.delete_program(program);
                return Err(err);
            }
        };

    gl.attach_shader(program, vertex_shader);
    gl.attach_shader(program, fragment_shader);
    gl.link_program(program);

    let linked = gl.get_program_link_status(program);
    let link_log = if linked {
        String::new()
    } else {
        gl.get_program_info_log(program)
    };

    gl.detach_shader(program, vertex_shader);
    gl.detach_shader(program, fragment_shader);
    gl.delete_shader(vertex_shader);
    gl.delete_shader(fragment_shader);

    if !linked {
        gl.delete_program(program);
        return Err(GraphicsError::ProgramLink { log: link_log });
    }

    gl.validate_program(program);

    Ok(program)
}

/// Drain and log pending GL errors without interrupting the render loop.
///
/// A driver-level error after a draw or upload call degrades the frame; it
/// must never crash a multi-window application, so each code is logged with
/// the call site that flushed it and execution continues.
pub(crate) fn drain_gl_errors(gl: &glow::Context, site: &str) {
    loop {
        let code = unsafe { gl.get_error() };
        if code == glow::NO_ERROR {
            break;
        }
        log::warn!("GL error {} (0x{code:X}) at {site}", gl_error_name(code));
    }
}

fn gl_error_name(code: u32) -> &'static str {
    match code {
        glow::INVALID_ENUM => "INVALID_ENUM",
        glow::INVALID_VALUE => "INVALID_VALUE",
        glow::INVALID_OPERATION => "INVALID_OPERATION",
        glow::STACK_OVERFLOW => "STACK_OVERFLOW",
        glow::STACK_UNDERFLOW => "STACK_UNDERFLOW",
        glow::OUT_OF_MEMORY => "OUT_OF_MEMORY",
        glow::INVALID_FRAMEBUFFER_OPERATION => "INVALID_FRAMEBUFFER_OPERATION",
        _ => "UNKNOWN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell as StdCell;

    /// Stand-in for the pool with an observable release side effect, driven
    /// through the same flag the real pool uses.
    struct CountingPool {
        released: StdCell<bool>,
        release_count: Rc<StdCell<u32>>,
    }

    impl CountingPool {
        fn new(release_count: Rc<StdCell<u32>>) -> Self {
            Self {
                released: StdCell::new(false),
                release_count,
            }
        }

        fn release(&self) {
            if self.released.replace(true) {
                return;
            }
            self.release_count.set(self.release_count.get() + 1);
        }
    }

    /// Mimics `Window::drop`: the final strong reference performs the release.
    fn drop_owner(owner: Rc<CountingPool>) {
        if last_owner(&owner) {
            owner.release();
        }
        drop(owner);
    }

    #[test]
    fn release_flag_is_single_shot() {
        let count = Rc::new(StdCell::new(0));
        let pool = CountingPool::new(Rc::clone(&count));

        pool.release();
        pool.release();
        pool.release();

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn release_fires_exactly_once_regardless_of_drop_order() {
        // Every permutation of three owners dropping.
        let orders: [[usize; 3]; 6] = [
            [0, 1, 2],
            [0, 2, 1],
            [1, 0, 2],
            [1, 2, 0],
            [2, 0, 1],
            [2, 1, 0],
        ];

        for order in orders {
            let count = Rc::new(StdCell::new(0));
            let pool = Rc::new(CountingPool::new(Rc::clone(&count)));
            let mut owners: Vec<Option<Rc<CountingPool>>> =
                vec![Some(Rc::clone(&pool)), Some(Rc::clone(&pool)), Some(pool)];

            for index in order {
                let owner = owners[index].take().expect("owner dropped twice");
                drop_owner(owner);
            }

            assert_eq!(count.get(), 1, "drop order {order:?} must release once");
        }
    }

    #[test]
    fn single_window_releases_on_drop() {
        let count = Rc::new(StdCell::new(0));
        let pool = Rc::new(CountingPool::new(Rc::clone(&count)));

        drop_owner(pool);

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn non_final_owner_never_releases() {
        let count = Rc::new(StdCell::new(0));
        let pool = Rc::new(CountingPool::new(Rc::clone(&count)));
        let keep_alive = Rc::clone(&pool);

        drop_owner(pool);
        assert_eq!(count.get(), 0, "a live window must keep the pool intact");

        drop_owner(keep_alive);
        assert_eq!(count.get(), 1);
    }

    /// Mirrors the window teardown protocol: every window deletes its own
    /// per-context vertex array, while the shared pool is released by the
    /// final owner only.
    #[test]
    fn every_owner_tears_down_its_own_state_but_pool_releases_once() {
        let release_count = Rc::new(StdCell::new(0));
        let vertex_array_deletes = Rc::new(StdCell::new(0));
        let pool = Rc::new(CountingPool::new(Rc::clone(&release_count)));

        let drop_window = |owner: Rc<CountingPool>| {
            vertex_array_deletes.set(vertex_array_deletes.get() + 1);
            drop_owner(owner);
        };

        drop_window(Rc::clone(&pool));
        drop_window(Rc::clone(&pool));
        drop_window(pool);

        assert_eq!(vertex_array_deletes.get(), 3);
        assert_eq!(release_count.get(), 1);
    }

    #[test]
    fn gl_error_names_match_driver_codes() {
        assert_eq!(gl_error_name(glow::INVALID_ENUM), "INVALID_ENUM");
        assert_eq!(gl_error_name(glow::INVALID_OPERATION), "INVALID_OPERATION");
        assert_eq!(gl_error_name(glow::OUT_OF_MEMORY), "OUT_OF_MEMORY");
        assert_eq!(gl_error_name(0xDEAD), "UNKNOWN");
    }

    #[test]
    fn quad_geometry_constants_describe_two_triangles() {
        assert_eq!(QUAD_INDEX_COUNT, 6);
        assert_eq!(QUAD_VERTICES.len(), 16);
        // UV corners must map the full texture onto the quad.
        assert_eq!(&QUAD_VERTICES[2..4], &[0.0, 0.0]);
        assert_eq!(&QUAD_VERTICES[10..12], &[1.0, 1.0]);
    }
}
