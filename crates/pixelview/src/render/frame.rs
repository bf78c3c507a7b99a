//! Borrowed pixel-buffer view with the RGBA8 byte contract
//!
//! A [`Frame`] is ephemeral: it borrows the caller's buffer for the duration
//! of one `present` call and never takes ownership. The only binary contract
//! in the crate lives here: 4 bytes per pixel, RGBA channel order, row-major,
//! no padding, exactly `width * height * 4` bytes.

use thiserror::Error;

/// Bytes per pixel for the RGBA8 upload format.
pub const BYTES_PER_PIXEL: usize = 4;

/// Largest accepted frame dimension; the GL upload path takes `i32` sizes.
pub const MAX_DIMENSION: u32 = i32::MAX as u32;

/// Errors from validating a pixel buffer against its stated dimensions
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FrameError {
    /// Width or height was zero.
    #[error("frame dimensions must be non-zero, got {width}x{height}")]
    ZeroDimension {
        /// Stated frame width in pixels.
        width: u32,
        /// Stated frame height in pixels.
        height: u32,
    },

    /// Width or height is larger than [`MAX_DIMENSION`].
    #[error("frame dimensions {width}x{height} exceed the supported maximum")]
    DimensionOverflow {
        /// Stated frame width in pixels.
        width: u32,
        /// Stated frame height in pixels.
        height: u32,
    },

    /// The buffer length does not match `width * height * 4`.
    #[error("pixel buffer is {actual} bytes but a {width}x{height} RGBA8 frame needs {expected}")]
    LengthMismatch {
        /// Stated frame width in pixels.
        width: u32,
        /// Stated frame height in pixels.
        height: u32,
        /// Required buffer length in bytes.
        expected: usize,
        /// Actual buffer length in bytes.
        actual: usize,
    },
}

/// A validated, borrowed view over one RGBA8 image
///
/// The caller retains ownership of the pixel data and must keep it alive for
/// the duration of the `present` call only; nothing is stored between frames.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pixels: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> Frame<'a> {
    /// Create a frame view, checking the byte contract up front.
    ///
    /// Both dimensions must be positive, no larger than [`MAX_DIMENSION`],
    /// and `pixels` must hold exactly `width * height * 4` bytes.
    pub fn from_rgba(pixels: &'a [u8], width: u32, height: u32) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::ZeroDimension { width, height });
        }

        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(FrameError::DimensionOverflow { width, height });
        }

        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(FrameError::LengthMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    /// The full pixel payload, exactly `width * height * 4` bytes.
    pub fn pixels(&self) -> &'a [u8] {
        self.pixels
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }
}
