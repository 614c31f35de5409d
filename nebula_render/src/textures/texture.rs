/// Texture capability-set trait

use crate::error::Result;
use crate::hal::{InternalFormat, PixelFormat, PixelType, TextureHandle, TextureTarget};

/// Common capability set of every texture variant
///
/// The concrete storage layouts (2D, cube map, 2D array) differ in how they
/// allocate and upload, but share binding, dimensions and reallocation. Code
/// that only needs these capabilities (the framebuffer, render features)
/// takes `&dyn Texture` / `&mut dyn Texture`.
pub trait Texture {
    /// Device handle of the texture
    fn handle(&self) -> TextureHandle;

    /// Bind target of this texture's storage layout
    fn target(&self) -> TextureTarget;

    /// Width in pixels (0 until storage is first allocated)
    fn width(&self) -> u32;

    /// Height in pixels (0 until storage is first allocated)
    fn height(&self) -> u32;

    /// Bind the texture on a texture unit
    fn bind(&self, unit: u32);

    /// Unbind the texture from its target
    fn unbind(&self);

    /// Reallocate storage for new dimensions
    ///
    /// A no-op when the dimensions are unchanged. Otherwise the storage is
    /// reallocated with the format recorded at the original allocation and
    /// prior pixel content is discarded.
    ///
    /// # Errors
    ///
    /// Fails if storage was never allocated (no format on record).
    fn resize(&mut self, width: u32, height: u32) -> Result<()>;
}

/// Format trio recorded at allocation time and reused by `resize`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct StorageFormat {
    pub internal_format: InternalFormat,
    pub pixel_format: PixelFormat,
    pub pixel_type: PixelType,
}
