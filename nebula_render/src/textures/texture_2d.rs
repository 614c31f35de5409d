/// 2D texture storage

use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::hal::{
    GraphicsApi, InternalFormat, MagFilter, MinFilter, PixelFormat, PixelType, TexImage2dTarget,
    TextureHandle, TextureTarget, WrapMode,
};
use crate::render_bail;

use super::format::{self, FormatRequest};
use super::texture::{StorageFormat, Texture};

/// Plain 2D device texture
///
/// The handle is allocated at construction; storage is allocated (and the
/// format fixed) by the first [`set_data`] or [`set_storage`] call.
///
/// [`set_data`]: Texture2D::set_data
/// [`set_storage`]: Texture2D::set_storage
pub struct Texture2D {
    api: Arc<Mutex<dyn GraphicsApi>>,
    handle: TextureHandle,
    width: u32,
    height: u32,
    storage: Option<StorageFormat>,
}

impl Texture2D {
    /// Create a new 2D texture with no storage
    pub fn new(api: Arc<Mutex<dyn GraphicsApi>>) -> Self {
        let handle = api.lock().unwrap().create_texture();
        Self {
            api,
            handle,
            width: 0,
            height: 0,
            storage: None,
        }
    }

    /// Allocate storage and optionally upload initial pixel content
    ///
    /// The requested logical format is negotiated against the device's
    /// capabilities; a compressed request on a platform without the required
    /// extension falls back to uncompressed storage of the same color space
    /// instead of failing. Passing `None` for `data` allocates storage
    /// without initializing pixels (the framebuffer-attachment case).
    ///
    /// # Errors
    ///
    /// Fails if either dimension is zero.
    pub fn set_data(
        &mut self,
        width: u32,
        height: u32,
        data: Option<&[u8]>,
        request: FormatRequest,
    ) -> Result<()> {
        if width == 0 || height == 0 {
            render_bail!(
                InvalidParameter,
                "nebula::Texture2D",
                "texture dimensions must be non-zero, got {}x{}",
                width,
                height
            );
        }

        let mut api = self.api.lock().unwrap();
        let internal_format = format::negotiate(&*api, request);
        let pixel_format = PixelFormat::Rgba;
        let pixel_type = PixelType::UnsignedByte;

        api.bind_texture(TextureTarget::TwoDim, self.handle);
        match data {
            Some(bytes) if internal_format.is_compressed() => {
                api.compressed_tex_image_2d(
                    TexImage2dTarget::TwoDim,
                    internal_format,
                    width,
                    height,
                    bytes,
                );
            }
            other => {
                api.tex_image_2d(
                    TexImage2dTarget::TwoDim,
                    internal_format,
                    width,
                    height,
                    pixel_format,
                    pixel_type,
                    other,
                );
            }
        }

        self.storage = Some(StorageFormat {
            internal_format,
            pixel_format,
            pixel_type,
        });
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Allocate storage with an explicit format trio, no negotiation
    ///
    /// Used for storage whose format is dictated by its role rather than by
    /// content, such as depth/stencil framebuffer attachments.
    ///
    /// # Errors
    ///
    /// Fails if either dimension is zero.
    pub fn set_storage(
        &mut self,
        width: u32,
        height: u32,
        internal_format: InternalFormat,
        pixel_format: PixelFormat,
        pixel_type: PixelType,
    ) -> Result<()> {
        if width == 0 || height == 0 {
            render_bail!(
                InvalidParameter,
                "nebula::Texture2D",
                "texture dimensions must be non-zero, got {}x{}",
                width,
                height
            );
        }

        let mut api = self.api.lock().unwrap();
        api.bind_texture(TextureTarget::TwoDim, self.handle);
        api.tex_image_2d(
            TexImage2dTarget::TwoDim,
            internal_format,
            width,
            height,
            pixel_format,
            pixel_type,
            None,
        );

        self.storage = Some(StorageFormat {
            internal_format,
            pixel_format,
            pixel_type,
        });
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Configure sampling parameters
    ///
    /// Generates the mip chain automatically when the minification filter
    /// samples from one.
    pub fn set_parameters(
        &mut self,
        min_filter: MinFilter,
        mag_filter: MagFilter,
        wrap_s: WrapMode,
        wrap_t: WrapMode,
    ) {
        let mut api = self.api.lock().unwrap();
        api.bind_texture(TextureTarget::TwoDim, self.handle);
        api.set_texture_filters(TextureTarget::TwoDim, min_filter, mag_filter);
        api.set_texture_wrap(TextureTarget::TwoDim, wrap_s, wrap_t, None);
        if min_filter.requires_mipmaps() {
            api.generate_mipmaps(TextureTarget::TwoDim);
        }
    }

    /// Internal format of the current storage, if allocated
    pub fn internal_format(&self) -> Option<InternalFormat> {
        self.storage.map(|storage| storage.internal_format)
    }
}

impl Texture for Texture2D {
    fn handle(&self) -> TextureHandle {
        self.handle
    }

    fn target(&self) -> TextureTarget {
        TextureTarget::TwoDim
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn bind(&self, unit: u32) {
        let mut api = self.api.lock().unwrap();
        api.set_active_texture_unit(unit);
        api.bind_texture(TextureTarget::TwoDim, self.handle);
    }

    fn unbind(&self) {
        self.api.lock().unwrap().unbind_texture(TextureTarget::TwoDim);
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == self.width && height == self.height {
            return Ok(());
        }
        let Some(storage) = self.storage else {
            render_bail!(
                InvalidParameter,
                "nebula::Texture2D",
                "cannot resize a texture whose storage was never allocated"
            );
        };

        let mut api = self.api.lock().unwrap();
        api.bind_texture(TextureTarget::TwoDim, self.handle);
        api.tex_image_2d(
            TexImage2dTarget::TwoDim,
            storage.internal_format,
            width,
            height,
            storage.pixel_format,
            storage.pixel_type,
            None,
        );
        drop(api);

        self.width = width;
        self.height = height;
        Ok(())
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        if let Ok(mut api) = self.api.lock() {
            api.delete_texture(self.handle);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "texture_2d_tests.rs"]
mod tests;
