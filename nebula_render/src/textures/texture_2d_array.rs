/// 2D array texture storage

use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::hal::{
    GraphicsApi, InternalFormat, MagFilter, MinFilter, PixelFormat, PixelType, TextureHandle,
    TextureTarget, WrapMode,
};
use crate::render_bail;

use super::texture::{StorageFormat, Texture};

/// Array of 2D device texture layers
///
/// All layers share one size and format. Individual layers can be replaced
/// after allocation; reallocation via `resize` preserves the layer count.
pub struct Texture2DArray {
    api: Arc<Mutex<dyn GraphicsApi>>,
    handle: TextureHandle,
    width: u32,
    height: u32,
    layers: u32,
    storage: Option<StorageFormat>,
}

impl Texture2DArray {
    /// Create a new 2D array texture with no storage
    pub fn new(api: Arc<Mutex<dyn GraphicsApi>>) -> Self {
        let handle = api.lock().unwrap().create_texture();
        Self {
            api,
            handle,
            width: 0,
            height: 0,
            layers: 0,
            storage: None,
        }
    }

    /// Allocate layered storage and optionally upload initial content
    ///
    /// # Errors
    ///
    /// Fails if any dimension or the layer count is zero.
    pub fn set_data(
        &mut self,
        width: u32,
        height: u32,
        layers: u32,
        data: Option<&[u8]>,
        internal_format: InternalFormat,
        pixel_format: PixelFormat,
        pixel_type: PixelType,
    ) -> Result<()> {
        if width == 0 || height == 0 || layers == 0 {
            render_bail!(
                InvalidParameter,
                "nebula::Texture2DArray",
                "array dimensions must be non-zero, got {}x{} with {} layers",
                width,
                height,
                layers
            );
        }

        let mut api = self.api.lock().unwrap();
        api.bind_texture(TextureTarget::TwoDimArray, self.handle);
        api.tex_image_3d(
            TextureTarget::TwoDimArray,
            internal_format,
            width,
            height,
            layers,
            pixel_format,
            pixel_type,
            data,
        );
        drop(api);

        self.storage = Some(StorageFormat {
            internal_format,
            pixel_format,
            pixel_type,
        });
        self.width = width;
        self.height = height;
        self.layers = layers;
        Ok(())
    }

    /// Replace the pixels of a single layer
    ///
    /// # Errors
    ///
    /// Fails if storage was never allocated, or with an out-of-range error
    /// if the layer index exceeds the array size.
    pub fn set_layer_data(&mut self, layer: u32, data: &[u8]) -> Result<()> {
        let Some(storage) = self.storage else {
            render_bail!(
                InvalidParameter,
                "nebula::Texture2DArray",
                "cannot upload a layer before storage is allocated"
            );
        };
        if layer >= self.layers {
            render_bail!(
                OutOfRange,
                "nebula::Texture2DArray",
                "layer index {} exceeds array size {}",
                layer,
                self.layers
            );
        }

        let mut api = self.api.lock().unwrap();
        api.bind_texture(TextureTarget::TwoDimArray, self.handle);
        api.tex_sub_image_layer(
            TextureTarget::TwoDimArray,
            layer,
            self.width,
            self.height,
            storage.pixel_format,
            storage.pixel_type,
            data,
        );
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
        api.bind_texture(TextureTarget::TwoDimArray, self.handle);
        api.set_texture_filters(TextureTarget::TwoDimArray, min_filter, mag_filter);
        api.set_texture_wrap(TextureTarget::TwoDimArray, wrap_s, wrap_t, None);
        if min_filter.requires_mipmaps() {
            api.generate_mipmaps(TextureTarget::TwoDimArray);
        }
    }

    /// Number of layers in the array (0 until storage is allocated)
    pub fn layers(&self) -> u32 {
        self.layers
    }
}

impl Texture for Texture2DArray {
    fn handle(&self) -> TextureHandle {
        self.handle
    }

    fn target(&self) -> TextureTarget {
        TextureTarget::TwoDimArray
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
        api.bind_texture(TextureTarget::TwoDimArray, self.handle);
    }

    fn unbind(&self) {
        self.api.lock().unwrap().unbind_texture(TextureTarget::TwoDimArray);
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == self.width && height == self.height {
            return Ok(());
        }
        let Some(storage) = self.storage else {
            render_bail!(
                InvalidParameter,
                "nebula::Texture2DArray",
                "cannot resize an array texture whose storage was never allocated"
            );
        };

        let mut api = self.api.lock().unwrap();
        api.bind_texture(TextureTarget::TwoDimArray, self.handle);
        api.tex_image_3d(
            TextureTarget::TwoDimArray,
            storage.internal_format,
            width,
            height,
            self.layers,
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

impl Drop for Texture2DArray {
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
#[path = "texture_2d_array_tests.rs"]
mod tests;
