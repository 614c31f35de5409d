/// Cube map texture storage

use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::hal::{
    CubeMapFace, GraphicsApi, InternalFormat, MagFilter, MinFilter, PixelFormat, PixelType,
    TexImage2dTarget, TextureHandle, TextureTarget, WrapMode,
};
use crate::render_bail;

use super::texture::{StorageFormat, Texture};

/// Cube map device texture (six square faces)
///
/// Faces can be uploaded one at a time or all at once; a full upload
/// requires exactly six face images. Cube maps default to high-precision
/// RGBA storage since their main use is environment capture.
pub struct TextureCube {
    api: Arc<Mutex<dyn GraphicsApi>>,
    handle: TextureHandle,
    width: u32,
    height: u32,
    storage: Option<StorageFormat>,
}

impl TextureCube {
    /// Create a new cube map with no storage
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

    /// Allocate storage for (and optionally upload) a single face
    ///
    /// # Errors
    ///
    /// Fails if either dimension is zero.
    pub fn set_face_data(
        &mut self,
        face: CubeMapFace,
        width: u32,
        height: u32,
        data: Option<&[u8]>,
        internal_format: InternalFormat,
        pixel_format: PixelFormat,
        pixel_type: PixelType,
    ) -> Result<()> {
        if width == 0 || height == 0 {
            render_bail!(
                InvalidParameter,
                "nebula::TextureCube",
                "cube face dimensions must be non-zero, got {}x{}",
                width,
                height
            );
        }

        let mut api = self.api.lock().unwrap();
        api.bind_texture(TextureTarget::CubeMap, self.handle);
        api.tex_image_2d(
            TexImage2dTarget::CubeMapFace(face),
            internal_format,
            width,
            height,
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
        Ok(())
    }

    /// Upload all six faces in device face order (+X, -X, +Y, -Y, +Z, -Z)
    ///
    /// # Errors
    ///
    /// Fails unless exactly 6 face images are supplied, or if either
    /// dimension is zero.
    pub fn set_all_faces(
        &mut self,
        width: u32,
        height: u32,
        faces: &[&[u8]],
        internal_format: InternalFormat,
        pixel_format: PixelFormat,
        pixel_type: PixelType,
    ) -> Result<()> {
        if faces.len() != 6 {
            render_bail!(
                InvalidParameter,
                "nebula::TextureCube",
                "cube map requires exactly 6 faces, got {}",
                faces.len()
            );
        }
        for (face, data) in CubeMapFace::all().into_iter().zip(faces.iter().copied()) {
            self.set_face_data(
                face,
                width,
                height,
                Some(data),
                internal_format,
                pixel_format,
                pixel_type,
            )?;
        }
        Ok(())
    }

    /// Configure sampling parameters (one wrap mode for all three coordinates)
    ///
    /// Generates the mip chain automatically when the minification filter
    /// samples from one.
    pub fn set_parameters(&mut self, min_filter: MinFilter, mag_filter: MagFilter, wrap: WrapMode) {
        let mut api = self.api.lock().unwrap();
        api.bind_texture(TextureTarget::CubeMap, self.handle);
        api.set_texture_filters(TextureTarget::CubeMap, min_filter, mag_filter);
        api.set_texture_wrap(TextureTarget::CubeMap, wrap, wrap, Some(wrap));
        if min_filter.requires_mipmaps() {
            api.generate_mipmaps(TextureTarget::CubeMap);
        }
    }
}

impl Texture for TextureCube {
    fn handle(&self) -> TextureHandle {
        self.handle
    }

    fn target(&self) -> TextureTarget {
        TextureTarget::CubeMap
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
        api.bind_texture(TextureTarget::CubeMap, self.handle);
    }

    fn unbind(&self) {
        self.api.lock().unwrap().unbind_texture(TextureTarget::CubeMap);
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == self.width && height == self.height {
            return Ok(());
        }
        let Some(storage) = self.storage else {
            render_bail!(
                InvalidParameter,
                "nebula::TextureCube",
                "cannot resize a cube map whose storage was never allocated"
            );
        };

        let mut api = self.api.lock().unwrap();
        api.bind_texture(TextureTarget::CubeMap, self.handle);
        for face in CubeMapFace::all() {
            api.tex_image_2d(
                TexImage2dTarget::CubeMapFace(face),
                storage.internal_format,
                width,
                height,
                storage.pixel_format,
                storage.pixel_type,
                None,
            );
        }
        drop(api);

        self.width = width;
        self.height = height;
        Ok(())
    }
}

impl Drop for TextureCube {
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
#[path = "texture_cube_tests.rs"]
mod tests;
