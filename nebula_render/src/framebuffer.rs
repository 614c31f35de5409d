//! Framebuffer - a named collection of owned texture attachments.

use std::sync::{Arc, Mutex};

use glam::Vec4;

use crate::error::Result;
use crate::hal::{
    AttachmentPoint, ClearFlags, FramebufferHandle, GraphicsApi, InternalFormat, MagFilter,
    MinFilter, PixelFormat, PixelType, WrapMode,
};
use crate::render_bail;
use crate::textures::format::FormatRequest;
use crate::textures::{Texture, Texture2D};

/// Off-screen render target with owned color and depth/stencil attachments
///
/// Construction allocates one texture per requested attachment, attaches
/// each, declares the draw-buffer list and validates completeness. A
/// framebuffer is never observable in an incomplete-but-usable state: when
/// validation fails during construction or resize, every owned resource is
/// released before the error reaches the caller.
///
/// Color slots form a dense `0..N-1` index space; the depth/stencil slot is
/// optional and combined (24-bit depth + 8-bit stencil).
pub struct Framebuffer {
    api: Arc<Mutex<dyn GraphicsApi>>,
    handle: FramebufferHandle,
    width: u32,
    height: u32,
    color_attachments: Vec<Texture2D>,
    depth_attachment: Option<Texture2D>,
    released: bool,
}

impl Framebuffer {
    /// Create a framebuffer with freshly allocated attachments
    ///
    /// # Arguments
    ///
    /// * `api` - Device driver the framebuffer lives on
    /// * `width`, `height` - Attachment dimensions in pixels
    /// * `color_attachment_count` - Number of color attachments (dense 0..N-1)
    /// * `with_depth` - Whether to allocate a combined depth/stencil attachment
    ///
    /// # Errors
    ///
    /// Fails on zero dimensions or a zero attachment count, and with a
    /// completeness error if the device rejects the attachment set. On any
    /// failure every allocated attachment and the framebuffer handle have
    /// already been released.
    pub fn new(
        api: Arc<Mutex<dyn GraphicsApi>>,
        width: u32,
        height: u32,
        color_attachment_count: u32,
        with_depth: bool,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            render_bail!(
                InvalidParameter,
                "nebula::Framebuffer",
                "framebuffer dimensions must be non-zero, got {}x{}",
                width,
                height
            );
        }
        if color_attachment_count == 0 {
            render_bail!(
                InvalidParameter,
                "nebula::Framebuffer",
                "framebuffer requires at least one color attachment"
            );
        }

        let handle = api.lock().unwrap().create_framebuffer();

        // From here on `framebuffer` owns the handle: every early return
        // drops it, which releases the handle and any attachments built so
        // far. That is what makes construction atomic.
        let mut framebuffer = Self {
            api,
            handle,
            width,
            height,
            color_attachments: Vec::with_capacity(color_attachment_count as usize),
            depth_attachment: None,
            released: false,
        };

        for slot in 0..color_attachment_count {
            let mut texture = Texture2D::new(framebuffer.api.clone());
            texture.set_data(width, height, None, FormatRequest::uncompressed())?;
            texture.set_parameters(
                MinFilter::Linear,
                MagFilter::Linear,
                WrapMode::ClampToEdge,
                WrapMode::ClampToEdge,
            );
            {
                let mut api = framebuffer.api.lock().unwrap();
                api.bind_framebuffer(handle);
                api.attach_texture_2d(AttachmentPoint::Color(slot), texture.handle());
            }
            framebuffer.color_attachments.push(texture);
        }

        if with_depth {
            let mut texture = Texture2D::new(framebuffer.api.clone());
            texture.set_storage(
                width,
                height,
                InternalFormat::Depth24Stencil8,
                PixelFormat::DepthStencil,
                PixelType::UnsignedInt248,
            )?;
            {
                let mut api = framebuffer.api.lock().unwrap();
                api.bind_framebuffer(handle);
                api.attach_texture_2d(AttachmentPoint::DepthStencil, texture.handle());
            }
            framebuffer.depth_attachment = Some(texture);
        }

        {
            let mut api = framebuffer.api.lock().unwrap();
            api.bind_framebuffer(handle);
            api.set_draw_buffers(color_attachment_count);
        }

        framebuffer.validate()?;
        framebuffer.api.lock().unwrap().unbind_framebuffer();
        Ok(framebuffer)
    }

    /// Check completeness of the attachment set
    fn validate(&self) -> Result<()> {
        let status = {
            let mut api = self.api.lock().unwrap();
            api.bind_framebuffer(self.handle);
            api.framebuffer_status()
        };
        if !status.is_complete() {
            render_bail!(
                FramebufferIncomplete,
                "nebula::Framebuffer",
                "framebuffer validation failed with status {:?}",
                status
            );
        }
        Ok(())
    }

    /// Bind the framebuffer as the render target
    pub fn bind(&self) {
        self.api.lock().unwrap().bind_framebuffer(self.handle);
    }

    /// Unbind the framebuffer, restoring the default render target
    pub fn unbind(&self) {
        self.api.lock().unwrap().unbind_framebuffer();
    }

    /// Resize every attachment, preserving formats and attachment layout
    ///
    /// A no-op when the dimensions are unchanged: no reallocation happens
    /// and every attachment keeps its handle. Otherwise each attachment is
    /// reallocated (in attachment order) and completeness is re-validated.
    ///
    /// # Errors
    ///
    /// On any failure the framebuffer releases all of its resources before
    /// the error propagates; the object must not be used afterwards.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        if width == self.width && height == self.height {
            return Ok(());
        }
        if width == 0 || height == 0 {
            render_bail!(
                InvalidParameter,
                "nebula::Framebuffer",
                "framebuffer dimensions must be non-zero, got {}x{}",
                width,
                height
            );
        }

        let outcome = self.resize_attachments(width, height);
        if let Err(error) = outcome {
            self.release();
            return Err(error);
        }

        self.width = width;
        self.height = height;

        if let Err(error) = self.validate() {
            self.release();
            return Err(error);
        }
        self.api.lock().unwrap().unbind_framebuffer();
        Ok(())
    }

    fn resize_attachments(&mut self, width: u32, height: u32) -> Result<()> {
        for texture in &mut self.color_attachments {
            texture.resize(width, height)?;
        }
        if let Some(texture) = &mut self.depth_attachment {
            texture.resize(width, height)?;
        }
        Ok(())
    }

    /// Clear the buffers actually present in this framebuffer
    ///
    /// Skips the color clear when no color value is supplied and the depth
    /// clear when no depth attachment exists. The clear is scoped: the
    /// framebuffer is bound for the clear and unbound afterwards.
    pub fn clear(&self, color: Option<Vec4>, clear_depth: bool) {
        let mut api = self.api.lock().unwrap();
        api.bind_framebuffer(self.handle);

        let mut mask = ClearFlags::empty();
        if let Some(value) = color {
            api.set_clear_color(value);
            mask |= ClearFlags::COLOR;
        }
        if clear_depth && self.depth_attachment.is_some() {
            mask |= ClearFlags::DEPTH | ClearFlags::STENCIL;
        }
        if !mask.is_empty() {
            api.clear(mask);
        }
        api.unbind_framebuffer();
    }

    /// Color attachment at a logical slot index
    ///
    /// # Errors
    ///
    /// Fails with an out-of-range error for an unattached slot.
    pub fn color_attachment(&self, slot: usize) -> Result<&Texture2D> {
        match self.color_attachments.get(slot) {
            Some(texture) => Ok(texture),
            None => {
                render_bail!(
                    OutOfRange,
                    "nebula::Framebuffer",
                    "no color attachment at slot {} (attachment count {})",
                    slot,
                    self.color_attachments.len()
                )
            }
        }
    }

    /// The depth/stencil attachment, if one was requested
    pub fn depth_attachment(&self) -> Option<&Texture2D> {
        self.depth_attachment.as_ref()
    }

    /// Number of color attachments
    pub fn color_attachment_count(&self) -> usize {
        self.color_attachments.len()
    }

    /// Whether a depth/stencil attachment is present
    pub fn has_depth(&self) -> bool {
        self.depth_attachment.is_some()
    }

    /// Width of every attachment in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of every attachment in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Device handle of the framebuffer
    pub fn handle(&self) -> FramebufferHandle {
        self.handle
    }

    /// Release every owned attachment, then the framebuffer handle
    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.color_attachments.clear();
        self.depth_attachment = None;
        if let Ok(mut api) = self.api.lock() {
            api.delete_framebuffer(self.handle);
        }
    }
}

impl Drop for Framebuffer {
    fn drop(&mut self) {
        self.release();
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "framebuffer_tests.rs"]
mod tests;
