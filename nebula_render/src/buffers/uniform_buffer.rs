/// Uniform buffer - device memory for uniform block data

use std::sync::{Arc, Mutex};

use bytemuck::Pod;

use crate::error::Result;
use crate::hal::{BufferHandle, BufferTarget, BufferUsage, GraphicsApi};

use super::gpu_buffer::GpuBuffer;

/// GPU buffer backing a uniform block
///
/// Unlike the vertex/index buffers, a uniform buffer allocates its full
/// (uninitialized) store at construction time and is attached to its indexed
/// binding point immediately, so shaders can reference the block before the
/// first upload.
pub struct UniformBuffer {
    raw: GpuBuffer,
    binding_point: u32,
}

impl UniformBuffer {
    /// Create a new uniform buffer
    ///
    /// # Arguments
    ///
    /// * `api` - Device driver the buffer lives on
    /// * `size` - Size of the store in bytes
    /// * `binding_point` - Indexed uniform binding point to attach to
    /// * `usage` - Update/consumption pattern (Dynamic for per-frame data)
    pub fn new(
        api: Arc<Mutex<dyn GraphicsApi>>,
        size: usize,
        binding_point: u32,
        usage: BufferUsage,
    ) -> Self {
        let raw = GpuBuffer::with_size(api, BufferTarget::Uniform, usage, size);
        raw.bind_base(binding_point);
        Self { raw, binding_point }
    }

    /// Upload a full replacement of the buffer contents
    ///
    /// Follows the usage hint's update strategy; a Dynamic uniform buffer
    /// orphans its store on every call.
    pub fn set_data<T: Pod>(&mut self, data: &[T]) {
        self.raw.set_bytes(bytemuck::cast_slice(data));
    }

    /// Update a sub-range of the buffer contents in place
    ///
    /// # Errors
    ///
    /// Fails with an out-of-range error, leaving the buffer untouched, if
    /// `byte_offset` plus the byte length of `data` exceeds the current size.
    pub fn set_sub_data<T: Pod>(&mut self, data: &[T], byte_offset: usize) -> Result<()> {
        self.raw.set_sub_bytes(bytemuck::cast_slice(data), byte_offset)
    }

    /// Bind the uniform buffer
    pub fn bind(&self) {
        self.raw.bind();
    }

    /// Unbind the uniform buffer
    pub fn unbind(&self) {
        self.raw.unbind();
    }

    /// Indexed binding point the buffer is attached to
    pub fn binding_point(&self) -> u32 {
        self.binding_point
    }

    /// Size of the buffer in bytes
    pub fn size(&self) -> usize {
        self.raw.size()
    }

    /// Device handle of the buffer
    pub fn handle(&self) -> BufferHandle {
        self.raw.handle()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "uniform_buffer_tests.rs"]
mod tests;
