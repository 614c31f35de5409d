/// Storage buffer - device memory for shader storage blocks

use std::sync::{Arc, Mutex};

use bytemuck::Pod;

use crate::error::Result;
use crate::hal::{AccessSpecifier, BufferHandle, BufferTarget, BufferUsage, GraphicsApi};
use crate::render_bail;

use super::gpu_buffer::GpuBuffer;

/// GPU buffer backing a shader storage block
///
/// Allocates its full (uninitialized) store at construction and attaches to
/// its indexed binding point immediately, like [`UniformBuffer`]
/// (crate::buffers::UniformBuffer). Additionally supports readback, since
/// storage blocks are the one buffer kind shaders write to.
pub struct StorageBuffer {
    raw: GpuBuffer,
    binding_point: u32,
    access: AccessSpecifier,
}

impl StorageBuffer {
    /// Create a new storage buffer
    ///
    /// # Arguments
    ///
    /// * `api` - Device driver the buffer lives on
    /// * `binding_point` - Indexed storage binding point to attach to
    /// * `size` - Size of the store in bytes
    /// * `usage` - Update/consumption pattern
    /// * `access` - How shaders access the block (driver hint)
    pub fn new(
        api: Arc<Mutex<dyn GraphicsApi>>,
        binding_point: u32,
        size: usize,
        usage: BufferUsage,
        access: AccessSpecifier,
    ) -> Self {
        let raw = GpuBuffer::with_size(api, BufferTarget::Storage, usage, size);
        raw.bind_base(binding_point);
        Self {
            raw,
            binding_point,
            access,
        }
    }

    /// Upload a full replacement of the buffer contents
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

    /// Read back the start of the buffer into `out`
    ///
    /// # Errors
    ///
    /// Fails with an out-of-range error if `out` is larger than the buffer.
    pub fn read_data<T: Pod>(&self, out: &mut [T]) -> Result<()> {
        let byte_len = std::mem::size_of_val(out);
        if byte_len > self.raw.size() {
            render_bail!(
                OutOfRange,
                "nebula::StorageBuffer",
                "readback of {} bytes exceeds buffer size {}",
                byte_len,
                self.raw.size()
            );
        }
        let bytes = self.raw.read_bytes(byte_len);
        bytemuck::cast_slice_mut(out).copy_from_slice(&bytes);
        Ok(())
    }

    /// Bind the storage buffer
    pub fn bind(&self) {
        self.raw.bind();
    }

    /// Unbind the storage buffer
    pub fn unbind(&self) {
        self.raw.unbind();
    }

    /// Indexed binding point the buffer is attached to
    pub fn binding_point(&self) -> u32 {
        self.binding_point
    }

    /// Shader access pattern the buffer was created with
    pub fn access(&self) -> AccessSpecifier {
        self.access
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
#[path = "storage_buffer_tests.rs"]
mod tests;
