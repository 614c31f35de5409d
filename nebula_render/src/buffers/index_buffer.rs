/// Index buffer - device memory for element indices

use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::hal::{BufferHandle, BufferTarget, BufferUsage, GraphicsApi};

use super::gpu_buffer::GpuBuffer;

/// GPU buffer holding `u32` element indices
///
/// The element type is fixed in the signatures: index data is always 32-bit,
/// so an upload of any other arithmetic width does not typecheck. Tracks the
/// element count alongside the byte size for draw dispatch.
pub struct IndexBuffer {
    raw: GpuBuffer,
    count: usize,
}

impl IndexBuffer {
    /// Create a new index buffer
    pub fn new(api: Arc<Mutex<dyn GraphicsApi>>, usage: BufferUsage) -> Self {
        Self {
            raw: GpuBuffer::new(api, BufferTarget::Index, usage),
            count: 0,
        }
    }

    /// Upload a full replacement of the index data
    pub fn set_data(&mut self, indices: &[u32]) {
        self.count = indices.len();
        self.raw.set_bytes(bytemuck::cast_slice(indices));
    }

    /// Update a sub-range of the index data in place
    ///
    /// # Errors
    ///
    /// Fails with an out-of-range error, leaving the buffer untouched, if
    /// `byte_offset` plus the byte length of `indices` exceeds the current
    /// size.
    pub fn set_sub_data(&mut self, indices: &[u32], byte_offset: usize) -> Result<()> {
        self.raw.set_sub_bytes(bytemuck::cast_slice(indices), byte_offset)
    }

    /// Bind the index buffer
    pub fn bind(&self) {
        self.raw.bind();
    }

    /// Unbind the index buffer
    pub fn unbind(&self) {
        self.raw.unbind();
    }

    /// Number of indices in the buffer
    pub fn count(&self) -> usize {
        self.count
    }

    /// Size of the buffer in bytes
    pub fn size(&self) -> usize {
        self.raw.size()
    }

    /// Usage hint the buffer was created with
    pub fn usage(&self) -> BufferUsage {
        self.raw.usage()
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
#[path = "index_buffer_tests.rs"]
mod tests;
