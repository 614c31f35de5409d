/// Vertex buffer - device memory for vertex attribute data

use std::sync::{Arc, Mutex};

use bytemuck::Pod;

use crate::error::Result;
use crate::hal::{BufferHandle, BufferTarget, BufferUsage, GraphicsApi};

use super::gpu_buffer::GpuBuffer;

/// GPU buffer holding vertex attribute data
///
/// Created zero-sized; storage is allocated by the first [`set_data`]
/// (and reallocated according to the usage hint's update strategy).
///
/// [`set_data`]: VertexBuffer::set_data
pub struct VertexBuffer {
    raw: GpuBuffer,
    count: usize,
}

impl VertexBuffer {
    /// Create a new vertex buffer
    ///
    /// # Arguments
    ///
    /// * `api` - Device driver the buffer lives on
    /// * `usage` - Update/consumption pattern driving the update strategy
    pub fn new(api: Arc<Mutex<dyn GraphicsApi>>, usage: BufferUsage) -> Self {
        Self {
            raw: GpuBuffer::new(api, BufferTarget::Vertex, usage),
            count: 0,
        }
    }

    /// Upload a full replacement of the buffer contents
    ///
    /// Dynamic/Stream buffers reallocate (orphan) on every call; Static
    /// buffers reallocate only when the byte size changed and otherwise
    /// write the whole range in place.
    pub fn set_data<T: Pod>(&mut self, data: &[T]) {
        self.count = data.len();
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

    /// Bind the vertex buffer
    pub fn bind(&self) {
        self.raw.bind();
    }

    /// Unbind the vertex buffer
    pub fn unbind(&self) {
        self.raw.unbind();
    }

    /// Number of elements in the most recent upload
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
#[path = "vertex_buffer_tests.rs"]
mod tests;
