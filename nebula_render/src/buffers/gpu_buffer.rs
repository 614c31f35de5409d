/// Shared core of the GPU buffer family
///
/// Owns the device handle and implements the update-strategy every public
/// buffer type relies on. The strategy exists to avoid CPU/GPU
/// synchronization stalls:
///
/// - Dynamic/Stream usage: every full upload reallocates the storage
///   ("orphans" the old allocation). The driver hands back a fresh memory
///   region immediately while the old one drains asynchronously, so the
///   caller never stalls on a buffer the device is still consuming.
/// - Static usage: reallocate only when the requested size differs from the
///   current size; otherwise write the whole range in place. Static data is
///   assumed stable, and skipping the reallocation skips the driver
///   bookkeeping it would cost.
///
/// Every data operation binds the buffer to its target first.

use std::sync::{Arc, Mutex};

use crate::error::Result;
use crate::hal::{BufferHandle, BufferTarget, BufferUsage, GraphicsApi};
use crate::render_bail;

pub(crate) struct GpuBuffer {
    api: Arc<Mutex<dyn GraphicsApi>>,
    handle: BufferHandle,
    target: BufferTarget,
    usage: BufferUsage,
    size: usize,
}

impl GpuBuffer {
    /// Create a zero-sized buffer object for the given target
    pub(crate) fn new(api: Arc<Mutex<dyn GraphicsApi>>, target: BufferTarget, usage: BufferUsage) -> Self {
        let handle = api.lock().unwrap().create_buffer();
        Self {
            api,
            handle,
            target,
            usage,
            size: 0,
        }
    }

    /// Create a buffer object with `size` bytes of uninitialized storage
    ///
    /// Used by the uniform/storage buffer types, which size their store at
    /// construction time.
    pub(crate) fn with_size(
        api: Arc<Mutex<dyn GraphicsApi>>,
        target: BufferTarget,
        usage: BufferUsage,
        size: usize,
    ) -> Self {
        let handle = {
            let mut api = api.lock().unwrap();
            let handle = api.create_buffer();
            api.bind_buffer(target, handle);
            api.buffer_data(target, size, None, usage);
            handle
        };
        Self {
            api,
            handle,
            target,
            usage,
            size,
        }
    }

    pub(crate) fn handle(&self) -> BufferHandle {
        self.handle
    }

    pub(crate) fn usage(&self) -> BufferUsage {
        self.usage
    }

    /// Size in bytes of the most recent successful allocation
    pub(crate) fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn bind(&self) {
        self.api.lock().unwrap().bind_buffer(self.target, self.handle);
    }

    pub(crate) fn unbind(&self) {
        self.api.lock().unwrap().unbind_buffer(self.target);
    }

    /// Bind the buffer to an indexed binding point (Uniform/Storage targets)
    pub(crate) fn bind_base(&self, binding_point: u32) {
        self.api
            .lock()
            .unwrap()
            .bind_buffer_base(self.target, binding_point, self.handle);
    }

    /// Full replacement of the buffer contents, applying the update strategy
    pub(crate) fn set_bytes(&mut self, bytes: &[u8]) {
        let mut api = self.api.lock().unwrap();
        api.bind_buffer(self.target, self.handle);

        match self.usage {
            BufferUsage::Dynamic | BufferUsage::Stream => {
                // Orphan the old storage even when the size is unchanged
                api.buffer_data(self.target, bytes.len(), Some(bytes), self.usage);
                self.size = bytes.len();
            }
            BufferUsage::Static => {
                if bytes.len() != self.size {
                    api.buffer_data(self.target, bytes.len(), Some(bytes), self.usage);
                    self.size = bytes.len();
                } else {
                    // Unchanged size: whole-buffer in-place write
                    api.buffer_sub_data(self.target, 0, bytes);
                }
            }
        }
    }

    /// In-place update of a sub-range; fails without touching the buffer if
    /// the range extends past the current allocation
    pub(crate) fn set_sub_bytes(&mut self, bytes: &[u8], byte_offset: usize) -> Result<()> {
        if byte_offset + bytes.len() > self.size {
            render_bail!(
                OutOfRange,
                "nebula::GpuBuffer",
                "sub-range write of {} bytes at offset {} exceeds buffer size {}",
                bytes.len(),
                byte_offset,
                self.size
            );
        }
        let mut api = self.api.lock().unwrap();
        api.bind_buffer(self.target, self.handle);
        api.buffer_sub_data(self.target, byte_offset, bytes);
        Ok(())
    }

    /// Read back `size` bytes from the start of the buffer
    pub(crate) fn read_bytes(&self, size: usize) -> Vec<u8> {
        let mut api = self.api.lock().unwrap();
        api.bind_buffer(self.target, self.handle);
        api.read_buffer_data(self.target, size)
    }
}

impl Drop for GpuBuffer {
    fn drop(&mut self) {
        // Lock failure here means another owner of the api panicked;
        // leaking the handle is the only safe option left
        if let Ok(mut api) = self.api.lock() {
            api.delete_buffer(self.handle);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "gpu_buffer_tests.rs"]
mod tests;
