/// Vertex array - binds buffer memory layouts to numbered attribute slots

use std::sync::{Arc, Mutex};

use rustc_hash::FxHashMap;

use crate::hal::{BufferHandle, BufferTarget, GraphicsApi, ScalarType, VertexArrayHandle};

use super::index_buffer::IndexBuffer;
use super::vertex_buffer::VertexBuffer;

/// Memory layout of one vertex attribute
///
/// Describes how an attribute slot reads the vertex buffer bound alongside
/// it: `component_count` components of `scalar_type`, starting `offset`
/// bytes into each vertex, with `stride` bytes between consecutive vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexAttribute {
    /// Attribute slot index
    pub index: u32,
    /// Number of components (1-4)
    pub component_count: u32,
    /// Scalar type of each component
    pub scalar_type: ScalarType,
    /// Whether integer data is normalized to [0,1] / [-1,1]
    pub normalized: bool,
    /// Bytes between consecutive vertices
    pub stride: u32,
    /// Byte offset of this attribute within a vertex
    pub offset: usize,
}

/// Binding of an attribute slot to a source buffer's layout
#[derive(Debug, Clone, Copy)]
struct AttributeBinding {
    /// Source buffer, referenced but not owned
    buffer: BufferHandle,
    attribute: VertexAttribute,
}

/// Record of the attached index buffer, referenced but not owned
#[derive(Debug, Clone, Copy)]
struct IndexBinding {
    buffer: BufferHandle,
    count: usize,
}

/// Device vertex-array object
///
/// Maps attribute slots to the layouts of one or more vertex buffers and
/// optionally records an index source. The referenced buffers are NOT owned:
/// only their handles are kept, and a referenced buffer must outlive every
/// use of the vertex array. Dropping the vertex array deletes only the
/// vertex-array object itself.
pub struct VertexArray {
    api: Arc<Mutex<dyn GraphicsApi>>,
    handle: VertexArrayHandle,
    attributes: FxHashMap<u32, AttributeBinding>,
    index_binding: Option<IndexBinding>,
}

impl VertexArray {
    /// Create a new empty vertex array
    pub fn new(api: Arc<Mutex<dyn GraphicsApi>>) -> Self {
        let handle = api.lock().unwrap().create_vertex_array();
        Self {
            api,
            handle,
            attributes: FxHashMap::default(),
            index_binding: None,
        }
    }

    /// Bind the vertex array
    pub fn bind(&self) {
        self.api.lock().unwrap().bind_vertex_array(self.handle);
    }

    /// Unbind the vertex array
    pub fn unbind(&self) {
        self.api.lock().unwrap().unbind_vertex_array();
    }

    /// Bind a vertex buffer's memory layout to one or more attribute slots
    ///
    /// Activates this vertex array, binds the buffer, and configures every
    /// attribute in one call. Binding an attribute at a previously used
    /// index overwrites the old mapping (last write wins).
    pub fn add_vertex_buffer(&mut self, buffer: &VertexBuffer, attributes: &[VertexAttribute]) {
        {
            let mut api = self.api.lock().unwrap();
            api.bind_vertex_array(self.handle);
            api.bind_buffer(BufferTarget::Vertex, buffer.handle());
            for attribute in attributes {
                api.enable_vertex_attribute(attribute.index);
                api.vertex_attribute_pointer(
                    attribute.index,
                    attribute.component_count,
                    attribute.scalar_type,
                    attribute.normalized,
                    attribute.stride,
                    attribute.offset,
                );
            }
        }
        for attribute in attributes {
            self.attributes.insert(
                attribute.index,
                AttributeBinding {
                    buffer: buffer.handle(),
                    attribute: *attribute,
                },
            );
        }
    }

    /// Attach an index buffer as the element source
    pub fn set_index_buffer(&mut self, index_buffer: &IndexBuffer) {
        {
            let mut api = self.api.lock().unwrap();
            api.bind_vertex_array(self.handle);
            api.bind_buffer(BufferTarget::Index, index_buffer.handle());
        }
        self.index_binding = Some(IndexBinding {
            buffer: index_buffer.handle(),
            count: index_buffer.count(),
        });
    }

    /// Whether an index buffer is attached (selects indexed vs array draws)
    pub fn has_index_buffer(&self) -> bool {
        self.index_binding.is_some()
    }

    /// Number of indices in the attached index buffer (0 if none)
    pub fn index_count(&self) -> usize {
        self.index_binding.map_or(0, |binding| binding.count)
    }

    /// Handle of the attached index buffer, if any
    pub fn index_buffer_handle(&self) -> Option<BufferHandle> {
        self.index_binding.map(|binding| binding.buffer)
    }

    /// Number of configured attribute slots
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Layout bound at an attribute slot, if any
    pub fn attribute(&self, index: u32) -> Option<&VertexAttribute> {
        self.attributes.get(&index).map(|binding| &binding.attribute)
    }

    /// Source buffer handle bound at an attribute slot, if any
    pub fn attribute_buffer(&self, index: u32) -> Option<BufferHandle> {
        self.attributes.get(&index).map(|binding| binding.buffer)
    }

    /// Device handle of the vertex array
    pub fn handle(&self) -> VertexArrayHandle {
        self.handle
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        // Referenced buffers are the caller's responsibility; only the
        // vertex-array object itself is deleted here
        if let Ok(mut api) = self.api.lock() {
            api.delete_vertex_array(self.handle);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "vertex_array_tests.rs"]
mod tests;
