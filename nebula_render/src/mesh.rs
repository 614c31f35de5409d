//! Mesh - vertex/index data bundled with its attribute layout.

use std::sync::{Arc, Mutex};

use bytemuck::Pod;

use crate::buffers::{IndexBuffer, VertexArray, VertexAttribute, VertexBuffer};
use crate::error::Result;
use crate::hal::{BufferUsage, GraphicsApi};
use crate::render_bail;

/// Drawable vertex/index data
///
/// Owns a vertex buffer, an optional index buffer, and the vertex array
/// wiring them to attribute slots. This is the contract
/// [`Device::draw`](crate::device::Device::draw) consumes: an external model
/// importer produces the raw vertex and index arrays, and a mesh turns them
/// into bound device resources.
pub struct Mesh {
    vertex_array: VertexArray,
    vertex_buffer: VertexBuffer,
    index_buffer: Option<IndexBuffer>,
    vertex_count: usize,
    index_count: usize,
}

impl Mesh {
    /// Create a mesh from vertex data and an optional index array
    ///
    /// # Arguments
    ///
    /// * `api` - Device driver the mesh's resources live on
    /// * `vertices` - Vertex data, uploaded as-is
    /// * `attributes` - Attribute layouts describing the vertex memory
    /// * `indices` - Optional element indices; their presence selects
    ///   indexed draw dispatch
    ///
    /// # Errors
    ///
    /// Fails if the vertex slice is empty.
    pub fn new<V: Pod>(
        api: Arc<Mutex<dyn GraphicsApi>>,
        vertices: &[V],
        attributes: &[VertexAttribute],
        indices: Option<&[u32]>,
    ) -> Result<Self> {
        if vertices.is_empty() {
            render_bail!(
                InvalidParameter,
                "nebula::Mesh",
                "mesh requires at least one vertex"
            );
        }

        let mut vertex_buffer = VertexBuffer::new(api.clone(), BufferUsage::Static);
        vertex_buffer.set_data(vertices);

        let mut vertex_array = VertexArray::new(api.clone());
        vertex_array.add_vertex_buffer(&vertex_buffer, attributes);

        let index_buffer = indices.map(|data| {
            let mut buffer = IndexBuffer::new(api.clone(), BufferUsage::Static);
            buffer.set_data(data);
            vertex_array.set_index_buffer(&buffer);
            buffer
        });

        Ok(Self {
            vertex_array,
            vertex_buffer,
            index_count: index_buffer.as_ref().map_or(0, |buffer| buffer.count()),
            index_buffer,
            vertex_count: vertices.len(),
        })
    }

    /// Bind the mesh for rendering
    pub fn bind(&self) {
        self.vertex_array.bind();
    }

    /// Whether the mesh draws through an index buffer
    pub fn has_indices(&self) -> bool {
        self.index_buffer.is_some()
    }

    /// Number of indices (0 for non-indexed meshes)
    pub fn index_count(&self) -> usize {
        self.index_count
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// The vertex array wiring buffers to attribute slots
    pub fn vertex_array(&self) -> &VertexArray {
        &self.vertex_array
    }

    /// The owned vertex buffer
    pub fn vertex_buffer(&self) -> &VertexBuffer {
        &self.vertex_buffer
    }

    /// The owned index buffer, if any
    pub fn index_buffer(&self) -> Option<&IndexBuffer> {
        self.index_buffer.as_ref()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "mesh_tests.rs"]
mod tests;
