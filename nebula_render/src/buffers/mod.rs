//! GPU buffer resources.
//!
//! Four public buffer types share one update-strategy core: Dynamic/Stream
//! buffers orphan their storage on every full upload, Static buffers
//! reallocate only when the size changes. [`VertexArray`] binds buffer
//! layouts to numbered attribute slots without owning the buffers.

mod gpu_buffer;
pub mod vertex_buffer;
pub mod index_buffer;
pub mod uniform_buffer;
pub mod storage_buffer;
pub mod vertex_array;

pub use vertex_buffer::VertexBuffer;
pub use index_buffer::IndexBuffer;
pub use uniform_buffer::UniformBuffer;
pub use storage_buffer::StorageBuffer;
pub use vertex_array::{VertexArray, VertexAttribute};
