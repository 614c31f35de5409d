/// GraphicsApi trait - the device driver abstraction
///
/// One method per device call, mirroring the bind/upload/state-change/draw
/// vocabulary of a stateful immediate-mode graphics device. Resources and the
/// [`Device`](crate::device::Device) hold the implementation behind
/// `Arc<Mutex<dyn GraphicsApi>>` and issue calls through it; nothing in this
/// crate talks to a device any other way.
///
/// All calls are fire-and-forget from the caller's point of view: they return
/// immediately having enqueued work, and every operation must be issued from
/// the thread that owns the device context.

use glam::Vec4;

use crate::hal::types::{
    AttachmentPoint, BlendFactor, BufferHandle, BufferTarget, BufferUsage, Capability,
    ClearFlags, Comparison, CullFace, FramebufferHandle, FramebufferStatus, FrontFaceWinding,
    InternalFormat, MagFilter, MinFilter, PixelFormat, PixelType, PrimitiveMode, ProgramHandle,
    RasterizationMode, ScalarType, StencilAction, TexImage2dTarget, TextureHandle, TextureTarget,
    UniformKind, UniformLocation, UniformValue, VertexArrayHandle, WrapMode,
};

/// Call-level device driver interface
///
/// Implemented by backends ([`HeadlessApi`](crate::hal::HeadlessApi) in-tree;
/// a windowed context backend would live in a sibling crate). Mutating calls
/// take `&mut self`; pure queries take `&self`.
pub trait GraphicsApi: Send + Sync {
    // ===== BUFFERS =====

    /// Create a buffer object
    fn create_buffer(&mut self) -> BufferHandle;

    /// Delete a buffer object; deleting an unknown name is a silent no-op
    fn delete_buffer(&mut self, handle: BufferHandle);

    /// Bind a buffer to a target
    fn bind_buffer(&mut self, target: BufferTarget, handle: BufferHandle);

    /// Unbind whatever buffer is bound to a target
    fn unbind_buffer(&mut self, target: BufferTarget);

    /// Allocate (or reallocate) the storage of the buffer bound to `target`
    ///
    /// Passing `None` for `data` allocates `size` bytes of uninitialized
    /// storage. Reallocating always abandons the previous storage, which is
    /// the mechanism buffer orphaning relies on.
    fn buffer_data(&mut self, target: BufferTarget, size: usize, data: Option<&[u8]>, usage: BufferUsage);

    /// Write a sub-range of the buffer bound to `target` in place
    fn buffer_sub_data(&mut self, target: BufferTarget, offset: usize, data: &[u8]);

    /// Read back `size` bytes from the start of the buffer bound to `target`
    fn read_buffer_data(&self, target: BufferTarget, size: usize) -> Vec<u8>;

    /// Bind a buffer to an indexed binding point (Uniform/Storage targets)
    fn bind_buffer_base(&mut self, target: BufferTarget, binding_point: u32, handle: BufferHandle);

    // ===== VERTEX ARRAYS =====

    /// Create a vertex-array object
    fn create_vertex_array(&mut self) -> VertexArrayHandle;

    /// Delete a vertex-array object
    fn delete_vertex_array(&mut self, handle: VertexArrayHandle);

    /// Bind a vertex-array object
    fn bind_vertex_array(&mut self, handle: VertexArrayHandle);

    /// Unbind the current vertex-array object
    fn unbind_vertex_array(&mut self);

    /// Enable an attribute slot of the bound vertex array
    fn enable_vertex_attribute(&mut self, index: u32);

    /// Describe the memory layout feeding an attribute slot from the
    /// currently bound vertex buffer
    fn vertex_attribute_pointer(
        &mut self,
        index: u32,
        component_count: u32,
        scalar_type: ScalarType,
        normalized: bool,
        stride: u32,
        offset: usize,
    );

    // ===== TEXTURES =====

    /// Create a texture object
    fn create_texture(&mut self) -> TextureHandle;

    /// Delete a texture object
    fn delete_texture(&mut self, handle: TextureHandle);

    /// Select the active texture unit for subsequent binds
    fn set_active_texture_unit(&mut self, unit: u32);

    /// Bind a texture to a target on the active unit
    fn bind_texture(&mut self, target: TextureTarget, handle: TextureHandle);

    /// Unbind whatever texture is bound to a target on the active unit
    fn unbind_texture(&mut self, target: TextureTarget);

    /// Allocate 2D storage (and optionally upload pixels) for the texture
    /// bound to the target; `None` data allocates without initializing
    fn tex_image_2d(
        &mut self,
        target: TexImage2dTarget,
        internal_format: InternalFormat,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixel_type: PixelType,
        data: Option<&[u8]>,
    );

    /// Upload pre-compressed 2D pixel data for the texture bound to the target
    fn compressed_tex_image_2d(
        &mut self,
        target: TexImage2dTarget,
        internal_format: InternalFormat,
        width: u32,
        height: u32,
        data: &[u8],
    );

    /// Allocate layered storage (and optionally upload pixels) for the
    /// texture bound to the target
    fn tex_image_3d(
        &mut self,
        target: TextureTarget,
        internal_format: InternalFormat,
        width: u32,
        height: u32,
        layers: u32,
        format: PixelFormat,
        pixel_type: PixelType,
        data: Option<&[u8]>,
    );

    /// Replace the pixels of a single layer of the texture bound to the target
    fn tex_sub_image_layer(
        &mut self,
        target: TextureTarget,
        layer: u32,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixel_type: PixelType,
        data: &[u8],
    );

    /// Set the min/mag filters of the texture bound to the target
    fn set_texture_filters(&mut self, target: TextureTarget, min: MinFilter, mag: MagFilter);

    /// Set the wrap modes of the texture bound to the target
    /// (`r` applies to targets with a third coordinate)
    fn set_texture_wrap(&mut self, target: TextureTarget, s: WrapMode, t: WrapMode, r: Option<WrapMode>);

    /// Generate the full mip chain of the texture bound to the target
    fn generate_mipmaps(&mut self, target: TextureTarget);

    /// Whether the device exposes the named extension
    fn has_extension(&self, name: &str) -> bool;

    // ===== FRAMEBUFFERS =====

    /// Create a framebuffer object
    fn create_framebuffer(&mut self) -> FramebufferHandle;

    /// Delete a framebuffer object
    fn delete_framebuffer(&mut self, handle: FramebufferHandle);

    /// Bind a framebuffer object
    fn bind_framebuffer(&mut self, handle: FramebufferHandle);

    /// Unbind the current framebuffer (restores the default target)
    fn unbind_framebuffer(&mut self);

    /// Attach a 2D texture to an attachment point of the bound framebuffer
    fn attach_texture_2d(&mut self, point: AttachmentPoint, texture: TextureHandle);

    /// Declare the dense list of color attachments draws will write to
    fn set_draw_buffers(&mut self, color_attachment_count: u32);

    /// Check completeness of the bound framebuffer
    fn framebuffer_status(&self) -> FramebufferStatus;

    /// Read back pixels from the bound framebuffer
    fn read_pixels(
        &self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixel_type: PixelType,
    ) -> Vec<u8>;

    // ===== PIPELINE STATE =====

    /// Enable or disable a device capability
    fn set_capability(&mut self, capability: Capability, enabled: bool);

    /// Enable or disable depth-buffer writes
    fn set_depth_mask(&mut self, write: bool);

    /// Set the depth comparison function
    fn set_depth_function(&mut self, function: Comparison);

    /// Set the stencil write mask
    fn set_stencil_mask(&mut self, mask: u32);

    /// Set the stencil test function, reference value and read mask
    fn set_stencil_function(&mut self, function: Comparison, reference: i32, read_mask: u32);

    /// Set the stencil operations for fail / depth-fail / pass outcomes
    fn set_stencil_operations(
        &mut self,
        stencil_fail: StencilAction,
        depth_fail: StencilAction,
        pass: StencilAction,
    );

    /// Set the four separate blend factors
    fn set_blend_factors(
        &mut self,
        src_color: BlendFactor,
        dst_color: BlendFactor,
        src_alpha: BlendFactor,
        dst_alpha: BlendFactor,
    );

    /// Enable or disable writes per color channel
    fn set_color_mask(&mut self, red: bool, green: bool, blue: bool, alpha: bool);

    /// Select which faces get culled
    fn set_cull_face(&mut self, face: CullFace);

    /// Select the winding order of front faces
    fn set_front_face(&mut self, winding: FrontFaceWinding);

    /// Select the polygon rasterization mode
    fn set_polygon_mode(&mut self, mode: RasterizationMode);

    /// Set the viewport rectangle
    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32);

    /// Set the color used by subsequent color-buffer clears
    fn set_clear_color(&mut self, color: Vec4);

    /// Clear the selected buffers of the bound framebuffer
    fn clear(&mut self, mask: ClearFlags);

    // ===== DRAW SUBMISSION =====

    /// Dispatch a non-indexed draw
    fn draw_arrays(&mut self, mode: PrimitiveMode, first: i32, vertex_count: u32);

    /// Dispatch an indexed draw using the bound index buffer
    fn draw_elements(&mut self, mode: PrimitiveMode, index_count: u32);

    /// Dispatch an instanced non-indexed draw
    fn draw_arrays_instanced(
        &mut self,
        mode: PrimitiveMode,
        first: i32,
        vertex_count: u32,
        instance_count: u32,
    );

    /// Dispatch an instanced indexed draw using the bound index buffer
    fn draw_elements_instanced(&mut self, mode: PrimitiveMode, index_count: u32, instance_count: u32);

    // ===== PROGRAMS (consumption only; compilation is external) =====

    /// Make a program current for subsequent draws and uniform writes
    fn use_program(&mut self, program: ProgramHandle);

    /// Delete a program object
    fn delete_program(&mut self, program: ProgramHandle);

    /// Enumerate the active uniforms of a program
    fn active_uniforms(&self, program: ProgramHandle) -> Vec<(String, UniformKind)>;

    /// Look up the location of a named uniform
    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;

    /// Write a uniform value at a location of the current program
    fn set_uniform(&mut self, location: UniformLocation, value: &UniformValue);

    // ===== DEVICE INFORMATION =====

    /// Device vendor string
    fn vendor(&self) -> String;

    /// Device hardware string
    fn hardware(&self) -> String;

    /// Driver version string
    fn version(&self) -> String;

    /// Shading language version string
    fn shading_language_version(&self) -> String;
}
