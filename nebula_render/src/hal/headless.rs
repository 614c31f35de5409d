/// Headless backend - full GraphicsApi implementation without a GPU
///
/// Implements the whole driver contract against in-memory tables: buffer
/// contents are stored byte-for-byte, every reallocating upload bumps a
/// per-object allocation generation, framebuffer completeness follows the
/// device rules, and every mutating call is recorded in an inspectable call
/// trace. This is what unit and integration tests (and CI) run against;
/// a windowed context backend would live in a sibling crate.

use glam::Vec4;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::hal::api::GraphicsApi;
use crate::hal::types::{
    AttachmentPoint, BlendFactor, BufferHandle, BufferTarget, BufferUsage, Capability, ClearFlags,
    Comparison, CullFace, FramebufferHandle, FramebufferStatus, FrontFaceWinding, InternalFormat,
    MagFilter, MinFilter, PixelFormat, PixelType, PrimitiveMode, ProgramHandle, RasterizationMode,
    ScalarType, StencilAction, TexImage2dTarget, TextureHandle, TextureTarget, UniformKind,
    UniformLocation, UniformValue, VertexArrayHandle, WrapMode, bytes_per_pixel,
};
use crate::utils::HandleAllocator;

// ===== OBJECT RECORDS =====

#[derive(Debug, Default)]
struct BufferObject {
    data: Vec<u8>,
    usage: Option<BufferUsage>,
    /// Bumped on every reallocating upload; in-place sub-range writes leave it alone
    generation: u32,
}

#[derive(Debug, Default)]
struct TextureObject {
    width: u32,
    height: u32,
    layers: u32,
    internal_format: Option<InternalFormat>,
    /// Bumped on every storage (re)allocation
    generation: u32,
    has_mipmaps: bool,
}

#[derive(Debug, Default)]
struct VertexArrayObject {
    enabled_attributes: Vec<u32>,
}

#[derive(Debug, Default)]
struct FramebufferObject {
    color_attachments: FxHashMap<u32, TextureHandle>,
    depth_stencil: Option<TextureHandle>,
    draw_buffers: u32,
}

#[derive(Debug)]
struct ProgramObject {
    uniforms: Vec<(String, UniformKind)>,
}

// ===== HEADLESS BACKEND =====

/// In-memory device backend
///
/// # Example
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use nebula_render::hal::HeadlessApi;
/// use nebula_render::buffers::VertexBuffer;
/// use nebula_render::hal::BufferUsage;
///
/// let api = Arc::new(Mutex::new(HeadlessApi::new()));
/// let mut buffer = VertexBuffer::new(api.clone(), BufferUsage::Static);
/// buffer.set_data(&[0.0f32, 1.0, 2.0]);
/// assert_eq!(buffer.size(), 12);
/// assert_eq!(api.lock().unwrap().buffer_generation(buffer.handle()), Some(1));
/// ```
pub struct HeadlessApi {
    calls: Vec<String>,
    extensions: FxHashSet<String>,
    force_incomplete: bool,

    buffer_names: HandleAllocator,
    buffers: FxHashMap<u32, BufferObject>,
    bound_buffers: FxHashMap<BufferTarget, u32>,
    base_bindings: FxHashMap<(BufferTarget, u32), u32>,

    vertex_array_names: HandleAllocator,
    vertex_arrays: FxHashMap<u32, VertexArrayObject>,
    bound_vertex_array: Option<u32>,

    texture_names: HandleAllocator,
    textures: FxHashMap<u32, TextureObject>,
    bound_textures: FxHashMap<TextureTarget, u32>,
    active_texture_unit: u32,

    framebuffer_names: HandleAllocator,
    framebuffers: FxHashMap<u32, FramebufferObject>,
    bound_framebuffer: Option<u32>,

    program_names: HandleAllocator,
    programs: FxHashMap<u32, ProgramObject>,
}

impl HeadlessApi {
    /// Create a backend exposing no optional extensions
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            extensions: FxHashSet::default(),
            force_incomplete: false,
            buffer_names: HandleAllocator::new(),
            buffers: FxHashMap::default(),
            bound_buffers: FxHashMap::default(),
            base_bindings: FxHashMap::default(),
            vertex_array_names: HandleAllocator::new(),
            vertex_arrays: FxHashMap::default(),
            bound_vertex_array: None,
            texture_names: HandleAllocator::new(),
            textures: FxHashMap::default(),
            bound_textures: FxHashMap::default(),
            active_texture_unit: 0,
            framebuffer_names: HandleAllocator::new(),
            framebuffers: FxHashMap::default(),
            bound_framebuffer: None,
            program_names: HandleAllocator::new(),
            programs: FxHashMap::default(),
        }
    }

    /// Create a backend exposing the given extension strings
    pub fn with_extensions(extensions: &[&str]) -> Self {
        let mut api = Self::new();
        for ext in extensions {
            api.extensions.insert((*ext).to_string());
        }
        api
    }

    /// Add an extension to the exposed set
    pub fn add_extension(&mut self, name: &str) {
        self.extensions.insert(name.to_string());
    }

    /// Force every subsequent completeness check to fail
    ///
    /// Used by tests exercising the framebuffer teardown-on-failure path.
    pub fn set_force_incomplete(&mut self, force: bool) {
        self.force_incomplete = force;
    }

    /// Install a program object with the given uniform table
    ///
    /// Stands in for the external shader-compilation collaborator; locations
    /// are assigned in declaration order.
    pub fn install_program(&mut self, uniforms: &[(&str, UniformKind)]) -> ProgramHandle {
        let name = self.program_names.alloc();
        self.programs.insert(
            name,
            ProgramObject {
                uniforms: uniforms.iter().map(|(n, k)| ((*n).to_string(), *k)).collect(),
            },
        );
        ProgramHandle(name)
    }

    // ===== CALL TRACE INSPECTION =====

    /// All recorded calls since creation or the last [`take_calls`](Self::take_calls)
    pub fn calls(&self) -> &[String] {
        &self.calls
    }

    /// Drain and return the recorded calls, leaving the trace empty
    pub fn take_calls(&mut self) -> Vec<String> {
        std::mem::take(&mut self.calls)
    }

    /// Number of recorded calls whose name starts with `prefix`
    pub fn count_calls(&self, prefix: &str) -> usize {
        self.calls.iter().filter(|c| c.starts_with(prefix)).count()
    }

    // ===== OBJECT INSPECTION =====

    /// Allocation generation of a buffer (1 after the first upload)
    pub fn buffer_generation(&self, handle: BufferHandle) -> Option<u32> {
        self.buffers.get(&handle.0).map(|b| b.generation)
    }

    /// Current storage size of a buffer in bytes
    pub fn buffer_size(&self, handle: BufferHandle) -> Option<usize> {
        self.buffers.get(&handle.0).map(|b| b.data.len())
    }

    /// Current contents of a buffer
    pub fn buffer_bytes(&self, handle: BufferHandle) -> Option<&[u8]> {
        self.buffers.get(&handle.0).map(|b| b.data.as_slice())
    }

    /// Allocation generation of a texture's storage
    pub fn texture_generation(&self, handle: TextureHandle) -> Option<u32> {
        self.textures.get(&handle.0).map(|t| t.generation)
    }

    /// Dimensions of a texture's storage
    pub fn texture_size(&self, handle: TextureHandle) -> Option<(u32, u32)> {
        self.textures.get(&handle.0).map(|t| (t.width, t.height))
    }

    /// Internal format recorded for a texture's storage
    pub fn texture_internal_format(&self, handle: TextureHandle) -> Option<InternalFormat> {
        self.textures.get(&handle.0).and_then(|t| t.internal_format)
    }

    /// Whether a texture has a generated mip chain
    pub fn texture_has_mipmaps(&self, handle: TextureHandle) -> Option<bool> {
        self.textures.get(&handle.0).map(|t| t.has_mipmaps)
    }

    /// Number of live buffer objects
    pub fn live_buffers(&self) -> u32 {
        self.buffer_names.live()
    }

    /// Number of live texture objects
    pub fn live_textures(&self) -> u32 {
        self.texture_names.live()
    }

    /// Number of live vertex-array objects
    pub fn live_vertex_arrays(&self) -> u32 {
        self.vertex_array_names.live()
    }

    /// Number of live framebuffer objects
    pub fn live_framebuffers(&self) -> u32 {
        self.framebuffer_names.live()
    }

    /// Buffer bound to an indexed binding point, if any
    pub fn base_binding(&self, target: BufferTarget, binding_point: u32) -> Option<BufferHandle> {
        self.base_bindings.get(&(target, binding_point)).map(|h| BufferHandle(*h))
    }

    /// Usage hint recorded for a buffer's storage
    pub fn buffer_usage(&self, handle: BufferHandle) -> Option<BufferUsage> {
        self.buffers.get(&handle.0).and_then(|b| b.usage)
    }

    /// Layer count of a texture's storage
    pub fn texture_layer_count(&self, handle: TextureHandle) -> Option<u32> {
        self.textures.get(&handle.0).map(|t| t.layers)
    }

    /// Attribute slots enabled on a vertex array
    pub fn vertex_array_attributes(&self, handle: VertexArrayHandle) -> Option<&[u32]> {
        self.vertex_arrays
            .get(&handle.0)
            .map(|vao| vao.enabled_attributes.as_slice())
    }

    /// Declared draw-buffer count of a framebuffer
    pub fn framebuffer_draw_buffers(&self, handle: FramebufferHandle) -> Option<u32> {
        self.framebuffers.get(&handle.0).map(|fb| fb.draw_buffers)
    }

    /// Currently active texture unit
    pub fn active_texture_unit(&self) -> u32 {
        self.active_texture_unit
    }

    // ===== INTERNAL =====

    fn record(&mut self, call: String) {
        self.calls.push(call);
    }

    fn bound_buffer_mut(&mut self, target: BufferTarget) -> Option<&mut BufferObject> {
        let name = *self.bound_buffers.get(&target)?;
        self.buffers.get_mut(&name)
    }

    fn bound_texture_mut(&mut self, target: TextureTarget) -> Option<&mut TextureObject> {
        let name = *self.bound_textures.get(&target)?;
        self.textures.get_mut(&name)
    }

    fn image_target(target: TexImage2dTarget) -> TextureTarget {
        match target {
            TexImage2dTarget::TwoDim => TextureTarget::TwoDim,
            TexImage2dTarget::CubeMapFace(_) => TextureTarget::CubeMap,
        }
    }

    fn attachment_dimensions(&self, handle: TextureHandle) -> Option<(u32, u32)> {
        let texture = self.textures.get(&handle.0)?;
        if texture.internal_format.is_none() {
            return None;
        }
        Some((texture.width, texture.height))
    }

    fn check_bound_framebuffer(&self) -> FramebufferStatus {
        if self.force_incomplete {
            return FramebufferStatus::IncompleteAttachment;
        }
        let Some(name) = self.bound_framebuffer else {
            // Default framebuffer is always usable
            return FramebufferStatus::Complete;
        };
        let Some(fb) = self.framebuffers.get(&name) else {
            return FramebufferStatus::Unsupported;
        };
        if fb.color_attachments.is_empty() && fb.depth_stencil.is_none() {
            return FramebufferStatus::MissingAttachment;
        }

        // Every attachment must have allocated, non-zero storage of one size
        let mut dimensions: Option<(u32, u32)> = None;
        let attachments = fb
            .color_attachments
            .values()
            .copied()
            .chain(fb.depth_stencil);
        for attachment in attachments {
            match self.attachment_dimensions(attachment) {
                Some((w, h)) if w > 0 && h > 0 => {
                    if let Some(expected) = dimensions {
                        if expected != (w, h) {
                            return FramebufferStatus::IncompleteAttachment;
                        }
                    }
                    dimensions = Some((w, h));
                }
                _ => return FramebufferStatus::IncompleteAttachment,
            }
        }
        FramebufferStatus::Complete
    }
}

impl Default for HeadlessApi {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphicsApi for HeadlessApi {
    // ===== BUFFERS =====

    fn create_buffer(&mut self) -> BufferHandle {
        let name = self.buffer_names.alloc();
        self.buffers.insert(name, BufferObject::default());
        self.record(format!("create_buffer() -> {}", name));
        BufferHandle(name)
    }

    fn delete_buffer(&mut self, handle: BufferHandle) {
        self.record(format!("delete_buffer({})", handle.0));
        if self.buffers.remove(&handle.0).is_some() {
            self.buffer_names.free(handle.0);
            self.bound_buffers.retain(|_, bound| *bound != handle.0);
            self.base_bindings.retain(|_, bound| *bound != handle.0);
        }
    }

    fn bind_buffer(&mut self, target: BufferTarget, handle: BufferHandle) {
        self.record(format!("bind_buffer({:?}, {})", target, handle.0));
        self.bound_buffers.insert(target, handle.0);
    }

    fn unbind_buffer(&mut self, target: BufferTarget) {
        self.record(format!("unbind_buffer({:?})", target));
        self.bound_buffers.remove(&target);
    }

    fn buffer_data(&mut self, target: BufferTarget, size: usize, data: Option<&[u8]>, usage: BufferUsage) {
        self.record(format!("buffer_data({:?}, {} bytes, {:?})", target, size, usage));
        let contents = match data {
            Some(bytes) => bytes.to_vec(),
            None => vec![0; size],
        };
        if let Some(buffer) = self.bound_buffer_mut(target) {
            buffer.data = contents;
            buffer.usage = Some(usage);
            buffer.generation += 1;
        }
    }

    fn buffer_sub_data(&mut self, target: BufferTarget, offset: usize, data: &[u8]) {
        self.record(format!("buffer_sub_data({:?}, offset {}, {} bytes)", target, offset, data.len()));
        if let Some(buffer) = self.bound_buffer_mut(target) {
            let end = offset + data.len();
            // Out-of-range writes are dropped, the way a device flags an
            // error and leaves the store untouched
            if end <= buffer.data.len() {
                buffer.data[offset..end].copy_from_slice(data);
            }
        }
    }

    fn read_buffer_data(&self, target: BufferTarget, size: usize) -> Vec<u8> {
        let Some(name) = self.bound_buffers.get(&target) else {
            return vec![0; size];
        };
        match self.buffers.get(name) {
            Some(buffer) if size <= buffer.data.len() => buffer.data[..size].to_vec(),
            _ => vec![0; size],
        }
    }

    fn bind_buffer_base(&mut self, target: BufferTarget, binding_point: u32, handle: BufferHandle) {
        self.record(format!("bind_buffer_base({:?}, {}, {})", target, binding_point, handle.0));
        self.base_bindings.insert((target, binding_point), handle.0);
    }

    // ===== VERTEX ARRAYS =====

    fn create_vertex_array(&mut self) -> VertexArrayHandle {
        let name = self.vertex_array_names.alloc();
        self.vertex_arrays.insert(name, VertexArrayObject::default());
        self.record(format!("create_vertex_array() -> {}", name));
        VertexArrayHandle(name)
    }

    fn delete_vertex_array(&mut self, handle: VertexArrayHandle) {
        self.record(format!("delete_vertex_array({})", handle.0));
        if self.vertex_arrays.remove(&handle.0).is_some() {
            self.vertex_array_names.free(handle.0);
            if self.bound_vertex_array == Some(handle.0) {
                self.bound_vertex_array = None;
            }
        }
    }

    fn bind_vertex_array(&mut self, handle: VertexArrayHandle) {
        self.record(format!("bind_vertex_array({})", handle.0));
        self.bound_vertex_array = Some(handle.0);
    }

    fn unbind_vertex_array(&mut self) {
        self.record("unbind_vertex_array()".to_string());
        self.bound_vertex_array = None;
    }

    fn enable_vertex_attribute(&mut self, index: u32) {
        self.record(format!("enable_vertex_attribute({})", index));
        if let Some(name) = self.bound_vertex_array {
            if let Some(vao) = self.vertex_arrays.get_mut(&name) {
                if !vao.enabled_attributes.contains(&index) {
                    vao.enabled_attributes.push(index);
                }
            }
        }
    }

    fn vertex_attribute_pointer(
        &mut self,
        index: u32,
        component_count: u32,
        scalar_type: ScalarType,
        normalized: bool,
        stride: u32,
        offset: usize,
    ) {
        self.record(format!(
            "vertex_attribute_pointer({}, {}, {:?}, {}, stride {}, offset {})",
            index, component_count, scalar_type, normalized, stride, offset
        ));
    }

    // ===== TEXTURES =====

    fn create_texture(&mut self) -> TextureHandle {
        let name = self.texture_names.alloc();
        self.textures.insert(name, TextureObject::default());
        self.record(format!("create_texture() -> {}", name));
        TextureHandle(name)
    }

    fn delete_texture(&mut self, handle: TextureHandle) {
        self.record(format!("delete_texture({})", handle.0));
        if self.textures.remove(&handle.0).is_some() {
            self.texture_names.free(handle.0);
            self.bound_textures.retain(|_, bound| *bound != handle.0);
        }
    }

    fn set_active_texture_unit(&mut self, unit: u32) {
        self.record(format!("set_active_texture_unit({})", unit));
        self.active_texture_unit = unit;
    }

    fn bind_texture(&mut self, target: TextureTarget, handle: TextureHandle) {
        self.record(format!("bind_texture({:?}, {})", target, handle.0));
        self.bound_textures.insert(target, handle.0);
    }

    fn unbind_texture(&mut self, target: TextureTarget) {
        self.record(format!("unbind_texture({:?})", target));
        self.bound_textures.remove(&target);
    }

    fn tex_image_2d(
        &mut self,
        target: TexImage2dTarget,
        internal_format: InternalFormat,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixel_type: PixelType,
        data: Option<&[u8]>,
    ) {
        self.record(format!(
            "tex_image_2d({:?}, {:?}, {}x{}, {:?}, {:?}, {})",
            target,
            internal_format,
            width,
            height,
            format,
            pixel_type,
            if data.is_some() { "pixels" } else { "no pixels" }
        ));
        let bind_target = Self::image_target(target);
        if let Some(texture) = self.bound_texture_mut(bind_target) {
            texture.width = width;
            texture.height = height;
            texture.layers = 1;
            texture.internal_format = Some(internal_format);
            texture.generation += 1;
        }
    }

    fn compressed_tex_image_2d(
        &mut self,
        target: TexImage2dTarget,
        internal_format: InternalFormat,
        width: u32,
        height: u32,
        data: &[u8],
    ) {
        self.record(format!(
            "compressed_tex_image_2d({:?}, {:?}, {}x{}, {} bytes)",
            target,
            internal_format,
            width,
            height,
            data.len()
        ));
        let bind_target = Self::image_target(target);
        if let Some(texture) = self.bound_texture_mut(bind_target) {
            texture.width = width;
            texture.height = height;
            texture.layers = 1;
            texture.internal_format = Some(internal_format);
            texture.generation += 1;
        }
    }

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
    ) {
        self.record(format!(
            "tex_image_3d({:?}, {:?}, {}x{}x{}, {:?}, {:?}, {})",
            target,
            internal_format,
            width,
            height,
            layers,
            format,
            pixel_type,
            if data.is_some() { "pixels" } else { "no pixels" }
        ));
        if let Some(texture) = self.bound_texture_mut(target) {
            texture.width = width;
            texture.height = height;
            texture.layers = layers;
            texture.internal_format = Some(internal_format);
            texture.generation += 1;
        }
    }

    fn tex_sub_image_layer(
        &mut self,
        target: TextureTarget,
        layer: u32,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixel_type: PixelType,
        data: &[u8],
    ) {
        self.record(format!(
            "tex_sub_image_layer({:?}, layer {}, {}x{}, {:?}, {:?}, {} bytes)",
            target,
            layer,
            width,
            height,
            format,
            pixel_type,
            data.len()
        ));
    }

    fn set_texture_filters(&mut self, target: TextureTarget, min: MinFilter, mag: MagFilter) {
        self.record(format!("set_texture_filters({:?}, {:?}, {:?})", target, min, mag));
    }

    fn set_texture_wrap(&mut self, target: TextureTarget, s: WrapMode, t: WrapMode, r: Option<WrapMode>) {
        self.record(format!("set_texture_wrap({:?}, {:?}, {:?}, {:?})", target, s, t, r));
    }

    fn generate_mipmaps(&mut self, target: TextureTarget) {
        self.record(format!("generate_mipmaps({:?})", target));
        if let Some(texture) = self.bound_texture_mut(target) {
            texture.has_mipmaps = true;
        }
    }

    fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }

    // ===== FRAMEBUFFERS =====

    fn create_framebuffer(&mut self) -> FramebufferHandle {
        let name = self.framebuffer_names.alloc();
        self.framebuffers.insert(name, FramebufferObject::default());
        self.record(format!("create_framebuffer() -> {}", name));
        FramebufferHandle(name)
    }

    fn delete_framebuffer(&mut self, handle: FramebufferHandle) {
        self.record(format!("delete_framebuffer({})", handle.0));
        if self.framebuffers.remove(&handle.0).is_some() {
            self.framebuffer_names.free(handle.0);
            if self.bound_framebuffer == Some(handle.0) {
                self.bound_framebuffer = None;
            }
        }
    }

    fn bind_framebuffer(&mut self, handle: FramebufferHandle) {
        self.record(format!("bind_framebuffer({})", handle.0));
        self.bound_framebuffer = Some(handle.0);
    }

    fn unbind_framebuffer(&mut self) {
        self.record("unbind_framebuffer()".to_string());
        self.bound_framebuffer = None;
    }

    fn attach_texture_2d(&mut self, point: AttachmentPoint, texture: TextureHandle) {
        self.record(format!("attach_texture_2d({:?}, {})", point, texture.0));
        if let Some(name) = self.bound_framebuffer {
            if let Some(fb) = self.framebuffers.get_mut(&name) {
                match point {
                    AttachmentPoint::Color(slot) => {
                        fb.color_attachments.insert(slot, texture);
                    }
                    AttachmentPoint::DepthStencil => {
                        fb.depth_stencil = Some(texture);
                    }
                }
            }
        }
    }

    fn set_draw_buffers(&mut self, color_attachment_count: u32) {
        self.record(format!("set_draw_buffers({})", color_attachment_count));
        if let Some(name) = self.bound_framebuffer {
            if let Some(fb) = self.framebuffers.get_mut(&name) {
                fb.draw_buffers = color_attachment_count;
            }
        }
    }

    fn framebuffer_status(&self) -> FramebufferStatus {
        self.check_bound_framebuffer()
    }

    fn read_pixels(
        &self,
        _x: i32,
        _y: i32,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixel_type: PixelType,
    ) -> Vec<u8> {
        vec![0; width as usize * height as usize * bytes_per_pixel(format, pixel_type)]
    }

    // ===== PIPELINE STATE =====

    fn set_capability(&mut self, capability: Capability, enabled: bool) {
        self.record(format!("set_capability({:?}, {})", capability, enabled));
    }

    fn set_depth_mask(&mut self, write: bool) {
        self.record(format!("set_depth_mask({})", write));
    }

    fn set_depth_function(&mut self, function: Comparison) {
        self.record(format!("set_depth_function({:?})", function));
    }

    fn set_stencil_mask(&mut self, mask: u32) {
        self.record(format!("set_stencil_mask({:#x})", mask));
    }

    fn set_stencil_function(&mut self, function: Comparison, reference: i32, read_mask: u32) {
        self.record(format!(
            "set_stencil_function({:?}, {}, {:#x})",
            function, reference, read_mask
        ));
    }

    fn set_stencil_operations(
        &mut self,
        stencil_fail: StencilAction,
        depth_fail: StencilAction,
        pass: StencilAction,
    ) {
        self.record(format!(
            "set_stencil_operations({:?}, {:?}, {:?})",
            stencil_fail, depth_fail, pass
        ));
    }

    fn set_blend_factors(
        &mut self,
        src_color: BlendFactor,
        dst_color: BlendFactor,
        src_alpha: BlendFactor,
        dst_alpha: BlendFactor,
    ) {
        self.record(format!(
            "set_blend_factors({:?}, {:?}, {:?}, {:?})",
            src_color, dst_color, src_alpha, dst_alpha
        ));
    }

    fn set_color_mask(&mut self, red: bool, green: bool, blue: bool, alpha: bool) {
        self.record(format!("set_color_mask({}, {}, {}, {})", red, green, blue, alpha));
    }

    fn set_cull_face(&mut self, face: CullFace) {
        self.record(format!("set_cull_face({:?})", face));
    }

    fn set_front_face(&mut self, winding: FrontFaceWinding) {
        self.record(format!("set_front_face({:?})", winding));
    }

    fn set_polygon_mode(&mut self, mode: RasterizationMode) {
        self.record(format!("set_polygon_mode({:?})", mode));
    }

    fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.record(format!("set_viewport({}, {}, {}, {})", x, y, width, height));
    }

    fn set_clear_color(&mut self, color: Vec4) {
        self.record(format!(
            "set_clear_color({}, {}, {}, {})",
            color.x, color.y, color.z, color.w
        ));
    }

    fn clear(&mut self, mask: ClearFlags) {
        self.record(format!("clear({:?})", mask));
    }

    // ===== DRAW SUBMISSION =====

    fn draw_arrays(&mut self, mode: PrimitiveMode, first: i32, vertex_count: u32) {
        self.record(format!("draw_arrays({:?}, {}, {})", mode, first, vertex_count));
    }

    fn draw_elements(&mut self, mode: PrimitiveMode, index_count: u32) {
        self.record(format!("draw_elements({:?}, {})", mode, index_count));
    }

    fn draw_arrays_instanced(
        &mut self,
        mode: PrimitiveMode,
        first: i32,
        vertex_count: u32,
        instance_count: u32,
    ) {
        self.record(format!(
            "draw_arrays_instanced({:?}, {}, {}, {} instances)",
            mode, first, vertex_count, instance_count
        ));
    }

    fn draw_elements_instanced(&mut self, mode: PrimitiveMode, index_count: u32, instance_count: u32) {
        self.record(format!(
            "draw_elements_instanced({:?}, {}, {} instances)",
            mode, index_count, instance_count
        ));
    }

    // ===== PROGRAMS =====

    fn use_program(&mut self, program: ProgramHandle) {
        self.record(format!("use_program({})", program.0));
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        self.record(format!("delete_program({})", program.0));
        if self.programs.remove(&program.0).is_some() {
            self.program_names.free(program.0);
        }
    }

    fn active_uniforms(&self, program: ProgramHandle) -> Vec<(String, UniformKind)> {
        self.programs
            .get(&program.0)
            .map(|p| p.uniforms.clone())
            .unwrap_or_default()
    }

    fn uniform_location(&self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        let program = self.programs.get(&program.0)?;
        program
            .uniforms
            .iter()
            .position(|(uniform_name, _)| uniform_name == name)
            .map(|index| UniformLocation(index as i32))
    }

    fn set_uniform(&mut self, location: UniformLocation, value: &UniformValue) {
        self.record(format!("set_uniform({}, {:?})", location.0, value));
    }

    // ===== DEVICE INFORMATION =====

    fn vendor(&self) -> String {
        "Nebula".to_string()
    }

    fn hardware(&self) -> String {
        "Headless Device".to_string()
    }

    fn version(&self) -> String {
        "1.0 headless".to_string()
    }

    fn shading_language_version(&self) -> String {
        "1.0 headless".to_string()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "headless_tests.rs"]
mod tests;
