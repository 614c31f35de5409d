/// Call-level vocabulary shared by the driver trait and the resource layer

use bitflags::bitflags;

// ===== OBJECT HANDLES =====
//
// Device object names are plain `u32`s wrapped per object kind so a buffer
// name can never be passed where a texture name is expected. 0 is reserved
// as the device's "nothing bound" sentinel and is never a valid handle.

/// Name of a device buffer object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u32);

/// Name of a device texture object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// Name of a device vertex-array object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayHandle(pub u32);

/// Name of a device framebuffer object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FramebufferHandle(pub u32);

/// Name of a compiled and linked program object
///
/// Programs are produced by an external shader-compilation collaborator;
/// this crate only consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// Location of a uniform within a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

// ===== BUFFERS =====

/// Bind target of a buffer object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BufferTarget {
    /// Vertex attribute data
    Vertex,
    /// Index (element) data
    Index,
    /// Uniform block data
    Uniform,
    /// Shader storage data
    Storage,
}

/// Defines how a buffer's contents will be updated and consumed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferUsage {
    /// Contents are written once and drawn many times
    Static,
    /// Contents are rewritten repeatedly and drawn many times
    Dynamic,
    /// Contents are rewritten once and drawn at most a few times
    Stream,
}

/// Defines how a storage buffer may be accessed by shaders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessSpecifier {
    ReadOnly,
    WriteOnly,
    ReadWrite,
}

/// Scalar type of a vertex attribute component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    Float,
    Double,
}

impl ScalarType {
    /// Size in bytes of one component
    pub fn size_bytes(&self) -> u32 {
        match self {
            ScalarType::Byte | ScalarType::UnsignedByte => 1,
            ScalarType::Short | ScalarType::UnsignedShort => 2,
            ScalarType::Int | ScalarType::UnsignedInt | ScalarType::Float => 4,
            ScalarType::Double => 8,
        }
    }
}

// ===== TEXTURES =====

/// Bind target of a texture object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureTarget {
    /// Plain 2D texture
    TwoDim,
    /// Cube map (6 faces)
    CubeMap,
    /// Array of 2D layers
    TwoDimArray,
}

/// One face of a cube map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeMapFace {
    PositiveX,
    NegativeX,
    PositiveY,
    NegativeY,
    PositiveZ,
    NegativeZ,
}

impl CubeMapFace {
    /// Face index in device order (+X, -X, +Y, -Y, +Z, -Z)
    pub fn index(&self) -> u32 {
        *self as u32
    }

    /// All six faces in device order
    pub fn all() -> [CubeMapFace; 6] {
        [
            CubeMapFace::PositiveX,
            CubeMapFace::NegativeX,
            CubeMapFace::PositiveY,
            CubeMapFace::NegativeY,
            CubeMapFace::PositiveZ,
            CubeMapFace::NegativeZ,
        ]
    }
}

/// Target of a 2D image upload: a plain 2D texture or one cube-map face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TexImage2dTarget {
    TwoDim,
    CubeMapFace(CubeMapFace),
}

/// Texture minification filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    LinearMipmapLinear,
}

impl MinFilter {
    /// Whether this filter samples from a mip chain
    pub fn requires_mipmaps(&self) -> bool {
        !matches!(self, MinFilter::Nearest | MinFilter::Linear)
    }
}

/// Texture magnification filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MagFilter {
    Nearest,
    Linear,
}

/// Texture coordinate wrap mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrapMode {
    Repeat,
    MirroredRepeat,
    ClampToEdge,
    ClampToBorder,
}

/// Internal storage format of texture memory
///
/// Fixed at allocation time and reused by `resize` so a reallocation never
/// changes the format of existing storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InternalFormat {
    // Uncompressed formats
    Rgba8,
    Srgb8Alpha8,
    Rgba16F,
    Depth24Stencil8,

    // S3TC compressed formats
    CompressedRgbS3tcDxt1,
    CompressedRgbaS3tcDxt5,
    CompressedSrgbS3tcDxt1,
    CompressedSrgbaS3tcDxt5,

    // BPTC compressed formats
    CompressedRgbBptcFloat,
    CompressedRgbaBptc,
    CompressedSrgbBptc,
    CompressedSrgbaBptc,

    // ETC2 compressed formats
    CompressedRgb8Etc2,
    CompressedRgba8Etc2Eac,
    CompressedSrgb8Etc2,
    CompressedSrgba8Etc2Eac,
}

impl InternalFormat {
    /// Whether this is a block-compressed format
    pub fn is_compressed(&self) -> bool {
        !matches!(
            self,
            InternalFormat::Rgba8
                | InternalFormat::Srgb8Alpha8
                | InternalFormat::Rgba16F
                | InternalFormat::Depth24Stencil8
        )
    }
}

/// Layout of pixel data handed to (or read from) the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgba,
    DepthComponent,
    DepthStencil,
}

impl PixelFormat {
    /// Number of components per pixel
    pub fn components(&self) -> usize {
        match self {
            PixelFormat::Rgba => 4,
            PixelFormat::DepthComponent | PixelFormat::DepthStencil => 1,
        }
    }
}

/// Component type of pixel data handed to (or read from) the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelType {
    UnsignedByte,
    Float,
    /// Packed 24-bit depth + 8-bit stencil
    UnsignedInt248,
}

impl PixelType {
    /// Size in bytes of one component
    pub fn size_bytes(&self) -> usize {
        match self {
            PixelType::UnsignedByte => 1,
            PixelType::Float | PixelType::UnsignedInt248 => 4,
        }
    }
}

/// Size in bytes of one pixel in the given transfer layout
pub fn bytes_per_pixel(format: PixelFormat, pixel_type: PixelType) -> usize {
    format.components() * pixel_type.size_bytes()
}

// ===== FRAMEBUFFERS =====

/// Attachment point of a framebuffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttachmentPoint {
    /// Color attachment at the given dense slot index
    Color(u32),
    /// The single combined depth/stencil attachment
    DepthStencil,
}

/// Result of a framebuffer completeness check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FramebufferStatus {
    /// All attachments are compatible and sufficient for rendering
    Complete,
    /// An attachment is unusable (zero-sized, deleted, mismatched dimensions)
    IncompleteAttachment,
    /// No image is attached at all
    MissingAttachment,
    /// The attachment combination is not supported by the device
    Unsupported,
}

impl FramebufferStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, FramebufferStatus::Complete)
    }
}

// ===== PIPELINE STATE VOCABULARY =====

/// Device capabilities that can be enabled or disabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    DepthTest,
    StencilTest,
    Blend,
    CullFace,
    ScissorTest,
    Multisample,
}

/// Comparison function used by depth and stencil tests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Never,
    Less,
    Equal,
    LessEqual,
    Greater,
    NotEqual,
    GreaterEqual,
    Always,
}

/// Operation applied to the stencil buffer on a test outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StencilAction {
    Keep,
    Zero,
    Replace,
    Increment,
    IncrementWrap,
    Decrement,
    DecrementWrap,
    Invert,
}

/// Blend factor for the blending equation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendFactor {
    Zero,
    One,
    SrcColor,
    OneMinusSrcColor,
    DstColor,
    OneMinusDstColor,
    SrcAlpha,
    OneMinusSrcAlpha,
    DstAlpha,
    OneMinusDstAlpha,
    ConstantColor,
    OneMinusConstantColor,
    SrcAlphaSaturate,
}

/// Which faces get culled when culling is enabled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullFace {
    Front,
    Back,
    FrontAndBack,
}

/// Winding order that defines a front-facing polygon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontFaceWinding {
    CounterClockwise,
    Clockwise,
}

/// Defines how polygons should be rasterized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterizationMode {
    Point,
    Line,
    Fill,
}

/// Primitive assembly mode of a draw call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveMode {
    Points,
    Lines,
    LineStrip,
    Triangles,
    TriangleStrip,
    TriangleFan,
}

bitflags! {
    /// Buffers targeted by a clear operation
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClearFlags: u32 {
        const COLOR = 1 << 0;
        const DEPTH = 1 << 1;
        const STENCIL = 1 << 2;
    }
}

// ===== UNIFORMS =====

/// Data type of a program uniform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformKind {
    Bool,
    Int,
    Float,
    Vec2,
    Vec3,
    Vec4,
    Mat3,
    Mat4,
    Sampler2D,
    SamplerCube,
}

/// Value written to a program uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec2(glam::Vec2),
    Vec3(glam::Vec3),
    Vec4(glam::Vec4),
    Mat3(glam::Mat3),
    Mat4(glam::Mat4),
    /// Texture unit index for a sampler uniform
    Sampler(i32),
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "types_tests.rs"]
mod tests;
