/// Texture format negotiation
///
/// Maps a requested logical format (compression family x quality tier x
/// color-space flag) to a concrete internal format through a capability
/// table. When the platform lacks the extension a compressed family needs,
/// negotiation silently falls back to the uncompressed equivalent of the
/// same color space. Texture creation never fails solely because
/// compression support is missing; portability across hardware capability
/// tiers is treated as the normal case, not an exceptional one.

use crate::hal::{GraphicsApi, InternalFormat};
use crate::render_warn;

/// Texture quality presets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureQuality {
    /// Low quality, high compression ratio
    Low,
    /// Balanced quality and compression ratio
    Medium,
    /// High quality, low compression ratio
    High,
    /// Lossless / highest quality
    Ultra,
}

/// Compression family of a requested texture format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatFamily {
    Uncompressed,
    CompressedRgb,
    CompressedRgba,
    CompressedSrgb,
    CompressedSrgba,
}

impl FormatFamily {
    /// Device extension this family needs, if any
    pub fn required_extension(&self) -> Option<&'static str> {
        match self {
            FormatFamily::Uncompressed => None,
            FormatFamily::CompressedRgb | FormatFamily::CompressedRgba => {
                Some("GL_EXT_texture_compression_s3tc")
            }
            FormatFamily::CompressedSrgb | FormatFamily::CompressedSrgba => {
                Some("GL_EXT_texture_sRGB")
            }
        }
    }
}

/// Requested logical format of a texture allocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatRequest {
    pub family: FormatFamily,
    pub quality: TextureQuality,
    pub srgb: bool,
}

impl FormatRequest {
    /// Plain uncompressed RGBA request
    pub fn uncompressed() -> Self {
        Self {
            family: FormatFamily::Uncompressed,
            quality: TextureQuality::High,
            srgb: false,
        }
    }

    /// Uncompressed sRGB request
    pub fn uncompressed_srgb() -> Self {
        Self {
            family: FormatFamily::Uncompressed,
            quality: TextureQuality::High,
            srgb: true,
        }
    }
}

impl Default for FormatRequest {
    fn default() -> Self {
        Self::uncompressed()
    }
}

/// Resolve a request against the capability table
///
/// Combinations outside the table (e.g. a compressed family with a
/// mismatched color-space flag) resolve to plain RGBA.
pub fn resolve(family: FormatFamily, quality: TextureQuality, srgb: bool) -> InternalFormat {
    match (family, quality, srgb) {
        // Uncompressed formats
        (FormatFamily::Uncompressed, _, false) => InternalFormat::Rgba8,
        (FormatFamily::Uncompressed, _, true) => InternalFormat::Srgb8Alpha8,

        // Compressed RGB formats
        (FormatFamily::CompressedRgb, TextureQuality::Low, false) => InternalFormat::CompressedRgbS3tcDxt1,
        (FormatFamily::CompressedRgb, TextureQuality::Medium, false) => InternalFormat::CompressedRgbBptcFloat,
        (FormatFamily::CompressedRgb, TextureQuality::High, false) => InternalFormat::CompressedRgb8Etc2,

        // Compressed RGBA formats
        (FormatFamily::CompressedRgba, TextureQuality::Low, false) => InternalFormat::CompressedRgbaS3tcDxt5,
        (FormatFamily::CompressedRgba, TextureQuality::Medium, false) => InternalFormat::CompressedRgbaBptc,
        (FormatFamily::CompressedRgba, TextureQuality::High, false) => InternalFormat::CompressedRgba8Etc2Eac,

        // Compressed sRGB formats
        (FormatFamily::CompressedSrgb, TextureQuality::Low, true) => InternalFormat::CompressedSrgbS3tcDxt1,
        (FormatFamily::CompressedSrgb, TextureQuality::Medium, true) => InternalFormat::CompressedSrgbBptc,
        (FormatFamily::CompressedSrgb, TextureQuality::High, true) => InternalFormat::CompressedSrgb8Etc2,

        // Compressed sRGBA formats
        (FormatFamily::CompressedSrgba, TextureQuality::Low, true) => InternalFormat::CompressedSrgbaS3tcDxt5,
        (FormatFamily::CompressedSrgba, TextureQuality::Medium, true) => InternalFormat::CompressedSrgbaBptc,
        (FormatFamily::CompressedSrgba, TextureQuality::High, true) => InternalFormat::CompressedSrgba8Etc2Eac,

        _ => InternalFormat::Rgba8,
    }
}

/// Negotiate a request against the device's capabilities
///
/// Falls back to the uncompressed family of the same color space when the
/// required extension is missing. The fallback is logged at Warn for
/// diagnostics and never surfaces as an error.
pub fn negotiate(api: &dyn GraphicsApi, request: FormatRequest) -> InternalFormat {
    let mut family = request.family;
    if let Some(extension) = family.required_extension() {
        if !api.has_extension(extension) {
            render_warn!(
                "nebula::format",
                "compressed family {:?} needs missing extension {}; falling back to uncompressed",
                family,
                extension
            );
            family = FormatFamily::Uncompressed;
        }
    }
    resolve(family, request.quality, request.srgb)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
