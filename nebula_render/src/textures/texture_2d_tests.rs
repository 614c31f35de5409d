use super::*;
use crate::hal::HeadlessApi;
use crate::textures::format::{FormatFamily, TextureQuality};

// ============================================================================
// Helpers
// ============================================================================

fn headless() -> Arc<Mutex<HeadlessApi>> {
    Arc::new(Mutex::new(HeadlessApi::new()))
}

fn compressed_request() -> FormatRequest {
    FormatRequest {
        family: FormatFamily::CompressedRgba,
        quality: TextureQuality::Low,
        srgb: false,
    }
}

// ============================================================================
// Allocation tests
// ============================================================================

#[test]
fn test_dimensions_zero_until_first_set_data() {
    let api = headless();
    let texture = Texture2D::new(api);
    assert_eq!(texture.width(), 0);
    assert_eq!(texture.height(), 0);
    assert_eq!(texture.internal_format(), None);
}

#[test]
fn test_set_data_allocates_storage() {
    let api = headless();
    let mut texture = Texture2D::new(api.clone());

    let pixels = vec![255u8; 4 * 4 * 4];
    assert!(texture
        .set_data(4, 4, Some(&pixels), FormatRequest::uncompressed())
        .is_ok());

    assert_eq!(texture.width(), 4);
    assert_eq!(texture.height(), 4);
    assert_eq!(texture.internal_format(), Some(InternalFormat::Rgba8));
    assert_eq!(api.lock().unwrap().texture_size(texture.handle()), Some((4, 4)));
}

#[test]
fn test_set_data_without_pixels_allocates_uninitialized() {
    let api = headless();
    let mut texture = Texture2D::new(api.clone());
    api.lock().unwrap().take_calls();

    assert!(texture.set_data(8, 8, None, FormatRequest::uncompressed()).is_ok());

    let guard = api.lock().unwrap();
    assert_eq!(guard.count_calls("tex_image_2d"), 1);
    assert!(guard.calls().iter().any(|c| c.contains("no pixels")));
}

#[test]
fn test_zero_dimensions_rejected() {
    let api = headless();
    let mut texture = Texture2D::new(api);
    assert!(texture.set_data(0, 4, None, FormatRequest::uncompressed()).is_err());
    assert!(texture.set_data(4, 0, None, FormatRequest::uncompressed()).is_err());
    // Nothing was allocated by the failed calls
    assert_eq!(texture.width(), 0);
    assert_eq!(texture.internal_format(), None);
}

// ============================================================================
// Format negotiation tests
// ============================================================================

#[test]
fn test_compressed_upload_with_extension() {
    let api = Arc::new(Mutex::new(HeadlessApi::with_extensions(&[
        "GL_EXT_texture_compression_s3tc",
    ])));
    let mut texture = Texture2D::new(api.clone());

    let blocks = vec![0u8; 128];
    assert!(texture.set_data(16, 16, Some(&blocks), compressed_request()).is_ok());

    assert_eq!(
        texture.internal_format(),
        Some(InternalFormat::CompressedRgbaS3tcDxt5)
    );
    assert_eq!(api.lock().unwrap().count_calls("compressed_tex_image_2d"), 1);
}

#[test]
fn test_missing_extension_falls_back_to_uncompressed() {
    // Capability mismatch is not an error; the texture is allocated with the
    // uncompressed equivalent instead of failing
    let api = headless();
    let mut texture = Texture2D::new(api.clone());

    let pixels = vec![0u8; 16 * 16 * 4];
    assert!(texture.set_data(16, 16, Some(&pixels), compressed_request()).is_ok());

    assert_eq!(texture.internal_format(), Some(InternalFormat::Rgba8));
    let guard = api.lock().unwrap();
    assert_eq!(guard.count_calls("compressed_tex_image_2d"), 0);
    assert_eq!(guard.count_calls("tex_image_2d"), 1);
}

// ============================================================================
// Sampling parameter tests
// ============================================================================

#[test]
fn test_mipmap_filter_triggers_generation() {
    let api = headless();
    let mut texture = Texture2D::new(api.clone());
    texture.set_data(4, 4, None, FormatRequest::uncompressed()).unwrap();

    texture.set_parameters(
        MinFilter::LinearMipmapLinear,
        MagFilter::Linear,
        WrapMode::Repeat,
        WrapMode::Repeat,
    );

    assert_eq!(api.lock().unwrap().texture_has_mipmaps(texture.handle()), Some(true));
}

#[test]
fn test_plain_filter_skips_mipmap_generation() {
    let api = headless();
    let mut texture = Texture2D::new(api.clone());
    texture.set_data(4, 4, None, FormatRequest::uncompressed()).unwrap();

    texture.set_parameters(
        MinFilter::Linear,
        MagFilter::Linear,
        WrapMode::ClampToEdge,
        WrapMode::ClampToEdge,
    );

    assert_eq!(api.lock().unwrap().count_calls("generate_mipmaps"), 0);
}

// ============================================================================
// Resize tests
// ============================================================================

#[test]
fn test_resize_same_dimensions_is_noop() {
    let api = headless();
    let mut texture = Texture2D::new(api.clone());
    texture.set_data(8, 8, None, FormatRequest::uncompressed()).unwrap();
    api.lock().unwrap().take_calls();

    assert!(texture.resize(8, 8).is_ok());
    assert!(api.lock().unwrap().calls().is_empty());
    assert_eq!(api.lock().unwrap().texture_generation(texture.handle()), Some(1));
}

#[test]
fn test_resize_reallocates_with_recorded_format() {
    let api = Arc::new(Mutex::new(HeadlessApi::with_extensions(&[
        "GL_EXT_texture_compression_s3tc",
    ])));
    let mut texture = Texture2D::new(api.clone());
    texture.set_data(8, 8, Some(&[0u8; 32]), compressed_request()).unwrap();

    assert!(texture.resize(16, 32).is_ok());

    assert_eq!(texture.width(), 16);
    assert_eq!(texture.height(), 32);
    // The reallocation reused the format fixed at the original allocation
    assert_eq!(
        api.lock().unwrap().texture_internal_format(texture.handle()),
        Some(InternalFormat::CompressedRgbaS3tcDxt5)
    );
    assert_eq!(api.lock().unwrap().texture_generation(texture.handle()), Some(2));
}

#[test]
fn test_resize_before_allocation_fails() {
    let api = headless();
    let mut texture = Texture2D::new(api);
    assert!(texture.resize(8, 8).is_err());
}

// ============================================================================
// Lifetime tests
// ============================================================================

#[test]
fn test_drop_deletes_device_texture() {
    let api = headless();
    {
        let _texture = Texture2D::new(api.clone());
        assert_eq!(api.lock().unwrap().live_textures(), 1);
    }
    assert_eq!(api.lock().unwrap().live_textures(), 0);
}
