use super::*;
use crate::hal::HeadlessApi;
use crate::nebula::Error;

// ============================================================================
// Helpers
// ============================================================================

fn headless() -> Arc<Mutex<HeadlessApi>> {
    Arc::new(Mutex::new(HeadlessApi::new()))
}

// ============================================================================
// Construction tests
// ============================================================================

#[test]
fn test_construction_allocates_requested_attachments() {
    let api = headless();
    let framebuffer = Framebuffer::new(api.clone(), 128, 64, 2, true).unwrap();

    assert_eq!(framebuffer.color_attachment_count(), 2);
    assert!(framebuffer.has_depth());
    assert_eq!(framebuffer.width(), 128);
    assert_eq!(framebuffer.height(), 64);

    // 2 color + 1 depth textures live on the device
    assert_eq!(api.lock().unwrap().live_textures(), 3);
    assert_eq!(api.lock().unwrap().live_framebuffers(), 1);
}

#[test]
fn test_color_attachments_are_rgba_depth_is_packed() {
    let api = headless();
    let framebuffer = Framebuffer::new(api.clone(), 32, 32, 1, true).unwrap();

    let guard = api.lock().unwrap();
    let color = framebuffer.color_attachment(0).unwrap();
    assert_eq!(
        guard.texture_internal_format(color.handle()),
        Some(crate::hal::InternalFormat::Rgba8)
    );
    let depth = framebuffer.depth_attachment().unwrap();
    assert_eq!(
        guard.texture_internal_format(depth.handle()),
        Some(crate::hal::InternalFormat::Depth24Stencil8)
    );
}

#[test]
fn test_construction_without_depth() {
    let api = headless();
    let framebuffer = Framebuffer::new(api.clone(), 32, 32, 1, false).unwrap();

    assert!(!framebuffer.has_depth());
    assert!(framebuffer.depth_attachment().is_none());
    assert_eq!(api.lock().unwrap().live_textures(), 1);
}

#[test]
fn test_construction_declares_draw_buffers_and_validates() {
    let api = headless();
    let _framebuffer = Framebuffer::new(api.clone(), 16, 16, 3, false).unwrap();

    let guard = api.lock().unwrap();
    assert!(guard.calls().iter().any(|c| c == "set_draw_buffers(3)"));
}

// ============================================================================
// Parameter validation tests
// ============================================================================

#[test]
fn test_zero_dimensions_rejected() {
    let api = headless();
    assert!(matches!(
        Framebuffer::new(api.clone(), 0, 32, 1, false),
        Err(Error::InvalidParameter(_))
    ));
    assert!(matches!(
        Framebuffer::new(api.clone(), 32, 0, 1, false),
        Err(Error::InvalidParameter(_))
    ));
    // No device objects leaked by the failed constructions
    assert_eq!(api.lock().unwrap().live_framebuffers(), 0);
}

#[test]
fn test_zero_attachment_count_rejected() {
    let api = headless();
    assert!(matches!(
        Framebuffer::new(api.clone(), 32, 32, 0, true),
        Err(Error::InvalidParameter(_))
    ));
    assert_eq!(api.lock().unwrap().live_framebuffers(), 0);
}

// ============================================================================
// Validation failure tests
// ============================================================================

#[test]
fn test_validation_failure_tears_down_atomically() {
    let api = headless();
    api.lock().unwrap().set_force_incomplete(true);

    let result = Framebuffer::new(api.clone(), 64, 64, 2, true);
    assert!(matches!(result, Err(Error::FramebufferIncomplete(_))));

    // No partially-attached object survives: every texture and the
    // framebuffer handle were released before the error propagated
    let guard = api.lock().unwrap();
    assert_eq!(guard.live_textures(), 0);
    assert_eq!(guard.live_framebuffers(), 0);
}

// ============================================================================
// Resize tests
// ============================================================================

#[test]
fn test_resize_same_size_is_noop() {
    let api = headless();
    let mut framebuffer = Framebuffer::new(api.clone(), 64, 64, 2, true).unwrap();

    let handles: Vec<_> = (0..2)
        .map(|slot| framebuffer.color_attachment(slot).unwrap().handle())
        .collect();
    let generations: Vec<_> = handles
        .iter()
        .map(|handle| api.lock().unwrap().texture_generation(*handle))
        .collect();
    api.lock().unwrap().take_calls();

    assert!(framebuffer.resize(64, 64).is_ok());

    // No reallocation and no device calls at all
    assert!(api.lock().unwrap().calls().is_empty());
    for (handle, generation) in handles.iter().zip(&generations) {
        assert_eq!(api.lock().unwrap().texture_generation(*handle), *generation);
    }
}

#[test]
fn test_resize_reallocates_every_attachment() {
    let api = headless();
    let mut framebuffer = Framebuffer::new(api.clone(), 64, 64, 2, true).unwrap();

    let color_handles: Vec<_> = (0..2)
        .map(|slot| framebuffer.color_attachment(slot).unwrap().handle())
        .collect();
    let depth_handle = framebuffer.depth_attachment().unwrap().handle();

    assert!(framebuffer.resize(128, 32).is_ok());

    assert_eq!(framebuffer.width(), 128);
    assert_eq!(framebuffer.height(), 32);

    let guard = api.lock().unwrap();
    // Same device objects, fresh storage
    for handle in color_handles.iter().chain(Some(&depth_handle)) {
        assert_eq!(guard.texture_size(*handle), Some((128, 32)));
        assert_eq!(guard.texture_generation(*handle), Some(2));
    }
}

#[test]
fn test_resize_preserves_completeness() {
    let api = headless();
    let mut framebuffer = Framebuffer::new(api.clone(), 64, 64, 1, true).unwrap();
    assert!(framebuffer.resize(256, 256).is_ok());

    // Still usable afterwards: all attachments reachable and consistent
    assert_eq!(framebuffer.color_attachment(0).unwrap().width(), 256);
    assert_eq!(framebuffer.depth_attachment().unwrap().width(), 256);
}

#[test]
fn test_resize_validation_failure_releases_resources() {
    let api = headless();
    let mut framebuffer = Framebuffer::new(api.clone(), 64, 64, 1, true).unwrap();

    api.lock().unwrap().set_force_incomplete(true);
    assert!(framebuffer.resize(128, 128).is_err());

    let guard = api.lock().unwrap();
    assert_eq!(guard.live_textures(), 0);
    assert_eq!(guard.live_framebuffers(), 0);
}

// ============================================================================
// Clear tests
// ============================================================================

#[test]
fn test_clear_color_and_depth() {
    let api = headless();
    let framebuffer = Framebuffer::new(api.clone(), 32, 32, 1, true).unwrap();
    api.lock().unwrap().take_calls();

    framebuffer.clear(Some(glam::Vec4::new(0.1, 0.2, 0.3, 1.0)), true);

    let guard = api.lock().unwrap();
    assert_eq!(guard.count_calls("set_clear_color"), 1);
    assert_eq!(guard.count_calls("clear("), 1);
    assert!(guard.calls().iter().any(|c| c.contains("COLOR") && c.contains("DEPTH")));
}

#[test]
fn test_clear_skips_missing_depth() {
    let api = headless();
    let framebuffer = Framebuffer::new(api.clone(), 32, 32, 1, false).unwrap();
    api.lock().unwrap().take_calls();

    framebuffer.clear(Some(glam::Vec4::ONE), true);

    let guard = api.lock().unwrap();
    assert!(guard.calls().iter().any(|c| c.contains("COLOR") && !c.contains("DEPTH")));
}

#[test]
fn test_clear_without_color_value_skips_color() {
    let api = headless();
    let framebuffer = Framebuffer::new(api.clone(), 32, 32, 1, true).unwrap();
    api.lock().unwrap().take_calls();

    framebuffer.clear(None, true);

    let guard = api.lock().unwrap();
    assert_eq!(guard.count_calls("set_clear_color"), 0);
    assert!(guard.calls().iter().any(|c| c.starts_with("clear(") && !c.contains("COLOR")));
}

#[test]
fn test_clear_nothing_issues_no_clear() {
    let api = headless();
    let framebuffer = Framebuffer::new(api.clone(), 32, 32, 1, false).unwrap();
    api.lock().unwrap().take_calls();

    framebuffer.clear(None, true);
    assert_eq!(api.lock().unwrap().count_calls("clear("), 0);
}

// ============================================================================
// Accessor tests
// ============================================================================

#[test]
fn test_attachment_lookup_out_of_range() {
    let api = headless();
    let framebuffer = Framebuffer::new(api, 32, 32, 2, false).unwrap();

    assert!(framebuffer.color_attachment(0).is_ok());
    assert!(framebuffer.color_attachment(1).is_ok());
    assert!(matches!(
        framebuffer.color_attachment(2),
        Err(Error::OutOfRange(_))
    ));
}

#[test]
fn test_attachment_dimensions_match_framebuffer() {
    let api = headless();
    let framebuffer = Framebuffer::new(api, 48, 24, 1, true).unwrap();

    let color = framebuffer.color_attachment(0).unwrap();
    assert_eq!((color.width(), color.height()), (48, 24));
}

// ============================================================================
// Lifetime tests
// ============================================================================

#[test]
fn test_drop_releases_attachments_and_handle() {
    let api = headless();
    {
        let _framebuffer = Framebuffer::new(api.clone(), 32, 32, 2, true).unwrap();
        assert_eq!(api.lock().unwrap().live_textures(), 3);
    }
    let guard = api.lock().unwrap();
    assert_eq!(guard.live_textures(), 0);
    assert_eq!(guard.live_framebuffers(), 0);
    assert_eq!(guard.count_calls("delete_framebuffer"), 1);
}
