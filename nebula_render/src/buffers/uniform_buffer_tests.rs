use super::*;
use crate::hal::{BufferTarget, HeadlessApi};
use std::sync::{Arc, Mutex};

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
fn test_allocates_full_size_up_front() {
    let api = headless();
    let buffer = UniformBuffer::new(api.clone(), 256, 0, BufferUsage::Dynamic);

    assert_eq!(buffer.size(), 256);
    assert_eq!(api.lock().unwrap().buffer_size(buffer.handle()), Some(256));
    // Uninitialized allocation still counts as the first generation
    assert_eq!(api.lock().unwrap().buffer_generation(buffer.handle()), Some(1));
}

#[test]
fn test_binds_binding_point_at_construction() {
    let api = headless();
    let buffer = UniformBuffer::new(api.clone(), 64, 3, BufferUsage::Dynamic);

    assert_eq!(buffer.binding_point(), 3);
    assert_eq!(
        api.lock().unwrap().base_binding(BufferTarget::Uniform, 3),
        Some(buffer.handle())
    );
}

// ============================================================================
// Update tests
// ============================================================================

#[test]
fn test_dynamic_set_data_orphans() {
    let api = headless();
    let mut buffer = UniformBuffer::new(api.clone(), 16, 0, BufferUsage::Dynamic);

    buffer.set_data(&[1.0f32, 2.0, 3.0, 4.0]);
    buffer.set_data(&[5.0f32, 6.0, 7.0, 8.0]);
    // Construction allocated once, each upload orphaned once more
    assert_eq!(api.lock().unwrap().buffer_generation(buffer.handle()), Some(3));
}

#[test]
fn test_static_set_data_updates_in_place_on_same_size() {
    let api = headless();
    let mut buffer = UniformBuffer::new(api.clone(), 16, 0, BufferUsage::Static);

    buffer.set_data(&[1.0f32, 2.0, 3.0, 4.0]);
    assert_eq!(api.lock().unwrap().buffer_generation(buffer.handle()), Some(1));
}

#[test]
fn test_set_sub_data_bounds() {
    let api = headless();
    let mut buffer = UniformBuffer::new(api, 16, 0, BufferUsage::Dynamic);

    assert!(buffer.set_sub_data(&[1.0f32], 12).is_ok());
    assert!(buffer.set_sub_data(&[1.0f32], 16).is_err());
    assert!(buffer.set_sub_data(&[1.0f32, 2.0, 3.0, 4.0, 5.0], 0).is_err());
}
