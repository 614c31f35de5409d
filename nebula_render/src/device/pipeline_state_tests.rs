use super::*;
use crate::hal::{BlendFactor, Comparison, CullFace, FrontFaceWinding, RasterizationMode, StencilAction};

// ============================================================================
// Default (baseline) state tests
// ============================================================================

#[test]
fn test_default_depth_configuration() {
    let state = PipelineState::default();
    assert!(state.depth_test);
    assert!(state.depth_write);
    assert_eq!(state.depth_function, Comparison::Less);
}

#[test]
fn test_default_stencil_configuration() {
    let state = PipelineState::default();
    assert!(!state.stencil_test);
    assert_eq!(state.stencil_write_mask, !0);
    assert_eq!(state.stencil_read_mask, !0);
    assert_eq!(state.stencil_function, Comparison::Always);
    assert_eq!(state.stencil_reference, 0);
    assert_eq!(state.stencil_fail_operation, StencilAction::Keep);
    assert_eq!(state.stencil_pass_operation, StencilAction::Keep);
    assert_eq!(state.stencil_depth_fail_operation, StencilAction::Keep);
}

#[test]
fn test_default_blend_configuration() {
    let state = PipelineState::default();
    assert!(!state.blending);
    assert_eq!(state.source_color_factor, BlendFactor::SrcAlpha);
    assert_eq!(state.destination_color_factor, BlendFactor::OneMinusSrcAlpha);
    assert_eq!(state.source_alpha_factor, BlendFactor::One);
    assert_eq!(state.destination_alpha_factor, BlendFactor::Zero);
}

#[test]
fn test_default_rasterizer_configuration() {
    let state = PipelineState::default();
    assert!(state.color_write);
    assert!(state.backface_culling);
    assert_eq!(state.cull_face, CullFace::Back);
    assert_eq!(state.front_face, FrontFaceWinding::CounterClockwise);
    assert!(!state.scissor_test);
    assert_eq!(state.rasterization_mode, RasterizationMode::Fill);
}

// ============================================================================
// Value semantics tests
// ============================================================================

#[test]
fn test_equality_is_field_wise() {
    let a = PipelineState::default();
    let b = PipelineState::default();
    assert_eq!(a, b);

    let mut c = b;
    c.depth_test = false;
    assert_ne!(a, c);

    c.depth_test = true;
    assert_eq!(a, c);
}

#[test]
fn test_copies_are_independent() {
    let original = PipelineState::default();
    let mut copy = original;
    copy.blending = true;
    assert!(!original.blending);
    assert!(copy.blending);
}
