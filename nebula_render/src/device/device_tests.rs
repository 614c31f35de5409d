use super::*;
use crate::buffers::VertexAttribute;
use crate::device::Viewport;
use crate::hal::{
    BlendFactor, Comparison, CullFace, HeadlessApi, RasterizationMode, ScalarType, StencilAction,
};
use glam::Vec4;
use std::sync::{Arc, Mutex};

// ============================================================================
// Helpers
// ============================================================================

fn headless() -> Arc<Mutex<HeadlessApi>> {
    Arc::new(Mutex::new(HeadlessApi::new()))
}

fn device(api: &Arc<Mutex<HeadlessApi>>) -> Device {
    Device::new(api.clone(), DeviceSettings::default())
}

/// Number of state-change calls recorded since the last drain
fn drain_state_calls(api: &Arc<Mutex<HeadlessApi>>) -> Vec<String> {
    api.lock().unwrap().take_calls()
}

fn triangle_mesh(api: &Arc<Mutex<HeadlessApi>>, indexed: bool) -> Mesh {
    // 3 vertices, interleaved position (vec3) + color (vec3)
    let vertices: [[f32; 6]; 3] = [
        [-0.5, -0.5, 0.0, 1.0, 0.0, 0.0],
        [0.5, -0.5, 0.0, 0.0, 1.0, 0.0],
        [0.0, 0.5, 0.0, 0.0, 0.0, 1.0],
    ];
    let attributes = [
        VertexAttribute {
            index: 0,
            component_count: 3,
            scalar_type: ScalarType::Float,
            normalized: false,
            stride: 24,
            offset: 0,
        },
        VertexAttribute {
            index: 1,
            component_count: 3,
            scalar_type: ScalarType::Float,
            normalized: false,
            stride: 24,
            offset: 12,
        },
    ];
    let indices: [u32; 3] = [0, 1, 2];
    Mesh::new(
        api.clone(),
        &vertices,
        &attributes,
        indexed.then_some(&indices[..]),
    )
    .unwrap()
}

// ============================================================================
// Baseline application tests
// ============================================================================

#[test]
fn test_construction_force_applies_baseline() {
    let api = headless();
    let _device = device(&api);

    let guard = api.lock().unwrap();
    // Every state group was issued once so the cache matches the device
    assert_eq!(guard.count_calls("set_capability(DepthTest"), 1);
    assert_eq!(guard.count_calls("set_capability(StencilTest"), 1);
    assert_eq!(guard.count_calls("set_capability(Blend"), 1);
    assert_eq!(guard.count_calls("set_capability(CullFace"), 1);
    assert_eq!(guard.count_calls("set_capability(ScissorTest"), 1);
    assert_eq!(guard.count_calls("set_depth_mask"), 1);
    assert_eq!(guard.count_calls("set_depth_function"), 1);
    assert_eq!(guard.count_calls("set_stencil_mask"), 1);
    assert_eq!(guard.count_calls("set_stencil_function"), 1);
    assert_eq!(guard.count_calls("set_stencil_operations"), 1);
    assert_eq!(guard.count_calls("set_blend_factors"), 1);
    assert_eq!(guard.count_calls("set_color_mask"), 1);
    assert_eq!(guard.count_calls("set_cull_face"), 1);
    assert_eq!(guard.count_calls("set_front_face"), 1);
    assert_eq!(guard.count_calls("set_polygon_mode"), 1);
}

#[test]
fn test_custom_default_state_is_baseline() {
    let api = headless();
    let mut custom = PipelineState::default();
    custom.depth_test = false;
    custom.rasterization_mode = RasterizationMode::Line;

    let device = Device::new(
        api.clone(),
        DeviceSettings {
            default_pipeline_state: Some(custom),
            multisampling: false,
        },
    );

    assert_eq!(device.default_state(), &custom);
    assert_eq!(device.current_state(), &custom);
    let guard = api.lock().unwrap();
    assert!(guard.calls().iter().any(|c| c == "set_capability(DepthTest, false)"));
    assert!(guard.calls().iter().any(|c| c == "set_polygon_mode(Line)"));
}

// ============================================================================
// Diffing tests
// ============================================================================

#[test]
fn test_reapplying_identical_state_issues_nothing() {
    let api = headless();
    let mut device = device(&api);
    let state = PipelineState::default();

    device.apply(&state);
    drain_state_calls(&api);

    // Idempotence under unchanged state
    device.apply(&state);
    assert!(drain_state_calls(&api).is_empty());
}

#[test]
fn test_single_group_change_issues_single_call() {
    let api = headless();
    let mut device = device(&api);
    drain_state_calls(&api);

    let mut state = PipelineState::default();
    state.depth_test = false;
    device.apply(&state);

    let calls = drain_state_calls(&api);
    assert_eq!(calls, vec!["set_capability(DepthTest, false)".to_string()]);
}

#[test]
fn test_cache_replaced_in_full_after_apply() {
    let api = headless();
    let mut device = device(&api);

    let mut state = PipelineState::default();
    state.depth_test = false;
    state.blending = true;
    device.apply(&state);
    drain_state_calls(&api);

    // Re-applying the same modified state diffs against the new cache
    device.apply(&state);
    assert!(drain_state_calls(&api).is_empty());
    assert_eq!(device.current_state(), &state);
}

#[test]
fn test_each_group_diffs_independently() {
    let api = headless();
    let mut device = device(&api);
    drain_state_calls(&api);

    let mut state = PipelineState::default();
    state.depth_function = Comparison::LessEqual;
    state.cull_face = CullFace::Front;
    device.apply(&state);

    let calls = drain_state_calls(&api);
    assert_eq!(calls.len(), 2);
    assert!(calls.contains(&"set_depth_function(LessEqual)".to_string()));
    assert!(calls.contains(&"set_cull_face(Front)".to_string()));
}

#[test]
fn test_blend_factor_group_issues_one_call_for_any_factor() {
    let api = headless();
    let mut device = device(&api);
    drain_state_calls(&api);

    let mut state = PipelineState::default();
    state.destination_alpha_factor = BlendFactor::OneMinusSrcAlpha;
    device.apply(&state);

    let calls = drain_state_calls(&api);
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with("set_blend_factors"));
}

#[test]
fn test_stencil_reference_change_reissues_function() {
    let api = headless();
    let mut device = device(&api);
    drain_state_calls(&api);

    let mut state = PipelineState::default();
    state.stencil_reference = 7;
    device.apply(&state);

    let calls = drain_state_calls(&api);
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with("set_stencil_function(Always, 7"));
}

#[test]
fn test_stencil_operations_group() {
    let api = headless();
    let mut device = device(&api);
    drain_state_calls(&api);

    let mut state = PipelineState::default();
    state.stencil_pass_operation = StencilAction::Replace;
    device.apply(&state);

    let calls = drain_state_calls(&api);
    // Operation order on the wire is (fail, depth-fail, pass)
    assert_eq!(calls, vec!["set_stencil_operations(Keep, Keep, Replace)".to_string()]);
}

#[test]
fn test_reset_pipeline_state_diffs_back_to_baseline() {
    let api = headless();
    let mut device = device(&api);

    let mut state = PipelineState::default();
    state.depth_test = false;
    device.apply(&state);
    drain_state_calls(&api);

    device.reset_pipeline_state();
    let calls = drain_state_calls(&api);
    assert_eq!(calls, vec!["set_capability(DepthTest, true)".to_string()]);
    assert_eq!(device.current_state(), device.default_state());
}

// ============================================================================
// Draw dispatch tests
// ============================================================================

#[test]
fn test_indexed_draw_dispatches_draw_elements() {
    let api = headless();
    let mut device = device(&api);
    let mesh = triangle_mesh(&api, true);
    drain_state_calls(&api);

    device.draw(&PipelineState::default(), &mesh, PrimitiveMode::Triangles, 1);

    let calls = drain_state_calls(&api);
    let draws: Vec<_> = calls.iter().filter(|c| c.starts_with("draw_")).collect();
    assert_eq!(draws.len(), 1);
    assert_eq!(draws[0], "draw_elements(Triangles, 3)");
}

#[test]
fn test_non_indexed_draw_dispatches_draw_arrays() {
    let api = headless();
    let mut device = device(&api);
    let mesh = triangle_mesh(&api, false);
    drain_state_calls(&api);

    device.draw(&PipelineState::default(), &mesh, PrimitiveMode::Triangles, 1);

    let calls = drain_state_calls(&api);
    let draws: Vec<_> = calls.iter().filter(|c| c.starts_with("draw_")).collect();
    assert_eq!(draws, vec!["draw_arrays(Triangles, 0, 3)"]);
}

#[test]
fn test_instanced_draw_dispatch() {
    let api = headless();
    let mut device = device(&api);
    let mesh = triangle_mesh(&api, true);
    drain_state_calls(&api);

    device.draw(&PipelineState::default(), &mesh, PrimitiveMode::Triangles, 4);

    let calls = drain_state_calls(&api);
    assert!(calls.contains(&"draw_elements_instanced(Triangles, 3, 4 instances)".to_string()));
}

#[test]
fn test_zero_instances_issues_no_draw() {
    let api = headless();
    let mut device = device(&api);
    let mesh = triangle_mesh(&api, true);
    drain_state_calls(&api);

    device.draw(&PipelineState::default(), &mesh, PrimitiveMode::Triangles, 0);

    let calls = drain_state_calls(&api);
    assert!(calls.iter().all(|c| !c.starts_with("draw_")));
    // Not even the state application happens for a skipped draw
    assert!(calls.is_empty());
}

#[test]
fn test_draw_binds_mesh_before_dispatch() {
    let api = headless();
    let mut device = device(&api);
    let mesh = triangle_mesh(&api, true);
    drain_state_calls(&api);

    device.draw(&PipelineState::default(), &mesh, PrimitiveMode::Triangles, 1);

    let calls = drain_state_calls(&api);
    let bind_position = calls.iter().position(|c| c.starts_with("bind_vertex_array")).unwrap();
    let draw_position = calls.iter().position(|c| c.starts_with("draw_elements")).unwrap();
    assert!(bind_position < draw_position);
}

// ============================================================================
// Clear and frame tests
// ============================================================================

#[test]
fn test_clear_sets_color_and_mask() {
    let api = headless();
    let mut device = device(&api);
    drain_state_calls(&api);

    device.clear(true, true, false, Some(Vec4::new(0.2, 0.3, 0.4, 1.0)));

    let calls = drain_state_calls(&api);
    assert!(calls.iter().any(|c| c.starts_with("set_clear_color(0.2")));
    assert!(calls.iter().any(|c| c.contains("COLOR") && c.contains("DEPTH") && !c.contains("STENCIL")));
}

#[test]
fn test_clear_nothing_issues_no_clear_call() {
    let api = headless();
    let mut device = device(&api);
    drain_state_calls(&api);

    device.clear(false, false, false, None);
    assert_eq!(api.lock().unwrap().count_calls("clear("), 0);
}

#[test]
fn test_begin_frame_sets_viewport_and_clears() {
    let api = headless();
    let mut device = device(&api);
    drain_state_calls(&api);

    let frame = FrameDescriptor::new(Viewport::new(0, 0, 800, 600));
    device.begin_frame(&frame);

    let calls = drain_state_calls(&api);
    assert!(calls.iter().any(|c| c == "set_viewport(0, 0, 800, 600)"));
    assert!(calls
        .iter()
        .any(|c| c.contains("COLOR") && c.contains("DEPTH") && c.contains("STENCIL")));
}

#[test]
fn test_begin_frame_without_color_clear() {
    let api = headless();
    let mut device = device(&api);
    drain_state_calls(&api);

    let mut frame = FrameDescriptor::new(Viewport::new(0, 0, 64, 64));
    frame.clear_color = None;
    frame.clear_stencil = false;
    device.begin_frame(&frame);

    let calls = drain_state_calls(&api);
    assert_eq!(api.lock().unwrap().count_calls("set_clear_color"), 0);
    assert!(calls.iter().any(|c| c.starts_with("clear(") && !c.contains("COLOR")));
}

// ============================================================================
// Information tests
// ============================================================================

#[test]
fn test_device_information_strings() {
    let api = headless();
    let device = device(&api);
    assert_eq!(device.vendor(), "Nebula");
    assert_eq!(device.hardware(), "Headless Device");
    assert!(!device.version().is_empty());
    assert!(!device.shading_language_version().is_empty());
}
