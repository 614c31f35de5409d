/// Device - single point of truth for applied pipeline state
///
/// Owns the last-applied [`PipelineState`] snapshot and turns `apply` into
/// the minimal set of device state-change calls: for every logical state
/// group, the incoming fields are compared against the cached snapshot and
/// the corresponding call is issued only when they differ. A state-change
/// call has non-trivial driver-side cost, so re-issuing all ~15 groups per
/// draw is exactly what this cache avoids.
///
/// The cache lives on the device instance, never in module-level state, and
/// the device has single-thread affinity: every call must come from the
/// thread that owns the device context.

use std::sync::{Arc, Mutex};

use glam::Vec4;

use crate::hal::{Capability, ClearFlags, GraphicsApi, PixelFormat, PixelType, PrimitiveMode};
use crate::mesh::Mesh;
use crate::render_info;

use super::frame::FrameDescriptor;
use super::pipeline_state::PipelineState;

/// Settings for configuring the device
#[derive(Debug, Clone, Copy)]
pub struct DeviceSettings {
    /// Baseline pipeline state; `None` uses `PipelineState::default()`
    pub default_pipeline_state: Option<PipelineState>,

    /// Enable multisampling (MSAA)
    pub multisampling: bool,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            default_pipeline_state: None,
            multisampling: true,
        }
    }
}

/// The object mediating all state-change and draw submission
pub struct Device {
    api: Arc<Mutex<dyn GraphicsApi>>,
    current_state: PipelineState,
    default_state: PipelineState,
}

impl Device {
    /// Create a device and force-apply its baseline state
    ///
    /// Every state group is issued once at construction so the cached
    /// snapshot matches what the device actually has; from then on diffing
    /// is sound.
    pub fn new(api: Arc<Mutex<dyn GraphicsApi>>, settings: DeviceSettings) -> Self {
        let default_state = settings.default_pipeline_state.unwrap_or_default();
        {
            let mut guard = api.lock().unwrap();
            if settings.multisampling {
                guard.set_capability(Capability::Multisample, true);
            }
            Self::apply_state_groups(&mut *guard, &default_state, &default_state, true);
            render_info!(
                "nebula::Device",
                "device initialized: {} | {} | {}",
                guard.vendor(),
                guard.hardware(),
                guard.version()
            );
        }
        Self {
            api,
            current_state: default_state,
            default_state,
        }
    }

    /// Issue the state-change calls for every group that differs
    ///
    /// With `force` set, every group is issued regardless; used once at
    /// construction to make the cache truthful.
    fn apply_state_groups(
        api: &mut dyn GraphicsApi,
        current: &PipelineState,
        state: &PipelineState,
        force: bool,
    ) {
        if force || state.depth_test != current.depth_test {
            api.set_capability(Capability::DepthTest, state.depth_test);
        }

        if force || state.depth_write != current.depth_write {
            api.set_depth_mask(state.depth_write);
        }

        if force || state.depth_function != current.depth_function {
            api.set_depth_function(state.depth_function);
        }

        if force || state.stencil_test != current.stencil_test {
            api.set_capability(Capability::StencilTest, state.stencil_test);
        }

        if force
            || state.stencil_write_mask != current.stencil_write_mask
            || state.stencil_read_mask != current.stencil_read_mask
        {
            api.set_stencil_mask(state.stencil_write_mask);
        }

        if force
            || state.stencil_function != current.stencil_function
            || state.stencil_reference != current.stencil_reference
        {
            api.set_stencil_function(
                state.stencil_function,
                state.stencil_reference,
                state.stencil_read_mask,
            );
        }

        if force
            || state.stencil_fail_operation != current.stencil_fail_operation
            || state.stencil_pass_operation != current.stencil_pass_operation
            || state.stencil_depth_fail_operation != current.stencil_depth_fail_operation
        {
            api.set_stencil_operations(
                state.stencil_fail_operation,
                state.stencil_depth_fail_operation,
                state.stencil_pass_operation,
            );
        }

        if force || state.blending != current.blending {
            api.set_capability(Capability::Blend, state.blending);
        }

        if force
            || state.source_color_factor != current.source_color_factor
            || state.destination_color_factor != current.destination_color_factor
            || state.source_alpha_factor != current.source_alpha_factor
            || state.destination_alpha_factor != current.destination_alpha_factor
        {
            api.set_blend_factors(
                state.source_color_factor,
                state.destination_color_factor,
                state.source_alpha_factor,
                state.destination_alpha_factor,
            );
        }

        if force || state.color_write != current.color_write {
            api.set_color_mask(
                state.color_write,
                state.color_write,
                state.color_write,
                state.color_write,
            );
        }

        if force || state.backface_culling != current.backface_culling {
            api.set_capability(Capability::CullFace, state.backface_culling);
        }

        if force || state.cull_face != current.cull_face {
            api.set_cull_face(state.cull_face);
        }

        if force || state.front_face != current.front_face {
            api.set_front_face(state.front_face);
        }

        if force || state.scissor_test != current.scissor_test {
            api.set_capability(Capability::ScissorTest, state.scissor_test);
        }

        if force || state.rasterization_mode != current.rasterization_mode {
            api.set_polygon_mode(state.rasterization_mode);
        }
    }

    /// Apply a pipeline state, issuing only the calls for changed groups
    ///
    /// After the diff the cached snapshot is replaced in full, including
    /// unchanged groups, so subsequent diffs remain correct.
    pub fn apply(&mut self, state: &PipelineState) {
        {
            let mut api = self.api.lock().unwrap();
            Self::apply_state_groups(&mut *api, &self.current_state, state, false);
        }
        self.current_state = *state;
    }

    /// Re-apply the baseline pipeline state through the diffing path
    pub fn reset_pipeline_state(&mut self) {
        let default_state = self.default_state;
        self.apply(&default_state);
    }

    /// Apply a state, bind the mesh, and dispatch the appropriate draw
    ///
    /// Indexed vs array and instanced vs plain dispatch is selected by the
    /// mesh's index source and the instance count. A zero instance count
    /// issues no draw call at all.
    pub fn draw(&mut self, state: &PipelineState, mesh: &Mesh, mode: PrimitiveMode, instances: u32) {
        if instances == 0 {
            return;
        }

        self.apply(state);
        mesh.bind();

        let mut api = self.api.lock().unwrap();
        if mesh.has_indices() {
            if instances == 1 {
                api.draw_elements(mode, mesh.index_count() as u32);
            } else {
                api.draw_elements_instanced(mode, mesh.index_count() as u32, instances);
            }
        } else if instances == 1 {
            api.draw_arrays(mode, 0, mesh.vertex_count() as u32);
        } else {
            api.draw_arrays_instanced(mode, 0, mesh.vertex_count() as u32, instances);
        }
    }

    /// Set the viewport rectangle
    pub fn set_viewport(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.api.lock().unwrap().set_viewport(x, y, width, height);
    }

    /// Clear the selected buffers of the current render target
    ///
    /// A full-write scratch state goes through the diffing path first so the
    /// clear is never masked by a previous draw's stencil mask or scissor.
    pub fn clear(
        &mut self,
        color_buffer: bool,
        depth_buffer: bool,
        stencil_buffer: bool,
        color: Option<Vec4>,
    ) {
        // Defaults already open the stencil write mask and disable scissor
        self.apply(&PipelineState::default());

        let mut api = self.api.lock().unwrap();
        if color_buffer {
            if let Some(value) = color {
                api.set_clear_color(value);
            }
        }

        let mut mask = ClearFlags::empty();
        if color_buffer {
            mask |= ClearFlags::COLOR;
        }
        if depth_buffer {
            mask |= ClearFlags::DEPTH;
        }
        if stencil_buffer {
            mask |= ClearFlags::STENCIL;
        }
        if !mask.is_empty() {
            api.clear(mask);
        }
    }

    /// Consume a frame descriptor: set the viewport and issue its clears
    pub fn begin_frame(&mut self, frame: &FrameDescriptor) {
        let viewport = frame.viewport;
        self.set_viewport(viewport.x, viewport.y, viewport.width, viewport.height);
        self.clear(
            frame.clear_color.is_some(),
            frame.clear_depth,
            frame.clear_stencil,
            frame.clear_color,
        );
    }

    /// Read back pixels from the currently bound framebuffer
    pub fn read_pixels(
        &self,
        x: i32,
        y: i32,
        width: u32,
        height: u32,
        format: PixelFormat,
        pixel_type: PixelType,
    ) -> Vec<u8> {
        self.api.lock().unwrap().read_pixels(x, y, width, height, format, pixel_type)
    }

    /// Pipeline state the device currently has applied
    pub fn current_state(&self) -> &PipelineState {
        &self.current_state
    }

    /// Baseline state re-applied by [`reset_pipeline_state`](Self::reset_pipeline_state)
    pub fn default_state(&self) -> &PipelineState {
        &self.default_state
    }

    /// Driver the device issues calls through
    pub fn api(&self) -> &Arc<Mutex<dyn GraphicsApi>> {
        &self.api
    }

    /// Device vendor string
    pub fn vendor(&self) -> String {
        self.api.lock().unwrap().vendor()
    }

    /// Device hardware string
    pub fn hardware(&self) -> String {
        self.api.lock().unwrap().hardware()
    }

    /// Driver version string
    pub fn version(&self) -> String {
        self.api.lock().unwrap().version()
    }

    /// Shading language version string
    pub fn shading_language_version(&self) -> String {
        self.api.lock().unwrap().shading_language_version()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "device_tests.rs"]
mod tests;
