//! Shader program consumption - opaque handle plus uniform-location table.
//!
//! Compilation and linking are external collaborators' work; this module
//! wraps the finished program so draw code can set uniform values by name.

use std::sync::{Arc, Mutex};

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};
use rustc_hash::FxHashMap;

use crate::hal::{GraphicsApi, ProgramHandle, UniformLocation};

pub use crate::hal::{UniformKind, UniformValue};

/// Location and type of one active uniform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniformInfo {
    pub location: UniformLocation,
    pub kind: UniformKind,
}

/// Compiled and linked program, consumed by name-based uniform writes
///
/// Construction introspects the program's active uniforms once into a
/// location table; setters after that are a single table lookup plus one
/// device call. Setting a name the program does not expose is silently
/// ignored, so shared draw code can set uniforms that only some programs
/// declare.
pub struct ShaderProgram {
    api: Arc<Mutex<dyn GraphicsApi>>,
    handle: ProgramHandle,
    uniforms: FxHashMap<String, UniformInfo>,
}

impl ShaderProgram {
    /// Wrap an externally compiled and linked program
    pub fn from_handle(api: Arc<Mutex<dyn GraphicsApi>>, handle: ProgramHandle) -> Self {
        let uniforms = {
            let guard = api.lock().unwrap();
            let mut table = FxHashMap::default();
            for (name, kind) in guard.active_uniforms(handle) {
                if let Some(location) = guard.uniform_location(handle, &name) {
                    table.insert(name, UniformInfo { location, kind });
                }
            }
            table
        };
        Self { api, handle, uniforms }
    }

    /// Make this program current for subsequent draws and uniform writes
    pub fn bind(&self) {
        self.api.lock().unwrap().use_program(self.handle);
    }

    fn set(&self, name: &str, value: UniformValue) {
        if let Some(info) = self.uniforms.get(name) {
            self.api.lock().unwrap().set_uniform(info.location, &value);
        }
    }

    pub fn set_bool(&self, name: &str, value: bool) {
        self.set(name, UniformValue::Bool(value));
    }

    pub fn set_int(&self, name: &str, value: i32) {
        self.set(name, UniformValue::Int(value));
    }

    pub fn set_float(&self, name: &str, value: f32) {
        self.set(name, UniformValue::Float(value));
    }

    pub fn set_vec2(&self, name: &str, value: Vec2) {
        self.set(name, UniformValue::Vec2(value));
    }

    pub fn set_vec3(&self, name: &str, value: Vec3) {
        self.set(name, UniformValue::Vec3(value));
    }

    pub fn set_vec4(&self, name: &str, value: Vec4) {
        self.set(name, UniformValue::Vec4(value));
    }

    pub fn set_mat3(&self, name: &str, value: Mat3) {
        self.set(name, UniformValue::Mat3(value));
    }

    pub fn set_mat4(&self, name: &str, value: Mat4) {
        self.set(name, UniformValue::Mat4(value));
    }

    /// Point a sampler uniform at a texture unit
    pub fn set_texture_unit(&self, name: &str, unit: i32) {
        self.set(name, UniformValue::Sampler(unit));
    }

    /// Location and type of a named uniform, if the program exposes it
    pub fn uniform(&self, name: &str) -> Option<&UniformInfo> {
        self.uniforms.get(name)
    }

    /// Table of all active uniforms
    pub fn uniforms(&self) -> &FxHashMap<String, UniformInfo> {
        &self.uniforms
    }

    /// Device handle of the program
    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        if let Ok(mut api) = self.api.lock() {
            api.delete_program(self.handle);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "shader_tests.rs"]
mod tests;
