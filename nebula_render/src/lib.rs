/*!
# Nebula Render

Resource and pipeline-state management layer for a stateful immediate-mode
graphics device.

This crate owns the lifecycle of GPU-resident resources (vertex/index/uniform/
storage buffers, textures, framebuffers), describes rendering pipeline
configurations declaratively as plain [`PipelineState`](device::PipelineState)
values, and applies them through a [`Device`](device::Device) that diffs
against the last-applied state and issues only the state-change calls that
actually differ.

## Architecture

- **GraphicsApi**: call-level device driver trait, one method per device call
- **HeadlessApi**: in-memory backend implementing the full contract (no GPU)
- **Buffers**: update-strategy aware buffer family + vertex-array binding
- **Textures**: 2D / cube / array storage with format negotiation
- **Framebuffer**: owned attachment set with completeness validation
- **Device**: pipeline-state diffing and draw dispatch

Backend implementations for a real windowed context live outside this crate;
everything here is backend-agnostic and runs against any `GraphicsApi`.
*/

// Internal modules
mod error;
pub mod log;
pub mod utils;
pub mod hal;
pub mod buffers;
pub mod textures;
pub mod framebuffer;
pub mod device;
pub mod mesh;
pub mod shader;

// Main nebula namespace module
pub mod nebula {
    // Error types
    pub use crate::error::{Error, Result};

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
        // Note: render_* macros are exported at the crate root by #[macro_export]
    }

    // Device driver abstraction
    pub mod hal {
        pub use crate::hal::*;
    }

    // Buffer resources
    pub mod buffers {
        pub use crate::buffers::*;
    }

    // Texture resources
    pub mod textures {
        pub use crate::textures::*;
    }

    // Framebuffer
    pub use crate::framebuffer::Framebuffer;

    // Device, pipeline state and frame types
    pub mod device {
        pub use crate::device::*;
    }

    // Mesh and shader contracts
    pub use crate::mesh::Mesh;
    pub use crate::shader::{ShaderProgram, UniformInfo, UniformKind, UniformValue};
}

// Re-export math library at crate root
pub use glam;
