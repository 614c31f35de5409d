/// Frame descriptor - per-frame clear and viewport input

use glam::Vec4;

/// Viewport rectangle in window coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

/// Describes the properties of a frame to be rendered
///
/// Produced by the frame-orchestration caller; the device consumes it only
/// to set the viewport and issue the requested clears. Frame sequencing is
/// not owned here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameDescriptor {
    /// Clear color for the frame; `None` skips the color clear
    pub clear_color: Option<Vec4>,

    /// Whether to clear the depth buffer
    pub clear_depth: bool,

    /// Whether to clear the stencil buffer
    pub clear_stencil: bool,

    /// Viewport position and size
    pub viewport: Viewport,
}

impl FrameDescriptor {
    /// Descriptor clearing all buffers to black over the given viewport
    pub fn new(viewport: Viewport) -> Self {
        Self {
            clear_color: Some(Vec4::ZERO),
            clear_depth: true,
            clear_stencil: true,
            viewport,
        }
    }
}
