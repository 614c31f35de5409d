//! Device and pipeline-state management.
//!
//! [`PipelineState`] is a plain value describing one draw configuration;
//! [`Device`] owns the last-applied snapshot and turns `apply` into the
//! minimal set of state-change calls.

pub mod pipeline_state;
pub mod frame;
pub mod device;

pub use pipeline_state::PipelineState;
pub use frame::{FrameDescriptor, Viewport};
pub use device::{Device, DeviceSettings};
