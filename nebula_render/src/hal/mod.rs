//! Device driver abstraction.
//!
//! [`GraphicsApi`] is the call-level interface every resource and the
//! [`Device`](crate::device::Device) talk to: one method per device call,
//! nothing higher-level. [`HeadlessApi`] is the in-tree backend that
//! implements the whole contract against in-memory tables so the crate can
//! be exercised without a GPU.

pub mod types;
pub mod api;
pub mod headless;

pub use types::*;
pub use api::GraphicsApi;
pub use headless::HeadlessApi;
