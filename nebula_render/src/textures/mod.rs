//! Texture resources.
//!
//! Three storage layouts behind one capability-set trait, plus the format
//! negotiation table that maps a requested compression family and quality
//! tier to a concrete internal format, falling back to uncompressed storage
//! on platforms lacking the required extension.

pub mod format;
pub mod texture;
pub mod texture_2d;
pub mod texture_cube;
pub mod texture_2d_array;

pub use format::{FormatFamily, FormatRequest, TextureQuality};
pub use texture::Texture;
pub use texture_2d::Texture2D;
pub use texture_cube::TextureCube;
pub use texture_2d_array::Texture2DArray;
