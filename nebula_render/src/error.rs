//! Error types for Nebula Render
//!
//! Every failure class surfaces synchronously through [`Result`]; nothing is
//! retried internally. Capability mismatches (missing compressed-format
//! extensions) have no variant here: they are handled by silent format
//! fallback, not by errors.

use std::fmt;

/// Result type for Nebula Render operations
pub type Result<T> = std::result::Result<T, Error>;

/// Nebula Render errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A construction parameter violated a precondition
    /// (non-positive dimensions, zero attachment count, wrong face count, ...)
    InvalidParameter(String),

    /// An operation exceeded the capacity of a resource
    /// (sub-range update past buffer bounds, readback larger than source, ...)
    OutOfRange(String),

    /// Framebuffer completeness validation failed
    FramebufferIncomplete(String),

    /// Backend-specific error
    BackendError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            Error::OutOfRange(msg) => write!(f, "Out of range: {}", msg),
            Error::FramebufferIncomplete(msg) => write!(f, "Framebuffer incomplete: {}", msg),
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

// ===== ERROR MACROS =====

/// Build an error value, logging it through the logging system first
///
/// # Example
///
/// ```ignore
/// return Err(render_err!(OutOfRange, "nebula::VertexBuffer",
///     "write at {} exceeds size {}", offset, size));
/// ```
#[macro_export]
macro_rules! render_err {
    ($variant:ident, $source:expr, $($arg:tt)*) => {{
        $crate::render_error!($source, $($arg)*);
        $crate::nebula::Error::$variant(format!($($arg)*))
    }};
}

/// Return early with an error, logging it through the logging system first
///
/// # Example
///
/// ```ignore
/// if count == 0 {
///     render_bail!(InvalidParameter, "nebula::Framebuffer",
///         "framebuffer requires at least one color attachment");
/// }
/// ```
#[macro_export]
macro_rules! render_bail {
    ($variant:ident, $source:expr, $($arg:tt)*) => {
        return Err($crate::render_err!($variant, $source, $($arg)*))
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
