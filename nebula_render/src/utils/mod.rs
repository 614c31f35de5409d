//! Small shared utilities.

mod handle_allocator;

pub use handle_allocator::HandleAllocator;
