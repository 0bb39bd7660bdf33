pub mod rooms;
pub mod serve;

// Re-export command functions for convenience
pub use rooms::{add, allocate, list, search};
pub use serve::serve;
