//! Core types used throughout the library.

pub mod message;
pub mod result;

// Re-export commonly used types
pub use message::*;
pub use result::*;
