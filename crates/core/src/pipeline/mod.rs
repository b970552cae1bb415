// Pipeline module - core logic only
// Concrete steps and I/O live in core-full

pub mod context;
pub mod core;
pub mod engine;
pub mod keys;
pub mod registry;

// Re-export core types
pub use self::context::*;
pub use self::core::*;
pub use engine::*;
pub use registry::*;
