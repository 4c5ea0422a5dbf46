//! Menu composition.

pub mod registry;

pub use registry::MenuRegistry;
