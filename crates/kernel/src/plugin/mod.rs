//! Plugin lifecycle driving.

pub mod registry;

pub use registry::PluginRegistry;
