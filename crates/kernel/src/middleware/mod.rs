//! HTTP middleware components.

pub mod guard;

pub use guard::guard_routes;
