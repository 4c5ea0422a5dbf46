//! Kernel route handlers.

pub mod auth;
pub mod front;
pub mod static_files;
