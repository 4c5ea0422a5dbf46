//! Kiosk Kernel Library
//!
//! This library exposes kernel internals for integration testing.
//! The main entry point for running the server is the `kiosk` binary.

pub mod auth;
pub mod config;
pub mod error;
pub mod menu;
pub mod middleware;
pub mod plugin;
pub mod routes;
pub mod session;
pub mod state;

pub use config::Config;
pub use state::AppState;
