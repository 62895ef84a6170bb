//! The bridge server: TCP transport plus the JSON command dispatcher.
//!
//! Library surface exists mainly so integration tests can drive the
//! dispatcher and transport directly; the binary in `main.rs` is the
//! production entry point.

#![deny(unsafe_code)]

pub mod dispatch;
pub mod scene_info;
pub mod transport;

pub use dispatch::Dispatcher;
pub use transport::Server;
