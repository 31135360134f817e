// src/lib.rs
//
// Library entry point for Rust consumers and FFI/wasm hosts.

mod error;
mod generator;
mod shared;

pub mod ffi;

#[cfg(feature = "web")]
pub mod wasm;

// Re-export key types for Rust consumers
pub use error::{Error, InvalidArgument, Result};
pub use generator::{DEFAULT_SAMPLE_RATE, SignalGenerator};
pub use shared::SharedSignalGenerator;
