//! `moneta-observability` — logging/tracing bootstrap.

pub mod tracing;

pub use self::tracing::{init, init_with, LogFormat};
