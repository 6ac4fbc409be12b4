//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod formula;
pub mod in_memory;
pub mod ports;
pub mod settings;
pub mod telemetry;
