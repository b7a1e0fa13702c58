//! Adapter implementations of the worker directory port.

pub mod memory;
pub mod postgres;
