//! Adapter implementations of the job repository port.

pub mod memory;
pub mod postgres;
