//! Worker roster for the marketplace.
//!
//! Workers are read-only inputs to assignment: the directory exposes
//! candidates filtered by role, availability, and skill overlap, and the
//! planning core never mutates them. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
