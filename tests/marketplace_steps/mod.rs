//! Step definitions shared by the marketplace behaviour scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
