//! Micro-task lifecycle management.
//!
//! Tasks are persisted micro-tasks produced by job decomposition. They move
//! through `pending -> assigned -> in_progress -> completed -> reviewed`;
//! assignment services produce the first transition and the workflow
//! service drives the rest. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
