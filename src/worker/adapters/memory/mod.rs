//! In-memory worker directory.

mod directory;

pub use directory::InMemoryWorkerDirectory;
