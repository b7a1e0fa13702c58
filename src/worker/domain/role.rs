//! Marketplace account roles.

use super::ParseWorkerRoleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a marketplace account.
///
/// Only accounts with the [`WorkerRole::Worker`] role are ever considered for
/// task assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkerRole {
    /// Performs micro-tasks.
    #[default]
    Worker,
    /// Posts jobs.
    Company,
    /// Operates the marketplace.
    Admin,
}

impl WorkerRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Worker => "worker",
            Self::Company => "company",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for WorkerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for WorkerRole {
    type Error = ParseWorkerRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "worker" => Ok(Self::Worker),
            "company" => Ok(Self::Company),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseWorkerRoleError(value.to_owned())),
        }
    }
}
