//! Runtime configuration loaded from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `GIGBOARD_ACCEPTANCE_THRESHOLD` | `0.30` |
//! | `GIGBOARD_CURSOR_ADVANCE` | `on_acceptance` |
//! | `GIGBOARD_AVAILABLE_BONUS` | `1.0` |
//! | `GIGBOARD_UNAVAILABLE_BONUS` | `0.5` |
//! | `GIGBOARD_EXPERIENCE_WEIGHT` | `0.1` |
//! | `GIGBOARD_DEFAULT_STRATEGY` | `round-robin` |
//! | `DATABASE_URL` | unset |
//!
//! The library never reads `.env` files; binaries load them with `dotenvy`
//! before calling [`MarketplaceConfig::from_env`].

use crate::planning::{
    AssignmentError, AssignmentStrategy, CursorAdvance, RoundRobinPolicy, ScoreWeights,
};
use thiserror::Error;

/// Round-robin acceptance threshold.
pub const ACCEPTANCE_THRESHOLD_VAR: &str = "GIGBOARD_ACCEPTANCE_THRESHOLD";
/// Round-robin cursor mode.
pub const CURSOR_ADVANCE_VAR: &str = "GIGBOARD_CURSOR_ADVANCE";
/// Best-match bonus for available workers.
pub const AVAILABLE_BONUS_VAR: &str = "GIGBOARD_AVAILABLE_BONUS";
/// Best-match bonus for unavailable workers.
pub const UNAVAILABLE_BONUS_VAR: &str = "GIGBOARD_UNAVAILABLE_BONUS";
/// Best-match score per completed task.
pub const EXPERIENCE_WEIGHT_VAR: &str = "GIGBOARD_EXPERIENCE_WEIGHT";
/// Strategy used when a caller does not pick one.
pub const DEFAULT_STRATEGY_VAR: &str = "GIGBOARD_DEFAULT_STRATEGY";
/// `PostgreSQL` connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Errors returned for malformed configuration values.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    /// The value is not a finite, non-negative number.
    #[error("{key} must be a finite non-negative number, got {value:?}")]
    InvalidNumber {
        /// Offending variable.
        key: &'static str,
        /// Raw value.
        value: String,
    },

    /// The value is not one of the accepted choices.
    #[error("{key} has unsupported value {value:?}")]
    InvalidChoice {
        /// Offending variable.
        key: &'static str,
        /// Raw value.
        value: String,
    },

    /// The acceptance threshold is out of range.
    #[error(transparent)]
    Threshold(#[from] AssignmentError),
}

/// Typed marketplace configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketplaceConfig {
    round_robin: RoundRobinPolicy,
    score_weights: ScoreWeights,
    default_strategy: AssignmentStrategy,
    database_url: Option<String>,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            round_robin: RoundRobinPolicy::default(),
            score_weights: ScoreWeights::default(),
            default_strategy: AssignmentStrategy::round_robin(),
            database_url: None,
        }
    }
}

impl MarketplaceConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a set variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through `lookup`, treating `None` and blank values
    /// as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a set variable cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let threshold = read(ACCEPTANCE_THRESHOLD_VAR)
            .map(|raw| parse_number(ACCEPTANCE_THRESHOLD_VAR, &raw))
            .transpose()?
            .unwrap_or_else(|| defaults.round_robin.threshold());
        let cursor = read(CURSOR_ADVANCE_VAR)
            .map(|raw| {
                CursorAdvance::try_from(raw.as_str()).map_err(|_| ConfigError::InvalidChoice {
                    key: CURSOR_ADVANCE_VAR,
                    value: raw.clone(),
                })
            })
            .transpose()?
            .unwrap_or_default();
        let round_robin = RoundRobinPolicy::new(threshold)?.with_cursor(cursor);

        let weight = |key: &'static str, fallback: f64| -> Result<f64, ConfigError> {
            read(key)
                .map(|raw| parse_number(key, &raw))
                .transpose()
                .map(|value| value.unwrap_or(fallback))
        };
        let score_weights = ScoreWeights {
            available_bonus: weight(AVAILABLE_BONUS_VAR, defaults.score_weights.available_bonus)?,
            unavailable_bonus: weight(
                UNAVAILABLE_BONUS_VAR,
                defaults.score_weights.unavailable_bonus,
            )?,
            experience_weight: weight(
                EXPERIENCE_WEIGHT_VAR,
                defaults.score_weights.experience_weight,
            )?,
        };

        let default_strategy = match read(DEFAULT_STRATEGY_VAR) {
            None => AssignmentStrategy::RoundRobinThreshold(round_robin),
            Some(raw) => match AssignmentStrategy::try_from(raw.as_str()) {
                Ok(AssignmentStrategy::RoundRobinThreshold(_)) => {
                    AssignmentStrategy::RoundRobinThreshold(round_robin)
                }
                Ok(AssignmentStrategy::BestMatchScored(_)) => {
                    AssignmentStrategy::BestMatchScored(score_weights)
                }
                Err(_) => {
                    return Err(ConfigError::InvalidChoice {
                        key: DEFAULT_STRATEGY_VAR,
                        value: raw,
                    });
                }
            },
        };

        Ok(Self {
            round_robin,
            score_weights,
            default_strategy,
            database_url: read(DATABASE_URL_VAR),
        })
    }

    /// Returns the configured round-robin policy.
    #[must_use]
    pub const fn round_robin(&self) -> RoundRobinPolicy {
        self.round_robin
    }

    /// Returns the configured best-match weights.
    #[must_use]
    pub const fn score_weights(&self) -> ScoreWeights {
        self.score_weights
    }

    /// Returns the strategy used when the caller does not choose one.
    #[must_use]
    pub const fn default_strategy(&self) -> AssignmentStrategy {
        self.default_strategy
    }

    /// Returns the strategy called `name`, carrying the configured
    /// parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidChoice`] for an unknown name.
    pub fn strategy_named(&self, name: &str) -> Result<AssignmentStrategy, ConfigError> {
        match AssignmentStrategy::try_from(name) {
            Ok(AssignmentStrategy::RoundRobinThreshold(_)) => {
                Ok(AssignmentStrategy::RoundRobinThreshold(self.round_robin))
            }
            Ok(AssignmentStrategy::BestMatchScored(_)) => {
                Ok(AssignmentStrategy::BestMatchScored(self.score_weights))
            }
            Err(_) => Err(ConfigError::InvalidChoice {
                key: DEFAULT_STRATEGY_VAR,
                value: name.to_owned(),
            }),
        }
    }

    /// Returns the database URL, if configured.
    #[must_use]
    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }
}

fn parse_number(key: &'static str, raw: &str) -> Result<f64, ConfigError> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .ok_or_else(|| ConfigError::InvalidNumber {
            key,
            value: raw.to_owned(),
        })
}
