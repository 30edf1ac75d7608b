//! Configuration system for PlanForge.
//!
//! Load planner configuration from TOML or YAML files to control the search
//! budget and plan verification without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use planforge_config::PlannerConfig;
//!
//! let config = PlannerConfig::from_toml_str(r#"
//!     [termination]
//!     iteration_limit = 250
//!
//!     [search]
//!     verify_plans = true
//! "#).unwrap();
//!
//! assert_eq!(config.iteration_limit(), 250);
//! assert!(config.search.verify_plans);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use planforge_config::PlannerConfig;
//!
//! let config = PlannerConfig::load("planner.toml").unwrap_or_default();
//! assert_eq!(config.iteration_limit(), 100);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Expansions allowed per planning call when nothing is configured.
pub const DEFAULT_ITERATION_LIMIT: u64 = 100;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main planner configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PlannerConfig {
    /// Termination configuration.
    #[serde(default)]
    pub termination: TerminationConfig,

    /// Search behavior configuration.
    #[serde(default)]
    pub search: SearchConfig,
}

impl PlannerConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the expansion budget.
    pub fn with_iteration_limit(mut self, limit: u64) -> Self {
        self.termination.iteration_limit = Some(limit);
        self
    }

    /// Enables or disables forward verification of found plans.
    pub fn with_plan_verification(mut self, enabled: bool) -> Self {
        self.search.verify_plans = enabled;
        self
    }

    /// Returns the expansion budget, falling back to [`DEFAULT_ITERATION_LIMIT`].
    pub fn iteration_limit(&self) -> u64 {
        self.termination
            .iteration_limit
            .unwrap_or(DEFAULT_ITERATION_LIMIT)
    }

    /// Applies runtime overrides on top of this configuration.
    pub fn apply_override(mut self, overrides: &PlannerConfigOverride) -> Self {
        if let Some(termination) = &overrides.termination {
            if termination.iteration_limit.is_some() {
                self.termination.iteration_limit = termination.iteration_limit;
            }
        }
        self
    }

    /// Checks values serde cannot reject on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for a zero iteration limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.termination.iteration_limit == Some(0) {
            return Err(ConfigError::Invalid(
                "termination.iteration_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum number of partial plans expanded per planning call.
    pub iteration_limit: Option<u64>,
}

/// Search behavior configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Simulate each found plan forward and reject it if a precondition or
    /// the goal does not hold.
    #[serde(default)]
    pub verify_plans: bool,
}

/// Runtime configuration overrides.
#[derive(Debug, Clone, Default)]
pub struct PlannerConfigOverride {
    /// Override termination configuration.
    pub termination: Option<TerminationConfig>,
}

impl PlannerConfigOverride {
    /// Creates a new override with termination configuration.
    pub fn with_termination(termination: TerminationConfig) -> Self {
        PlannerConfigOverride {
            termination: Some(termination),
        }
    }
}
