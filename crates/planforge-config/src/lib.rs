//! Solver configuration read from TOML or YAML.
//!
//! A config names the phases to run, when each stops, and the move
//! selector tree of every local search phase. Selector trees may pull
//! shared settings from named templates via `inherit_from`.
//!
//! ```
//! use planforge_config::{PhaseConfig, SolverConfig};
//! use std::time::Duration;
//!
//! let config = SolverConfig::from_toml_str(r#"
//!     random_seed = 7
//!
//!     [termination]
//!     seconds_spent_limit = 30
//!
//!     [[phases]]
//!     type = "construction_heuristic"
//!
//!     [[phases]]
//!     type = "local_search"
//!     [phases.move_selector]
//!     type = "union"
//!     [[phases.move_selector.selectors]]
//!     type = "change"
//!     [[phases.move_selector.selectors]]
//!     type = "swap"
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.phases.len(), 2);
//! assert!(matches!(config.phases[1], PhaseConfig::LocalSearch(_)));
//! ```
//!
//! A missing file falls back to the defaults:
//!
//! ```
//! use planforge_config::SolverConfig;
//!
//! let config = SolverConfig::load("solver.toml").unwrap_or_default();
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use planforge_core::error::PlanForgeError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod inherit;
pub mod move_selector;
mod template;

#[cfg(test)]
mod tests;

pub use move_selector::{
    child_path, CartesianProductMoveConfig, ChangeMoveConfig, MoveFactoryConfig,
    MoveSelectorCommon, MoveSelectorConfig, PillarChangeMoveConfig, PillarSwapMoveConfig,
    SelectionOrder, SubChainChangeMoveConfig, SubChainSwapMoveConfig, SubPillarConfig,
    SwapMoveConfig, TailChainSwapMoveConfig, UnionMoveConfig,
};
pub use template::resolve_templates;

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

    #[error("{path}: composite selector has no child selectors")]
    EmptyComposite { path: String },

    #[error("{path}: cyclic template reference {chain}")]
    CyclicTemplate { path: String, chain: String },

    #[error("{path}: unknown template '{name}'")]
    UnknownTemplate { path: String, name: String },

    #[error("{path}: unknown factory '{name}'")]
    UnknownFactory { path: String, name: String },

    #[error("{path}: fixed_probability_weight must be finite and not negative, got {weight}")]
    InvalidWeight { path: String, weight: f64 },

    #[error("{path}: cannot inherit a {found} selector into a {expected} selector")]
    KindMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl ConfigError {
    /// Returns the config path the error refers to, if any.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::EmptyComposite { path }
            | Self::CyclicTemplate { path, .. }
            | Self::UnknownTemplate { path, .. }
            | Self::UnknownFactory { path, .. }
            | Self::InvalidWeight { path, .. }
            | Self::KindMismatch { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Replaces the path of a path-carrying error.
    pub fn with_path(mut self, new_path: &str) -> Self {
        match &mut self {
            Self::EmptyComposite { path }
            | Self::CyclicTemplate { path, .. }
            | Self::UnknownTemplate { path, .. }
            | Self::UnknownFactory { path, .. }
            | Self::InvalidWeight { path, .. }
            | Self::KindMismatch { path, .. } => *path = new_path.to_string(),
            _ => {}
        }
        self
    }
}

impl From<ConfigError> for PlanForgeError {
    fn from(err: ConfigError) -> Self {
        PlanForgeError::Config(err.to_string())
    }
}

/// Main solver configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SolverConfig {
    /// Environment mode affecting reproducibility.
    #[serde(default)]
    pub environment_mode: EnvironmentMode,

    /// Random seed for reproducible results.
    #[serde(default)]
    pub random_seed: Option<u64>,

    /// Termination configuration.
    #[serde(default)]
    pub termination: Option<TerminationConfig>,

    /// Phase configurations.
    #[serde(default)]
    pub phases: Vec<PhaseConfig>,

    /// Named selector trees referenced by `inherit_from`.
    #[serde(default)]
    pub move_selector_templates: BTreeMap<String, MoveSelectorConfig>,
}

impl SolverConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
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
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the termination time limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.termination = Some(TerminationConfig {
            seconds_spent_limit: Some(seconds),
            ..self.termination.unwrap_or_default()
        });
        self
    }

    /// Sets the random seed.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }

    /// Adds a phase configuration.
    pub fn with_phase(mut self, phase: PhaseConfig) -> Self {
        self.phases.push(phase);
        self
    }

    /// Registers a selector template.
    pub fn with_template(mut self, name: &str, template: MoveSelectorConfig) -> Self {
        self.move_selector_templates
            .insert(name.to_string(), template);
        self
    }

    /// Returns the termination time limit, if configured.
    ///
    /// # Examples
    ///
    /// ```
    /// use planforge_config::SolverConfig;
    /// use std::time::Duration;
    ///
    /// let config = SolverConfig::from_toml_str(r#"
    ///     [termination]
    ///     minutes_spent_limit = 2
    /// "#).unwrap();
    ///
    /// assert_eq!(config.time_limit(), Some(Duration::from_secs(120)));
    /// ```
    pub fn time_limit(&self) -> Option<Duration> {
        self.termination.as_ref().and_then(|t| t.time_limit())
    }

    /// Returns the seed for random selectors, or `None` to seed from the OS.
    pub fn effective_seed(&self) -> Option<u64> {
        match self.environment_mode {
            EnvironmentMode::Reproducible => Some(self.random_seed.unwrap_or(0)),
            EnvironmentMode::NonReproducible => None,
        }
    }

    /// Resolves templates in every local search selector tree and validates
    /// the result.
    ///
    /// # Errors
    ///
    /// Returns the first template or validation error, with its path.
    pub fn resolve_move_selectors(&mut self) -> Result<(), ConfigError> {
        for phase in &mut self.phases {
            if let PhaseConfig::LocalSearch(local_search) = phase {
                if let Some(selector) = &local_search.move_selector {
                    let resolved = resolve_templates(selector, &self.move_selector_templates)?;
                    resolved.validate()?;
                    local_search.move_selector = Some(resolved);
                }
            }
        }
        Ok(())
    }
}

/// Environment mode affecting solver behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvironmentMode {
    /// Deterministic: random selectors are seeded from `random_seed`.
    #[default]
    Reproducible,

    /// Random selectors are seeded from the operating system.
    NonReproducible,
}

/// Termination configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TerminationConfig {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum minutes to spend solving.
    pub minutes_spent_limit: Option<u64>,

    /// Maximum steps per phase.
    pub step_count_limit: Option<u64>,
}

impl TerminationConfig {
    /// Returns the time limit as a Duration, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        let seconds =
            self.seconds_spent_limit.unwrap_or(0) + self.minutes_spent_limit.unwrap_or(0) * 60;
        if seconds > 0 {
            Some(Duration::from_secs(seconds))
        } else {
            None
        }
    }
}

/// Phase configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PhaseConfig {
    /// Construction heuristic phase.
    ConstructionHeuristic(ConstructionHeuristicConfig),

    /// Local search phase.
    LocalSearch(LocalSearchConfig),
}

/// Construction heuristic configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ConstructionHeuristicConfig {
    /// Phase termination configuration.
    pub termination: Option<TerminationConfig>,
}

/// Local search configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct LocalSearchConfig {
    /// Move selector configuration.
    pub move_selector: Option<MoveSelectorConfig>,

    /// Phase termination configuration.
    pub termination: Option<TerminationConfig>,
}
