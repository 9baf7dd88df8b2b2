//! Simulation configuration with documented constants
//!
//! Every tunable number the decision engine uses lives here. The defaults
//! reproduce the behavior of the hand-tuned agent model; a TOML file can
//! override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{OntologyError, Result};
use crate::core::time::{ONE_DAY, ONE_HOUR};
use crate::entity::needs::{NeedType, NeedVector};

/// Configuration for the simulation systems
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Simulated seconds covered by a single tick
    ///
    /// Action durations are converted to whole ticks by rounding up, so with
    /// the default of 1.0 a five minute action occupies 300 ticks.
    pub seconds_per_tick: f64,

    /// Passive need decay, applied once per tick before action handling
    pub decay: NeedDecay,

    /// The ε in the advert scoring formula `c / (c * (c + need) + ε)`
    ///
    /// Only there to keep zero-cost slots from dividing by zero. Large values
    /// flatten the score curve.
    pub score_epsilon: f32,

    /// Lower bound for the squared agent/object distance
    ///
    /// An agent standing on top of an object would otherwise divide by zero.
    pub min_distance_squared: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seconds_per_tick: 1.0,
            decay: NeedDecay::default(),
            score_epsilon: 1e-8,
            min_distance_squared: 1e-8,
        }
    }
}

/// Passive decay rates per need, as a fraction of the full range per
/// simulated second. Negative values deplete the need.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeedDecay {
    /// Empties over eight hours
    pub bladder: f32,
    /// Empties over six hours
    pub food: f32,
    /// Empties over three days
    pub sleep: f32,
    /// Empties over five hours
    pub mood: f32,
}

impl Default for NeedDecay {
    fn default() -> Self {
        Self {
            bladder: (-1.0 / (8.0 * ONE_HOUR)) as f32,
            food: (-1.0 / (6.0 * ONE_HOUR)) as f32,
            sleep: (-1.0 / (3.0 * ONE_DAY)) as f32,
            mood: (-1.0 / (5.0 * ONE_HOUR)) as f32,
        }
    }
}

impl NeedDecay {
    /// No passive decay at all
    pub fn none() -> Self {
        Self {
            bladder: 0.0,
            food: 0.0,
            sleep: 0.0,
            mood: 0.0,
        }
    }

    /// Decay over `seconds` of simulated time as a cost vector
    pub fn over(&self, seconds: f64) -> NeedVector {
        let dt = seconds as f32;
        let mut v = NeedVector::zero();
        v[NeedType::Bladder] = self.bladder * dt;
        v[NeedType::Food] = self.food * dt;
        v[NeedType::Sleep] = self.sleep * dt;
        v[NeedType::Mood] = self.mood * dt;
        v
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing fields keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file on disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.seconds_per_tick > 0.0) {
            return Err(OntologyError::InvalidConfig(format!(
                "seconds_per_tick ({}) must be positive",
                self.seconds_per_tick
            )));
        }

        if !(self.score_epsilon > 0.0) {
            return Err(OntologyError::InvalidConfig(
                "score_epsilon must be positive".into(),
            ));
        }

        if !(self.min_distance_squared > 0.0) {
            return Err(OntologyError::InvalidConfig(
                "min_distance_squared must be positive".into(),
            ));
        }

        Ok(())
    }

    /// Number of ticks an action of the given duration occupies
    pub fn ticks_for(&self, duration: f64) -> u64 {
        if duration <= 0.0 {
            return 0;
        }
        (duration / self.seconds_per_tick).ceil() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seconds_per_tick, 1.0);
    }

    #[test]
    fn test_default_decay_depletes() {
        let decay = NeedDecay::default();
        assert!(decay.food < 0.0);
        assert!(decay.sleep < 0.0);
        // Food runs out faster than sleep
        assert!(decay.food < decay.sleep);

        let six_hours = decay.over(6.0 * ONE_HOUR);
        assert!((six_hours[NeedType::Food] + 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
seconds_per_tick = 60.0

[decay]
food = -0.001
"#,
        )
        .unwrap();

        assert_eq!(config.seconds_per_tick, 60.0);
        assert_eq!(config.decay.food, -0.001);
        assert_eq!(config.decay.sleep, NeedDecay::default().sleep);
        assert_eq!(config.score_epsilon, 1e-8);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = SimulationConfig::from_toml_str("seconds_per_tick = 0.0");
        assert!(matches!(result, Err(OntologyError::InvalidConfig(_))));
    }

    #[test]
    fn test_ticks_for_rounds_up() {
        let mut config = SimulationConfig::default();
        assert_eq!(config.ticks_for(3.0), 3);
        assert_eq!(config.ticks_for(0.0), 0);

        config.seconds_per_tick = 60.0;
        assert_eq!(config.ticks_for(300.0), 5);
        assert_eq!(config.ticks_for(301.0), 6);
    }
}
