use serde::{Deserialize, Serialize};

use crate::CodeError;

/// Trials per source vector for one error estimate.
pub const DEFAULT_TRIALS_PER_SOURCE: usize = 1000;

/// Bisection range and step budget for the threshold search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Lowest channel quality considered, dB
    pub lower_db: f64,
    /// Highest channel quality considered, dB
    pub upper_db: f64,
    pub iterations: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            lower_db: 0.0,
            upper_db: 100.0,
            iterations: 32,
        }
    }
}

/// Monte Carlo simulation settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub trials_per_source: usize,
    /// Seed for the noise generator; every estimate restarts from it.
    pub seed: u64,
    pub search: SearchConfig,
    pub target_error_probability: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            trials_per_source: DEFAULT_TRIALS_PER_SOURCE,
            seed: 1,
            search: SearchConfig::default(),
            target_error_probability: 1e-5,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), CodeError> {
        if self.trials_per_source == 0 {
            return Err(CodeError::InvalidParameter(
                "trials_per_source must be > 0".to_string(),
            ));
        }

        if self.search.iterations == 0 {
            return Err(CodeError::InvalidParameter(
                "search iterations must be > 0".to_string(),
            ));
        }

        let SearchConfig {
            lower_db, upper_db, ..
        } = self.search;
        if !(lower_db.is_finite() && upper_db.is_finite() && lower_db < upper_db) {
            return Err(CodeError::InvalidParameter(format!(
                "Invalid search range [{}, {}]",
                lower_db, upper_db
            )));
        }

        let target = self.target_error_probability;
        if !(target > 0.0 && target < 1.0) {
            return Err(CodeError::InvalidParameter(format!(
                "Target error probability {} outside (0, 1)",
                target
            )));
        }

        Ok(())
    }
}
