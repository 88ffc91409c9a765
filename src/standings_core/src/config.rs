//! Run configuration, loaded from TOML.
//!
//! ```toml
//! teams = ["HIFK", "Tappara", "Ilves"]
//! point_system = "3ph"
//! tie_probability = "0.23"
//! trials = 100000
//! rounds = 2
//! seed = 42
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::SimulationResult;
use crate::schedule::{DeclaredGame, ScheduleSource};
use crate::simulation::SimulationParams;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    /// Roster in display order.
    pub teams: Vec<String>,
    /// `f` or `3ph`.
    pub point_system: String,
    /// Exact decimal in [0, 1], kept as text so no precision is lost.
    pub tie_probability: String,
    pub trials: i64,
    /// Round-robin rounds to generate. Leave unset when a fixture list is supplied.
    #[serde(default)]
    pub rounds: Option<u32>,
    /// Fixed seed for reproducible runs.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Parallel workers. Unset or 1 runs on the calling thread.
    #[serde(default)]
    pub workers: Option<usize>,
}

impl SimulationConfig {
    pub fn from_toml_str(raw: &str) -> SimulationResult<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn load(path: &Path) -> SimulationResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    /// Validated parameters.
    pub fn validate(&self) -> SimulationResult<SimulationParams> {
        SimulationParams::parse(
            self.teams.iter().cloned(),
            &self.point_system,
            &self.tie_probability,
            self.trials,
        )
    }

    /// Schedule source given an optional fixture list.
    pub fn schedule_source(
        &self,
        fixtures: Option<Vec<DeclaredGame>>,
    ) -> SimulationResult<ScheduleSource> {
        ScheduleSource::from_parts(self.rounds, fixtures)
    }

    pub fn effective_workers(&self) -> usize {
        self.workers.unwrap_or(1).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SimulationError;
    use crate::point_system::PointSystem;
    use crate::schedule::Fixture;

    const SAMPLE: &str = r#"
        teams = ["HIFK", "Tappara", "Ilves"]
        point_system = "3ph"
        tie_probability = "0.23"
        trials = 5000
        rounds = 2
        seed = 42
    "#;

    #[test]
    fn test_parse_sample() {
        let config = SimulationConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.teams.len(), 3);
        assert_eq!(config.rounds, Some(2));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.effective_workers(), 1);

        let params = config.validate().unwrap();
        assert_eq!(params.system, PointSystem::ThreePointOvertime);
        assert_eq!(params.trials, 5000);
        assert_eq!(params.tie_probability.to_string(), "0.23");
    }

    #[test]
    fn test_rounds_conflict_with_fixtures() {
        let config = SimulationConfig::from_toml_str(SAMPLE).unwrap();
        let fixtures = vec![DeclaredGame::unplayed(Fixture::new("HIFK", "Ilves"))];
        let err = config.schedule_source(Some(fixtures)).unwrap_err();
        assert!(matches!(err, SimulationError::ConflictingConfiguration(_)));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let raw = SAMPLE.replace("trials = 5000", "trials = -1");
        let config = SimulationConfig::from_toml_str(&raw).unwrap();
        assert!(matches!(
            config.validate(),
            Err(SimulationError::InvalidTrialCount(-1))
        ));

        let raw = SAMPLE.replace("\"3ph\"", "\"2p\"");
        let config = SimulationConfig::from_toml_str(&raw).unwrap();
        assert!(matches!(
            config.validate(),
            Err(SimulationError::UnsupportedPointSystem(_))
        ));
    }

    #[test]
    fn test_malformed_toml() {
        let err = SimulationConfig::from_toml_str("teams = 3").unwrap_err();
        assert!(matches!(err, SimulationError::Config(_)));
    }
}
