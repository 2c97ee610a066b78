//! Top-level planner configuration and YAML loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MargaError, Result};

use super::roadmap::RoadmapConfig;
use super::tree::TreeConfig;

/// Full planner configuration loaded from YAML
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// RRT family settings
    #[serde(default)]
    pub tree: TreeConfig,

    /// PRM family settings
    #[serde(default)]
    pub roadmap: RoadmapConfig,
}

impl PlannerConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/planner.yaml)
    pub fn load_default() -> Result<Self> {
        let path = Path::new("configs/planner.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse and validate a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Reject values no planner can run with.
    pub fn validate(&self) -> Result<()> {
        self.tree.validate().map_err(MargaError::InvalidConfig)?;
        self.roadmap.validate().map_err(MargaError::InvalidConfig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config() {
        let config = PlannerConfig::default();
        assert_eq!(config.tree.max_iter, 1000);
        assert_relative_eq!(config.tree.goal_tolerance, 1.5);
        assert_relative_eq!(config.tree.goal_sample_rate, 0.1);
        assert_eq!(config.roadmap.num_samples, 500);
        assert_eq!(config.roadmap.max_neighbors, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let mut config = PlannerConfig::default();
        config.tree.rewire_radius = 6.5;
        config.roadmap.max_retries = 9;

        let yaml = config.to_yaml().unwrap();
        let parsed = PlannerConfig::from_yaml(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = concat!(
            "tree:\n  max_iter: 250\n  goal_biased_sample_rate: 0.6\n",
            "roadmap:\n  num_samples: 40\n",
        );
        let config = PlannerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.tree.max_iter, 250);
        assert_relative_eq!(config.tree.goal_biased_sample_rate, 0.6);
        assert_relative_eq!(config.tree.goal_sample_rate, 0.1);
        assert_relative_eq!(config.tree.step_size, 1.0);
        assert_eq!(config.roadmap.num_samples, 40);
        assert_relative_eq!(config.roadmap.connection_radius, 10.0);

        let empty = PlannerConfig::from_yaml("{}").unwrap();
        assert_eq!(empty, PlannerConfig::default());
    }

    #[test]
    fn test_validation_failures() {
        for yaml in [
            "tree:\n  max_iter: 0\n",
            "tree:\n  step_size: 0.0\n",
            "tree:\n  goal_sample_rate: 1.5\n",
            "tree:\n  goal_biased_sample_rate: -0.5\n",
            "tree:\n  replan_frequency: 0\n",
            "roadmap:\n  num_samples: 0\n",
            "roadmap:\n  connection_radius: -1.0\n",
            "roadmap:\n  uniform_mix: -0.1\n",
        ] {
            let err = PlannerConfig::from_yaml(yaml).unwrap_err();
            assert!(
                matches!(err, MargaError::InvalidConfig(_)),
                "expected InvalidConfig for {yaml:?}, got {err}"
            );
        }
    }

    #[test]
    fn test_malformed_yaml() {
        let err = PlannerConfig::from_yaml("tree: [1, 2").unwrap_err();
        assert!(matches!(err, MargaError::ConfigParse(_)));
    }

    #[test]
    fn test_goal_biased_rate_default() {
        let config = PlannerConfig::default();
        assert_relative_eq!(config.tree.goal_biased_sample_rate, 0.3);
    }
}
