//! Roadmap planner configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Settings shared by the PRM family.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoadmapConfig {
    /// Number of free samples to add besides start and goal
    #[serde(default = "defaults::num_samples")]
    pub num_samples: usize,

    /// Neighbor search radius (cells) for PRM, Lazy PRM and the
    /// narrow-passage variants
    #[serde(default = "defaults::connection_radius")]
    pub connection_radius: f32,

    /// Maximum neighbors connected per node
    #[serde(default = "defaults::max_neighbors")]
    pub max_neighbors: usize,

    /// Lazy PRM: search/validate rounds before giving up
    #[serde(default = "defaults::max_retries")]
    pub max_retries: usize,

    /// PRM*: lower bound on the shrinking connection radius
    #[serde(default = "defaults::min_star_radius")]
    pub min_star_radius: f32,

    /// Gaussian/Bridge PRM: standard deviation (cells) of the second sample
    #[serde(default = "defaults::gaussian_sigma")]
    pub gaussian_sigma: f64,

    /// Gaussian/Bridge PRM: probability of drawing a plain uniform sample
    #[serde(default = "defaults::uniform_mix")]
    pub uniform_mix: f64,
}

impl Default for RoadmapConfig {
    fn default() -> Self {
        Self {
            num_samples: defaults::num_samples(),
            connection_radius: defaults::connection_radius(),
            max_neighbors: defaults::max_neighbors(),
            max_retries: defaults::max_retries(),
            min_star_radius: defaults::min_star_radius(),
            gaussian_sigma: defaults::gaussian_sigma(),
            uniform_mix: defaults::uniform_mix(),
        }
    }
}

impl RoadmapConfig {
    /// Set the sample count
    pub fn with_num_samples(mut self, num_samples: usize) -> Self {
        self.num_samples = num_samples;
        self
    }

    /// Set the connection radius
    pub fn with_connection_radius(mut self, radius: f32) -> Self {
        self.connection_radius = radius;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.num_samples == 0 {
            return Err("roadmap.num_samples must be positive".into());
        }
        if self.connection_radius <= 0.0 {
            return Err("roadmap.connection_radius must be positive".into());
        }
        if self.max_retries == 0 {
            return Err("roadmap.max_retries must be positive".into());
        }
        if self.min_star_radius <= 0.0 {
            return Err("roadmap.min_star_radius must be positive".into());
        }
        if self.gaussian_sigma <= 0.0 {
            return Err("roadmap.gaussian_sigma must be positive".into());
        }
        if !(0.0..=1.0).contains(&self.uniform_mix) {
            return Err(format!(
                "roadmap.uniform_mix must be in [0, 1], got {}",
                self.uniform_mix
            ));
        }
        Ok(())
    }
}
