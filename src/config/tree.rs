//! Tree planner configuration section.

use serde::{Deserialize, Serialize};

use super::defaults;

/// Settings shared by the RRT family.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum number of extension iterations
    #[serde(default = "defaults::max_iter")]
    pub max_iter: usize,

    /// Extension step length (cells)
    #[serde(default = "defaults::step_size")]
    pub step_size: f32,

    /// Probability of sampling the goal instead of a uniform cell
    #[serde(default = "defaults::goal_sample_rate")]
    pub goal_sample_rate: f64,

    /// Goal sampling probability used by goal-biased RRT
    #[serde(default = "defaults::goal_biased_sample_rate")]
    pub goal_biased_sample_rate: f64,

    /// Distance (cells) at which a node counts as reaching the goal
    #[serde(default = "defaults::goal_tolerance")]
    pub goal_tolerance: f32,

    /// Neighborhood radius for RRT* parent choice and rewiring
    #[serde(default = "defaults::rewire_radius")]
    pub rewire_radius: f32,

    /// Dynamic RRT prunes every this many iterations (0 never prunes;
    /// rejected by `validate`)
    #[serde(default = "defaults::replan_frequency")]
    pub replan_frequency: usize,

    /// RRT-Connect: extensions of the second tree per iteration
    #[serde(default = "defaults::connect_attempts")]
    pub connect_attempts: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_iter: defaults::max_iter(),
            step_size: defaults::step_size(),
            goal_sample_rate: defaults::goal_sample_rate(),
            goal_biased_sample_rate: defaults::goal_biased_sample_rate(),
            goal_tolerance: defaults::goal_tolerance(),
            rewire_radius: defaults::rewire_radius(),
            replan_frequency: defaults::replan_frequency(),
            connect_attempts: defaults::connect_attempts(),
        }
    }
}

impl TreeConfig {
    /// Set the iteration cap
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the goal sampling probability
    pub fn with_goal_sample_rate(mut self, rate: f64) -> Self {
        self.goal_sample_rate = rate;
        self
    }

    /// Set the extension step length
    pub fn with_step_size(mut self, step_size: f32) -> Self {
        self.step_size = step_size;
        self
    }

    /// Set the Dynamic RRT prune period
    pub fn with_replan_frequency(mut self, frequency: usize) -> Self {
        self.replan_frequency = frequency;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.max_iter == 0 {
            return Err("tree.max_iter must be positive".into());
        }
        if self.step_size <= 0.0 {
            return Err(format!("tree.step_size must be positive, got {}", self.step_size));
        }
        if !(0.0..=1.0).contains(&self.goal_sample_rate) {
            return Err(format!(
                "tree.goal_sample_rate must be in [0, 1], got {}",
                self.goal_sample_rate
            ));
        }
        if !(0.0..=1.0).contains(&self.goal_biased_sample_rate) {
            return Err(format!(
                "tree.goal_biased_sample_rate must be in [0, 1], got {}",
                self.goal_biased_sample_rate
            ));
        }
        if self.goal_tolerance <= 0.0 {
            return Err("tree.goal_tolerance must be positive".into());
        }
        if self.rewire_radius <= 0.0 {
            return Err("tree.rewire_radius must be positive".into());
        }
        if self.replan_frequency == 0 {
            return Err("tree.replan_frequency must be positive".into());
        }
        Ok(())
    }
}
