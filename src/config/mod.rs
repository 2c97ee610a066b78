//! Planner configuration.
//!
//! Every field has a default, so a YAML file only needs the values it
//! changes.
//!
//! ```rust,ignore
//! use marga_plan::config::PlannerConfig;
//!
//! // Load from default path (configs/planner.yaml), falling back to defaults
//! let config = PlannerConfig::load_default()?;
//! let rrt = Rrt::new(config.tree.clone());
//! ```
//!
//! ## Example YAML
//!
//! ```yaml
//! tree:
//!   max_iter: 2000
//!   goal_sample_rate: 0.2
//! roadmap:
//!   num_samples: 300
//!   connection_radius: 8.0
//! ```

mod defaults;
mod planner;
mod roadmap;
mod tree;

pub use planner::PlannerConfig;
pub use roadmap::RoadmapConfig;
pub use tree::TreeConfig;
