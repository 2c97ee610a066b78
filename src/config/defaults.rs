//! Default value functions for serde deserialization.

pub fn max_iter() -> usize {
    1000
}

pub fn step_size() -> f32 {
    1.0
}

pub fn goal_sample_rate() -> f64 {
    0.1
}

pub fn goal_biased_sample_rate() -> f64 {
    0.3
}

pub fn goal_tolerance() -> f32 {
    1.5
}

pub fn rewire_radius() -> f32 {
    4.0
}

pub fn replan_frequency() -> usize {
    50
}

pub fn connect_attempts() -> usize {
    5
}

pub fn num_samples() -> usize {
    500
}

pub fn connection_radius() -> f32 {
    10.0
}

pub fn max_neighbors() -> usize {
    10
}

pub fn max_retries() -> usize {
    5
}

pub fn min_star_radius() -> f32 {
    5.0
}

pub fn gaussian_sigma() -> f64 {
    3.0
}

pub fn uniform_mix() -> f64 {
    0.2
}
