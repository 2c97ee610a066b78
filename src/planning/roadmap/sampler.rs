//! Roadmap sampling strategies.
//!
//! Uniform sampling covers open space well but rarely lands inside narrow
//! corridors. The Gaussian and bridge-test strategies bias samples towards
//! obstacle boundaries and gaps between obstacles:
//!
//! ```text
//! Gaussian:  q1 ──N(0,σ)──▶ q2      keep whichever one is free, if only one is
//! Bridge:    q1 ──N(0,σ)──▶ q2      both blocked, midpoint free → keep midpoint
//! ```

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::core::GridCoord;
use crate::grid::OccupancyGrid;

/// How roadmap nodes are drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sampler {
    /// Uniform cell, kept if free
    Uniform,
    /// Gaussian obstacle-boundary sampling
    Gaussian { sigma: f64, uniform_mix: f64 },
    /// Bridge-test sampling for narrow passages
    Bridge { sigma: f64, uniform_mix: f64 },
}

impl Sampler {
    /// One sampling attempt. Returns a free cell or `None`.
    pub fn sample<R: Rng + ?Sized>(&self, grid: &OccupancyGrid, rng: &mut R) -> Option<GridCoord> {
        match *self {
            Self::Uniform => uniform(grid, rng),
            Self::Gaussian { sigma, uniform_mix } => {
                if rng.random::<f64>() < uniform_mix {
                    return uniform(grid, rng);
                }
                let q1 = grid.random_coord(rng);
                let q2 = perturb(q1, sigma, rng);
                match (grid.is_free(q1), grid.is_free(q2)) {
                    (true, false) => Some(q1),
                    (false, true) => Some(q2),
                    _ => None,
                }
            }
            Self::Bridge { sigma, uniform_mix } => {
                if rng.random::<f64>() < uniform_mix {
                    return uniform(grid, rng);
                }
                let q1 = grid.random_coord(rng);
                if grid.is_free(q1) {
                    return None;
                }
                let q2 = perturb(q1, sigma, rng);
                if grid.is_free(q2) {
                    return None;
                }
                let mid = q1.midpoint(&q2);
                grid.is_free(mid).then_some(mid)
            }
        }
    }
}

fn uniform<R: Rng + ?Sized>(grid: &OccupancyGrid, rng: &mut R) -> Option<GridCoord> {
    let q = grid.random_coord(rng);
    grid.is_free(q).then_some(q)
}

/// `q` shifted by an independent N(0, sigma) offset per axis, rounded.
fn perturb<R: Rng + ?Sized>(q: GridCoord, sigma: f64, rng: &mut R) -> GridCoord {
    let dx: f64 = StandardNormal.sample(rng);
    let dy: f64 = StandardNormal.sample(rng);
    GridCoord::new(
        q.x + (dx * sigma).round() as i32,
        q.y + (dy * sigma).round() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CellState;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// Two blocks separated by a one-cell vertical gap at x = 10.
    fn corridor() -> OccupancyGrid {
        let mut grid = OccupancyGrid::new(21);
        grid.fill_rect(GridCoord::new(0, 0), GridCoord::new(9, 20), CellState::Obstacle);
        grid.fill_rect(GridCoord::new(11, 0), GridCoord::new(20, 20), CellState::Obstacle);
        grid
    }

    #[test]
    fn test_uniform_only_free() {
        let grid = corridor();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            if let Some(q) = Sampler::Uniform.sample(&grid, &mut rng) {
                assert_eq!(q.x, 10);
            }
        }
    }

    fn near_blocked(grid: &OccupancyGrid, q: GridCoord, reach: i32) -> bool {
        (-reach..=reach).any(|dy| {
            (-reach..=reach).any(|dx| grid.is_blocked(GridCoord::new(q.x + dx, q.y + dy)))
        })
    }

    #[test]
    fn test_gaussian_lands_next_to_obstacles() {
        let mut grid = OccupancyGrid::new(60);
        grid.fill_rect(GridCoord::new(27, 27), GridCoord::new(32, 32), CellState::Obstacle);
        let sampler = Sampler::Gaussian {
            sigma: 2.0,
            uniform_mix: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(2);

        let samples: Vec<_> = (0..4000)
            .filter_map(|_| sampler.sample(&grid, &mut rng))
            .collect();
        assert!(samples.len() > 50);
        assert!(samples.iter().all(|&q| grid.is_free(q)));

        // Roughly half the free cells are this close to a boundary; nearly
        // every Gaussian sample is.
        let near = samples
            .iter()
            .filter(|&&q| near_blocked(&grid, q, 6))
            .count();
        assert!(near * 100 >= samples.len() * 95);
    }

    #[test]
    fn test_bridge_finds_corridor() {
        let grid = corridor();
        let sampler = Sampler::Bridge {
            sigma: 3.0,
            uniform_mix: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(3);

        let samples: Vec<_> = (0..3000)
            .filter_map(|_| sampler.sample(&grid, &mut rng))
            .collect();
        assert!(!samples.is_empty());
        assert!(samples.iter().all(|q| q.x == 10));
    }

    #[test]
    fn test_narrow_passage_samplers_on_free_grid() {
        // Without obstacles only the uniform share produces samples
        let grid = OccupancyGrid::new(10);
        let mut rng = StdRng::seed_from_u64(4);

        let bridge_pure = Sampler::Bridge {
            sigma: 3.0,
            uniform_mix: 0.0,
        };
        assert!((0..200).all(|_| bridge_pure.sample(&grid, &mut rng).is_none()));

        let bridge_mixed = Sampler::Bridge {
            sigma: 3.0,
            uniform_mix: 0.2,
        };
        assert!((0..200).any(|_| bridge_mixed.sample(&grid, &mut rng).is_some()));
    }
}
