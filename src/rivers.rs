//! River channel carving
//!
//! The river crosses the field along x. Its y position eases from
//! `margin` to `height - margin` with
//!
//! ```text
//! ease(t, s) = t^s / (t^s + (1 - t)^s)
//! ```
//!
//! which fixes `(0, 0)`, `(0.5, 0.5)` and `(1, 1)` and steepens the middle of
//! the crossing as `s` grows. At each sample point negative Gaussian deposits
//! are stamped until the center drops below `-depth`.
//!
//! The river consumes no random draws.

use rand::Rng;
use tracing::{debug, info};

use crate::config::{RiverConfig, WorldConfig};
use crate::deposit::GaussianDeposit;
use crate::error::{ConfigError, Result};
use crate::heightfield::HeightField;

/// Monotonic S-curve on `[0, 1]`.
#[inline]
pub fn ease(t: f32, steepness: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    let rise = t.powf(steepness);
    let fall = (1.0 - t).powf(steepness);
    rise / (rise + fall)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Sample points of the river path, left to right.
pub fn river_path(width: usize, height: usize, config: &RiverConfig) -> Vec<(usize, usize)> {
    let start = config.margin as f32;
    let end = height.saturating_sub(config.margin) as f32;

    (0..=width)
        .step_by(config.pit_density.max(1))
        .map(|x| {
            let t = x as f32 / width.max(1) as f32;
            let y = lerp(start, end, ease(t, config.steepness)).round();
            (x, (y.max(0.0) as usize).min(height))
        })
        .collect()
}

/// Summary of a river pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RiverStats {
    /// Points along the path that were carved
    pub samples: usize,
    /// Carve deposits across all points
    pub deposits: usize,
    /// Lowest center height reached
    pub deepest: f32,
}

/// Carve at one point until its height is below `-depth`. Returns the
/// number of deposits used.
pub fn carve_point(
    field: &mut HeightField,
    x: usize,
    y: usize,
    deposit: &GaussianDeposit,
    config: &RiverConfig,
) -> Result<usize> {
    let target = -config.depth;
    for iteration in 1..=config.max_carve_iterations {
        let h = deposit.deposit(field, x, y, config.carve_multiplier, config.deviation)?;
        if h < target {
            return Ok(iteration);
        }
    }
    Err(ConfigError::RiverDidNotConverge {
        x,
        y,
        depth: config.depth,
        iterations: config.max_carve_iterations,
    }
    .into())
}

/// Carve the river into the field.
pub fn create_river<R: Rng + ?Sized>(
    field: &mut HeightField,
    _rng: &mut R,
    config: &WorldConfig,
) -> Result<RiverStats> {
    let river = &config.river;
    let deposit = GaussianDeposit::new(config.std_dev_area);
    let path = river_path(field.width(), field.height(), river);

    let mut stats = RiverStats {
        samples: 0,
        deposits: 0,
        deepest: 0.0,
    };

    for &(x, y) in &path {
        let used = carve_point(field, x, y, &deposit, river)?;
        let h = field.get(x, y)?;
        debug!(x, y, deposits = used, height = h, "river point carved");
        stats.samples += 1;
        stats.deposits += used;
        stats.deepest = stats.deepest.min(h);
    }

    info!(
        samples = stats.samples,
        deposits = stats.deposits,
        deepest = stats.deepest,
        "river carved"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TerrainError;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_ease_fixed_points() {
        for &s in &[0.5f32, 1.0, 1.5, 3.0] {
            assert!(ease(0.0, s).abs() < 1e-6);
            assert!((ease(1.0, s) - 1.0).abs() < 1e-6);
            assert!((ease(0.5, s) - 0.5).abs() < 1e-6);
        }
        // s = 1 is the identity
        assert!((ease(0.3, 1.0) - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_ease_monotonic_and_steeper() {
        let mut prev = 0.0;
        for i in 1..=100 {
            let v = ease(i as f32 / 100.0, 1.5);
            assert!(v >= prev);
            prev = v;
        }
        // Steeper curve hugs the endpoints longer
        assert!(ease(0.2, 3.0) < ease(0.2, 1.5));
        assert!(ease(0.8, 3.0) > ease(0.8, 1.5));
    }

    #[test]
    fn test_path_runs_margin_to_margin() {
        let config = RiverConfig {
            margin: 30,
            pit_density: 10,
            ..Default::default()
        };
        let path = river_path(500, 500, &config);
        assert_eq!(path.len(), 51);
        assert_eq!(path[0], (0, 30));
        assert_eq!(path[25], (250, 250));
        assert_eq!(*path.last().unwrap(), (500, 470));
        assert!(path.windows(2).all(|w| w[1].1 >= w[0].1));
    }

    #[test]
    fn test_every_sample_ends_below_depth() {
        let config = WorldConfig::small();
        let mut field = HeightField::new(config.width, config.height);
        // Raise some terrain first so carving has to work through it
        let bump = GaussianDeposit::new(config.std_dev_area);
        bump.deposit(&mut field, 50, 50, 40.0, 6.0).unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let stats = create_river(&mut field, &mut rng, &config).unwrap();

        let path = river_path(config.width, config.height, &config.river);
        assert_eq!(stats.samples, path.len());
        for &(x, y) in &path {
            assert!(field.get(x, y).unwrap() <= -config.river.depth);
        }
        assert!(stats.deepest <= -config.river.depth);
    }

    #[test]
    fn test_river_consumes_no_draws() {
        let config = WorldConfig::small();
        let mut field = HeightField::new(config.width, config.height);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut untouched = rng.clone();
        create_river(&mut field, &mut rng, &config).unwrap();
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn test_unreachable_depth_is_config_error() {
        let mut config = WorldConfig::small();
        config.river.max_carve_iterations = 2;
        config.river.carve_multiplier = -0.001;
        let mut field = HeightField::new(config.width, config.height);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let err = create_river(&mut field, &mut rng, &config).unwrap_err();
        match err {
            TerrainError::Config(ConfigError::RiverDidNotConverge { x, iterations, .. }) => {
                assert_eq!(x, 0);
                assert_eq!(iterations, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_carve_point_counts_deposits() {
        let config = RiverConfig {
            depth: 0.2,
            deviation: 1.0,
            carve_multiplier: -1.0,
            ..Default::default()
        };
        let deposit = GaussianDeposit::new(4.0);
        let mut field = HeightField::new(20, 20);
        // Peak of one deposit is 1 / sqrt(2 pi) ~ 0.399, so one is enough
        assert_eq!(carve_point(&mut field, 10, 10, &deposit, &config).unwrap(), 1);

        field.accumulate(5, 5, 1.0).unwrap();
        // 1.0 - 3 * 0.399 = -0.197, still above -0.2; the fourth crosses
        assert_eq!(carve_point(&mut field, 5, 5, &deposit, &config).unwrap(), 4);
    }
}
