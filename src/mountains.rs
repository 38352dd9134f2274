//! Mountain ridge generation
//!
//! A ridge is a chain of overlapping Gaussian bumps laid along a parabola
//! `y = a * t^n` anchored at a random center. Bump heights follow a sine wave
//! along the chain so the crest rises and falls instead of forming a wall.
//!
//! Random draws per ridge, in order:
//! 1. center x, center y
//! 2. length, base height multiplier
//! 3. parabola coefficient, parabola exponent
//! 4. start offset along the parabola
//! 5. one deviation per deposited bump (skipped bumps draw nothing)

use rand::Rng;
use tracing::{debug, warn};

use crate::config::{MountainConfig, WorldConfig};
use crate::deposit::GaussianDeposit;
use crate::error::FieldError;
use crate::heightfield::HeightField;

/// Shape of one ridge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RidgeParams {
    pub center_x: i64,
    pub center_y: i64,
    pub length: u32,
    pub height_multiplier: f32,
    /// Parabola coefficient `a`
    pub coefficient: f32,
    /// Parabola exponent `n`
    pub exponent: u32,
    /// Parabola parameter of the first bump
    pub start: i64,
}

impl RidgeParams {
    /// Draw a ridge shape. The center may land anywhere on the field.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R, field: &HeightField, config: &MountainConfig) -> Self {
        let center_x = rng.gen_range(0..=field.width()) as i64;
        let center_y = rng.gen_range(0..=field.height()) as i64;
        let length = config.length.sample(rng);
        let height_multiplier = config.height_multiplier.sample(rng);
        let c = config.parabola_coefficient;
        let coefficient = rng.gen_range(-c..=c);
        let exponent = config.parabola_exponent.sample(rng);
        let half = (length / 2) as i64;
        let start = rng.gen_range(-half..=half);

        Self {
            center_x,
            center_y,
            length,
            height_multiplier,
            coefficient,
            exponent,
            start,
        }
    }

    /// Unclipped ridge position at parabola parameter `t`.
    pub fn point(&self, t: i64) -> (i64, i64) {
        let relative_y = if self.coefficient == 0.0 {
            0.0
        } else {
            self.coefficient as f64 * (t as f64).powi(self.exponent as i32)
        };
        // `as` saturates, including for infinities
        let dy = relative_y.round() as i64;
        (self.center_x.saturating_add(t), self.center_y.saturating_add(dy))
    }
}

/// Outcome of one ridge pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RidgeStats {
    pub params: RidgeParams,
    /// Bumps stamped into the field
    pub deposited: usize,
    /// Bumps whose candidate position fell outside the allowed area
    pub skipped: usize,
}

/// Height modulation for bump `i`, in `[0.5, 1.5]`.
#[inline]
pub fn wave_factor(i: usize, wave_length: f32) -> f32 {
    ((i as f32 * wave_length).sin() + 2.0) / 2.0
}

/// Stamp the bumps of a ridge with a known shape.
///
/// A candidate outside `[0, dim - edge_margin]` on either axis is dropped
/// entirely; it is not pulled back onto the edge.
pub fn raise_ridge<R: Rng + ?Sized>(
    field: &mut HeightField,
    params: &RidgeParams,
    rng: &mut R,
    config: &MountainConfig,
    deposit: &GaussianDeposit,
) -> Result<RidgeStats, FieldError> {
    let max_x = field.width() as i64 - config.edge_margin as i64;
    let max_y = field.height() as i64 - config.edge_margin as i64;

    let mut stats = RidgeStats {
        params: *params,
        deposited: 0,
        skipped: 0,
    };

    for i in (0..=params.length as usize).step_by(config.bump_density) {
        let t = params.start + i as i64;
        let (px, py) = params.point(t);

        if px < 0 || px > max_x || py < 0 || py > max_y {
            stats.skipped += 1;
            continue;
        }
        let (x, y) = (px as usize, py as usize);

        let bump_multiplier = params.height_multiplier * wave_factor(i, config.wave_length);
        let deviation = config.deviation.sample(rng);
        deposit.deposit(field, x, y, bump_multiplier, deviation)?;
        stats.deposited += 1;
    }

    Ok(stats)
}

/// Draw a ridge shape and raise it onto the field.
pub fn create_mountain<R: Rng + ?Sized>(
    field: &mut HeightField,
    rng: &mut R,
    config: &WorldConfig,
) -> Result<RidgeStats, FieldError> {
    let params = RidgeParams::draw(rng, field, &config.mountain);
    debug!(
        center_x = params.center_x,
        center_y = params.center_y,
        length = params.length,
        coefficient = params.coefficient,
        exponent = params.exponent,
        start = params.start,
        "ridge drawn"
    );

    let deposit = GaussianDeposit::new(config.std_dev_area);
    let stats = raise_ridge(field, &params, rng, &config.mountain, &deposit)?;
    if stats.deposited == 0 {
        warn!(
            center_x = params.center_x,
            center_y = params.center_y,
            "ridge fell entirely outside the field"
        );
    }
    Ok(stats)
}
