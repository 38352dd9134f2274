//! Generation parameters and configuration loading.
//!
//! Defaults reproduce the reference world: a 500x500 field, five ridges and a
//! single river. Every range is inclusive on both ends.

use std::fmt::Display;
use std::path::Path;

use rand::distributions::uniform::SampleUniform;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Inclusive `[min, max]` range sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span<T> {
    pub min: T,
    pub max: T,
}

impl<T: Copy + PartialOrd + SampleUniform> Span<T> {
    pub const fn new(min: T, max: T) -> Self {
        Self { min, max }
    }

    /// A span that always yields `value`.
    pub const fn fixed(value: T) -> Self {
        Self { min: value, max: value }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        rng.gen_range(self.min..=self.max)
    }

    #[cfg(test)]
    pub fn contains(&self, value: T) -> bool {
        self.min <= value && value <= self.max
    }
}

impl<T: PartialOrd + Copy + Into<f64>> Span<T> {
    fn check(&self, field: &'static str) -> std::result::Result<(), ConfigError> {
        let (min, max): (f64, f64) = (self.min.into(), self.max.into());
        if !min.is_finite() || !max.is_finite() {
            return Err(ConfigError::Invalid {
                field,
                reason: format!("range bounds must be finite (got [{}, {}])", min, max),
            });
        }
        if min > max {
            return Err(ConfigError::InvertedRange { field, min, max });
        }
        Ok(())
    }
}

/// Where the run's random sequence comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedMode {
    /// Always start from the given seed.
    Fixed(u64),
    /// Draw a fresh seed from system entropy.
    #[default]
    Entropy,
}

impl Display for SeedMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(seed) => write!(f, "fixed({})", seed),
            Self::Entropy => write!(f, "entropy"),
        }
    }
}

/// Ridge parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MountainConfig {
    /// Ridge length in cells along x
    pub length: Span<u32>,

    /// Candidate bump positions must lie in `[0, dim - edge_margin]`
    pub edge_margin: usize,

    /// Base height multiplier for the whole ridge
    pub height_multiplier: Span<f32>,

    /// Standard deviation of each bump (drawn per bump)
    pub deviation: Span<f32>,

    /// Stride between consecutive bumps along the ridge
    pub bump_density: usize,

    /// Angular step of the sine modulating bump height along the ridge
    pub wave_length: f32,

    /// Parabola coefficient is drawn from `[-c, c]`
    pub parabola_coefficient: f32,

    /// Exponent of the ridge parabola
    pub parabola_exponent: Span<u32>,
}

impl Default for MountainConfig {
    fn default() -> Self {
        Self {
            length: Span::new(200, 300),
            edge_margin: 0,
            height_multiplier: Span::new(40.0, 50.0),
            deviation: Span::new(11.0, 17.0),
            bump_density: 3,
            wave_length: 0.1,
            parabola_coefficient: 0.005,
            parabola_exponent: Span::new(1, 2),
        }
    }
}

/// River channel parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiverConfig {
    /// Carving stops once the center drops below `-depth`
    pub depth: f32,

    /// Standard deviation of each carve deposit
    pub deviation: f32,

    /// Stride between sample points along x
    pub pit_density: usize,

    /// Easing exponent; larger values make the crossing steeper
    pub steepness: f32,

    /// Path starts at `y = margin` and ends at `y = height - margin`
    pub margin: usize,

    /// Height multiplier of a single carve deposit (negative)
    pub carve_multiplier: f32,

    /// Deposits allowed per sample point before giving up
    pub max_carve_iterations: usize,
}

impl Default for RiverConfig {
    fn default() -> Self {
        Self {
            depth: 0.2,
            deviation: 15.0,
            pit_density: 10,
            steepness: 1.5,
            margin: 30,
            carve_multiplier: -5.0,
            max_carve_iterations: 100_000,
        }
    }
}

/// Everything a generation run needs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,

    /// World-space size of one grid cell
    pub world_scale: f32,

    /// Number of ridge passes before the river
    pub mountain_count: usize,

    /// Deposit radius is `deviation * std_dev_area`, truncated to whole cells
    pub std_dev_area: f32,

    pub seed: SeedMode,
    pub mountain: MountainConfig,
    pub river: RiverConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 500,
            world_scale: 0.01,
            mountain_count: 5,
            std_dev_area: 4.0,
            seed: SeedMode::Entropy,
            mountain: MountainConfig::default(),
            river: RiverConfig::default(),
        }
    }
}

impl WorldConfig {
    /// A 100x100 world with proportionally shorter ridges. Quick to generate.
    pub fn small() -> Self {
        Self {
            width: 100,
            height: 100,
            world_scale: 0.05,
            mountain_count: 3,
            mountain: MountainConfig {
                length: Span::new(40, 60),
                deviation: Span::new(3.0, 5.0),
                ..Default::default()
            },
            river: RiverConfig {
                deviation: 4.0,
                pit_density: 4,
                margin: 10,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = SeedMode::Fixed(seed);
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every field once, before any generation work starts.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.width == 0 {
            return Err(not_positive("width", 0.0));
        }
        if self.height == 0 {
            return Err(not_positive("height", 0.0));
        }
        positive("world_scale", self.world_scale)?;
        positive("std_dev_area", self.std_dev_area)?;

        let m = &self.mountain;
        m.length.check("mountain.length")?;
        m.height_multiplier.check("mountain.height_multiplier")?;
        m.deviation.check("mountain.deviation")?;
        positive("mountain.deviation.min", m.deviation.min)?;
        m.parabola_exponent.check("mountain.parabola_exponent")?;
        self.radius_fits("mountain.deviation.max", m.deviation.max)?;
        if m.bump_density == 0 {
            return Err(not_positive("mountain.bump_density", 0.0));
        }
        if !m.wave_length.is_finite() {
            return Err(ConfigError::Invalid {
                field: "mountain.wave_length",
                reason: format!("must be finite (got {})", m.wave_length),
            });
        }
        if !(m.parabola_coefficient >= 0.0 && m.parabola_coefficient.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "mountain.parabola_coefficient",
                reason: format!(
                    "is the half-width of a symmetric range and must be >= 0 (got {})",
                    m.parabola_coefficient
                ),
            });
        }
        if m.edge_margin > self.width.min(self.height) {
            return Err(ConfigError::Invalid {
                field: "mountain.edge_margin",
                reason: format!(
                    "{} leaves no room in a {}x{} field",
                    m.edge_margin, self.width, self.height
                ),
            });
        }

        let r = &self.river;
        if !(r.depth >= 0.0 && r.depth.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "river.depth",
                reason: format!("must be a finite value >= 0 (got {})", r.depth),
            });
        }
        positive("river.deviation", r.deviation)?;
        self.radius_fits("river.deviation", r.deviation)?;
        positive("river.steepness", r.steepness)?;
        if r.pit_density == 0 {
            return Err(not_positive("river.pit_density", 0.0));
        }
        if r.margin > self.height {
            return Err(ConfigError::Invalid {
                field: "river.margin",
                reason: format!("{} exceeds field height {}", r.margin, self.height),
            });
        }
        if !(r.carve_multiplier < 0.0 && r.carve_multiplier.is_finite()) {
            return Err(ConfigError::NotNegative {
                field: "river.carve_multiplier",
                value: r.carve_multiplier as f64,
            });
        }
        if r.max_carve_iterations == 0 {
            return Err(not_positive("river.max_carve_iterations", 0.0));
        }

        Ok(())
    }
}

impl WorldConfig {
    /// A deposit neighborhood wider than the whole field is a units mistake.
    fn radius_fits(
        &self,
        field: &'static str,
        deviation: f32,
    ) -> std::result::Result<(), ConfigError> {
        let radius = deviation as f64 * self.std_dev_area as f64;
        let limit = self.width.max(self.height);
        if radius > limit as f64 {
            return Err(ConfigError::Invalid {
                field,
                reason: format!(
                    "deposit radius {} (deviation {} x std_dev_area {}) exceeds field size {}",
                    radius, deviation, self.std_dev_area, limit
                ),
            });
        }
        Ok(())
    }
}

fn not_positive(field: &'static str, value: f64) -> ConfigError {
    ConfigError::NotPositive { field, value }
}

fn positive(field: &'static str, value: f32) -> std::result::Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(not_positive(field, value as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_defaults_are_valid() {
        assert!(WorldConfig::default().validate().is_ok());
        assert!(WorldConfig::small().validate().is_ok());
    }

    #[test]
    fn test_inverted_range_names_field() {
        let mut config = WorldConfig::default();
        config.mountain.length = Span::new(300, 200);
        let err = config.validate().unwrap_err();
        assert_eq!(err.field(), "mountain.length");
        assert!(matches!(err, ConfigError::InvertedRange { .. }));
    }

    #[test]
    fn test_zero_stride_rejected() {
        let mut config = WorldConfig::default();
        config.mountain.bump_density = 0;
        assert_eq!(config.validate().unwrap_err().field(), "mountain.bump_density");

        let mut config = WorldConfig::default();
        config.river.pit_density = 0;
        assert_eq!(config.validate().unwrap_err().field(), "river.pit_density");
    }

    #[test]
    fn test_positive_carve_multiplier_rejected() {
        let mut config = WorldConfig::default();
        config.river.carve_multiplier = 1.0;
        let err = config.validate().unwrap_err();
        assert_eq!(err.field(), "river.carve_multiplier");
    }

    #[test]
    fn test_zero_deviation_rejected() {
        let mut config = WorldConfig::default();
        config.mountain.deviation = Span::new(0.0, 2.0);
        assert_eq!(config.validate().unwrap_err().field(), "mountain.deviation.min");
    }

    #[test]
    fn test_margin_larger_than_field_rejected() {
        let mut config = WorldConfig::small();
        config.river.margin = 101;
        assert_eq!(config.validate().unwrap_err().field(), "river.margin");
    }

    #[test]
    fn test_non_finite_range_bounds_rejected() {
        let mut config = WorldConfig::default();
        config.mountain.height_multiplier = Span::new(1.0, f32::INFINITY);
        let err = config.validate().unwrap_err();
        assert_eq!(err.field(), "mountain.height_multiplier");
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let mut config = WorldConfig::default();
        config.mountain.height_multiplier = Span::new(f32::NAN, 50.0);
        let err = config.validate().unwrap_err();
        assert_eq!(err.field(), "mountain.height_multiplier");
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let mut config = WorldConfig::default();
        config.mountain.deviation = Span::new(1.0, f32::NAN);
        assert_eq!(config.validate().unwrap_err().field(), "mountain.deviation");
    }

    #[test]
    fn test_oversized_deposit_radius_rejected() {
        let mut config = WorldConfig::default();
        config.mountain.deviation = Span::new(1e19, 1e19);
        assert_eq!(config.validate().unwrap_err().field(), "mountain.deviation.max");

        let mut config = WorldConfig::small();
        // 26 * 4 = 104 > 100
        config.river.deviation = 26.0;
        assert_eq!(config.validate().unwrap_err().field(), "river.deviation");
        config.river.deviation = 25.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let config = WorldConfig::small().with_seed(7);
        let json = config.to_json_string().unwrap();
        let parsed = WorldConfig::from_json_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = WorldConfig::from_json_str(
            r#"{ "width": 64, "seed": { "fixed": 9 }, "river": { "depth": 0.5 } }"#,
        )
        .unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.height, 500);
        assert_eq!(config.seed, SeedMode::Fixed(9));
        assert_eq!(config.river.depth, 0.5);
        assert_eq!(config.river.deviation, 15.0);
    }

    #[test]
    fn test_fixed_span_always_yields_value() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let span = Span::fixed(2.5f32);
        for _ in 0..10 {
            assert_eq!(span.sample(&mut rng), 2.5);
        }
        let span = Span::new(3u32, 5);
        for _ in 0..50 {
            assert!(span.contains(span.sample(&mut rng)));
        }
    }
}
