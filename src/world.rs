//! World generation pipeline
//!
//! Allocates the height field, raises every ridge, then carves the river.
//! The order is fixed: the river always cuts into finished mountains.

use std::time::Instant;

use rand::Rng;
use tracing::info;

use crate::config::WorldConfig;
use crate::error::Result;
use crate::heightfield::HeightField;
use crate::mesh::TerrainMesh;
use crate::mountains::{self, RidgeStats};
use crate::rivers::{self, RiverStats};
use crate::seeds::RunSeed;

/// Wall-clock time spent in one phase.
#[derive(Clone, Debug)]
pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// What each phase did.
#[derive(Clone, Debug)]
pub struct GenerationReport {
    pub ridges: Vec<RidgeStats>,
    pub river: RiverStats,
    pub timings: Vec<Timing>,
}

/// A finished world with everything needed to reproduce it.
pub struct GeneratedWorld {
    pub seed: RunSeed,
    pub config: WorldConfig,
    pub heightfield: HeightField,
    pub report: GenerationReport,
}

impl GeneratedWorld {
    /// Build the triangle mesh at the configured world scale.
    pub fn mesh(&self) -> TerrainMesh {
        TerrainMesh::build(&self.heightfield, self.config.world_scale)
    }
}

/// Generate a height field from an already-seeded sequence.
pub fn generate_world<R: Rng + ?Sized>(config: &WorldConfig, rng: &mut R) -> Result<HeightField> {
    let (field, _) = generate_world_with_report(config, rng)?;
    Ok(field)
}

/// Like [`generate_world`], also returning per-phase statistics.
pub fn generate_world_with_report<R: Rng + ?Sized>(
    config: &WorldConfig,
    rng: &mut R,
) -> Result<(HeightField, GenerationReport)> {
    config.validate()?;

    let mut timings = Vec::new();
    let mut field = HeightField::new(config.width, config.height);

    let t = Instant::now();
    let mut ridges = Vec::with_capacity(config.mountain_count);
    for pass in 0..config.mountain_count {
        let stats = mountains::create_mountain(&mut field, rng, config)?;
        info!(
            pass,
            deposited = stats.deposited,
            skipped = stats.skipped,
            "mountain raised"
        );
        ridges.push(stats);
    }
    timings.push(Timing {
        name: "mountains",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    let t = Instant::now();
    let river = rivers::create_river(&mut field, rng, config)?;
    timings.push(Timing {
        name: "river",
        ms: t.elapsed().as_secs_f64() * 1000.0,
    });

    Ok((field, GenerationReport { ridges, river, timings }))
}

/// Resolve the configured seed and run the full pipeline.
pub fn generate(config: &WorldConfig) -> Result<GeneratedWorld> {
    let seed = RunSeed::resolve(config.seed);
    info!(
        seed = %seed,
        width = config.width,
        height = config.height,
        mountains = config.mountain_count,
        "generating world"
    );

    let mut rng = seed.rng();
    let (heightfield, report) = generate_world_with_report(config, &mut rng)?;

    let (lo, hi) = heightfield.min_max();
    info!(min = lo, max = hi, "world complete");

    Ok(GeneratedWorld {
        seed,
        config: config.clone(),
        heightfield,
        report,
    })
}
