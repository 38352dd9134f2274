use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use ridge_terrain::config::{SeedMode, WorldConfig};
use ridge_terrain::export;

#[derive(Parser, Debug)]
#[command(name = "ridge_terrain")]
#[command(about = "Generate a heightfield of Gaussian mountain ridges cut by a river")]
struct Args {
    /// JSON configuration file (missing fields take their defaults)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Width of the field in cells
    #[arg(short = 'W', long)]
    width: Option<usize>,

    /// Height of the field in cells
    #[arg(short = 'H', long)]
    height: Option<usize>,

    /// Random seed (uses entropy if neither this nor the config sets one)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of mountain ridges
    #[arg(short = 'm', long)]
    mountains: Option<usize>,

    /// Use the small preset (100x100) as the base configuration
    #[arg(long)]
    small: bool,

    /// Output directory
    #[arg(short, long, default_value = "artifacts")]
    out: PathBuf,

    /// Also write a spectral-colored PNG
    #[arg(long)]
    spectral: bool,

    /// Also write the raw field as JSON
    #[arg(long)]
    json: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => WorldConfig::from_json_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None if args.small => WorldConfig::small(),
        None => WorldConfig::default(),
    };
    if let Some(width) = args.width {
        config.width = width;
    }
    if let Some(height) = args.height {
        config.height = height;
    }
    if let Some(seed) = args.seed {
        config.seed = SeedMode::Fixed(seed);
    }
    if let Some(mountains) = args.mountains {
        config.mountain_count = mountains;
    }

    if args.dump_config {
        println!("{}", config.to_json_string()?);
        return Ok(());
    }

    let world = ridge_terrain::generate(&config)?;
    for t in &world.report.timings {
        info!("  {:12} {:8.1} ms", t.name, t.ms);
    }

    let mesh = world.mesh();
    info!(
        vertices = mesh.vertices.len(),
        triangles = mesh.triangle_count(),
        "mesh built"
    );

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("failed to create {}", args.out.display()))?;
    let seed = world.seed.value;

    let path = args.out.join(format!("heightmap_{}.png", seed));
    export::export_heightmap_png(&world.heightfield, &path)?;
    info!("Saved {}", path.display());

    if args.spectral {
        let path = args.out.join(format!("spectral_{}.png", seed));
        export::export_spectral_png(&world.heightfield, &path)?;
        info!("Saved {}", path.display());
    }

    if args.json {
        let path = args.out.join(format!("heightfield_{}.json", seed));
        export::export_heightfield_json(&world.heightfield, &world.config, seed, &path)?;
        info!("Saved {}", path.display());
    }

    Ok(())
}
