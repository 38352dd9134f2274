//! Profiling tool to identify performance bottlenecks

use std::time::Instant;

use ridge_terrain::config::WorldConfig;
use ridge_terrain::export;
use ridge_terrain::mesh::TerrainMesh;
use ridge_terrain::world;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("warn"))
        .init();

    let config = WorldConfig::default().with_seed(1337);

    println!("=== Performance Profiling ===");
    println!(
        "Field size: {}x{} ({} samples)",
        config.width,
        config.height,
        (config.width + 1) * (config.height + 1)
    );
    println!("Mountains: {}", config.mountain_count);
    println!();

    let start = Instant::now();
    let generated = world::generate(&config)?;
    let generation_time = start.elapsed();
    for t in &generated.report.timings {
        println!("{:<12} {:>10.2} ms", t.name, t.ms);
    }
    let deposited: usize = generated.report.ridges.iter().map(|r| r.deposited).sum();
    let skipped: usize = generated.report.ridges.iter().map(|r| r.skipped).sum();
    println!("  Ridge bumps: {} deposited, {} skipped", deposited, skipped);
    println!(
        "  River: {} points, {} carve deposits",
        generated.report.river.samples, generated.report.river.deposits
    );

    let start = Instant::now();
    let mesh = TerrainMesh::build(&generated.heightfield, config.world_scale);
    let mesh_time = start.elapsed();
    println!("Mesh build: {:?} ({} triangles)", mesh_time, mesh.triangle_count());

    let start = Instant::now();
    let _img = export::render_spectral(&generated.heightfield);
    let render_time = start.elapsed();
    println!("Spectral render: {:?}", render_time);

    let total = generation_time + mesh_time + render_time;
    println!("\n=== Summary ===");
    println!("Generation: {:>8.2}% ({:?})", 100.0 * generation_time.as_secs_f64() / total.as_secs_f64(), generation_time);
    println!("Mesh:       {:>8.2}% ({:?})", 100.0 * mesh_time.as_secs_f64() / total.as_secs_f64(), mesh_time);
    println!("Render:     {:>8.2}% ({:?})", 100.0 * render_time.as_secs_f64() / total.as_secs_f64(), render_time);
    println!("─────────────────────────────────");
    println!("TOTAL:      {:>8}  {:?}", "100%", total);

    Ok(())
}
