use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use image::{ImageBuffer, Luma, Rgb, RgbImage};
use serde::Serialize;

use crate::config::WorldConfig;
use crate::error::Result;
use crate::heightfield::HeightField;

/// Map elevations onto `[0, 1]` using the field's own range.
fn normalizer(field: &HeightField) -> impl Fn(f32) -> f32 {
    let (lo, hi) = field.min_max();
    let range = (hi - lo).max(f32::EPSILON);
    move |h| ((h - lo) / range).clamp(0.0, 1.0)
}

/// Grayscale render, black at the lowest point and white at the highest.
pub fn render_grayscale(field: &HeightField) -> ImageBuffer<Luma<u8>, Vec<u8>> {
    let norm = normalizer(field);
    let width = field.width() as u32 + 1;
    let height = field.height() as u32 + 1;
    let data = field.as_slice();
    ImageBuffer::from_fn(width, height, |x, y| {
        let h = data[(y * width + x) as usize];
        Luma([(norm(h) * 255.0).round() as u8])
    })
}

/// Colored render using the spectral colormap.
pub fn render_spectral(field: &HeightField) -> RgbImage {
    let norm = normalizer(field);
    let width = field.width() as u32 + 1;
    let height = field.height() as u32 + 1;
    let data = field.as_slice();
    ImageBuffer::from_fn(width, height, |x, y| {
        let h = data[(y * width + x) as usize];
        Rgb(spectral_colormap(norm(h)))
    })
}

/// Export the heightmap as a grayscale PNG.
pub fn export_heightmap_png(field: &HeightField, path: &Path) -> Result<()> {
    render_grayscale(field).save(path)?;
    Ok(())
}

/// Export the heightmap using the spectral colormap.
pub fn export_spectral_png(field: &HeightField, path: &Path) -> Result<()> {
    render_spectral(field).save(path)?;
    Ok(())
}

#[derive(Serialize)]
struct HeightFieldDump<'a> {
    seed: u64,
    config: &'a WorldConfig,
    /// Samples per row (`width + 1`)
    columns: usize,
    /// Number of rows (`height + 1`)
    rows: usize,
    /// Row-major elevations
    elevations: &'a [f32],
}

/// Write the field plus the config and seed that produced it.
pub fn export_heightfield_json(
    field: &HeightField,
    config: &WorldConfig,
    seed: u64,
    path: &Path,
) -> Result<()> {
    let dump = HeightFieldDump {
        seed,
        config,
        columns: field.width() + 1,
        rows: field.height() + 1,
        elevations: field.as_slice(),
    };
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, &dump)?;
    Ok(())
}

/// Spectral colormap (matplotlib style): dark blue -> cyan -> green -> yellow -> orange -> red
pub fn spectral_colormap(t: f32) -> [u8; 3] {
    let colors: [[f32; 3]; 11] = [
        [0.37, 0.31, 0.64],  // Dark blue/purple (low)
        [0.20, 0.53, 0.74],  // Blue
        [0.40, 0.76, 0.65],  // Teal
        [0.67, 0.87, 0.64],  // Light green
        [0.90, 0.96, 0.60],  // Yellow-green
        [1.00, 1.00, 0.75],  // Light yellow / white
        [1.00, 0.88, 0.55],  // Yellow
        [0.99, 0.68, 0.38],  // Light orange
        [0.96, 0.43, 0.26],  // Orange
        [0.84, 0.24, 0.31],  // Red
        [0.62, 0.00, 0.26],  // Dark red (high)
    ];

    let t_scaled = t.clamp(0.0, 1.0) * 10.0;
    let idx = (t_scaled as usize).min(9);
    let frac = t_scaled - idx as f32;

    let c1 = colors[idx];
    let c2 = colors[idx + 1];

    [
        ((c1[0] + (c2[0] - c1[0]) * frac) * 255.0) as u8,
        ((c1[1] + (c2[1] - c1[1]) * frac) * 255.0) as u8,
        ((c1[2] + (c2[2] - c1[2]) * frac) * 255.0) as u8,
    ]
}
