//! Debug tool for comparing river steepness visually
//! Generates the same ridges under several river easing exponents and tiles
//! the results into one labelled image.

use anyhow::Context;
use image::{ImageBuffer, Rgb, RgbImage};
use ridge_terrain::config::WorldConfig;
use ridge_terrain::export::render_spectral;
use ridge_terrain::world::generate;
use tracing_subscriber::EnvFilter;

const SEED: u64 = 42;
const STEEPNESS: [f32; 6] = [0.5, 1.0, 1.5, 2.0, 3.0, 5.0];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    println!("Generating river steepness comparison grid...");

    let mut images: Vec<(String, RgbImage)> = Vec::new();
    for &steepness in &STEEPNESS {
        let mut config = WorldConfig::small().with_seed(SEED);
        config.river.steepness = steepness;
        println!("  Processing: steepness {}", steepness);
        // Ridges draw identically for every variant; only the river moves
        let world = generate(&config)
            .with_context(|| format!("generation failed at steepness {}", steepness))?;
        images.push((format!("STEEP {:.1}", steepness), render_spectral(&world.heightfield)));
    }

    let grid = create_grid(&images, 3, 2);
    grid.save("river_comparison.png")
        .context("failed to save river_comparison.png")?;

    println!("Saved river_comparison.png");
    Ok(())
}

fn create_grid(images: &[(String, RgbImage)], cols: usize, rows: usize) -> RgbImage {
    if images.is_empty() {
        return ImageBuffer::new(1, 1);
    }

    let cell_width = images[0].1.width();
    let cell_height = images[0].1.height();
    let label_height = 16u32;
    let total_cell_height = cell_height + label_height;

    let grid_width = cell_width * cols as u32;
    let grid_height = total_cell_height * rows as u32;

    let mut grid: RgbImage = ImageBuffer::from_pixel(grid_width, grid_height, Rgb([30, 30, 30]));

    for (idx, (name, img)) in images.iter().enumerate() {
        let col = idx % cols;
        let row = idx / cols;
        if row >= rows {
            break;
        }

        let x_offset = col as u32 * cell_width;
        let y_offset = row as u32 * total_cell_height + label_height;

        for (x, y, pixel) in img.enumerate_pixels() {
            grid.put_pixel(x_offset + x, y_offset + y, *pixel);
        }

        draw_text(&mut grid, x_offset + 4, row as u32 * total_cell_height + 4, name);
    }

    grid
}

// 5x7 bitmaps for the characters used in labels
fn get_char_bitmap(c: char) -> [u8; 7] {
    match c {
        '0' => [0b01110, 0b10001, 0b10011, 0b10101, 0b11001, 0b10001, 0b01110],
        '1' => [0b00100, 0b01100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        '2' => [0b01110, 0b10001, 0b00001, 0b00110, 0b01000, 0b10000, 0b11111],
        '3' => [0b01110, 0b10001, 0b00001, 0b00110, 0b00001, 0b10001, 0b01110],
        '4' => [0b00010, 0b00110, 0b01010, 0b10010, 0b11111, 0b00010, 0b00010],
        '5' => [0b11111, 0b10000, 0b11110, 0b00001, 0b00001, 0b10001, 0b01110],
        '6' => [0b00110, 0b01000, 0b10000, 0b11110, 0b10001, 0b10001, 0b01110],
        '7' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b01000, 0b01000],
        '8' => [0b01110, 0b10001, 0b10001, 0b01110, 0b10001, 0b10001, 0b01110],
        '9' => [0b01110, 0b10001, 0b10001, 0b01111, 0b00001, 0b00010, 0b01100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'S' => [0b01110, 0b10001, 0b10000, 0b01110, 0b00001, 0b10001, 0b01110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        '.' => [0b00000, 0b00000, 0b00000, 0b00000, 0b00000, 0b01100, 0b01100],
        _ => [0; 7],
    }
}

fn draw_text(img: &mut RgbImage, x: u32, y: u32, text: &str) {
    let white = Rgb([255, 255, 255]);
    let char_width = 6u32;

    for (i, c) in text.chars().enumerate() {
        let cx = x + (i as u32 * char_width);
        if cx + 5 >= img.width() {
            break;
        }

        let bitmap = get_char_bitmap(c);
        for (row, &bits) in bitmap.iter().enumerate() {
            for col in 0..5 {
                if (bits >> (4 - col)) & 1 == 1 {
                    let px = cx + col;
                    let py = y + row as u32;
                    if px < img.width() && py < img.height() {
                        img.put_pixel(px, py, white);
                    }
                }
            }
        }
    }
}
