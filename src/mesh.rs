//! Triangle mesh from a height field.
//!
//! Each grid cell becomes two triangles with their own six vertices, so every
//! triangle carries a flat normal. Indices are sequential. The vertex layout
//! is `#[repr(C)]` and `Pod` so a renderer can upload the buffers as-is.

use bytemuck::{Pod, Zeroable};
use rayon::prelude::*;

use crate::heightfield::HeightField;

/// Position followed by normal, 24 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct TerrainMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if len > 0.0 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        [0.0, 1.0, 0.0]
    }
}

/// Normal of triangle `(a, b, c)` from `(b - a) x (c - a)`.
pub fn face_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> [f32; 3] {
    normalize(cross(sub(b, a), sub(c, a)))
}

fn push_triangle(out: &mut Vec<Vertex>, a: [f32; 3], b: [f32; 3], c: [f32; 3]) {
    let normal = face_normal(a, b, c);
    for position in [a, b, c] {
        out.push(Vertex { position, normal });
    }
}

impl TerrainMesh {
    /// Build the mesh. Grid point `(x, y)` maps to world
    /// `(x * scale, elevation, y * scale)`.
    pub fn build(field: &HeightField, scale: f32) -> Self {
        let w = field.width();
        let h = field.height();
        let stride = w + 1;
        let data = field.as_slice();
        let point = |x: usize, y: usize| -> [f32; 3] {
            [x as f32 * scale, data[y * stride + x], y as f32 * scale]
        };

        let vertices: Vec<Vertex> = (0..h)
            .into_par_iter()
            .flat_map_iter(|y| {
                let mut row = Vec::with_capacity(w * 6);
                for x in 0..w {
                    let p00 = point(x, y);
                    let p10 = point(x + 1, y);
                    let p01 = point(x, y + 1);
                    let p11 = point(x + 1, y + 1);
                    push_triangle(&mut row, p00, p01, p10);
                    push_triangle(&mut row, p10, p01, p11);
                }
                row
            })
            .collect();

        let indices = (0..vertices.len() as u32).collect();
        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex buffer as raw bytes.
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Index buffer as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}
