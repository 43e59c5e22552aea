//! Whole-tree properties and terrain scenarios


use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::foundation::math::Vec3;

/// Reproducible cloud of points inside a box, with some exact duplicates
fn random_vertices(seed: u64, count: usize, extent: f32) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut vertices: Vec<Vec3> = (0..count)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
                rng.gen_range(-extent..extent),
            )
        })
        .collect();
    for i in (0..count).step_by(7) {
        let j = rng.gen_range(0..count);
        vertices[i] = vertices[j];
    }
    vertices
}

/// Regular grid of vertices on the plane `y = height`
fn flat_grid(half_size: i32, step: f32, height: f32) -> Vec<Vec3> {
    let mut vertices = Vec::new();
    for x in -half_size..=half_size {
        for z in -half_size..=half_size {
            vertices.push(Vec3::new(x as f32 * step, height, z as f32 * step));
        }
    }
    vertices
}
