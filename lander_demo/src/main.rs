//! Lander Descent Demo
//!
//! Headless run of the terrain sensing loop:
//! - Procedural heightfield terrain indexed by the octree once at load
//! - A lander falling under gravity with a simple hover controller
//! - Per-frame broad-phase contact probe and downward altimeter
//! - A picking ray from a fixed camera, and a debug shape export
//!
//! Usage: `lander_demo [config.toml|config.ron] [--dump snapshot.ron]`

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use terrain_octree::config::{Config, ConfigError, TerrainConfig};
use terrain_octree::debug::TerrainDebugExporter;
use terrain_octree::foundation::logging;
use terrain_octree::foundation::math::Vec3;
use terrain_octree::geometry::{Aabb, Ray};
use terrain_octree::sensing::{altitude, pick_vertex, ContactProbe, ContactState};
use terrain_octree::spatial::{Octree, OctreeError};
use thiserror::Error;

// Terrain settings
const TERRAIN_SEED: u64 = 0x1a4d;
const TERRAIN_CELLS: usize = 64;
const TERRAIN_SPACING: f32 = 2.0;
const TERRAIN_WAVES: usize = 5;

// Simulation settings
const FRAME_TIME: f32 = 1.0 / 60.0;
const MAX_FRAMES: usize = 60 * 30;
const GRAVITY: f32 = -3.7;
const THRUST: f32 = 6.0;
const HOVER_ALTITUDE: f32 = 8.0;
const LANDER_HALF_SIZE: f32 = 1.0;
const LANDER_START_HEIGHT: f32 = 60.0;

#[derive(Error, Debug)]
enum DemoError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("snapshot: {0}")]
    Snapshot(#[from] OctreeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("usage: lander_demo [config.toml|config.ron] [--dump snapshot.ron]")]
    Usage,
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    dump: Option<PathBuf>,
}

fn parse_args() -> Result<Args, DemoError> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--dump" => args.dump = Some(iter.next().ok_or(DemoError::Usage)?.into()),
            "-h" | "--help" => return Err(DemoError::Usage),
            _ if args.config.is_none() => args.config = Some(arg.into()),
            _ => return Err(DemoError::Usage),
        }
    }
    Ok(args)
}

/// Rolling heightfield made of a few random plane waves
fn generate_terrain(seed: u64) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    let waves: Vec<(f32, f32, f32, f32)> = (0..TERRAIN_WAVES)
        .map(|_| {
            (
                rng.gen_range(0.02..0.15), // frequency along X
                rng.gen_range(0.02..0.15), // frequency along Z
                rng.gen_range(0.5..4.0),   // amplitude
                rng.gen_range(0.0..std::f32::consts::TAU),
            )
        })
        .collect();

    let half = TERRAIN_CELLS as f32 * TERRAIN_SPACING * 0.5;
    let mut vertices = Vec::with_capacity((TERRAIN_CELLS + 1) * (TERRAIN_CELLS + 1));
    for i in 0..=TERRAIN_CELLS {
        for k in 0..=TERRAIN_CELLS {
            let x = i as f32 * TERRAIN_SPACING - half;
            let z = k as f32 * TERRAIN_SPACING - half;
            let y: f32 = waves
                .iter()
                .map(|(fx, fz, amplitude, phase)| amplitude * (fx * x + fz * z + phase).sin())
                .sum();
            vertices.push(Vec3::new(x, y, z));
        }
    }
    vertices
}

struct Lander {
    position: Vec3,
    velocity: Vec3,
}

impl Lander {
    fn bounds(&self) -> Aabb {
        Aabb::from_center_extents(self.position, Vec3::repeat(LANDER_HALF_SIZE))
    }

    /// Integrate one frame; thrust up when close to the ground and falling fast
    fn step(&mut self, altitude: Option<f32>) {
        let mut acceleration = GRAVITY;
        if altitude.is_some_and(|h| h < HOVER_ALTITUDE) && self.velocity.y < -1.0 {
            acceleration += THRUST;
        }
        self.velocity.y += acceleration * FRAME_TIME;
        self.position += self.velocity * FRAME_TIME;
    }
}

fn run(args: &Args) -> Result<(), DemoError> {
    let config = match &args.config {
        Some(path) => TerrainConfig::load_from_file(path)?,
        None => TerrainConfig::default(),
    };
    log::info!("Using {:?}", config);

    let vertices = generate_terrain(TERRAIN_SEED);
    let octree = Octree::build_with_config(&vertices, config.octree);
    let stats = octree.stats();
    println!(
        "Terrain: {} vertices, {} nodes, {} leaves, depth {}",
        stats.vertex_count, stats.node_count, stats.leaf_count, stats.max_depth
    );

    if let Some(path) = &args.dump {
        std::fs::write(path, octree.to_ron()?)?;
        log::info!("Wrote octree snapshot to {}", path.display());
    }

    let mut exporter = TerrainDebugExporter::new();
    exporter.show_leaves = true;
    log::info!("Debug export: {} leaf wireframes", exporter.frame_shapes(&octree, None).len());

    let camera = Vec3::new(0.0, 80.0, 120.0);
    if let Some(picked) = Ray::through(camera, Vec3::zeros()).and_then(|ray| pick_vertex(&octree, &ray)) {
        println!(
            "Picked vertex {} at {:?} ({:.2} from camera)",
            picked.index, picked.position, picked.distance
        );
    }

    let probe = ContactProbe::new(config.contact);
    let mut lander = Lander {
        position: Vec3::new(3.0, LANDER_START_HEIGHT, -5.0),
        velocity: Vec3::new(0.4, 0.0, 0.2),
    };
    for frame in 0..MAX_FRAMES {
        let height = altitude(&octree, lander.position);
        let report = probe.classify(&octree, &lander.bounds());

        if report.state != ContactState::Clear {
            let debug_shapes = exporter.contact_shapes(&report);
            let outcome = if report.is_penetrating() { "Hard landing" } else { "Touchdown" };
            println!(
                "{} at frame {} ({:.2}s), position {:?}, vertical speed {:.2}, {} contact boxes",
                outcome,
                frame,
                frame as f32 * FRAME_TIME,
                lander.position,
                lander.velocity.y,
                debug_shapes.len()
            );
            return Ok(());
        }

        if frame % 60 == 0 {
            log::info!(
                "Frame {}: altitude {}, vertical speed {:.2}",
                frame,
                height.map_or_else(|| "n/a".to_string(), |h| format!("{h:.2}")),
                lander.velocity.y
            );
        }

        lander.step(height);
    }

    log::warn!("Lander did not touch down within {} frames", MAX_FRAMES);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_with_default("info");

    println!("=== Lander Descent Demo ===");
    let args = parse_args()?;
    run(&args)?;
    Ok(())
}
