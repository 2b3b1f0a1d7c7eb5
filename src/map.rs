//! Map facade: owns the mesh, drives the labelling pipeline, answers
//! point-location queries.

use std::time::Instant;

use log::{debug, info};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::biomes;
use crate::elevation;
use crate::geometry::Vec2;
use crate::hexgrid;
use crate::island::{IslandShape, NoiseSource, PerlinSource};
use crate::mesh::{Center, CenterId, Corner, Edge, Mesh};
use crate::moisture;
use crate::quadtree::{depth_for_point_spread, Aabb, Quadtree};
use crate::rivers;
use crate::seed;
use crate::water;

/// Generation parameters.
///
/// `point_spread` sizes the spatial index (the hex cell size itself is
/// fixed); an empty `seed` asks for a random one.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapConfig {
    pub width: u32,
    pub height: u32,
    pub point_spread: f64,
    pub seed: String,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            point_spread: 10.0,
            seed: String::new(),
        }
    }
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error("map dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("point spread must be a positive number, got {0}")]
    InvalidPointSpread(f64),
}

/// A generated island map.
///
/// Construction validates the configuration and fixes the PRNG stream;
/// [`Map::generate`] builds the mesh and runs the labelling pipeline. After
/// generation the map is read-only.
pub struct Map {
    config: MapConfig,
    seed: String,
    island: IslandShape,
    rng: ChaCha8Rng,
    mesh: Mesh,
    quadtree: Quadtree<CenterId>,
}

impl Map {
    /// New map with the canonical Perlin noise oracle.
    pub fn new(config: MapConfig) -> Result<Self, MapError> {
        Self::build(config, None)
    }

    /// New map with an injected noise oracle (the oracle replaces Perlin;
    /// everything else, including the PRNG stream, is unchanged).
    pub fn with_noise(config: MapConfig, noise: Box<dyn NoiseSource>) -> Result<Self, MapError> {
        Self::build(config, Some(noise))
    }

    fn build(config: MapConfig, noise: Option<Box<dyn NoiseSource>>) -> Result<Self, MapError> {
        if config.width == 0 || config.height == 0 {
            return Err(MapError::InvalidDimensions {
                width: config.width,
                height: config.height,
            });
        }
        if !(config.point_spread > 0.0) {
            return Err(MapError::InvalidPointSpread(config.point_spread));
        }

        let seed_string = if config.seed.is_empty() {
            seed::random_seed_string()
        } else {
            config.seed.clone()
        };
        let hash = seed::hash_seed(&seed_string);
        let mut rng = seed::rng_for_seed(&seed_string);

        // First draw of the stream, always: the noise z coordinate.
        let z_seed = rng.gen_range(0..32768) as f64;

        let width = config.width as f64;
        let height = config.height as f64;
        let noise = noise.unwrap_or_else(|| Box::new(PerlinSource::new(hash)));
        let island = IslandShape::new(noise, width, height, z_seed);

        Ok(Self {
            quadtree: Self::empty_index(&config),
            config,
            seed: seed_string,
            island,
            rng,
            mesh: Mesh::new(),
        })
    }

    fn empty_index(config: &MapConfig) -> Quadtree<CenterId> {
        let width = config.width as f64;
        let height = config.height as f64;
        let bounds = Aabb::new(
            Vec2::new(width / 2.0, height / 2.0),
            Vec2::new(width / 2.0, height / 2.0),
        );
        Quadtree::new(
            bounds,
            depth_for_point_spread(width, height, config.point_spread),
        )
    }

    /// Build the hex topology and run every labelling pass, in order.
    pub fn generate(&mut self) {
        let width = self.config.width as f64;
        let height = self.config.height as f64;
        let start = Instant::now();

        let t = Instant::now();
        self.mesh = hexgrid::build(self.config.width, self.config.height);
        debug!(
            "hex topology: {} centers, {} corners, {} edges in {:?}",
            self.mesh.centers.len(),
            self.mesh.corners.len(),
            self.mesh.edges.len(),
            t.elapsed()
        );

        let t = Instant::now();
        water::assign_land_mask(&mut self.mesh, &self.island, width, height);
        debug!("land distribution: {:?}", t.elapsed());

        let t = Instant::now();
        water::assign_ocean_coast_land(&mut self.mesh);
        debug!("coast assignment: {:?}", t.elapsed());

        let t = Instant::now();
        elevation::assign_corner_elevations(&mut self.mesh);
        debug!("corner elevation: {:?}", t.elapsed());

        let t = Instant::now();
        elevation::redistribute_elevations(&mut self.mesh);
        debug!("elevation redistribution: {:?}", t.elapsed());

        let t = Instant::now();
        elevation::assign_polygon_elevations(&mut self.mesh);
        debug!("cell elevation: {:?}", t.elapsed());

        let t = Instant::now();
        elevation::calculate_downslopes(&mut self.mesh);
        debug!("downslopes: {:?}", t.elapsed());

        let t = Instant::now();
        rivers::generate_rivers(&mut self.mesh, &mut self.rng);
        debug!("river generation: {:?}", t.elapsed());

        let t = Instant::now();
        moisture::assign_corner_moisture(&mut self.mesh);
        debug!("corner moisture: {:?}", t.elapsed());

        let t = Instant::now();
        moisture::redistribute_moisture(&mut self.mesh);
        debug!("moisture redistribution: {:?}", t.elapsed());

        let t = Instant::now();
        moisture::assign_polygon_moisture(&mut self.mesh);
        debug!("cell moisture: {:?}", t.elapsed());

        let t = Instant::now();
        biomes::assign_biomes(&mut self.mesh);
        debug!("biome assignment: {:?}", t.elapsed());

        let t = Instant::now();
        self.quadtree = Self::empty_index(&self.config);
        for center in &self.mesh.centers {
            let aabb = self.mesh.polygon_aabb(center.id);
            self.quadtree.insert(center.id, aabb);
        }
        debug!("spatial index: {:?}", t.elapsed());

        info!(
            "generated {}x{} map, seed \"{}\", in {:?}",
            self.config.width,
            self.config.height,
            self.seed,
            start.elapsed()
        );
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// The effective seed string (useful when it was generated at random).
    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn centers(&self) -> &[Center] {
        &self.mesh.centers
    }

    pub fn corners(&self) -> &[Corner] {
        &self.mesh.corners
    }

    pub fn edges(&self) -> &[Edge] {
        &self.mesh.edges
    }

    /// The cell whose center is nearest to `point`, found through the
    /// spatial index.
    ///
    /// Candidates are the cells whose bounding box contains the point; the
    /// nearest center wins without a polygon-containment test, which is
    /// exact enough for convex hex cells. Points outside every populated
    /// index leaf yield `None`.
    pub fn center_at(&self, point: Vec2) -> Option<CenterId> {
        self.quadtree
            .query(point)
            .into_iter()
            .min_by(|a, b| {
                self.mesh.centers[a.index()]
                    .position
                    .distance_sq(point)
                    .total_cmp(&self.mesh.centers[b.index()].position.distance_sq(point))
            })
    }
}
