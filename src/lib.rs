//! Island map generation library
//!
//! A procedural island map generator built on a hex-cell dual mesh:
//! - Flat-top hex topology with shared corners and edges
//! - Noise-shaped island mask (ocean, lakes, coastline)
//! - Elevation and moisture labelling with biome classification
//! - Downslope-traced rivers
//! - Quadtree point location over the finished cells

pub mod biomes;
pub mod elevation;
pub mod export;
pub mod geometry;
pub mod hexgrid;
pub mod island;
pub mod map;
pub mod mesh;
pub mod moisture;
pub mod quadtree;
pub mod rivers;
pub mod seed;
pub mod water;

pub use biomes::Biome;
pub use geometry::Vec2;
pub use map::{Map, MapConfig, MapError};
pub use mesh::{Center, CenterId, Corner, CornerId, Edge, EdgeId, Mesh};
