//! Biome classification from elevation and moisture.

use serde::{Deserialize, Serialize};

use crate::mesh::Mesh;

/// Terrain classification of a polygonal cell.
///
/// `None` is the pre-assignment sentinel; no cell carries it after the
/// labelling pipeline has run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Snow,
    Tundra,
    Mountain,
    Taiga,
    Shrubland,
    TemperateDesert,
    TemperateRainForest,
    TemperateDeciduousForest,
    Grassland,
    TropicalRainForest,
    TropicalSeasonalForest,
    SubtropicalDesert,
    Ocean,
    Lake,
    Beach,
    None,
}

/// Land biome by moisture band (rows) and elevation band (columns, low to
/// high).
const ELEVATION_MOISTURE_MATRIX: [[Biome; 4]; 6] = [
    [
        Biome::SubtropicalDesert,
        Biome::TemperateDesert,
        Biome::TemperateDesert,
        Biome::Mountain,
    ],
    [
        Biome::Grassland,
        Biome::Grassland,
        Biome::TemperateDesert,
        Biome::Mountain,
    ],
    [
        Biome::TropicalSeasonalForest,
        Biome::Grassland,
        Biome::Shrubland,
        Biome::Tundra,
    ],
    [
        Biome::TropicalSeasonalForest,
        Biome::TemperateDeciduousForest,
        Biome::Shrubland,
        Biome::Snow,
    ],
    [
        Biome::TropicalRainForest,
        Biome::TemperateDeciduousForest,
        Biome::Taiga,
        Biome::Snow,
    ],
    [
        Biome::TropicalRainForest,
        Biome::TemperateRainForest,
        Biome::Taiga,
        Biome::Snow,
    ],
];

fn elevation_band(elevation: f64) -> usize {
    if elevation > 0.85 {
        3
    } else if elevation > 0.6 {
        2
    } else if elevation > 0.3 {
        1
    } else {
        0
    }
}

fn moisture_band(moisture: f64) -> usize {
    ((moisture * 6.0).floor() as usize).min(5)
}

/// Classify one cell from its water flags and scalars.
pub fn classify(ocean: bool, water: bool, coast: bool, elevation: f64, moisture: f64) -> Biome {
    if ocean {
        Biome::Ocean
    } else if water {
        Biome::Lake
    } else if coast && moisture < 0.6 {
        Biome::Beach
    } else {
        ELEVATION_MOISTURE_MATRIX[moisture_band(moisture)][elevation_band(elevation)]
    }
}

/// Pipeline pass: assign a biome to every cell.
pub fn assign_biomes(mesh: &mut Mesh) {
    for center in &mut mesh.centers {
        center.biome = classify(
            center.ocean,
            center.water,
            center.coast,
            center.elevation,
            center.moisture,
        );
    }
}
