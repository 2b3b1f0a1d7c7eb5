//! PNG export of a generated map: flat biome colors plus a river overlay.

use std::path::Path;

use image::{ImageError, Rgb, RgbImage};

use crate::biomes::Biome;
use crate::geometry::Vec2;
use crate::map::Map;

const RIVER_COLOR: Rgb<u8> = Rgb([40, 88, 132]);
const OPEN_WATER_COLOR: Rgb<u8> = Rgb([52, 58, 94]);

/// Flat display color for a biome.
pub fn biome_color(biome: Biome) -> Rgb<u8> {
    match biome {
        Biome::Snow => Rgb([248, 248, 248]),
        Biome::Tundra => Rgb([221, 221, 187]),
        Biome::Mountain => Rgb([153, 153, 153]),
        Biome::Taiga => Rgb([204, 212, 187]),
        Biome::Shrubland => Rgb([196, 204, 187]),
        Biome::TemperateDesert => Rgb([228, 232, 202]),
        Biome::TemperateRainForest => Rgb([164, 196, 168]),
        Biome::TemperateDeciduousForest => Rgb([180, 201, 169]),
        Biome::Grassland => Rgb([196, 212, 170]),
        Biome::TropicalRainForest => Rgb([156, 187, 169]),
        Biome::TropicalSeasonalForest => Rgb([169, 204, 164]),
        Biome::SubtropicalDesert => Rgb([233, 221, 199]),
        Biome::Ocean => Rgb([52, 58, 94]),
        Biome::Lake => Rgb([95, 134, 169]),
        Biome::Beach => Rgb([178, 166, 148]),
        Biome::None => Rgb([0, 0, 0]),
    }
}

/// Render the map to an image, one pixel per map point.
///
/// Every pixel is resolved through the map's own point-location query, so
/// the output reflects exactly what `center_at` reports.
pub fn render_map(map: &Map) -> RgbImage {
    let width = map.config().width;
    let height = map.config().height;
    let mut image = RgbImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let point = Vec2::new(x as f64 + 0.5, y as f64 + 0.5);
            let color = map
                .center_at(point)
                .map(|id| biome_color(map.centers()[id.index()].biome))
                .unwrap_or(OPEN_WATER_COLOR);
            image.put_pixel(x, y, color);
        }
    }

    for edge in map.edges() {
        if edge.river_volume <= 0.0 {
            continue;
        }
        if let (Some(v0), Some(v1)) = (edge.v0, edge.v1) {
            let a = map.corners()[v0.index()].position;
            let b = map.corners()[v1.index()].position;
            draw_segment(&mut image, a, b, RIVER_COLOR);
        }
    }

    image
}

/// Render and save the map as a PNG.
pub fn export_png(map: &Map, path: &Path) -> Result<(), ImageError> {
    render_map(map).save(path)
}

fn draw_segment(image: &mut RgbImage, a: Vec2, b: Vec2, color: Rgb<u8>) {
    let steps = a.distance(b).ceil().max(1.0) as u32;
    for i in 0..=steps {
        let t = i as f64 / steps as f64;
        let p = a + (b - a) * t;
        if p.x >= 0.0 && p.y >= 0.0 {
            let (x, y) = (p.x as u32, p.y as u32);
            if x < image.width() && y < image.height() {
                image.put_pixel(x, y, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapConfig;

    #[test]
    fn test_render_covers_the_full_raster() {
        let config = MapConfig {
            width: 120,
            height: 90,
            point_spread: 10.0,
            seed: "export".to_string(),
        };
        let mut map = Map::new(config).unwrap();
        map.generate();

        let image = render_map(&map);
        assert_eq!(image.dimensions(), (120, 90));

        // Border pixels resolve to ocean cells.
        assert_eq!(*image.get_pixel(0, 0), biome_color(Biome::Ocean));
    }

    #[test]
    fn test_every_biome_has_a_distinct_color() {
        let all = [
            Biome::Snow,
            Biome::Tundra,
            Biome::Mountain,
            Biome::Taiga,
            Biome::Shrubland,
            Biome::TemperateDesert,
            Biome::TemperateRainForest,
            Biome::TemperateDeciduousForest,
            Biome::Grassland,
            Biome::TropicalRainForest,
            Biome::TropicalSeasonalForest,
            Biome::SubtropicalDesert,
            Biome::Lake,
            Biome::Beach,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(biome_color(*a), biome_color(*b));
            }
        }
    }

    #[test]
    fn test_segment_drawing_stays_in_bounds() {
        let mut image = RgbImage::new(10, 10);
        // A segment reaching outside the canvas must not panic.
        draw_segment(
            &mut image,
            Vec2::new(-5.0, 5.0),
            Vec2::new(15.0, 5.0),
            RIVER_COLOR,
        );
        assert_eq!(*image.get_pixel(5, 5), RIVER_COLOR);
    }
}
