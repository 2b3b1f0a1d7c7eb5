//! Island land mask: 3D gradient noise shaped by a radial falloff.

use noise::{NoiseFn, Perlin};

use crate::geometry::Vec2;

/// A deterministic 3D scalar-noise oracle producing values in `[-1, 1]`.
pub trait NoiseSource {
    fn value(&self, x: f64, y: f64, z: f64) -> f64;
}

/// Perlin-backed oracle, the canonical choice.
pub struct PerlinSource {
    perlin: Perlin,
}

impl PerlinSource {
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }
}

impl NoiseSource for PerlinSource {
    fn value(&self, x: f64, y: f64, z: f64) -> f64 {
        self.perlin.get([x, y, z])
    }
}

/// Margin fraction of the map extent that is always water.
const WATER_MARGIN: f64 = 0.00075;

/// Land/water predicate over the map rectangle.
///
/// A point is land when it clears the border margin and the noise sampled at
/// its recentered position beats a falloff that grows with the distance from
/// the map center, which yields roughly circular islands with noisy
/// coastlines.
pub struct IslandShape {
    noise: Box<dyn NoiseSource>,
    width: f64,
    height: f64,
    z_seed: f64,
}

impl IslandShape {
    pub fn new(noise: Box<dyn NoiseSource>, width: f64, height: f64, z_seed: f64) -> Self {
        Self {
            noise,
            width,
            height,
            z_seed,
        }
    }

    pub fn is_land(&self, position: Vec2) -> bool {
        if position.x < self.width * WATER_MARGIN
            || position.y < self.height * WATER_MARGIN
            || position.x > self.width * (1.0 - WATER_MARGIN)
            || position.y > self.height * (1.0 - WATER_MARGIN)
        {
            return false;
        }

        let centered = position - Vec2::new(self.width / 2.0, self.height / 2.0);
        let noise_val = self.noise.value(
            centered.x / self.width * 4.0,
            centered.y / self.height * 4.0,
            self.z_seed,
        );

        let radius = (centered / self.width.min(self.height)).length();
        noise_val >= 0.3 * radius + (radius - 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ConstantNoise(f64);

    impl NoiseSource for ConstantNoise {
        fn value(&self, _x: f64, _y: f64, _z: f64) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_margin_is_always_water() {
        let shape = IslandShape::new(Box::new(ConstantNoise(1.0)), 200.0, 200.0, 0.0);
        assert!(!shape.is_land(Vec2::new(0.0, 100.0)));
        assert!(!shape.is_land(Vec2::new(200.0, 100.0)));
        assert!(!shape.is_land(Vec2::new(100.0, 0.1)));
        assert!(!shape.is_land(Vec2::new(-40.0, -40.0)));
    }

    #[test]
    fn test_max_noise_floods_the_interior_with_land() {
        // noise = 1 beats the falloff everywhere r <= (1 + 0.5) / 1.3.
        let shape = IslandShape::new(Box::new(ConstantNoise(1.0)), 200.0, 200.0, 0.0);
        assert!(shape.is_land(Vec2::new(100.0, 100.0)));
        assert!(shape.is_land(Vec2::new(30.0, 30.0)));
        assert!(shape.is_land(Vec2::new(190.0, 150.0)));
    }

    #[test]
    fn test_min_noise_drowns_everything() {
        let shape = IslandShape::new(Box::new(ConstantNoise(-1.0)), 200.0, 200.0, 0.0);
        assert!(!shape.is_land(Vec2::new(100.0, 100.0)));
        assert!(!shape.is_land(Vec2::new(60.0, 140.0)));
    }

    #[test]
    fn test_falloff_threshold_at_center() {
        // At the exact center the radius term vanishes: land iff noise >= -0.5.
        let wet = IslandShape::new(Box::new(ConstantNoise(-0.51)), 200.0, 200.0, 0.0);
        let dry = IslandShape::new(Box::new(ConstantNoise(-0.5)), 200.0, 200.0, 0.0);
        assert!(!wet.is_land(Vec2::new(100.0, 100.0)));
        assert!(dry.is_land(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_perlin_oracle_is_deterministic_and_bounded() {
        let a = PerlinSource::new(1234);
        let b = PerlinSource::new(1234);
        for i in 0..20 {
            let x = i as f64 * 0.37;
            let v = a.value(x, -x, 2.5);
            assert_eq!(v, b.value(x, -x, 2.5));
            assert!((-1.0..=1.0).contains(&v));
        }
    }
}
