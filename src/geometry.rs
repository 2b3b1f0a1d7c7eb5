//! 2D geometry primitives: vectors and line equations.

use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// Per-component tolerance used for vector equality.
const EQ_EPSILON: f64 = 1e-5;

/// Double-precision 2D vector.
#[derive(Clone, Copy, Debug, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Vector from `a` to `b` (`b - a`).
    pub fn between(a: Vec2, b: Vec2) -> Self {
        b - a
    }

    pub fn dot(&self, v: Vec2) -> f64 {
        self.x * v.x + self.y * v.y
    }

    /// 2D cross product (`x·v.y − v.x·y`).
    pub fn cross(&self, v: Vec2) -> f64 {
        self.x * v.y - v.x * self.y
    }

    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn length_sq(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn distance(&self, v: Vec2) -> f64 {
        (*self - v).length()
    }

    pub fn distance_sq(&self, v: Vec2) -> f64 {
        (*self - v).length_sq()
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Angle of the vector in radians (`atan2(y, x)`), 0 for the zero vector.
    pub fn angle(&self) -> f64 {
        if self.is_zero() {
            return 0.0;
        }
        self.y.atan2(self.x)
    }

    /// Unit vector in the same direction; the zero vector is left unchanged.
    pub fn normalized(&self) -> Vec2 {
        let len = self.length();
        if len > 0.0 {
            *self / len
        } else {
            *self
        }
    }

    /// Rotate counter-clockwise by `radians`.
    pub fn rotated(&self, radians: f64) -> Vec2 {
        let (sin, cos) = radians.sin_cos();
        Vec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Reflect across the plane with unit normal `n`.
    pub fn reflected(&self, n: Vec2) -> Vec2 {
        *self - n * (2.0 * self.dot(n))
    }

    /// Clamp the length to at most `max_length`.
    pub fn truncated(&self, max_length: f64) -> Vec2 {
        if self.length() > max_length {
            self.normalized() * max_length
        } else {
            *self
        }
    }
}

impl PartialEq for Vec2 {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EQ_EPSILON && (self.y - other.y).abs() < EQ_EPSILON
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Vec2) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Mul<Vec2> for f64 {
    type Output = Vec2;
    fn mul(self, rhs: Vec2) -> Vec2 {
        rhs * self
    }
}

impl MulAssign<f64> for Vec2 {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<f64> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}

impl DivAssign<f64> for Vec2 {
    fn div_assign(&mut self, rhs: f64) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

/// A line `y = m·x + b`. When `vertical` is set, `b` holds the fixed x.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineEquation {
    pub m: f64,
    pub b: f64,
    vertical: bool,
}

impl LineEquation {
    /// Line through two points. Coincident x coordinates give a vertical line.
    pub fn from_points(p1: Vec2, p2: Vec2) -> Self {
        if p1.x != p2.x {
            let m = (p2.y - p1.y) / (p2.x - p1.x);
            Self {
                m,
                b: p1.y - p1.x * m,
                vertical: false,
            }
        } else {
            Self {
                m: 0.0,
                b: p1.x,
                vertical: true,
            }
        }
    }

    /// Line through `p` with slope `m`.
    pub fn from_point_slope(p: Vec2, m: f64) -> Self {
        Self {
            m,
            b: p.y - p.x * m,
            vertical: false,
        }
    }

    pub fn is_vertical(&self) -> bool {
        self.vertical
    }

    pub fn is_horizontal(&self) -> bool {
        !self.vertical && self.m == 0.0
    }

    /// Evaluate the line at `x`. Meaningless for vertical lines.
    pub fn eval(&self, x: f64) -> f64 {
        x * self.m + self.b
    }

    /// Translate the line by `offset`.
    pub fn translated(&self, offset: Vec2) -> Self {
        let (p0, p1) = if self.vertical {
            (Vec2::new(self.b, 0.0), Vec2::new(self.b, 1.0))
        } else {
            (Vec2::new(0.0, self.b), Vec2::new(1.0, self.m + self.b))
        };
        Self::from_points(p0 + offset, p1 + offset)
    }

    /// Intersection point with another line.
    ///
    /// Parallel non-coincident lines yield the `(0, 0)` sentinel; callers that
    /// can encounter parallel input must test for it.
    pub fn intersection(&self, other: &LineEquation) -> Vec2 {
        if self.m != other.m {
            if self.vertical {
                let x = self.b;
                return Vec2::new(x, other.eval(x));
            }
            if other.vertical {
                let x = other.b;
                return Vec2::new(x, self.eval(x));
            }
            let x = (other.b - self.b) / (self.m - other.m);
            return Vec2::new(x, other.eval(x));
        }

        if self.vertical == other.vertical {
            Vec2::ZERO
        } else if self.vertical {
            Vec2::new(self.b, other.b)
        } else {
            Vec2::new(other.b, self.b)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_arithmetic() {
        let a = Vec2::new(3.0, 4.0);
        let b = Vec2::new(-1.0, 2.0);

        assert_eq!(a + b, Vec2::new(2.0, 6.0));
        assert_eq!(a - b, Vec2::new(4.0, 2.0));
        assert_eq!(a * 2.0, Vec2::new(6.0, 8.0));
        assert_eq!(a / 2.0, Vec2::new(1.5, 2.0));
        assert_eq!(a.dot(b), 5.0);
        assert_eq!(a.cross(b), 10.0);
        assert_eq!(a.length(), 5.0);
        assert_eq!(a.length_sq(), 25.0);
    }

    #[test]
    fn test_between_is_b_minus_a() {
        let v = Vec2::between(Vec2::new(1.0, 1.0), Vec2::new(4.0, 5.0));
        assert_eq!(v, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_equality_uses_tolerance() {
        let a = Vec2::new(1.0, 1.0);
        assert_eq!(a, Vec2::new(1.0 + 1e-6, 1.0 - 1e-6));
        assert_ne!(a, Vec2::new(1.0 + 1e-4, 1.0));
    }

    #[test]
    fn test_angle() {
        assert_eq!(Vec2::ZERO.angle(), 0.0);
        assert!((Vec2::new(0.0, 1.0).angle() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((Vec2::new(-1.0, 0.0).angle() - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn test_normalize_and_truncate() {
        let v = Vec2::new(3.0, 4.0);
        let n = v.normalized();
        assert!((n.length() - 1.0).abs() < 1e-12);
        assert_eq!(Vec2::ZERO.normalized(), Vec2::ZERO);

        let t = v.truncated(2.5);
        assert!((t.length() - 2.5).abs() < 1e-12);
        assert_eq!(v.truncated(10.0), v);
    }

    #[test]
    fn test_rotation() {
        let v = Vec2::new(1.0, 0.0);
        let r = v.rotated(std::f64::consts::FRAC_PI_2);
        assert_eq!(r, Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_reflection() {
        // Reflect a down-right vector off a floor with upward normal.
        let v = Vec2::new(1.0, -1.0);
        let r = v.reflected(Vec2::new(0.0, 1.0));
        assert_eq!(r, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn test_line_from_points() {
        let l = LineEquation::from_points(Vec2::new(0.0, 1.0), Vec2::new(2.0, 5.0));
        assert!(!l.is_vertical());
        assert_eq!(l.m, 2.0);
        assert_eq!(l.b, 1.0);
        assert_eq!(l.eval(3.0), 7.0);
    }

    #[test]
    fn test_vertical_line() {
        let l = LineEquation::from_points(Vec2::new(2.0, 0.0), Vec2::new(2.0, 9.0));
        assert!(l.is_vertical());
        assert_eq!(l.b, 2.0);
    }

    #[test]
    fn test_intersection() {
        let a = LineEquation::from_points(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let b = LineEquation::from_points(Vec2::new(0.0, 2.0), Vec2::new(1.0, 1.0));
        assert_eq!(a.intersection(&b), Vec2::new(1.0, 1.0));

        // Vertical against sloped.
        let v = LineEquation::from_points(Vec2::new(3.0, 0.0), Vec2::new(3.0, 1.0));
        assert_eq!(a.intersection(&v), Vec2::new(3.0, 3.0));

        // Parallel lines fall back to the origin sentinel.
        let c = LineEquation::from_points(Vec2::new(0.0, 5.0), Vec2::new(1.0, 6.0));
        assert_eq!(a.intersection(&c), Vec2::ZERO);
    }

    #[test]
    fn test_translation() {
        let l = LineEquation::from_points(Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0));
        let moved = l.translated(Vec2::new(0.0, 2.0));
        assert_eq!(moved.eval(0.0), 2.0);
        assert_eq!(moved.m, 1.0);
    }
}
