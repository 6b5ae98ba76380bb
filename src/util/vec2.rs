use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};

/// 2D vector in scene units
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` (radians, +x towards +y)
    #[inline]
    pub fn from_angle(angle: f32) -> Self {
        Self {
            x: angle.cos(),
            y: angle.sin(),
        }
    }

    #[inline]
    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    pub fn length_sq(&self) -> f32 {
        self.x * self.x + self.y * self.y
    }

    /// Direction of this vector. Zero maps to angle 0 (atan2 is total).
    #[inline]
    pub fn angle(&self) -> f32 {
        self.y.atan2(self.x)
    }

    #[inline]
    pub fn distance_to(&self, other: Vec2) -> f32 {
        (*self - other).length()
    }

    /// Midpoint between two points
    #[inline]
    pub fn midpoint(&self, other: Vec2) -> Self {
        (*self + other) * 0.5
    }

    /// Check if vector is approximately equal to another
    pub fn approx_eq(&self, other: Vec2, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl Div<f32> for Vec2 {
    type Output = Self;
    fn div(self, rhs: f32) -> Self {
        Self {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}

impl Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
        }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Vec2 {
    fn sub_assign(&mut self, rhs: Self) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl MulAssign<f32> for Vec2 {
    fn mul_assign(&mut self, rhs: f32) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_length() {
        let v = Vec2::new(3.0, 4.0);
        assert!(approx_eq(v.length(), 5.0));
        assert!(approx_eq(v.length_sq(), 25.0));
        assert!(approx_eq(Vec2::ZERO.length(), 0.0));
    }

    #[test]
    fn test_distance() {
        let a = Vec2::new(1.0, 1.0);
        let b = Vec2::new(4.0, 5.0);
        assert!(approx_eq(a.distance_to(b), 5.0));
        assert!(approx_eq(b.distance_to(a), 5.0));
    }

    #[test]
    fn test_angle_round_trips_direction() {
        let v = Vec2::new(-2.0, 2.0);
        let dir = Vec2::from_angle(v.angle());
        assert!(dir.approx_eq(Vec2::new(-1.0, 1.0) * (1.0 / 2.0_f32.sqrt()), EPSILON));
        assert!(approx_eq(Vec2::new(0.0, 1.0).angle(), PI / 2.0));
    }

    #[test]
    fn test_angle_of_zero_is_defined() {
        assert_eq!(Vec2::ZERO.angle(), 0.0);
    }

    #[test]
    fn test_midpoint() {
        let m = Vec2::new(0.0, 0.0).midpoint(Vec2::new(10.0, -4.0));
        assert_eq!(m, Vec2::new(5.0, -2.0));
    }

    #[test]
    fn test_operators() {
        let mut a = Vec2::new(1.0, 2.0);
        a += Vec2::new(3.0, 4.0);
        assert_eq!(a, Vec2::new(4.0, 6.0));
        a -= Vec2::new(1.0, 1.0);
        assert_eq!(a, Vec2::new(3.0, 5.0));
        a *= 2.0;
        assert_eq!(a, Vec2::new(6.0, 10.0));
        assert_eq!(a / 2.0, Vec2::new(3.0, 5.0));
        assert_eq!(-a, Vec2::new(-6.0, -10.0));
        assert_eq!(a - Vec2::new(6.0, 10.0), Vec2::ZERO);
    }

    #[test]
    fn test_is_finite() {
        assert!(Vec2::new(1.0, -1.0).is_finite());
        assert!(!Vec2::new(f32::NAN, 0.0).is_finite());
        assert!(!Vec2::new(0.0, f32::INFINITY).is_finite());
    }

    #[test]
    fn test_serde_json() {
        let v = Vec2::new(1.5, -2.5);
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(json, r#"{"x":1.5,"y":-2.5}"#);
        let back: Vec2 = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
