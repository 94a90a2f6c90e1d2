//! Homogeneous 4-component vector

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Homogeneous vector with x, y, z, w components
///
/// Points carry `w = 1`, directions carry `w = 0`. Length, dot and cross
/// only look at the xyz part, so a point and a direction can be mixed freely.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Vec4 {
    /// The origin as a point (w = 1)
    fn default() -> Self {
        Self::point(0.0, 0.0, 0.0)
    }
}

impl Vec4 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0, w: 0.0 };
    pub const X: Self = Self { x: 1.0, y: 0.0, z: 0.0, w: 0.0 };
    pub const Y: Self = Self { x: 0.0, y: 1.0, z: 0.0, w: 0.0 };
    pub const Z: Self = Self { x: 0.0, y: 0.0, z: 1.0, w: 0.0 };

    /// Create a new Vec4
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// A position (w = 1)
    #[inline]
    pub const fn point(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    /// A direction (w = 0)
    #[inline]
    pub const fn direction(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z, w: 0.0 }
    }

    /// Dot product of the xyz parts
    #[inline]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product of the xyz parts, returned as a direction
    #[inline]
    pub fn cross(self, other: Self) -> Self {
        Self::direction(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Length squared (faster than length)
    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    /// Length (magnitude) of the xyz part
    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Normalize the xyz part to unit length; w is kept.
    ///
    /// A zero-length vector is returned unchanged.
    #[inline]
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self::new(self.x / len, self.y / len, self.z / len, self.w)
        } else {
            self
        }
    }

    /// Extract the xyz components as an array
    #[inline]
    pub fn xyz(&self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Linear interpolation between two vectors
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        self * (1.0 - t) + other * t
    }

    /// Component by index (0=x, 1=y, 2=z, 3=w), `None` when out of range
    #[inline]
    pub fn get(&self, index: usize) -> Option<f32> {
        match index {
            0 => Some(self.x),
            1 => Some(self.y),
            2 => Some(self.z),
            3 => Some(self.w),
            _ => None,
        }
    }
}

impl std::ops::Index<usize> for Vec4 {
    type Output = f32;

    fn index(&self, index: usize) -> &f32 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            3 => &self.w,
            _ => panic!("Vec4 index out of range: {}", index),
        }
    }
}

impl std::ops::IndexMut<usize> for Vec4 {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            3 => &mut self.w,
            _ => panic!("Vec4 index out of range: {}", index),
        }
    }
}

// Operator overloads

impl std::ops::Add for Vec4 {
    type Output = Self;
    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
        )
    }
}

impl std::ops::Sub for Vec4 {
    type Output = Self;
    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.w - other.w,
        )
    }
}

impl std::ops::Mul<f32> for Vec4 {
    type Output = Self;
    #[inline]
    fn mul(self, scalar: f32) -> Self {
        Self::new(
            self.x * scalar,
            self.y * scalar,
            self.z * scalar,
            self.w * scalar,
        )
    }
}

impl std::ops::Div<f32> for Vec4 {
    type Output = Self;
    #[inline]
    fn div(self, scalar: f32) -> Self {
        Self::new(
            self.x / scalar,
            self.y / scalar,
            self.z / scalar,
            self.w / scalar,
        )
    }
}

impl std::ops::Neg for Vec4 {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    #[test]
    fn test_point_and_direction() {
        assert_eq!(Vec4::point(1.0, 2.0, 3.0).w, 1.0);
        assert_eq!(Vec4::direction(1.0, 2.0, 3.0).w, 0.0);
        assert_eq!(Vec4::default(), Vec4::point(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_dot_ignores_w() {
        let a = Vec4::new(1.0, 2.0, 3.0, 4.0);
        let b = Vec4::new(5.0, 6.0, 7.0, 8.0);
        // 1*5 + 2*6 + 3*7 = 38
        assert_eq!(a.dot(b), 38.0);
    }

    #[test]
    fn test_cross_right_handed() {
        let z = Vec4::X.cross(Vec4::Y);
        assert_eq!(z, Vec4::Z);

        let x = Vec4::Y.cross(Vec4::Z);
        assert_eq!(x, Vec4::X);

        // Anti-commutative
        assert_eq!(Vec4::Y.cross(Vec4::X), -Vec4::Z);
    }

    #[test]
    fn test_cross_is_perpendicular() {
        let a = Vec4::direction(1.0, 2.0, 3.0);
        let b = Vec4::direction(-4.0, 0.5, 2.0);
        let c = a.cross(b);
        assert!(c.dot(a).abs() < EPSILON);
        assert!(c.dot(b).abs() < EPSILON);
    }

    #[test]
    fn test_length() {
        let v = Vec4::point(3.0, 4.0, 0.0);
        assert_eq!(v.length(), 5.0);
    }

    #[test]
    fn test_normalized() {
        let v = Vec4::direction(0.0, 0.0, 10.0);
        let n = v.normalized();
        assert!((n.z - 1.0).abs() < EPSILON);
        assert_eq!(n.w, 0.0);

        // Zero length stays zero instead of going NaN
        assert_eq!(Vec4::ZERO.normalized(), Vec4::ZERO);
    }

    #[test]
    fn test_sub_of_points_is_direction() {
        let a = Vec4::point(5.0, 6.0, 7.0);
        let b = Vec4::point(1.0, 2.0, 3.0);
        assert_eq!(a - b, Vec4::direction(4.0, 4.0, 4.0));
    }

    #[test]
    fn test_lerp() {
        let a = Vec4::point(0.0, 0.0, 0.0);
        let b = Vec4::point(10.0, 20.0, 30.0);
        let mid = a.lerp(b, 0.5);
        assert_eq!(mid, Vec4::point(5.0, 10.0, 15.0));
    }

    #[test]
    fn test_index() {
        let mut v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(v[0], 1.0);
        assert_eq!(v[3], 4.0);
        v[2] = 9.0;
        assert_eq!(v.z, 9.0);
        assert_eq!(v.get(1), Some(2.0));
        assert_eq!(v.get(4), None);
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn test_index_out_of_range_panics() {
        let v = Vec4::ZERO;
        let _ = v[4];
    }
}
