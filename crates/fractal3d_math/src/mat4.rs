//! 4x4 matrix utilities for the model-view transform
//!
//! Matrices are row-major and act on column vectors: `v' = M * v`.
//! Composition is done by value: `a * b` returns a new matrix that applies
//! `b` first, then `a`. Nothing here mutates shared state.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::Vec4;

/// Principal axis for a rotation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Pick an axis from three flags.
    ///
    /// The flags are mutually exclusive per call: the first set flag in
    /// X, Y, Z order wins. Returns `None` when no flag is set.
    pub fn from_flags(x: bool, y: bool, z: bool) -> Option<Self> {
        if x {
            Some(Axis::X)
        } else if y {
            Some(Axis::Y)
        } else if z {
            Some(Axis::Z)
        } else {
            None
        }
    }
}

/// 4x4 matrix, 16 scalars in row-major order
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Mat4 {
    m: [f32; 16],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    /// Identity matrix
    pub const IDENTITY: Self = Self {
        m: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    /// Build a matrix from its 16 scalars in row-major order
    pub const fn from_row_major(m: [f32; 16]) -> Self {
        Self { m }
    }

    /// Build a matrix from four rows
    pub fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let mut m = [0.0; 16];
        for (r, row) in rows.iter().enumerate() {
            m[r * 4..r * 4 + 4].copy_from_slice(row);
        }
        Self { m }
    }

    /// Translation by (x, y, z)
    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Self::from_rows([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation around the X axis. `degrees` follows the right-hand rule.
    pub fn rotation_x(degrees: f32) -> Self {
        let (sn, cs) = degrees.to_radians().sin_cos();
        Self::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, cs, -sn, 0.0],
            [0.0, sn, cs, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation around the Y axis
    pub fn rotation_y(degrees: f32) -> Self {
        let (sn, cs) = degrees.to_radians().sin_cos();
        Self::from_rows([
            [cs, 0.0, sn, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-sn, 0.0, cs, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation around the Z axis
    pub fn rotation_z(degrees: f32) -> Self {
        let (sn, cs) = degrees.to_radians().sin_cos();
        Self::from_rows([
            [cs, -sn, 0.0, 0.0],
            [sn, cs, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation around one principal axis
    pub fn rotation(axis: Axis, degrees: f32) -> Self {
        match axis {
            Axis::X => Self::rotation_x(degrees),
            Axis::Y => Self::rotation_y(degrees),
            Axis::Z => Self::rotation_z(degrees),
        }
    }

    /// Element at (row, col), `None` when out of range
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < 4 && col < 4 {
            Some(self.m[row * 4 + col])
        } else {
            None
        }
    }

    /// A row as a vector
    pub fn row(&self, row: usize) -> Vec4 {
        Vec4::new(self[(row, 0)], self[(row, 1)], self[(row, 2)], self[(row, 3)])
    }

    /// All 16 scalars, row-major
    pub fn as_array(&self) -> &[f32; 16] {
        &self.m
    }

    /// Transpose a matrix
    pub fn transpose(self) -> Self {
        let mut out = [0.0; 16];
        for r in 0..4 {
            for c in 0..4 {
                out[c * 4 + r] = self.m[r * 4 + c];
            }
        }
        Self { m: out }
    }
}

impl std::ops::Index<usize> for Mat4 {
    type Output = f32;

    /// Flat row-major access; index 16 and above is a programming error.
    fn index(&self, index: usize) -> &f32 {
        assert!(index < 16, "Mat4 index out of range: {}", index);
        &self.m[index]
    }
}

impl std::ops::IndexMut<usize> for Mat4 {
    fn index_mut(&mut self, index: usize) -> &mut f32 {
        assert!(index < 16, "Mat4 index out of range: {}", index);
        &mut self.m[index]
    }
}

impl std::ops::Index<(usize, usize)> for Mat4 {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        assert!(row < 4 && col < 4, "Mat4 index out of range: ({}, {})", row, col);
        &self.m[row * 4 + col]
    }
}

impl std::ops::IndexMut<(usize, usize)> for Mat4 {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        assert!(row < 4 && col < 4, "Mat4 index out of range: ({}, {})", row, col);
        &mut self.m[row * 4 + col]
    }
}

/// Matrix product: `(a * b) * v == a * (b * v)`
impl std::ops::Mul for Mat4 {
    type Output = Self;

    #[allow(clippy::needless_range_loop)]
    fn mul(self, rhs: Self) -> Self {
        let mut out = [0.0f32; 16];
        for r in 0..4 {
            for c in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.m[r * 4 + k] * rhs.m[k * 4 + c];
                }
                out[r * 4 + c] = sum;
            }
        }
        Self { m: out }
    }
}

/// Transform a vector: result = M * v
impl std::ops::Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Vec4 {
        let m = &self.m;
        Vec4::new(
            m[0] * v.x + m[1] * v.y + m[2] * v.z + m[3] * v.w,
            m[4] * v.x + m[5] * v.y + m[6] * v.z + m[7] * v.w,
            m[8] * v.x + m[9] * v.y + m[10] * v.z + m[11] * v.w,
            m[12] * v.x + m[13] * v.y + m[14] * v.z + m[15] * v.w,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn vec_approx_eq(a: Vec4, b: Vec4) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z) && approx_eq(a.w, b.w)
    }

    fn mat_approx_eq(a: Mat4, b: Mat4) -> bool {
        a.as_array().iter().zip(b.as_array()).all(|(x, y)| approx_eq(*x, *y))
    }

    #[test]
    fn test_identity() {
        let v = Vec4::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(Mat4::IDENTITY * v, v);
        assert_eq!(Mat4::default(), Mat4::IDENTITY);
    }

    #[test]
    fn test_row_major_layout() {
        let m = Mat4::translation(7.0, 8.0, 9.0);
        // Translation lives in the last column
        assert_eq!(m[3], 7.0);
        assert_eq!(m[(1, 3)], 8.0);
        assert_eq!(m.row(2), Vec4::new(0.0, 0.0, 1.0, 9.0));
    }

    #[test]
    fn test_translation_moves_points_not_directions() {
        let m = Mat4::translation(1.0, 2.0, 3.0);
        assert_eq!(m * Vec4::point(1.0, 1.0, 1.0), Vec4::point(2.0, 3.0, 4.0));
        assert_eq!(m * Vec4::direction(1.0, 1.0, 1.0), Vec4::direction(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_rotation_x_90() {
        // Y should go to Z
        let m = Mat4::rotation_x(90.0);
        let result = m * Vec4::point(0.0, 1.0, 0.0);
        assert!(vec_approx_eq(result, Vec4::point(0.0, 0.0, 1.0)),
            "Y should become Z, got {:?}", result);
    }

    #[test]
    fn test_rotation_y_90() {
        // Z should go to X
        let m = Mat4::rotation_y(90.0);
        let result = m * Vec4::point(0.0, 0.0, 1.0);
        assert!(vec_approx_eq(result, Vec4::point(1.0, 0.0, 0.0)),
            "Z should become X, got {:?}", result);
    }

    #[test]
    fn test_rotation_z_90() {
        // X should go to Y
        let m = Mat4::rotation(Axis::Z, 90.0);
        let result = m * Vec4::point(1.0, 0.0, 0.0);
        assert!(vec_approx_eq(result, Vec4::point(0.0, 1.0, 0.0)),
            "X should become Y, got {:?}", result);
    }

    #[test]
    fn test_rotation_zero_is_identity() {
        for axis in [Axis::X, Axis::Y, Axis::Z] {
            assert!(mat_approx_eq(Mat4::rotation(axis, 0.0), Mat4::IDENTITY));
        }
    }

    #[test]
    fn test_mul_identity() {
        let a = Mat4::rotation_x(33.0) * Mat4::translation(1.0, -2.0, 5.0);
        assert!(mat_approx_eq(Mat4::IDENTITY * a, a));
        assert!(mat_approx_eq(a * Mat4::IDENTITY, a));
    }

    #[test]
    fn test_mul_composition() {
        // Two 45° rotations should equal one 90° rotation
        let r45 = Mat4::rotation_z(45.0);
        let composed = r45 * r45;
        assert!(mat_approx_eq(composed, Mat4::rotation_z(90.0)));
    }

    #[test]
    fn test_mul_associative_not_commutative() {
        let a = Mat4::translation(10.0, 0.0, 0.0);
        let b = Mat4::rotation_y(90.0);
        let c = Mat4::rotation_x(30.0);

        assert!(mat_approx_eq((a * b) * c, a * (b * c)));

        let v = Vec4::point(1.0, 0.0, 0.0);
        let ab = (a * b) * v;
        let ba = (b * a) * v;
        assert!(!vec_approx_eq(ab, ba), "Translation and rotation should not commute");
    }

    #[test]
    fn test_transpose() {
        let m = Mat4::translation(1.0, 2.0, 3.0).transpose();
        assert_eq!(m.row(3), Vec4::new(1.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn test_axis_from_flags() {
        assert_eq!(Axis::from_flags(true, true, false), Some(Axis::X));
        assert_eq!(Axis::from_flags(false, true, true), Some(Axis::Y));
        assert_eq!(Axis::from_flags(false, false, true), Some(Axis::Z));
        assert_eq!(Axis::from_flags(false, false, false), None);
    }

    #[test]
    fn test_get_out_of_range() {
        assert_eq!(Mat4::IDENTITY.get(3, 3), Some(1.0));
        assert_eq!(Mat4::IDENTITY.get(4, 0), None);
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn test_index_out_of_range_panics() {
        let m = Mat4::IDENTITY;
        let _ = m[16];
    }
}
