use crate::error::{Error, Result};
use crate::math::Mat4;
use std::ops::{Add, Mul, Neg, Sub};

/// Homogeneous 3D vector. `w` is 1 for points and 0 for directions.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Vector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Vector {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, w: 1.0 }
    }

    pub const fn direction(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, w: 0.0 }
    }

    pub const fn homogeneous(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { x, y, z, w }
    }

    /// The origin as an affine point.
    pub const fn zeroes() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Builds a vector from up to four components. Missing x/y/z default to
    /// zero and a missing w defaults to 1.
    pub fn from_slice(components: &[f64]) -> Result<Self> {
        if components.len() > 4 {
            return Err(Error::InvalidArgument(format!(
                "a vector takes at most 4 components, got {}",
                components.len()
            )));
        }

        let at = |i: usize, default: f64| components.get(i).copied().unwrap_or(default);
        Ok(Self::homogeneous(at(0, 0.0), at(1, 0.0), at(2, 0.0), at(3, 1.0)))
    }

    /// Homogeneous matrix-vector product. `w` is carried through as computed;
    /// no perspective divide happens here.
    pub fn transform(&self, matrix: &Mat4) -> Self {
        let row = |i: usize| {
            let r = matrix.row(i);
            r[0] * self.x + r[1] * self.y + r[2] * self.z + r[3] * self.w
        };
        Self::homogeneous(row(0), row(1), row(2), row(3))
    }

    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(&self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite() && self.w.is_finite()
    }
}

impl Default for Vector {
    fn default() -> Self {
        Self::zeroes()
    }
}

impl From<[f64; 3]> for Vector {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl Add for Vector {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::homogeneous(
            self.x + other.x,
            self.y + other.y,
            self.z + other.z,
            self.w + other.w,
        )
    }
}

// point - point = direction
impl Sub for Vector {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self::homogeneous(
            self.x - other.x,
            self.y - other.y,
            self.z - other.z,
            self.w - other.w,
        )
    }
}

impl Mul<f64> for Vector {
    type Output = Self;

    fn mul(self, scale: f64) -> Self {
        Self::homogeneous(self.x * scale, self.y * scale, self.z * scale, self.w)
    }
}

impl Neg for Vector {
    type Output = Self;

    fn neg(self) -> Self {
        Self::homogeneous(-self.x, -self.y, -self.z, self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroes_is_origin_point() {
        assert_eq!(Vector::zeroes(), Vector::homogeneous(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_from_slice_defaults_trailing_components() {
        assert_eq!(Vector::from_slice(&[]).unwrap(), Vector::zeroes());
        assert_eq!(
            Vector::from_slice(&[0.0, 1.0, 0.0]).unwrap(),
            Vector::new(0.0, 1.0, 0.0)
        );
        assert_eq!(
            Vector::from_slice(&[2.0]).unwrap(),
            Vector::homogeneous(2.0, 0.0, 0.0, 1.0)
        );
        assert_eq!(
            Vector::from_slice(&[1.0, 2.0, 3.0, 0.0]).unwrap(),
            Vector::direction(1.0, 2.0, 3.0)
        );
    }

    #[test]
    fn test_from_slice_rejects_too_many_components() {
        let err = Vector::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_transform_passes_w_through() {
        let scale_w = Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 2.0],
        ]);
        let v = Vector::new(1.0, 2.0, 3.0).transform(&scale_w);
        assert_eq!(v, Vector::homogeneous(1.0, 2.0, 3.0, 2.0));
    }

    #[test]
    fn test_transform_applies_translation_to_points_only() {
        let translate = Mat4::new([
            [1.0, 0.0, 0.0, 10.0],
            [0.0, 1.0, 0.0, 20.0],
            [0.0, 0.0, 1.0, 30.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);

        let point = Vector::new(1.0, 2.0, 3.0).transform(&translate);
        assert_eq!(point, Vector::new(11.0, 22.0, 33.0));

        let dir = Vector::direction(1.0, 2.0, 3.0).transform(&translate);
        assert_eq!(dir, Vector::direction(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_arithmetic() {
        let a = Vector::new(1.0, 2.0, 3.0);
        let b = Vector::new(4.0, 6.0, 8.0);

        assert_eq!(b - a, Vector::direction(3.0, 4.0, 5.0));
        assert_eq!(a + (b - a), b);
        assert_eq!(a * 2.0, Vector::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Vector::new(-1.0, -2.0, -3.0));
        assert_eq!(Vector::direction(3.0, 4.0, 0.0).length(), 5.0);
        assert!(!Vector::new(f64::NAN, 0.0, 0.0).is_finite());
    }
}
