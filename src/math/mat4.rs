use crate::math::Vector;

/// Row-major 4x4 affine transform using the column-vector convention
/// (`v' = M * v`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    data: [[f64; 4]; 4],
}

impl Mat4 {
    pub const fn new(data: [[f64; 4]; 4]) -> Self {
        Self { data }
    }

    pub const fn identity() -> Self {
        Self {
            data: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub const fn zero() -> Self {
        Self { data: [[0.0; 4]; 4] }
    }

    pub fn rotation_x(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_y(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_z(theta: f64) -> Self {
        let (s, c) = theta.sin_cos();
        Self::new([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-multiplies by a rotation about x, in place.
    pub fn rot_x(&mut self, theta: f64) -> &mut Self {
        *self = *self * Self::rotation_x(theta);
        self
    }

    /// Right-multiplies by a rotation about y, in place.
    pub fn rot_y(&mut self, theta: f64) -> &mut Self {
        *self = *self * Self::rotation_y(theta);
        self
    }

    pub fn rot_z(&mut self, theta: f64) -> &mut Self {
        *self = *self * Self::rotation_z(theta);
        self
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row][col]
    }

    pub fn row(&self, index: usize) -> [f64; 4] {
        self.data[index]
    }

    pub fn rows(&self) -> &[[f64; 4]; 4] {
        &self.data
    }

    pub fn transpose(self) -> Self {
        let mut result = Self::zero();
        for i in 0..4 {
            for j in 0..4 {
                result.data[i][j] = self.data[j][i];
            }
        }
        result
    }

    /// Column-major single precision layout expected by WGSL `mat4x4<f32>`.
    pub fn to_gpu(&self) -> [[f32; 4]; 4] {
        let mut cols = [[0.0f32; 4]; 4];
        for (c, col) in cols.iter_mut().enumerate() {
            for (r, cell) in col.iter_mut().enumerate() {
                *cell = self.data[r][c] as f32;
            }
        }
        cols
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Mat4 {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        let mut result = Self::zero();

        for i in 0..4 {
            for j in 0..4 {
                for k in 0..4 {
                    result.data[i][j] += self.data[i][k] * other.data[k][j];
                }
            }
        }

        result
    }
}

impl std::ops::Mul<Vector> for Mat4 {
    type Output = Vector;

    fn mul(self, vector: Vector) -> Vector {
        vector.transform(&self)
    }
}

impl From<[[f64; 4]; 4]> for Mat4 {
    fn from(data: [[f64; 4]; 4]) -> Self {
        Self { data }
    }
}

impl From<Mat4> for [[f64; 4]; 4] {
    fn from(mat: Mat4) -> Self {
        mat.data
    }
}
