use std::ops::Mul;

use crate::point3d::{Point3D, cross3, dot3, normalize};

/// Homogeneous point produced by a 4x4 transform, before the perspective divide.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Point4D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Point4D {
    /// Perspective divide. `None` when `w` is not strictly positive or the result is not
    /// finite; such vertices sit on or behind the eye plane.
    pub fn to_ndc(self) -> Option<Point3D> {
        if !(self.w > 0.0) || !self.w.is_finite() {
            return None;
        }
        let ndc = Point3D { x: self.x / self.w, y: self.y / self.w, z: self.z / self.w };
        if ndc.x.is_finite() && ndc.y.is_finite() && ndc.z.is_finite() {
            Some(ndc)
        } else {
            None
        }
    }
}

/// Row-major 4x4 matrix acting on column vectors: `clip = m * (x, y, z, 1)`.
///
/// Index notation is `m[row][column]`. Composition follows the usual
/// model -> view -> projection order: `projection * view * model`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4(pub [[f32; 4]; 4]);

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    pub fn translation(offset: Point3D) -> Self {
        Mat4([
            [1.0, 0.0, 0.0, offset.x],
            [0.0, 1.0, 0.0, offset.y],
            [0.0, 0.0, 1.0, offset.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed rotation of `angle` radians around `axis`.
    pub fn rotation(axis: Point3D, angle: f32) -> Self {
        let Point3D { x, y, z } = normalize(axis);
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        Mat4([
            [t * x * x + c, t * x * y - s * z, t * x * z + s * y, 0.0],
            [t * x * y + s * z, t * y * y + c, t * y * z - s * x, 0.0],
            [t * x * z - s * y, t * y * z + s * x, t * z * z + c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// OpenGL-style perspective projection mapping the view frustum to the [-1, 1] cube.
    pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y * 0.5).tan();
        let depth = far - near;
        Mat4([
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, -(far + near) / depth, -2.0 * far * near / depth],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Right-handed view matrix for an eye at `eye` looking towards `target`.
    pub fn look_at(eye: Point3D, target: Point3D, up: Point3D) -> Self {
        let f = normalize(target - eye);
        let s = normalize(cross3(f, up));
        let u = cross3(s, f);
        Mat4([
            [s.x, s.y, s.z, -dot3(s, eye)],
            [u.x, u.y, u.z, -dot3(u, eye)],
            [-f.x, -f.y, -f.z, dot3(f, eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn transform_point(&self, p: Point3D) -> Point4D {
        let m = &self.0;
        let row = |r: usize| m[r][0] * p.x + m[r][1] * p.y + m[r][2] * p.z + m[r][3];
        Point4D { x: row(0), y: row(1), z: row(2), w: row(3) }
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, o: Mat4) -> Mat4 {
        let mut out = [[0.0f32; 4]; 4];
        for (i, out_row) in out.iter_mut().enumerate() {
            for (j, cell) in out_row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.0[i][k] * o.0[k][j]).sum();
            }
        }
        Mat4(out)
    }
}
