use crate::matrix::Mat4;
use crate::point3d::Point3D;

/// Placement of a model in the world: a rotation about `axis` followed by a translation.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Point3D,
    pub axis: Point3D,
    pub angle: f32,
}

impl Transform {
    /// Model matrix, `translate * rotate`.
    pub fn matrix(&self) -> Mat4 {
        Mat4::translation(self.position) * Mat4::rotation(self.axis, self.angle)
    }
}

/// Transform stage: takes the three object-space corners of a triangle through the
/// combined model-view-projection matrix and divides by w.
///
/// Returns `None` when any corner lands on or behind the eye plane (w <= 0), leaving the
/// caller to skip the triangle.
#[inline]
pub fn project_triangle(mvp: &Mat4, corners: [Point3D; 3]) -> Option<[Point3D; 3]> {
    let a = mvp.transform_point(corners[0]).to_ndc()?;
    let b = mvp.transform_point(corners[1]).to_ndc()?;
    let c = mvp.transform_point(corners[2]).to_ndc()?;
    Some([a, b, c])
}
