use crate::matrix::Mat4;
use crate::point3d::Point3D;
use crate::transform::Transform;

pub struct Camera {
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Point3D,
    pub target: Point3D,
    pub up: Point3D,
}

impl Camera {
    /// Camera at the origin looking down -Z with +Y up.
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            fov,
            aspect,
            near,
            far,
            position: Point3D::ZERO,
            target: Point3D::new(0.0, 0.0, -1.0),
            up: Point3D::new(0.0, 1.0, 0.0),
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective(self.fov, self.aspect, self.near, self.far)
    }

    /// Combined matrix for one model placement, composed model -> view -> projection.
    pub fn model_view_projection(&self, model: &Transform) -> Mat4 {
        self.projection() * self.view() * model.matrix()
    }
}
