use crate::point3d::Point3D;
use crate::rectangle::Rect;

/// Render-time triangle: a mesh plus three vertex indices inside it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Triangle {
    pub mesh: u32,
    pub vertices: [u32; 3],
}

/// A triangle projected for this frame: x, y in pixels, z the NDC depth.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScreenTriangle {
    pub a: Point3D,
    pub b: Point3D,
    pub c: Point3D,
}

impl ScreenTriangle {
    pub fn depths(&self) -> Point3D {
        Point3D { x: self.a.z, y: self.b.z, z: self.c.z }
    }
}

/// A triangle that survived culling, tagged with its position in the draw order.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct VisibleTriangle {
    pub index: i32,
    pub screen: ScreenTriangle,
    /// Screen bounding box, already clamped to the target.
    pub bounds: Rect,
}
