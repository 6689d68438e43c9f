use bytemuck::{Pod, Zeroable};

use crate::point2d::Point2D;

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Point3D {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

use std::ops::{Add, AddAssign, Sub, Mul, Div, Neg};

impl Point3D {
    pub const ZERO: Point3D = Point3D { x: 0.0, y: 0.0, z: 0.0 };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Drops z; the rasterizer's edge tests only look at the screen plane.
    #[inline(always)]
    pub fn xy(self) -> Point2D {
        Point2D { x: self.x, y: self.y }
    }

    pub fn sum(self) -> f32 {
        self.x + self.y + self.z
    }
}

impl Add for Point3D {
    type Output = Point3D;
    fn add(self, other: Point3D) -> Point3D {
        Point3D { x: self.x + other.x, y: self.y + other.y, z: self.z + other.z }
    }
}

impl AddAssign for Point3D {
    fn add_assign(&mut self, other: Point3D) {
        *self = *self + other;
    }
}

impl Sub for Point3D {
    type Output = Point3D;
    fn sub(self, other: Point3D) -> Point3D {
        Point3D { x: self.x - other.x, y: self.y - other.y, z: self.z - other.z }
    }
}

impl Neg for Point3D {
    type Output = Point3D;
    fn neg(self) -> Point3D {
        Point3D { x: -self.x, y: -self.y, z: -self.z }
    }
}

impl Mul<f32> for Point3D {
    type Output = Point3D;
    fn mul(self, scalar: f32) -> Point3D {
        Point3D { x: self.x * scalar, y: self.y * scalar, z: self.z * scalar }
    }
}

impl Div<f32> for Point3D {
    type Output = Point3D;
    fn div(self, scalar: f32) -> Point3D {
        Point3D { x: self.x / scalar, y: self.y / scalar, z: self.z / scalar }
    }
}

pub fn dot3(a: Point3D, b: Point3D) -> f32 {
    a.x * b.x + a.y * b.y + a.z * b.z
}

pub fn cross3(a: Point3D, b: Point3D) -> Point3D {
    Point3D {
        x: a.y * b.z - a.z * b.y,
        y: a.z * b.x - a.x * b.z,
        z: a.x * b.y - a.y * b.x,
    }
}

pub fn normalize(vec: Point3D) -> Point3D {
    let length = dot3(vec, vec).sqrt();
    if length != 0.0 { vec / length } else { vec }
}
