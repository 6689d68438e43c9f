use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct Point2D {
    pub x: f32,
    pub y: f32,
}

use std::ops::{Add, Sub, Mul, Div};

impl Add for Point2D {
    type Output = Point2D;
    fn add(self, other: Point2D) -> Point2D {
        Point2D { x: self.x + other.x, y: self.y + other.y }
    }
}

impl Sub for Point2D {
    type Output = Point2D;
    fn sub(self, other: Point2D) -> Point2D {
        Point2D { x: self.x - other.x, y: self.y - other.y }
    }
}

impl Mul<f32> for Point2D {
    type Output = Point2D;
    fn mul(self, scalar: f32) -> Point2D {
        Point2D { x: self.x * scalar, y: self.y * scalar }
    }
}

impl Div<f32> for Point2D {
    type Output = Point2D;
    fn div(self, scalar: f32) -> Point2D {
        Point2D { x: self.x / scalar, y: self.y / scalar }
    }
}

#[inline(always)]
pub fn dot2(a: Point2D, b: Point2D) -> f32 {
    a.x * b.x + a.y * b.y
}

#[inline(always)]
pub fn perp(vec: Point2D) -> Point2D {
    Point2D { x: vec.y, y: -vec.x }
}

/// z component of the 3D cross product of two vectors lying in the xy plane.
#[inline(always)]
pub fn cross2(a: Point2D, b: Point2D) -> f32 {
    dot2(a, perp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross2_sign_follows_winding() {
        let x = Point2D { x: 1.0, y: 0.0 };
        let y = Point2D { x: 0.0, y: 1.0 };
        assert_eq!(cross2(x, y), 1.0);
        assert_eq!(cross2(y, x), -1.0);
        assert_eq!(cross2(x, x * 3.0), 0.0);
    }
}
