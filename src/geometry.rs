use crate::point2d::{Point2D, cross2};
use crate::point3d::Point3D;
use crate::triangle::ScreenTriangle;

/// Edge function of the edge `from -> to` evaluated at `p`: the z component of
/// `(p - from) x (to - from)`.
#[inline(always)]
pub fn edge_function(from: Point2D, to: Point2D, p: Point2D) -> f32 {
    cross2(p - from, to - from)
}

/// Containment test for the pixel center `p`.
///
/// Weights are ordered by the vertex opposite each edge: `x` for edge b->c, `y` for c->a,
/// `z` for a->b. A point is inside when all three are strictly negative, or all three are
/// strictly positive, in which case they are negated. Accepted weights are therefore
/// always negative and unnormalized; a point exactly on an edge is never inside.
#[inline(always)]
pub fn point_in_triangle(tri: &ScreenTriangle, p: Point2D, weights: &mut Point3D) -> bool {
    let (a, b, c) = (tri.a.xy(), tri.b.xy(), tri.c.xy());
    let w = Point3D {
        x: edge_function(b, c, p),
        y: edge_function(c, a, p),
        z: edge_function(a, b, p),
    };
    if w.x < 0.0 && w.y < 0.0 && w.z < 0.0 {
        *weights = w;
        true
    } else if w.x > 0.0 && w.y > 0.0 && w.z > 0.0 {
        *weights = -w;
        true
    } else {
        false
    }
}

/// Barycentric combination of the corner depths, normalized by the weight sum.
#[inline(always)]
pub fn interpolate_depth(depths: Point3D, weights: Point3D) -> f32 {
    let total = weights.sum();
    depths.x * weights.x / total + depths.y * weights.y / total + depths.z * weights.z / total
}

#[inline(always)]
pub fn ndc_to_screen(ndc: Point3D, width: u32, height: u32) -> Point3D {
    Point3D {
        x: (ndc.x + 1.0) * 0.5 * width as f32,
        y: (ndc.y + 1.0) * 0.5 * height as f32,
        z: ndc.z,
    }
}

/// Canonical clip-cube test, each axis independently.
#[inline(always)]
pub fn is_in_frustum(p: Point3D) -> bool {
    p.x.abs() <= 1.0 && p.y.abs() <= 1.0 && p.z.abs() <= 1.0
}

/// Signed doubled area of the NDC triangle in the xy plane, `(b - a) x (c - b)`.
/// Positive for counter-clockwise winding.
#[inline(always)]
pub fn signed_area(ndc: &[Point3D; 3]) -> f32 {
    cross2(ndc[1].xy() - ndc[0].xy(), ndc[2].xy() - ndc[1].xy())
}

/// Counter-clockwise NDC winding faces the viewer; zero area is not back-facing.
#[inline(always)]
pub fn is_back_facing(ndc: &[Point3D; 3]) -> bool {
    signed_area(ndc) < 0.0
}

/// Conservative reject: only when no corner lies inside the clip cube.
#[inline(always)]
pub fn is_outside_frustum(ndc: &[Point3D; 3]) -> bool {
    !ndc.iter().copied().any(is_in_frustum)
}

/// Outcome of the visibility filter for one triangle.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Visibility {
    Visible([Point3D; 3]),
    /// A corner had w <= 0; nothing sensible can be drawn.
    Degenerate,
    BackFacing,
    OutsideFrustum,
}

pub fn classify(ndc: Option<[Point3D; 3]>) -> Visibility {
    match ndc {
        None => Visibility::Degenerate,
        Some(ndc) if is_back_facing(&ndc) => Visibility::BackFacing,
        Some(ndc) if is_outside_frustum(&ndc) => Visibility::OutsideFrustum,
        Some(ndc) => Visibility::Visible(ndc),
    }
}
