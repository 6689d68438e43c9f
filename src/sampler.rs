//! Full-screen texturing pass, run once every triangle has been rasterized.

use rayon::prelude::*;

use crate::model::Model;
use crate::point2d::Point2D;
use crate::point3d::Point3D;
use crate::screen::{BACKGROUND, ScreenSpace};
use crate::texture::Texture;

pub const BACKGROUND_COLOR: [u8; 3] = [0, 0, 0];

/// Texture coordinate at a pixel, from the owner's corner coordinates and the stored
/// (unnormalized) weights.
#[inline]
pub fn interpolate_tex_coord(corners: [Point2D; 3], weights: Point3D) -> Point2D {
    (corners[0] * weights.x + corners[1] * weights.y + corners[2] * weights.z) / weights.sum()
}

/// Converts a filtered color to bytes, truncating toward zero. Out-of-range components
/// saturate at 0 and 255.
#[inline]
pub fn to_rgb8(color: Point3D) -> [u8; 3] {
    [color.x as u8, color.y as u8, color.z as u8]
}

#[inline]
pub fn shade_pixel(owner: i32, weights: Point3D, model: &Model, texture: &Texture) -> [u8; 3] {
    if owner == BACKGROUND {
        return BACKGROUND_COLOR;
    }
    let triangle = &model.triangles()[owner as usize];
    let uv = interpolate_tex_coord(model.triangle_tex_coords(triangle), weights);
    to_rgb8(texture.sample_bilinear(uv))
}

/// Writes every pixel of the color buffer from the owner and weight buffers.
pub fn shade(screen: &mut ScreenSpace, model: &Model, texture: &Texture) {
    let width = screen.width.max(1) as usize;
    screen
        .rgb
        .par_chunks_mut(width * 3)
        .zip(screen.owner.par_chunks(width))
        .zip(screen.weights.par_chunks(width))
        .for_each(|((rgb_row, owner_row), weight_row)| {
            for ((rgb, &owner), &weights) in rgb_row.chunks_exact_mut(3).zip(owner_row).zip(weight_row) {
                rgb.copy_from_slice(&shade_pixel(owner, weights, model, texture));
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Mesh, Vertex};

    fn one_triangle(uvs: [(f32, f32); 3]) -> Model {
        let vertices = uvs
            .iter()
            .map(|&(u, v)| Vertex::new(Point3D::ZERO, Point3D::ZERO, Point2D { x: u, y: v }))
            .collect();
        Model::new(vec![Mesh::new(vertices, vec![0, 1, 2])]).unwrap()
    }

    #[test]
    fn tex_coords_are_normalized_by_the_weight_sum() {
        let corners = [Point2D { x: 0.0, y: 0.0 }, Point2D { x: 1.0, y: 0.0 }, Point2D { x: 0.0, y: 1.0 }];
        let uv = interpolate_tex_coord(corners, Point3D::new(-2.0, -1.0, -1.0));
        assert_eq!(uv, Point2D { x: 0.25, y: 0.25 });
    }

    #[test]
    fn bytes_truncate_and_saturate() {
        assert_eq!(to_rgb8(Point3D::new(12.99, 255.7, -3.0)), [12, 255, 0]);
        assert_eq!(to_rgb8(Point3D::new(300.0, 0.2, f32::NAN)), [255, 0, 0]);
    }

    #[test]
    fn background_pixels_are_black_and_owned_pixels_textured() {
        let model = one_triangle([(0.0, 0.0); 3]);
        let texture = Texture::solid(90, 180, 45);
        let mut screen = ScreenSpace::new(3, 2);
        screen.rgb.fill(77);
        screen.owner[4] = 0;
        screen.weights[4] = Point3D::new(-1.0, -1.0, -1.0);
        shade(&mut screen, &model, &texture);

        assert_eq!(screen.get_pixel(1, 1), Some((90, 180, 45)));
        for (x, y) in [(0, 0), (1, 0), (2, 0), (0, 1), (2, 1)] {
            assert_eq!(screen.get_pixel(x, y), Some((0, 0, 0)));
        }
    }
}
