//! Scan conversion and depth resolution.

use rayon::prelude::*;

use crate::geometry::{interpolate_depth, ndc_to_screen, point_in_triangle};
use crate::point2d::Point2D;
use crate::point3d::Point3D;
use crate::rectangle::bounding_box;
use crate::screen::{BandMut, ScreenSpace};
use crate::triangle::{ScreenTriangle, VisibleTriangle};

/// Maps a culled-in NDC triangle to pixel space and attaches its clamped bounding box.
/// `None` when the box misses the screen, so the triangle cannot touch any pixel.
pub fn prepare_triangle(index: i32, ndc: [Point3D; 3], width: u32, height: u32) -> Option<VisibleTriangle> {
    let screen = ScreenTriangle {
        a: ndc_to_screen(ndc[0], width, height),
        b: ndc_to_screen(ndc[1], width, height),
        c: ndc_to_screen(ndc[2], width, height),
    };
    let bounds = bounding_box(&screen, width, height)?;
    Some(VisibleTriangle { index, screen, bounds })
}

/// Rasterizes one triangle into a band. Returns the number of samples that passed the
/// depth test.
///
/// A sample is rejected only when its depth is below the stored value, so equal depths
/// let the later triangle take the pixel.
pub fn rasterize_triangle(band: &mut BandMut<'_>, tri: &VisibleTriangle) -> u64 {
    let Some(area) = tri.bounds.intersect(&band.rect) else {
        return 0;
    };
    let depths = tri.screen.depths();
    let mut written = 0;

    for y in area.min_y..area.max_y {
        for x in area.min_x..area.max_x {
            let p = Point2D { x: x as f32 + 0.5, y: y as f32 + 0.5 };
            let mut weights = Point3D::ZERO;
            if !point_in_triangle(&tri.screen, p, &mut weights) {
                continue;
            }

            // early-z
            let depth = interpolate_depth(depths, weights);
            if !depth.is_finite() {
                continue;
            }
            let i = band.index(x, y);
            if depth < band.depth[i] {
                continue;
            }
            band.depth[i] = depth;
            band.owner[i] = tri.index;
            band.weights[i] = weights;
            written += 1;
        }
    }
    written
}

/// Rasterizes every triangle, in slice order, into the screen's depth, owner and weight
/// buffers.
///
/// The screen is cut into horizontal bands of `band_rows` rows that are processed in
/// parallel. Each band walks the whole triangle list in order, so every pixel sees the
/// same sequence of depth tests as a single-threaded pass.
pub fn rasterize(screen: &mut ScreenSpace, triangles: &[VisibleTriangle], band_rows: u32) -> u64 {
    screen
        .bands_mut(band_rows)
        .into_par_iter()
        .map(|mut band| triangles.iter().map(|tri| rasterize_triangle(&mut band, tri)).sum::<u64>())
        .sum()
}
