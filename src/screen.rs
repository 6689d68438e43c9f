use bytemuck::cast_slice_mut;

use crate::point3d::Point3D;
use crate::rectangle::Rect;

/// Depth value of a pixel no triangle has written yet; any sample replaces it.
pub const EMPTY_DEPTH: f32 = -1.0;
/// Owner value of a background pixel.
pub const BACKGROUND: i32 = -1;

/// Frame buffer plus the per-pixel state the rasterizer rebuilds every frame.
///
/// `weights` is only meaningful where `owner != BACKGROUND`.
pub struct ScreenSpace {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
    pub depth: Vec<f32>,
    pub owner: Vec<i32>,
    pub weights: Vec<Point3D>,
}

impl ScreenSpace {
    pub fn new(width: u32, height: u32) -> Self {
        let size_calc = (width * height) as usize;
        Self {
            width,
            height,
            rgb: vec![0; size_calc * 3],
            depth: vec![EMPTY_DEPTH; size_calc],
            owner: vec![BACKGROUND; size_calc],
            weights: vec![Point3D::ZERO; size_calc],
        }
    }

    pub fn clear(&mut self) {
        self.rgb.fill(0);
        self.depth.fill(EMPTY_DEPTH);
        self.owner.fill(BACKGROUND);
        let weights_as_f32: &mut [f32] = cast_slice_mut(&mut self.weights);
        weights_as_f32.fill(0.0);
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height { return None }
        let i = ((y * self.width + x) * 3) as usize;
        Some((self.rgb[i], self.rgb[i + 1], self.rgb[i + 2]))
    }

    pub fn get_owner(&self, x: u32, y: u32) -> Option<i32> {
        if x >= self.width || y >= self.height { return None }
        Some(self.owner[(y * self.width + x) as usize])
    }

    pub fn get_depth(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width || y >= self.height { return None }
        Some(self.depth[(y * self.width + x) as usize])
    }

    pub fn covered_pixels(&self) -> usize {
        self.owner.iter().filter(|&&o| o != BACKGROUND).count()
    }

    /// Splits the per-pixel buffers into disjoint bands of `rows` rows each, top band first.
    pub fn bands_mut(&mut self, rows: u32) -> Vec<BandMut<'_>> {
        let width = self.width;
        let chunk = (rows.max(1) * width).max(1) as usize;
        self.depth
            .chunks_mut(chunk)
            .zip(self.owner.chunks_mut(chunk))
            .zip(self.weights.chunks_mut(chunk))
            .enumerate()
            .map(|(i, ((depth, owner), weights))| {
                let min_y = i as u32 * rows.max(1);
                let height = depth.len() as u32 / width;
                BandMut {
                    rect: Rect { min_x: 0, min_y, max_x: width, max_y: min_y + height },
                    depth,
                    owner,
                    weights,
                }
            })
            .collect()
    }
}

/// Mutable view of a horizontal band of the per-pixel buffers. Bands never overlap, so
/// they can be rasterized on separate threads.
pub struct BandMut<'a> {
    pub rect: Rect,
    pub depth: &'a mut [f32],
    pub owner: &'a mut [i32],
    pub weights: &'a mut [Point3D],
}

impl BandMut<'_> {
    /// Index into the band's slices for a pixel given in screen coordinates.
    #[inline(always)]
    pub fn index(&self, x: u32, y: u32) -> usize {
        ((y - self.rect.min_y) * self.rect.width() + x) as usize
    }
}
