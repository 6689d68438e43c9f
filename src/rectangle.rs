use crate::triangle::ScreenTriangle;

/// Pixel rectangle; `min` bounds are inclusive, `max` bounds exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub min_x: u32,
    pub min_y: u32,
    pub max_x: u32,
    pub max_y: u32,
}

// helper methods
impl Rect {
    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let r = Rect {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        };
        (r.min_x < r.max_x && r.min_y < r.max_y).then_some(r)
    }
}

/// First and last pixel index (inclusive) whose center `i + 0.5` can fall in `[lo, hi]`,
/// clamped to `0..size`.
fn pixel_span(lo: f32, hi: f32, size: u32) -> Option<(u32, u32)> {
    let last = size as i64 - 1;
    let start = ((lo - 0.5).floor() as i64).max(0);
    let end = ((hi - 0.5).floor() as i64).min(last);
    (start <= end).then_some((start as u32, end as u32))
}

/// Screen-space bounding box of a triangle, clamped to a `width` x `height` target.
/// `None` when the box misses the target entirely.
pub fn bounding_box(tri: &ScreenTriangle, width: u32, height: u32) -> Option<Rect> {
    let min_x = tri.a.x.min(tri.b.x).min(tri.c.x);
    let min_y = tri.a.y.min(tri.b.y).min(tri.c.y);
    let max_x = tri.a.x.max(tri.b.x).max(tri.c.x);
    let max_y = tri.a.y.max(tri.b.y).max(tri.c.y);

    let (x0, x1) = pixel_span(min_x, max_x, width)?;
    let (y0, y1) = pixel_span(min_y, max_y, height)?;
    Some(Rect { min_x: x0, min_y: y0, max_x: x1 + 1, max_y: y1 + 1 })
}

/// Compute minimum depth to get at least n rectangles for # of CPU cores
pub fn compute_subdivisions(n: usize) -> u32 {
    let mut depth = 0;
    let mut count = 1;
    while count < n {
        depth += 1;
        count *= 2;
    }
    depth
}

/// Number of pixel rows per band so that `threads` workers get at least two bands each,
/// leaving room for work stealing where geometry is unevenly spread.
pub fn band_rows(height: u32, threads: usize) -> u32 {
    let bands = 1u32 << (compute_subdivisions(threads.max(1)) + 1).min(16);
    height.div_ceil(bands).max(1)
}
