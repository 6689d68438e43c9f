//! One frame of the pipeline: transform, cull, rasterize, sample.

use std::time::Instant;

use rayon::prelude::*;

use crate::geometry::{Visibility, classify};
use crate::matrix::Mat4;
use crate::model::Model;
use crate::raster::{prepare_triangle, rasterize};
use crate::rectangle::band_rows;
use crate::sampler::shade;
use crate::screen::ScreenSpace;
use crate::stats::FrameStats;
use crate::texture::Texture;
use crate::transform::project_triangle;
use crate::triangle::VisibleTriangle;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("render target must be at least 1x1, got {width}x{height}")]
    EmptyTarget { width: u32, height: u32 },
    #[error("render target {width}x{height} is too large")]
    TargetTooLarge { width: u32, height: u32 },
    #[error("worker count must be at least 1")]
    NoThreads,
    #[error("failed to build the render thread pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Owns the frame-scoped buffers and the worker pool; reused across frames.
pub struct Renderer {
    screen: ScreenSpace,
    pool: rayon::ThreadPool,
    band_rows: u32,
    /// Reused storage for the triangles that survive culling each frame.
    visible: Vec<VisibleTriangle>,
}

impl Renderer {
    pub fn new(width: u32, height: u32, threads: usize) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyTarget { width, height });
        }
        let pixels = width as u64 * height as u64;
        if pixels * 3 > u32::MAX as u64 {
            return Err(RenderError::TargetTooLarge { width, height });
        }
        if threads == 0 {
            return Err(RenderError::NoThreads);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("raster-{i}"))
            .build()?;
        let band_rows = band_rows(height, threads);
        tracing::debug!(width, height, threads, band_rows, "renderer ready");
        Ok(Self {
            screen: ScreenSpace::new(width, height),
            pool,
            band_rows,
            visible: Vec::new(),
        })
    }

    pub fn width(&self) -> u32 {
        self.screen.width
    }

    pub fn height(&self) -> u32 {
        self.screen.height
    }

    pub fn screen(&self) -> &ScreenSpace {
        &self.screen
    }

    /// The finished frame: row-major RGB, 3 bytes per pixel, no padding.
    pub fn frame(&self) -> &[u8] {
        &self.screen.rgb
    }

    /// Renders one frame of `model` seen through `mvp`.
    ///
    /// Rasterization of all triangles completes before sampling starts, and every buffer is
    /// cleared first, so the result depends only on the inputs.
    pub fn render_frame(&mut self, model: &Model, texture: &Texture, mvp: &Mat4) -> FrameStats {
        let frame_start = Instant::now();
        let (width, height) = (self.screen.width, self.screen.height);
        let Self { screen, pool, band_rows, visible } = self;
        let mut stats = FrameStats { triangles: model.triangles().len() as u64, ..FrameStats::default() };

        pool.install(|| {
            screen.clear();

            let transform_start = Instant::now();
            let classified: Vec<Visibility> = model
                .triangles()
                .par_iter()
                .map(|tri| classify(project_triangle(mvp, model.triangle_positions(tri))))
                .collect();

            visible.clear();
            for (index, visibility) in classified.into_iter().enumerate() {
                match visibility {
                    Visibility::Degenerate => stats.degenerate += 1,
                    Visibility::BackFacing => stats.back_facing += 1,
                    Visibility::OutsideFrustum => stats.outside_frustum += 1,
                    Visibility::Visible(ndc) => match prepare_triangle(index as i32, ndc, width, height) {
                        Some(tri) => visible.push(tri),
                        None => stats.offscreen += 1,
                    },
                }
            }
            stats.rasterized = visible.len() as u64;
            stats.transform_time = transform_start.elapsed();

            let raster_start = Instant::now();
            stats.fragments = rasterize(screen, visible.as_slice(), *band_rows);
            stats.raster_time = raster_start.elapsed();

            let sample_start = Instant::now();
            shade(screen, model, texture);
            stats.sample_time = sample_start.elapsed();
        });

        stats.covered_pixels = self.screen.covered_pixels() as u64;
        stats.frame_time = frame_start.elapsed();
        tracing::trace!(
            back_facing = stats.back_facing,
            outside_frustum = stats.outside_frustum,
            degenerate = stats.degenerate,
            offscreen = stats.offscreen,
            "culling"
        );
        stats
    }
}
