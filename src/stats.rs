use std::time::Duration;

/// Counters and stage timings for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameStats {
    pub triangles: u64,
    /// Dropped by the transform stage: a corner with w <= 0.
    pub degenerate: u64,
    pub back_facing: u64,
    pub outside_frustum: u64,
    /// Passed the visibility filter but its bounding box misses the screen.
    pub offscreen: u64,
    pub rasterized: u64,
    /// Samples that passed the depth test, overdraw included.
    pub fragments: u64,
    pub covered_pixels: u64,
    pub transform_time: Duration,
    pub raster_time: Duration,
    pub sample_time: Duration,
    pub frame_time: Duration,
}

impl FrameStats {
    pub fn culled(&self) -> u64 {
        self.degenerate + self.back_facing + self.outside_frustum + self.offscreen
    }
}

/// Timing history over a whole run, one sample per frame per stage.
#[derive(Debug, Default)]
pub struct StatsSummary {
    transform_times: Vec<Duration>,
    raster_times: Vec<Duration>,
    sample_times: Vec<Duration>,
    frame_times: Vec<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageTiming {
    pub mean: Duration,
    pub min: Duration,
    pub max: Duration,
}

fn timing(samples: &[Duration]) -> Option<StageTiming> {
    let min = samples.iter().min().copied()?;
    let max = samples.iter().max().copied()?;
    let total: Duration = samples.iter().sum();
    Some(StageTiming { mean: total / samples.len() as u32, min, max })
}

impl StatsSummary {
    pub fn record(&mut self, stats: &FrameStats) {
        self.transform_times.push(stats.transform_time);
        self.raster_times.push(stats.raster_time);
        self.sample_times.push(stats.sample_time);
        self.frame_times.push(stats.frame_time);
    }

    pub fn frames(&self) -> usize {
        self.frame_times.len()
    }

    pub fn transform(&self) -> Option<StageTiming> {
        timing(&self.transform_times)
    }

    pub fn raster(&self) -> Option<StageTiming> {
        timing(&self.raster_times)
    }

    pub fn sample(&self) -> Option<StageTiming> {
        timing(&self.sample_times)
    }

    pub fn frame(&self) -> Option<StageTiming> {
        timing(&self.frame_times)
    }

    pub fn log(&self) {
        let Some(frame) = self.frame() else {
            tracing::info!("no frames rendered");
            return;
        };
        let mean = |t: Option<StageTiming>| t.map(|t| t.mean).unwrap_or_default();
        tracing::info!(
            frames = self.frames(),
            frame_mean = ?frame.mean,
            frame_min = ?frame.min,
            frame_max = ?frame.max,
            transform_mean = ?mean(self.transform()),
            raster_mean = ?mean(self.raster()),
            sample_mean = ?mean(self.sample()),
            "render summary"
        );
    }
}
