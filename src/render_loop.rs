//! Frame-lockstep render loop with an explicit termination path.

use crate::camera::Camera;
use crate::matrix::Mat4;
use crate::model::Model;
use crate::pipeline::Renderer;
use crate::present::{PresentError, Presenter};
use crate::stats::StatsSummary;
use crate::texture::Texture;
use crate::transform::Transform;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// The presenter asked to stop.
    CloseRequested,
    FrameLimitReached,
    /// The presenter has been finished; nothing more will be drawn.
    Finished,
}

/// Everything drawn each frame: one model under one camera.
pub struct Scene {
    pub model: Model,
    pub texture: Texture,
    pub camera: Camera,
    pub placement: Transform,
}

impl Scene {
    pub fn model_view_projection(&self) -> Mat4 {
        self.camera.model_view_projection(&self.placement)
    }
}

/// Drives the renderer one whole frame at a time. Stop conditions are only checked
/// between frames, never while one is being drawn.
pub struct RenderLoop<P: Presenter> {
    renderer: Renderer,
    presenter: P,
    frame_limit: Option<u64>,
    frames: u64,
    state: LoopState,
    summary: StatsSummary,
}

impl<P: Presenter> RenderLoop<P> {
    pub fn new(renderer: Renderer, presenter: P, frame_limit: Option<u64>) -> Self {
        Self { renderer, presenter, frame_limit, frames: 0, state: LoopState::Running, summary: StatsSummary::default() }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn summary(&self) -> &StatsSummary {
        &self.summary
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Frame-boundary check that moves a running loop into a stop state.
    fn poll(&mut self) {
        if self.state != LoopState::Running {
            return;
        }
        if self.frame_limit.is_some_and(|limit| self.frames >= limit) {
            self.state = LoopState::FrameLimitReached;
        } else if self.presenter.close_requested() {
            self.state = LoopState::CloseRequested;
        }
    }

    /// Renders and presents a single frame if the loop is still running.
    /// Returns the state after the frame boundary check.
    pub fn step(&mut self, scene: &Scene) -> Result<LoopState, PresentError> {
        self.poll();
        if self.state != LoopState::Running {
            return Ok(self.state);
        }

        let mvp = scene.model_view_projection();
        let stats = self.renderer.render_frame(&scene.model, &scene.texture, &mvp);
        self.presenter.present(self.renderer.frame(), self.renderer.width(), self.renderer.height())?;
        self.frames += 1;
        self.summary.record(&stats);
        tracing::debug!(
            frame = self.frames,
            rasterized = stats.rasterized,
            culled = stats.culled(),
            covered = stats.covered_pixels,
            frame_time = ?stats.frame_time,
            "frame"
        );

        self.poll();
        Ok(self.state)
    }

    /// Runs until a stop condition, then finishes the presenter.
    pub fn run(&mut self, scene: &Scene) -> Result<LoopState, PresentError> {
        while self.step(scene)? == LoopState::Running {}
        let reason = self.state;
        self.finish()?;
        tracing::info!(frames = self.frames, ?reason, "render loop stopped");
        Ok(reason)
    }

    pub fn finish(&mut self) -> Result<(), PresentError> {
        if self.state == LoopState::Finished {
            return Ok(());
        }
        self.state = LoopState::Finished;
        self.presenter.finish()
    }
}
