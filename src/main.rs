use anyhow::{Context, Result};
use clap::Parser;

use softraster::obj::load_obj;
use softraster::point3d::Point3D;
use softraster::{Camera, ImagePresenter, Presenter, RenderLoop, Renderer, Scene, Texture, Transform};

mod cli;

use crate::cli::{Cli, initialize_tracing};

fn run_loop<P: Presenter>(renderer: Renderer, presenter: P, frame_limit: Option<u64>, scene: &Scene) -> Result<()> {
    let mut render_loop = RenderLoop::new(renderer, presenter, frame_limit);
    render_loop.run(scene).context("presenting frames")?;
    render_loop.summary().log();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(&cli.log_filter, cli.log_format);
    cli.validate()?;

    let threads = cli.threads();
    tracing::info!(threads, width = cli.width, height = cli.height, "starting");

    let model = load_obj(&cli.model)?;
    let texture = Texture::load(&cli.texture).with_context(|| format!("loading texture {}", cli.texture.display()))?;
    tracing::info!(
        path = %cli.texture.display(),
        width = texture.width,
        height = texture.height,
        channels = texture.channels,
        "texture loaded"
    );

    let scene = Scene {
        model,
        texture,
        camera: Camera::new(cli.fov.to_radians(), cli.width as f32 / cli.height as f32, cli.near, cli.far),
        placement: Transform {
            position: Point3D::new(0.0, 0.0, -cli.model_distance),
            axis: Point3D::new(0.0, 0.0, 1.0),
            angle: cli.model_roll.to_radians(),
        },
    };

    let renderer = Renderer::new(cli.width, cli.height, threads)?;

    #[cfg(feature = "window")]
    if cli.window {
        let presenter = softraster::window::WindowPresenter::open(cli.width, cli.height, "softraster")?;
        return run_loop(renderer, presenter, None, &scene);
    }

    run_loop(renderer, ImagePresenter::new(&cli.output), Some(cli.frames), &scene)
}
