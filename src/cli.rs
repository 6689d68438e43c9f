use std::path::PathBuf;

use anyhow::{Result, ensure};
use clap::ValueHint;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum LogFormat {
    Compact,
    Full,
    Pretty,
    Json,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Compact => f.write_str("compact"),
            LogFormat::Full => f.write_str("full"),
            LogFormat::Pretty => f.write_str("pretty"),
            LogFormat::Json => f.write_str("json"),
        }
    }
}

#[derive(Debug, clap::Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Logging output filters; comma-separated
    #[arg(short, long, default_value = "warn,softraster=info", env = "SOFTRASTER_LOG_FILTER")]
    pub log_filter: String,
    /// Logging output format
    #[arg(long, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
    /// Render target width in pixels
    #[arg(long, default_value_t = 720, env = "SOFTRASTER_WIDTH")]
    pub width: u32,
    /// Render target height in pixels
    #[arg(long, default_value_t = 480, env = "SOFTRASTER_HEIGHT")]
    pub height: u32,
    /// Wavefront OBJ model to draw
    #[arg(short, long, value_hint = ValueHint::FilePath, env = "SOFTRASTER_MODEL")]
    pub model: PathBuf,
    /// Image used as the model's texture
    #[arg(short, long, value_hint = ValueHint::FilePath, env = "SOFTRASTER_TEXTURE")]
    pub texture: PathBuf,
    /// Where the last headless frame is written; format follows the extension
    #[arg(short, long, default_value = "frame.png", value_hint = ValueHint::FilePath)]
    pub output: PathBuf,
    /// Number of frames to render when running headless
    #[arg(long, default_value_t = 1)]
    pub frames: u64,
    /// Worker threads; defaults to the number of logical cores
    #[arg(long, env = "SOFTRASTER_THREADS")]
    pub threads: Option<usize>,
    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 45.0)]
    pub fov: f32,
    #[arg(long, default_value_t = 0.1)]
    pub near: f32,
    #[arg(long, default_value_t = 100.0)]
    pub far: f32,
    /// Distance from the camera to the model along -Z
    #[arg(long, default_value_t = 5.0)]
    pub model_distance: f32,
    /// Rotation of the model around the view axis, in degrees
    #[arg(long, default_value_t = 180.0, allow_negative_numbers = true)]
    pub model_roll: f32,
    /// Present frames in a window until it is closed
    #[cfg(feature = "window")]
    #[arg(long)]
    pub window: bool,
}

impl Cli {
    pub fn threads(&self) -> usize {
        self.threads.unwrap_or_else(num_cpus::get)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.width > 0 && self.height > 0, "render target must be at least 1x1, got {}x{}", self.width, self.height);
        ensure!(self.threads() > 0, "thread count must be positive");
        ensure!(self.fov > 0.0 && self.fov < 180.0, "field of view must be between 0 and 180 degrees, got {}", self.fov);
        ensure!(
            self.near > 0.0 && self.far > self.near,
            "clip planes need 0 < near < far, got near={} far={}",
            self.near,
            self.far
        );
        Ok(())
    }
}

/// Set up log output on stderr
pub(crate) fn initialize_tracing(log_filter: &str, log_format: LogFormat) {
    let tsub = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_thread_names(true)
        .with_env_filter(log_filter);

    match log_format {
        LogFormat::Compact => tsub.compact().init(),
        LogFormat::Full => tsub.init(),
        LogFormat::Pretty => tsub.pretty().init(),
        LogFormat::Json => tsub.json().init(),
    }
}
