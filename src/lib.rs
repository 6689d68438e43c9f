//! A multi-threaded CPU triangle rasterizer: transform, visibility filter, edge-function
//! rasterization with a depth test, and bilinear texture sampling into an RGB frame.

pub mod camera;
pub mod geometry;
pub mod matrix;
pub mod model;
pub mod obj;
pub mod pipeline;
pub mod point2d;
pub mod point3d;
pub mod present;
pub mod raster;
pub mod rectangle;
pub mod render_loop;
pub mod sampler;
pub mod screen;
pub mod stats;
pub mod texture;
pub mod transform;
pub mod triangle;
#[cfg(feature = "window")]
pub mod window;

pub use camera::Camera;
pub use model::{Mesh, Model, Vertex};
pub use pipeline::{RenderError, Renderer};
pub use present::{ImagePresenter, PresentError, Presenter};
pub use render_loop::{LoopState, RenderLoop, Scene};
pub use stats::FrameStats;
pub use texture::Texture;
pub use transform::Transform;
