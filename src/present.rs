//! Hand-off of finished frames to whatever displays or stores them.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum PresentError {
    #[error("frame holds {actual} bytes, expected {expected} for {width}x{height} RGB")]
    FrameSize { width: u32, height: u32, expected: usize, actual: usize },
    #[error("failed to write frame to {path}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("window error: {0}")]
    Window(String),
}

/// Receives each finished frame as row-major RGB, 3 bytes per pixel, no padding.
///
/// The slice is only borrowed for the duration of the call.
pub trait Presenter {
    fn present(&mut self, frame: &[u8], width: u32, height: u32) -> Result<(), PresentError>;

    /// Polled once per frame boundary; `true` ends the render loop.
    fn close_requested(&mut self) -> bool {
        false
    }

    /// Called once after the last frame.
    fn finish(&mut self) -> Result<(), PresentError> {
        Ok(())
    }
}

pub(crate) fn check_frame(frame: &[u8], width: u32, height: u32) -> Result<(), PresentError> {
    let expected = width as usize * height as usize * 3;
    if frame.len() != expected {
        return Err(PresentError::FrameSize { width, height, expected, actual: frame.len() });
    }
    Ok(())
}

/// Headless presenter: keeps the latest frame and writes it as an image file when the
/// loop finishes. The format follows the file extension.
pub struct ImagePresenter {
    path: PathBuf,
    last: Option<(Vec<u8>, u32, u32)>,
    presented: u64,
}

impl ImagePresenter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf(), last: None, presented: 0 }
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Presenter for ImagePresenter {
    fn present(&mut self, frame: &[u8], width: u32, height: u32) -> Result<(), PresentError> {
        check_frame(frame, width, height)?;
        match &mut self.last {
            Some((buf, w, h)) if buf.len() == frame.len() => {
                buf.copy_from_slice(frame);
                (*w, *h) = (width, height);
            }
            last => *last = Some((frame.to_vec(), width, height)),
        }
        self.presented += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), PresentError> {
        let Some((frame, width, height)) = &self.last else {
            tracing::warn!(path = %self.path.display(), "no frame to write");
            return Ok(());
        };
        image::save_buffer(&self.path, frame, *width, *height, image::ExtendedColorType::Rgb8)
            .map_err(|source| PresentError::Image { path: self.path.clone(), source })?;
        tracing::info!(path = %self.path.display(), width, height, "frame written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_frames_of_the_wrong_size() {
        let mut presenter = ImagePresenter::new("unused.png");
        let err = presenter.present(&[0; 11], 2, 2).unwrap_err();
        assert!(matches!(err, PresentError::FrameSize { expected: 12, actual: 11, .. }));
        assert_eq!(presenter.presented(), 0);
    }

    #[test]
    fn writes_the_last_frame() {
        let path = std::env::temp_dir().join(format!("softraster-present-{}.png", std::process::id()));
        let mut presenter = ImagePresenter::new(&path);
        presenter.present(&[10; 12], 2, 2).unwrap();
        presenter.present(&[200, 100, 50, 0, 0, 0, 0, 0, 0, 1, 2, 3], 2, 2).unwrap();
        presenter.finish().unwrap();

        let img = image::open(&path).unwrap().to_rgb8();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.get_pixel(0, 0).0, [200, 100, 50]);
        assert_eq!(img.get_pixel(1, 1).0, [1, 2, 3]);
    }
}
