//! raylib window presenter.

use raylib::prelude::*;

use crate::present::{PresentError, Presenter, check_frame};

/// Shows each frame in a window, stretched to the current window size.
pub struct WindowPresenter {
    // Dropped before the handle so the GPU texture is released while the context lives.
    texture: Texture2D,
    rgba: Vec<[u8; 4]>,
    width: u32,
    height: u32,
    r1: RaylibHandle,
    thread: RaylibThread,
}

impl WindowPresenter {
    pub fn open(width: u32, height: u32, title: &str) -> Result<Self, PresentError> {
        let (mut r1, thread) = raylib::init()
            .size(width as i32, height as i32)
            .title(title)
            .resizable()
            .build();
        let image = Image::gen_image_color(width as i32, height as i32, Color::BLACK);
        let texture = r1
            .load_texture_from_image(&thread, &image)
            .map_err(|e| PresentError::Window(e.to_string()))?;
        Ok(Self {
            texture,
            rgba: vec![[0, 0, 0, 255]; (width * height) as usize],
            width,
            height,
            r1,
            thread,
        })
    }
}

impl Presenter for WindowPresenter {
    fn present(&mut self, frame: &[u8], width: u32, height: u32) -> Result<(), PresentError> {
        check_frame(frame, width, height)?;
        if (width, height) != (self.width, self.height) {
            return Err(PresentError::Window(format!(
                "frame is {width}x{height} but the window texture is {}x{}",
                self.width, self.height
            )));
        }
        // Texture is RGBA8; alpha stays opaque.
        for (dst, src) in self.rgba.iter_mut().zip(frame.chunks_exact(3)) {
            dst[..3].copy_from_slice(src);
        }
        self.texture
            .update_texture(bytemuck::cast_slice(&self.rgba))
            .map_err(|e| PresentError::Window(e.to_string()))?;

        let window_width = self.r1.get_screen_width();
        let window_height = self.r1.get_screen_height();
        let mut d = self.r1.begin_drawing(&self.thread);
        d.clear_background(Color::BLACK);
        d.draw_texture_pro(
            &self.texture,
            Rectangle { x: 0.0, y: 0.0, width: width as f32, height: height as f32 },
            Rectangle { x: 0.0, y: 0.0, width: window_width as f32, height: window_height as f32 },
            Vector2 { x: 0.0, y: 0.0 },
            0.0,
            Color::WHITE,
        );
        Ok(())
    }

    fn close_requested(&mut self) -> bool {
        self.r1.window_should_close() || self.r1.is_key_pressed(KeyboardKey::KEY_ESCAPE)
    }
}
