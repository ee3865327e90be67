use anyhow::{anyhow, Result};
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::Sdl;

/// The host window plus the canvas the debug renderer draws into.
pub struct SandboxWindow {
    canvas: Canvas<Window>,
}

impl SandboxWindow {
    pub fn new(sdl: &Sdl, title: &str, width: u32, height: u32) -> Result<Self> {
        let video = sdl
            .video()
            .map_err(|e| anyhow!("failed to init SDL2 video: {e}"))?;

        let window = video
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| anyhow!("failed to create window: {e}"))?;

        let canvas = window
            .into_canvas()
            .build()
            .map_err(|e| anyhow!("failed to create canvas: {e}"))?;

        Ok(Self { canvas })
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas<Window> {
        &mut self.canvas
    }
}
