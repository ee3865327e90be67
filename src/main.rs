mod app;
mod components;
mod engine;
mod physics;
mod renderer;
mod scene;
mod systems;

use anyhow::{anyhow, Result};
use clap::Parser;

use app::SandboxApp;
use engine::window::SandboxWindow;

#[derive(Parser)]
#[command(name = "marble", about = "Interactive rigid-body sandbox")]
struct Args {
    /// Playfield width in pixels
    #[arg(long, default_value_t = 1000)]
    width: u32,
    /// Playfield height in pixels
    #[arg(long, default_value_t = 800)]
    height: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let sdl = sdl2::init().map_err(|e| anyhow!("failed to init SDL2: {e}"))?;
    let mut window = SandboxWindow::new(
        &sdl,
        "Interactive Physics Simulation",
        args.width,
        args.height,
    )?;

    let mut app = SandboxApp::new(args.width as f32, args.height as f32);
    app.run(&sdl, &mut window)
}
