use std::time::Duration;

use anyhow::{anyhow, Result};
use glam::Vec2;
use hecs::World;
use sdl2::Sdl;
use tracing::info;

use crate::engine::input::{drain_events, PointerEvent};
use crate::engine::time::FramePacer;
use crate::engine::window::SandboxWindow;
use crate::physics::{PhysicsSpace, PHYSICS_DT};
use crate::renderer::{self, SceneSnapshot};
use crate::scene::{build_sandbox, snapshot_scene};
use crate::systems::Interaction;

/// Downward, screen-space Y increasing downward.
const GRAVITY: Vec2 = Vec2::new(0.0, 981.0);

/// Whether the frame loop should keep running after an event batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopFlow {
    Continue,
    Quit,
}

/// Owns all per-process simulation state: the physics façade, the scene
/// registry, and the interaction controller. Constructed once in `main`;
/// nothing in the crate is process-global.
pub struct SandboxApp {
    space: PhysicsSpace,
    scene: World,
    interaction: Interaction,
}

impl SandboxApp {
    pub fn new(width: f32, height: f32) -> Self {
        let mut space = PhysicsSpace::new(GRAVITY);
        let mut scene = World::new();
        build_sandbox(&mut scene, &mut space, width, height);
        let interaction = Interaction::new(&mut space);
        Self {
            space,
            scene,
            interaction,
        }
    }

    /// One frame of simulation: apply the event batch in arrival order, then
    /// advance the engine by exactly one fixed timestep. A quit event stops
    /// the draining (the rest of the batch is dropped) but the frame still
    /// steps, so the final render reflects it.
    pub fn advance(&mut self, events: &[PointerEvent]) -> LoopFlow {
        let mut flow = LoopFlow::Continue;
        for &event in events {
            if event == PointerEvent::Quit {
                flow = LoopFlow::Quit;
                break;
            }
            self.interaction
                .handle_event(event, &mut self.space, &mut self.scene);
        }
        self.space.step();
        flow
    }

    /// Read-only scene description for the renderer, reflecting the state
    /// after this frame's events and step.
    pub fn snapshot(&self) -> SceneSnapshot {
        snapshot_scene(&self.scene, &self.space, self.interaction.aim_line())
    }

    /// The frame loop: drain events → advance → snapshot → render → pace.
    pub fn run(&mut self, sdl: &Sdl, window: &mut SandboxWindow) -> Result<()> {
        let mut event_pump = sdl
            .event_pump()
            .map_err(|e| anyhow!("failed to get event pump: {e}"))?;
        let mut pacer = FramePacer::new(Duration::from_secs_f32(PHYSICS_DT));

        loop {
            let events = drain_events(&mut event_pump);
            let flow = self.advance(&events);

            let snapshot = self.snapshot();
            renderer::draw(window.canvas_mut(), &snapshot)?;

            if flow == LoopFlow::Quit {
                info!("quit requested");
                return Ok(());
            }
            pacer.pace();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_events_and_step_of_the_same_frame() {
        let mut app = SandboxApp::new(1000.0, 800.0);
        let baseline = app.snapshot().shapes.len();

        let flow = app.advance(&[PointerEvent::Press(Vec2::new(450.0, 150.0))]);

        assert_eq!(flow, LoopFlow::Continue);
        let snapshot = app.snapshot();
        assert_eq!(snapshot.shapes.len(), baseline + 1);
        assert!(snapshot.aim_line.is_some());
    }

    #[test]
    fn aim_line_tracks_the_latest_pointer_position() {
        let mut app = SandboxApp::new(1000.0, 800.0);
        app.advance(&[
            PointerEvent::Press(Vec2::new(450.0, 150.0)),
            PointerEvent::Move(Vec2::new(520.0, 220.0)),
        ]);

        let (from, to) = app.snapshot().aim_line.expect("aiming");
        assert_eq!(from, Vec2::new(450.0, 150.0));
        assert_eq!(to, Vec2::new(520.0, 220.0));
    }

    #[test]
    fn quit_drops_the_rest_of_the_batch() {
        let mut app = SandboxApp::new(1000.0, 800.0);
        let baseline = app.snapshot().shapes.len();

        let flow = app.advance(&[
            PointerEvent::Quit,
            PointerEvent::Press(Vec2::new(450.0, 150.0)),
        ]);

        assert_eq!(flow, LoopFlow::Quit);
        assert_eq!(app.snapshot().shapes.len(), baseline);
    }

    #[test]
    fn batched_events_apply_cumulatively_before_the_step() {
        let mut app = SandboxApp::new(1000.0, 800.0);
        let baseline = app.snapshot().shapes.len();

        // Spawn, aim, and launch within a single frame's batch.
        let flow = app.advance(&[
            PointerEvent::Press(Vec2::new(450.0, 150.0)),
            PointerEvent::Move(Vec2::new(500.0, 150.0)),
            PointerEvent::Release,
        ]);

        assert_eq!(flow, LoopFlow::Continue);
        let snapshot = app.snapshot();
        assert_eq!(snapshot.shapes.len(), baseline + 1);
        // The launch already happened, so no aim line survives the frame.
        assert!(snapshot.aim_line.is_none());
    }
}
