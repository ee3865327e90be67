pub mod prefabs;
mod sandbox;

pub use sandbox::build_sandbox;

use glam::Vec2;
use hecs::World;

use crate::components::{Color, ShapeRef};
use crate::physics::PhysicsSpace;
use crate::renderer::{SceneSnapshot, ShapeView};

/// Build the read-only description of the current frame for the renderer:
/// the world-space outline and color of every registered shape, plus the aim
/// line while a launch is being aimed.
pub fn snapshot_scene(
    scene: &World,
    space: &PhysicsSpace,
    aim_line: Option<(Vec2, Vec2)>,
) -> SceneSnapshot {
    let mut shapes = Vec::new();
    for (_entity, (shape, color)) in scene.query::<(&ShapeRef, &Color)>().iter() {
        if let Some(outline) = space.shape_outline(shape.0) {
            shapes.push(ShapeView {
                outline,
                color: color.0,
            });
        }
    }
    SceneSnapshot { shapes, aim_line }
}
