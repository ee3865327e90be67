use glam::Vec2;
use hecs::World;
use tracing::info;

use super::prefabs::{spawn_obstacle, spawn_pendulum, spawn_wall};
use crate::physics::PhysicsSpace;

/// Wall thickness; outer edges sit flush with the viewport edges.
const WALL_THICKNESS: f32 = 10.0;

/// Build the startup scene: the boundary box, the obstacle stack, and the
/// pendulum. Side effects only — everything lands in the engine and the
/// scene registry.
pub fn build_sandbox(scene: &mut World, space: &mut PhysicsSpace, width: f32, height: f32) {
    let half = WALL_THICKNESS / 2.0;
    let walls = [
        (
            Vec2::new(width / 2.0, height - half),
            Vec2::new(width, WALL_THICKNESS),
        ),
        (Vec2::new(width / 2.0, half), Vec2::new(width, WALL_THICKNESS)),
        (Vec2::new(half, height / 2.0), Vec2::new(WALL_THICKNESS, height)),
        (
            Vec2::new(width - half, height / 2.0),
            Vec2::new(WALL_THICKNESS, height),
        ),
    ];
    for (pos, size) in walls {
        spawn_wall(scene, space, pos, size);
    }

    // Two posts and a beam resting across them.
    spawn_obstacle(
        scene,
        space,
        Vec2::new(600.0, height - 120.0),
        Vec2::new(40.0, 200.0),
        100.0,
    );
    spawn_obstacle(
        scene,
        space,
        Vec2::new(900.0, height - 120.0),
        Vec2::new(40.0, 200.0),
        100.0,
    );
    spawn_obstacle(
        scene,
        space,
        Vec2::new(750.0, height - 240.0),
        Vec2::new(340.0, 40.0),
        150.0,
    );

    spawn_pendulum(scene, space, Vec2::new(300.0, 300.0));

    info!(width, height, "sandbox built");
}
