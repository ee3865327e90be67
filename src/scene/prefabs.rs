use glam::{Vec2, Vec3};
use hecs::{Entity, World};
use rapier2d::prelude::{
    ColliderBuilder, RevoluteJointBuilder, RigidBodyBuilder, RigidBodyHandle, SharedShape, point,
    vector,
};

use crate::components::{Color, ShapeRef};
use crate::physics::PhysicsSpace;

/// Boundary walls, drawn black on the white background.
const WALL_COLOR: Vec3 = Vec3::new(0.0, 0.0, 0.0);
/// Shared by the obstacle stack and the pendulum bob.
const OBSTACLE_COLOR: Vec3 = Vec3::new(1.0, 0.39, 0.0);
const ROD_COLOR: Vec3 = Vec3::new(0.35, 0.35, 0.4);
const PROJECTILE_COLOR: Vec3 = Vec3::new(0.0, 0.59, 1.0);

const WALL_RESTITUTION: f32 = 0.4;
const WALL_FRICTION: f32 = 0.5;

const OBSTACLE_RESTITUTION: f32 = 0.4;
const OBSTACLE_FRICTION: f32 = 0.4;
const OBSTACLE_CORNER_RADIUS: f32 = 2.0;

const ROD_HALF_WIDTH: f32 = 5.0;
const ROD_LENGTH: f32 = 200.0;
const ROD_MASS: f32 = 8.0;
const BOB_RADIUS: f32 = 40.0;
const BOB_MASS: f32 = 30.0;
const BOB_RESTITUTION: f32 = 0.95;
const PENDULUM_FRICTION: f32 = 1.0;

const PROJECTILE_RADIUS: f32 = 30.0;
const PROJECTILE_MASS: f32 = 10.0;
const PROJECTILE_RESTITUTION: f32 = 0.9;
const PROJECTILE_FRICTION: f32 = 0.4;

/// Spawn one static boundary wall. `size` is the full box size.
pub fn spawn_wall(scene: &mut World, space: &mut PhysicsSpace, pos: Vec2, size: Vec2) -> Entity {
    let body = space.add_body(
        RigidBodyBuilder::fixed()
            .translation(vector![pos.x, pos.y])
            .build(),
    );
    let shape = space.add_shape(
        ColliderBuilder::cuboid(size.x / 2.0, size.y / 2.0)
            .restitution(WALL_RESTITUTION)
            .friction(WALL_FRICTION)
            .build(),
        body,
    );
    scene.spawn((ShapeRef(shape), Color(WALL_COLOR)))
}

/// Spawn one dynamic obstacle box. Nonzero mass: obstacles fall, topple, and
/// collide like everything else.
pub fn spawn_obstacle(
    scene: &mut World,
    space: &mut PhysicsSpace,
    pos: Vec2,
    size: Vec2,
    mass: f32,
) -> Entity {
    let body = space.add_body(
        RigidBodyBuilder::dynamic()
            .translation(vector![pos.x, pos.y])
            .build(),
    );
    let shape = space.add_shape(
        ColliderBuilder::round_cuboid(
            size.x / 2.0 - OBSTACLE_CORNER_RADIUS,
            size.y / 2.0 - OBSTACLE_CORNER_RADIUS,
            OBSTACLE_CORNER_RADIUS,
        )
        .mass(mass)
        .restitution(OBSTACLE_RESTITUTION)
        .friction(OBSTACLE_FRICTION)
        .build(),
        body,
    );
    scene.spawn((ShapeRef(shape), Color(OBSTACLE_COLOR)))
}

/// Spawn the pendulum: a static anchor, a dynamic body carrying the rod and
/// the bob, and a pivot joint at both bodies' local origins. Returns the
/// swinging body's handle.
pub fn spawn_pendulum(scene: &mut World, space: &mut PhysicsSpace, at: Vec2) -> RigidBodyHandle {
    let anchor = space.add_body(
        RigidBodyBuilder::fixed()
            .translation(vector![at.x, at.y])
            .build(),
    );
    let arm = space.add_body(
        RigidBodyBuilder::dynamic()
            .translation(vector![at.x, at.y])
            .build(),
    );

    let rod = space.add_shape(
        ColliderBuilder::new(SharedShape::capsule(
            point![0.0, 0.0],
            point![0.0, ROD_LENGTH],
            ROD_HALF_WIDTH,
        ))
        .mass(ROD_MASS)
        .friction(PENDULUM_FRICTION)
        .build(),
        arm,
    );
    let bob = space.add_shape(
        ColliderBuilder::ball(BOB_RADIUS)
            .translation(vector![0.0, ROD_LENGTH])
            .mass(BOB_MASS)
            .restitution(BOB_RESTITUTION)
            .friction(PENDULUM_FRICTION)
            .build(),
        arm,
    );

    space.add_joint(
        anchor,
        arm,
        RevoluteJointBuilder::new()
            .local_anchor1(point![0.0, 0.0])
            .local_anchor2(point![0.0, 0.0]),
    );

    scene.spawn((ShapeRef(rod), Color(ROD_COLOR)));
    scene.spawn((ShapeRef(bob), Color(OBSTACLE_COLOR)));
    arm
}

/// Spawn a provisional projectile at the press position. The body starts
/// static — inert while being aimed — and is flipped to dynamic at launch.
pub fn spawn_projectile(
    scene: &mut World,
    space: &mut PhysicsSpace,
    pos: Vec2,
) -> (RigidBodyHandle, Entity) {
    let body = space.add_body(
        RigidBodyBuilder::fixed()
            .translation(vector![pos.x, pos.y])
            .build(),
    );
    let shape = space.add_shape(
        ColliderBuilder::ball(PROJECTILE_RADIUS)
            .mass(PROJECTILE_MASS)
            .restitution(PROJECTILE_RESTITUTION)
            .friction(PROJECTILE_FRICTION)
            .build(),
        body,
    );
    let entity = scene.spawn((ShapeRef(shape), Color(PROJECTILE_COLOR)));
    (body, entity)
}
