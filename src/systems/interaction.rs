use glam::Vec2;
use hecs::{Entity, World};
use rapier2d::prelude::{
    GenericJointBuilder, ImpulseJointHandle, JointAxesMask, JointAxis, MotorModel,
    RigidBodyBuilder, RigidBodyHandle, point,
};
use tracing::{debug, warn};

use crate::engine::input::PointerEvent;
use crate::physics::{BodyKind, PhysicsSpace};
use crate::scene::prefabs::spawn_projectile;

/// Force cap on the drag joint. Heavy bodies can be pushed around but not
/// yanked through the scene.
const DRAG_MAX_FORCE: f32 = 5000.0;
const DRAG_STIFFNESS: f32 = 1000.0;
const DRAG_DAMPING: f32 = 100.0;

/// Impulse per unit of pull distance at launch.
const LAUNCH_FORCE_PER_UNIT: f32 = 50.0;

/// What the pointer is currently manipulating. At most one manipulation is in
/// progress; both release paths return to `Idle`.
#[derive(Clone, Copy, Debug)]
pub enum InteractionState {
    Idle,
    /// An existing dynamic body is towed by a transient joint between the
    /// cursor body and the grab point. The joint is created on entry and
    /// destroyed on exit, always as a pair.
    Dragging {
        target: RigidBodyHandle,
        joint: ImpulseJointHandle,
    },
    /// A provisional projectile sits inert at `origin` while the launch
    /// vector is aimed. `abandoned` is set if a second press arrives mid-aim;
    /// the release then discards the projectile instead of launching it.
    Aiming {
        projectile: RigidBodyHandle,
        entity: Entity,
        origin: Vec2,
        abandoned: bool,
    },
}

/// Maps pointer events onto engine mutations. Owns the manipulation state and
/// the kinematic cursor body that anchors drag joints.
pub struct Interaction {
    state: InteractionState,
    cursor: RigidBodyHandle,
    pointer: Vec2,
}

impl Interaction {
    /// The cursor body carries no shape, so it never collides; it exists only
    /// to anchor the drag joint.
    pub fn new(space: &mut PhysicsSpace) -> Self {
        let cursor = space.add_body(RigidBodyBuilder::kinematic_position_based().build());
        Self {
            state: InteractionState::Idle,
            cursor,
            pointer: Vec2::ZERO,
        }
    }

    #[allow(dead_code)]
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Aim indicator from the launch origin to the latest pointer position.
    pub fn aim_line(&self) -> Option<(Vec2, Vec2)> {
        match self.state {
            InteractionState::Aiming { origin, .. } => Some((origin, self.pointer)),
            _ => None,
        }
    }

    /// Feed one pointer event through the transition table. A (state, event)
    /// pair with no matching row leaves both the state and the engine
    /// untouched.
    pub fn handle_event(&mut self, event: PointerEvent, space: &mut PhysicsSpace, scene: &mut World) {
        if let PointerEvent::Press(p) | PointerEvent::Move(p) = event {
            self.pointer = p;
        }

        self.state = match (self.state, event) {
            (InteractionState::Idle, PointerEvent::Press(p)) => self.press(p, space, scene),

            (InteractionState::Dragging { target, joint }, PointerEvent::Move(p)) => {
                space.move_kinematic(self.cursor, p);
                InteractionState::Dragging { target, joint }
            }
            (InteractionState::Dragging { joint, .. }, PointerEvent::Release) => {
                space.remove_joint(joint);
                debug!("drag released");
                InteractionState::Idle
            }

            (
                InteractionState::Aiming {
                    projectile,
                    entity,
                    origin,
                    ..
                },
                PointerEvent::Press(_),
            ) => {
                // Unreachable with a single-button pointer; a second press
                // means the host event stream is inconsistent, so the aim is
                // written off rather than launched.
                warn!("press received while already aiming; abandoning the aim");
                InteractionState::Aiming {
                    projectile,
                    entity,
                    origin,
                    abandoned: true,
                }
            }
            (
                InteractionState::Aiming {
                    projectile,
                    entity,
                    origin,
                    abandoned,
                },
                PointerEvent::Release,
            ) => self.release_aim(projectile, entity, origin, abandoned, space, scene),

            (state, _) => state,
        };
    }

    /// Press while idle: grab the dynamic body under the pointer, or spawn a
    /// projectile over empty space. A press over only static/kinematic shapes
    /// is swallowed.
    fn press(&mut self, p: Vec2, space: &mut PhysicsSpace, scene: &mut World) -> InteractionState {
        match space.nearest_shape_at(p) {
            Some(shape) => {
                let body = space
                    .shape_parent(shape)
                    .expect("queried shape has no body");
                if space.body_kind(body) != BodyKind::Dynamic {
                    return InteractionState::Idle;
                }

                space.teleport_kinematic(self.cursor, p);
                let offset = space.world_to_local(body, p);
                let joint = GenericJointBuilder::new(JointAxesMask::empty())
                    .local_anchor1(point![0.0, 0.0])
                    .local_anchor2(point![offset.x, offset.y])
                    .motor_model(JointAxis::LinX, MotorModel::ForceBased)
                    .motor_model(JointAxis::LinY, MotorModel::ForceBased)
                    .motor_position(JointAxis::LinX, 0.0, DRAG_STIFFNESS, DRAG_DAMPING)
                    .motor_position(JointAxis::LinY, 0.0, DRAG_STIFFNESS, DRAG_DAMPING)
                    .motor_max_force(JointAxis::LinX, DRAG_MAX_FORCE)
                    .motor_max_force(JointAxis::LinY, DRAG_MAX_FORCE)
                    .build();
                let joint = space.add_joint(self.cursor, body, joint);
                debug!(?body, "drag started");
                InteractionState::Dragging {
                    target: body,
                    joint,
                }
            }
            None => {
                let (projectile, entity) = spawn_projectile(scene, space, p);
                debug!(x = p.x, y = p.y, "projectile spawned");
                InteractionState::Aiming {
                    projectile,
                    entity,
                    origin: p,
                    abandoned: false,
                }
            }
        }
    }

    /// Release while aiming: launch along origin→pointer, or discard an
    /// abandoned aim entirely.
    fn release_aim(
        &mut self,
        projectile: RigidBodyHandle,
        entity: Entity,
        origin: Vec2,
        abandoned: bool,
        space: &mut PhysicsSpace,
        scene: &mut World,
    ) -> InteractionState {
        if abandoned {
            space.remove_body(projectile);
            scene.despawn(entity).expect("aiming entity vanished");
            debug!("abandoned projectile removed");
            return InteractionState::Idle;
        }

        let pull = self.pointer - origin;
        let angle = pull.y.atan2(pull.x);
        let force = origin.distance(self.pointer) * LAUNCH_FORCE_PER_UNIT;
        let impulse = Vec2::new(angle.cos() * force, angle.sin() * force);

        // The projectile must be dynamic before the impulse, or the impulse
        // is lost against infinite mass.
        space.set_body_kind(projectile, BodyKind::Dynamic);
        space.apply_impulse_at_local_point(projectile, impulse, Vec2::ZERO);
        debug!(force, "projectile launched");
        InteractionState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::scene::prefabs::{spawn_projectile, spawn_wall};

    struct Fixture {
        space: PhysicsSpace,
        scene: World,
        interaction: Interaction,
    }

    fn fixture() -> Fixture {
        let mut space = PhysicsSpace::new(Vec2::new(0.0, 981.0));
        let scene = World::new();
        let interaction = Interaction::new(&mut space);
        Fixture {
            space,
            scene,
            interaction,
        }
    }

    impl Fixture {
        fn feed(&mut self, events: &[PointerEvent]) {
            for &event in events {
                self.interaction
                    .handle_event(event, &mut self.space, &mut self.scene);
            }
        }

        /// A launched ball to grab in drag tests.
        fn add_dynamic_ball(&mut self, pos: Vec2) -> RigidBodyHandle {
            let (body, _) = spawn_projectile(&mut self.scene, &mut self.space, pos);
            self.space.set_body_kind(body, BodyKind::Dynamic);
            body
        }

        fn counts(&self) -> (usize, usize, usize) {
            (
                self.space.body_count(),
                self.space.shape_count(),
                self.space.joint_count(),
            )
        }
    }

    #[test]
    fn press_on_empty_space_spawns_a_static_projectile() {
        let mut fx = fixture();
        let before = fx.counts();

        fx.feed(&[PointerEvent::Press(Vec2::new(400.0, 300.0))]);

        let InteractionState::Aiming {
            projectile,
            origin,
            abandoned,
            ..
        } = *fx.interaction.state()
        else {
            panic!("expected Aiming");
        };
        assert!(!abandoned);
        assert_eq!(origin, Vec2::new(400.0, 300.0));
        assert_eq!(fx.space.body_kind(projectile), BodyKind::Static);
        assert_eq!(fx.counts(), (before.0 + 1, before.1 + 1, before.2));
    }

    #[test]
    fn press_on_a_dynamic_body_starts_a_drag() {
        let mut fx = fixture();
        let ball = fx.add_dynamic_ball(Vec2::new(400.0, 300.0));
        let before = fx.counts();

        fx.feed(&[PointerEvent::Press(Vec2::new(410.0, 300.0))]);

        let InteractionState::Dragging { target, .. } = *fx.interaction.state() else {
            panic!("expected Dragging");
        };
        assert_eq!(target, ball);
        assert_eq!(fx.counts(), (before.0, before.1, before.2 + 1));
    }

    #[test]
    fn drag_release_destroys_exactly_the_one_joint() {
        let mut fx = fixture();
        fx.add_dynamic_ball(Vec2::new(400.0, 300.0));
        let before = fx.counts();

        fx.feed(&[
            PointerEvent::Press(Vec2::new(400.0, 300.0)),
            PointerEvent::Release,
        ]);

        assert!(matches!(fx.interaction.state(), InteractionState::Idle));
        assert_eq!(fx.counts(), before);
    }

    #[test]
    fn drag_survives_any_number_of_moves_without_leaking() {
        let mut fx = fixture();
        fx.add_dynamic_ball(Vec2::new(400.0, 300.0));
        let before = fx.counts();

        fx.feed(&[PointerEvent::Press(Vec2::new(400.0, 300.0))]);
        for i in 0..25 {
            fx.feed(&[PointerEvent::Move(Vec2::new(400.0 + i as f32 * 7.0, 280.0))]);
            fx.space.step();
            assert!(matches!(
                fx.interaction.state(),
                InteractionState::Dragging { .. }
            ));
        }
        fx.feed(&[PointerEvent::Release]);

        assert!(matches!(fx.interaction.state(), InteractionState::Idle));
        assert_eq!(fx.counts(), before);
    }

    #[test]
    fn press_over_a_static_shape_is_swallowed() {
        let mut fx = fixture();
        spawn_wall(
            &mut fx.scene,
            &mut fx.space,
            Vec2::new(100.0, 100.0),
            Vec2::new(10.0, 200.0),
        );
        let before = fx.counts();

        fx.feed(&[PointerEvent::Press(Vec2::new(100.0, 100.0))]);

        assert!(matches!(fx.interaction.state(), InteractionState::Idle));
        assert_eq!(fx.counts(), before);
    }

    #[test]
    fn move_while_idle_is_a_no_op() {
        let mut fx = fixture();
        let before = fx.counts();

        fx.feed(&[PointerEvent::Move(Vec2::new(123.0, 456.0))]);

        assert!(matches!(fx.interaction.state(), InteractionState::Idle));
        assert_eq!(fx.counts(), before);
    }

    #[test]
    fn release_while_idle_is_a_no_op() {
        let mut fx = fixture();
        let before = fx.counts();

        fx.feed(&[PointerEvent::Release]);

        assert!(matches!(fx.interaction.state(), InteractionState::Idle));
        assert_eq!(fx.counts(), before);
    }

    #[test]
    fn launch_impulse_is_deterministic_horizontal() {
        let mut fx = fixture();
        fx.feed(&[
            PointerEvent::Press(Vec2::new(100.0, 100.0)),
            PointerEvent::Move(Vec2::new(200.0, 100.0)),
        ]);
        let InteractionState::Aiming { projectile, .. } = *fx.interaction.state() else {
            panic!("expected Aiming");
        };

        fx.feed(&[PointerEvent::Release]);

        // Impulse (5000, 0) on mass 10 → velocity (500, 0).
        assert_eq!(fx.space.body_kind(projectile), BodyKind::Dynamic);
        let vel = fx.space.body_velocity(projectile);
        assert_relative_eq!(vel.x, 500.0, max_relative = 1e-4);
        assert_relative_eq!(vel.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn launch_impulse_is_deterministic_vertical() {
        let mut fx = fixture();
        fx.feed(&[
            PointerEvent::Press(Vec2::new(100.0, 100.0)),
            PointerEvent::Move(Vec2::new(100.0, 200.0)),
        ]);
        let InteractionState::Aiming { projectile, .. } = *fx.interaction.state() else {
            panic!("expected Aiming");
        };

        fx.feed(&[PointerEvent::Release]);

        let vel = fx.space.body_velocity(projectile);
        assert_relative_eq!(vel.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(vel.y, 500.0, max_relative = 1e-4);
    }

    #[test]
    fn zero_distance_release_launches_with_zero_impulse() {
        let mut fx = fixture();
        fx.feed(&[
            PointerEvent::Press(Vec2::new(100.0, 100.0)),
            PointerEvent::Release,
        ]);

        assert!(matches!(fx.interaction.state(), InteractionState::Idle));
        // The projectile is live but unmoving; only gravity acts from here on.
        let shape = fx
            .space
            .nearest_shape_at(Vec2::new(100.0, 100.0))
            .expect("projectile still at origin");
        let body = fx.space.shape_parent(shape).unwrap();
        assert_eq!(fx.space.body_kind(body), BodyKind::Dynamic);
        assert_relative_eq!(fx.space.body_velocity(body).x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(fx.space.body_velocity(body).y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn second_press_abandons_the_aim_and_release_discards_the_projectile() {
        let mut fx = fixture();
        let before = fx.counts();

        fx.feed(&[
            PointerEvent::Press(Vec2::new(400.0, 300.0)),
            PointerEvent::Press(Vec2::new(500.0, 300.0)),
        ]);
        let InteractionState::Aiming { abandoned, .. } = *fx.interaction.state() else {
            panic!("expected Aiming");
        };
        assert!(abandoned);

        fx.feed(&[PointerEvent::Release]);

        assert!(matches!(fx.interaction.state(), InteractionState::Idle));
        assert_eq!(fx.counts(), before);
        assert_eq!(fx.scene.len(), 0);
    }

    #[test]
    fn launched_projectiles_accumulate_across_aim_cycles() {
        let mut fx = fixture();
        let before = fx.counts();

        for x in [200.0, 400.0, 600.0] {
            fx.feed(&[
                PointerEvent::Press(Vec2::new(x, 100.0)),
                PointerEvent::Move(Vec2::new(x + 50.0, 100.0)),
                PointerEvent::Release,
            ]);
        }

        assert!(matches!(fx.interaction.state(), InteractionState::Idle));
        assert_eq!(fx.space.body_count(), before.0 + 3);
        assert_eq!(fx.space.shape_count(), before.1 + 3);
    }
}
