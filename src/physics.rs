use glam::Vec2;
use rapier2d::parry::query::PointQuery;
use rapier2d::prelude::*;

/// Fixed simulation timestep (60 Hz). The frame loop advances the engine by
/// exactly one of these per iteration.
pub const PHYSICS_DT: f32 = 1.0 / 60.0;

/// Shapes within this distance of the pointer count as "under" it.
const QUERY_RADIUS: f32 = 1.0;

/// Body mobility kind. Checked by pattern match; the engine's own type enum
/// never leaves this module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyKind {
    Static,
    Kinematic,
    Dynamic,
}

impl BodyKind {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyKind::Static => RigidBodyType::Fixed,
            BodyKind::Kinematic => RigidBodyType::KinematicPositionBased,
            BodyKind::Dynamic => RigidBodyType::Dynamic,
        }
    }

    fn from_rapier(ty: RigidBodyType) -> Self {
        match ty {
            RigidBodyType::Fixed => BodyKind::Static,
            RigidBodyType::KinematicPositionBased | RigidBodyType::KinematicVelocityBased => {
                BodyKind::Kinematic
            }
            RigidBodyType::Dynamic => BodyKind::Dynamic,
        }
    }
}

/// World-space geometry of one shape, as handed to the renderer.
#[derive(Clone, Copy, Debug)]
pub enum Outline {
    Circle { center: Vec2, radius: f32 },
    Box { center: Vec2, half_extents: Vec2, angle: f32 },
    Capsule { a: Vec2, b: Vec2, radius: f32 },
}

/// Narrow façade over the physics engine. Owns every engine-side object
/// (bodies, shapes, joints, solver state); the rest of the crate talks to
/// the engine exclusively through these methods and opaque handles.
pub struct PhysicsSpace {
    gravity: Vector<Real>,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
}

impl PhysicsSpace {
    /// Gravity is fixed for the lifetime of the space.
    pub fn new(gravity: Vec2) -> Self {
        let mut params = IntegrationParameters::default();
        params.dt = PHYSICS_DT;

        Self {
            gravity: vector![gravity.x, gravity.y],
            params,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
        }
    }

    /// Advance the simulation by exactly one fixed timestep. Called at most
    /// once per frame.
    pub fn step(&mut self) {
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            None,
            &(),
            &(),
        );
    }

    pub fn add_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.bodies.insert(body)
    }

    pub fn add_shape(&mut self, shape: Collider, parent: RigidBodyHandle) -> ColliderHandle {
        self.colliders.insert_with_parent(shape, parent, &mut self.bodies)
    }

    pub fn add_joint(
        &mut self,
        body1: RigidBodyHandle,
        body2: RigidBodyHandle,
        joint: impl Into<GenericJoint>,
    ) -> ImpulseJointHandle {
        self.impulse_joints.insert(body1, body2, joint, true)
    }

    /// Removes the body together with its attached shapes and joints.
    pub fn remove_body(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    pub fn remove_joint(&mut self, handle: ImpulseJointHandle) {
        self.impulse_joints.remove(handle, true);
    }

    /// Topmost shape overlapping or within [`QUERY_RADIUS`] of `point`.
    /// Ordering between equally-near shapes is unspecified beyond "nearest".
    pub fn nearest_shape_at(&self, point: Vec2) -> Option<ColliderHandle> {
        let target = point![point.x, point.y];
        let mut best: Option<(ColliderHandle, f32)> = None;
        for (handle, collider) in self.colliders.iter() {
            let proj = collider
                .shape()
                .project_point(collider.position(), &target, true);
            let dist = if proj.is_inside {
                0.0
            } else {
                (proj.point - target).norm()
            };
            if dist > QUERY_RADIUS {
                continue;
            }
            if best.map_or(true, |(_, d)| dist < d) {
                best = Some((handle, dist));
            }
        }
        best.map(|(handle, _)| handle)
    }

    pub fn apply_impulse_at_local_point(
        &mut self,
        handle: RigidBodyHandle,
        impulse: Vec2,
        local: Vec2,
    ) {
        let body = &mut self.bodies[handle];
        let at = body.position().transform_point(&point![local.x, local.y]);
        body.apply_impulse_at_point(vector![impulse.x, impulse.y], at, true);
    }

    pub fn body_kind(&self, handle: RigidBodyHandle) -> BodyKind {
        BodyKind::from_rapier(self.bodies[handle].body_type())
    }

    pub fn set_body_kind(&mut self, handle: RigidBodyHandle, kind: BodyKind) {
        self.bodies[handle].set_body_type(kind.to_rapier(), true);
    }

    #[allow(dead_code)]
    pub fn body_position(&self, handle: RigidBodyHandle) -> Vec2 {
        let t = self.bodies[handle].translation();
        Vec2::new(t.x, t.y)
    }

    #[allow(dead_code)]
    pub fn body_velocity(&self, handle: RigidBodyHandle) -> Vec2 {
        let v = self.bodies[handle].linvel();
        Vec2::new(v.x, v.y)
    }

    /// Instantly place a kinematic body, without generating velocity.
    pub fn teleport_kinematic(&mut self, handle: RigidBodyHandle, to: Vec2) {
        self.bodies[handle].set_translation(vector![to.x, to.y], true);
    }

    /// Move a kinematic body over the next step, so joints it anchors see a
    /// proper velocity.
    pub fn move_kinematic(&mut self, handle: RigidBodyHandle, to: Vec2) {
        self.bodies[handle].set_next_kinematic_translation(vector![to.x, to.y]);
    }

    pub fn world_to_local(&self, handle: RigidBodyHandle, point: Vec2) -> Vec2 {
        let p = self.bodies[handle]
            .position()
            .inverse_transform_point(&point![point.x, point.y]);
        Vec2::new(p.x, p.y)
    }

    #[allow(dead_code)]
    pub fn local_to_world(&self, handle: RigidBodyHandle, point: Vec2) -> Vec2 {
        let p = self.bodies[handle]
            .position()
            .transform_point(&point![point.x, point.y]);
        Vec2::new(p.x, p.y)
    }

    pub fn shape_parent(&self, handle: ColliderHandle) -> Option<RigidBodyHandle> {
        self.colliders[handle].parent()
    }

    /// World-space outline of a shape, for the frame snapshot. Returns `None`
    /// for geometry the debug renderer does not know how to draw.
    pub fn shape_outline(&self, handle: ColliderHandle) -> Option<Outline> {
        let collider = self.colliders.get(handle)?;
        let pos = collider.position();
        let shape = collider.shape();

        if let Some(ball) = shape.as_ball() {
            let c = pos.translation.vector;
            Some(Outline::Circle {
                center: Vec2::new(c.x, c.y),
                radius: ball.radius,
            })
        } else if let Some(cuboid) = shape.as_cuboid() {
            let c = pos.translation.vector;
            Some(Outline::Box {
                center: Vec2::new(c.x, c.y),
                half_extents: Vec2::new(cuboid.half_extents.x, cuboid.half_extents.y),
                angle: pos.rotation.angle(),
            })
        } else if let Some(round) = shape.as_round_cuboid() {
            let c = pos.translation.vector;
            let he = round.inner_shape.half_extents;
            Some(Outline::Box {
                center: Vec2::new(c.x, c.y),
                half_extents: Vec2::new(he.x + round.border_radius, he.y + round.border_radius),
                angle: pos.rotation.angle(),
            })
        } else if let Some(capsule) = shape.as_capsule() {
            let a = pos.transform_point(&capsule.segment.a);
            let b = pos.transform_point(&capsule.segment.b);
            Some(Outline::Capsule {
                a: Vec2::new(a.x, a.y),
                b: Vec2::new(b.x, b.y),
                radius: capsule.radius,
            })
        } else {
            None
        }
    }

    #[allow(dead_code)]
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    #[allow(dead_code)]
    pub fn shape_count(&self) -> usize {
        self.colliders.len()
    }

    #[allow(dead_code)]
    pub fn joint_count(&self) -> usize {
        self.impulse_joints.len()
    }
}
