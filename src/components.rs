use glam::Vec3;
use rapier2d::prelude::ColliderHandle;

/// Physics shape this entity renders. The engine owns the shape; the scene
/// registry holds only the handle plus display metadata.
pub struct ShapeRef(pub ColliderHandle);

/// RGB color applied to an entity for rendering.
pub struct Color(pub Vec3);
