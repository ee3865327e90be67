use anyhow::{anyhow, Result};
use glam::{Vec2, Vec3};
use sdl2::pixels::Color as SdlColor;
use sdl2::rect::Point;
use sdl2::render::Canvas;
use sdl2::video::Window;

use crate::physics::Outline;

/// One shape plus its display color.
pub struct ShapeView {
    pub outline: Outline,
    pub color: Vec3,
}

/// Read-only description of one frame. Built after the physics step, handed
/// to [`draw`], and discarded.
pub struct SceneSnapshot {
    pub shapes: Vec<ShapeView>,
    pub aim_line: Option<(Vec2, Vec2)>,
}

const BACKGROUND: SdlColor = SdlColor::RGB(255, 255, 255);
const AIM_COLOR: SdlColor = SdlColor::RGB(0, 0, 0);
const CIRCLE_SEGMENTS: usize = 32;

/// Debug-draw one frame: shape outlines, then the aim indicator on top.
pub fn draw(canvas: &mut Canvas<Window>, snapshot: &SceneSnapshot) -> Result<()> {
    canvas.set_draw_color(BACKGROUND);
    canvas.clear();

    for view in &snapshot.shapes {
        canvas.set_draw_color(to_sdl(view.color));
        match view.outline {
            Outline::Circle { center, radius } => draw_circle(canvas, center, radius)?,
            Outline::Box {
                center,
                half_extents,
                angle,
            } => draw_box(canvas, center, half_extents, angle)?,
            Outline::Capsule { a, b, radius } => draw_capsule(canvas, a, b, radius)?,
        }
    }

    if let Some((from, to)) = snapshot.aim_line {
        canvas.set_draw_color(AIM_COLOR);
        draw_segment(canvas, from, to)?;
    }

    canvas.present();
    Ok(())
}

fn to_sdl(color: Vec3) -> SdlColor {
    SdlColor::RGB(
        (color.x * 255.0) as u8,
        (color.y * 255.0) as u8,
        (color.z * 255.0) as u8,
    )
}

fn to_point(v: Vec2) -> Point {
    Point::new(v.x.round() as i32, v.y.round() as i32)
}

fn draw_segment(canvas: &mut Canvas<Window>, a: Vec2, b: Vec2) -> Result<()> {
    canvas
        .draw_line(to_point(a), to_point(b))
        .map_err(|e| anyhow!("{e}"))
}

fn draw_circle(canvas: &mut Canvas<Window>, center: Vec2, radius: f32) -> Result<()> {
    let mut points = Vec::with_capacity(CIRCLE_SEGMENTS + 1);
    for i in 0..=CIRCLE_SEGMENTS {
        let theta = i as f32 / CIRCLE_SEGMENTS as f32 * std::f32::consts::TAU;
        points.push(to_point(center + radius * Vec2::new(theta.cos(), theta.sin())));
    }
    canvas
        .draw_lines(points.as_slice())
        .map_err(|e| anyhow!("{e}"))
}

fn draw_box(canvas: &mut Canvas<Window>, center: Vec2, half: Vec2, angle: f32) -> Result<()> {
    let (sin, cos) = angle.sin_cos();
    let rotate = |v: Vec2| Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos);
    let corners = [
        Vec2::new(-half.x, -half.y),
        Vec2::new(half.x, -half.y),
        Vec2::new(half.x, half.y),
        Vec2::new(-half.x, half.y),
    ];

    let mut points: Vec<Point> = corners.iter().map(|&c| to_point(center + rotate(c))).collect();
    points.push(points[0]);
    canvas
        .draw_lines(points.as_slice())
        .map_err(|e| anyhow!("{e}"))
}

fn draw_capsule(canvas: &mut Canvas<Window>, a: Vec2, b: Vec2, radius: f32) -> Result<()> {
    let axis = b - a;
    if axis.length_squared() > f32::EPSILON {
        let normal = Vec2::new(-axis.y, axis.x).normalize() * radius;
        draw_segment(canvas, a + normal, b + normal)?;
        draw_segment(canvas, a - normal, b - normal)?;
    }
    draw_circle(canvas, a, radius)?;
    draw_circle(canvas, b, radius)
}
