use glam::Vec2;
use sdl2::event::Event;
use sdl2::mouse::MouseButton;
use sdl2::EventPump;

/// One pointer event, translated 1:1 from the host window system.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Press(Vec2),
    Release,
    Move(Vec2),
    Quit,
}

/// Drain every pending host event, non-blocking, preserving arrival order.
pub fn drain_events(event_pump: &mut EventPump) -> Vec<PointerEvent> {
    let mut events = Vec::new();
    for event in event_pump.poll_iter() {
        if let Some(ev) = translate(event) {
            events.push(ev);
        }
    }
    events
}

/// Only the primary mouse button acts as the pointer; other buttons and
/// unrelated host events are dropped.
fn translate(event: Event) -> Option<PointerEvent> {
    match event {
        Event::Quit { .. } => Some(PointerEvent::Quit),
        Event::MouseButtonDown {
            mouse_btn: MouseButton::Left,
            x,
            y,
            ..
        } => Some(PointerEvent::Press(Vec2::new(x as f32, y as f32))),
        Event::MouseButtonUp {
            mouse_btn: MouseButton::Left,
            ..
        } => Some(PointerEvent::Release),
        Event::MouseMotion { x, y, .. } => Some(PointerEvent::Move(Vec2::new(x as f32, y as f32))),
        _ => None,
    }
}
