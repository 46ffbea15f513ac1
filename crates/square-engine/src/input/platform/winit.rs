use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::input::{
    Event, Key, KeyEvent, KeyState, MouseButton, MouseButtonEvent, MouseButtonState,
    MouseScrollEvent, PointerTracker, WindowResizeEvent,
};
use crate::renderer::BackendEvent;

/// Pixels per wheel "line" used to normalize pixel deltas from touchpads.
const PIXELS_PER_LINE: f64 = 20.0;

/// Translates a winit `WindowEvent` into a backend event.
///
/// `scale_factor` converts physical cursor coordinates into logical ones.
/// Returns `None` for events outside the engine's closed event set.
pub fn translate_window_event(
    tracker: &mut PointerTracker,
    scale_factor: f64,
    event: &WindowEvent,
) -> Option<BackendEvent> {
    match event {
        WindowEvent::CloseRequested | WindowEvent::Destroyed => Some(BackendEvent::CloseRequested),

        WindowEvent::Resized(size) => Some(BackendEvent::Input(Event::Resize(WindowResizeEvent {
            width: size.width,
            height: size.height,
        }))),

        WindowEvent::CursorLeft { .. } => {
            tracker.leave();
            None
        }

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(scale_factor, *position);
            Some(BackendEvent::Input(Event::MouseMove(tracker.moved_to(x, y))))
        }

        WindowEvent::MouseInput { state, button, .. } => {
            let button = map_mouse_button(*button)?;
            let state = match state {
                ElementState::Pressed => MouseButtonState::Pressed,
                ElementState::Released => MouseButtonState::Released,
            };
            Some(BackendEvent::Input(Event::MouseButton(MouseButtonEvent { button, state })))
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let (x, y) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                MouseScrollDelta::PixelDelta(p) => {
                    ((p.x / PIXELS_PER_LINE) as f32, (p.y / PIXELS_PER_LINE) as f32)
                }
            };
            Some(BackendEvent::Input(Event::MouseWheel(MouseScrollEvent { x, y })))
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let state = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };
            let key = map_key(event.physical_key);
            Some(BackendEvent::Input(Event::Key(KeyEvent { key, state })))
        }

        _ => None,
    }
}

fn to_logical_f32(scale_factor: f64, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(scale_factor);
    (logical.x as f32, logical.y as f32)
}

fn map_mouse_button(b: WinitMouseButton) -> Option<MouseButton> {
    match b {
        WinitMouseButton::Left => Some(MouseButton::Left),
        WinitMouseButton::Middle => Some(MouseButton::Middle),
        WinitMouseButton::Right => Some(MouseButton::Right),
        _ => None,
    }
}

fn map_key(pk: PhysicalKey) -> Key {
    let code = match pk {
        PhysicalKey::Code(code) => code,
        PhysicalKey::Unidentified(_) => return Key::Unknown(0),
    };

    match code {
        KeyCode::KeyA => Key::A,
        KeyCode::KeyB => Key::B,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyF => Key::F,
        KeyCode::KeyG => Key::G,
        KeyCode::KeyH => Key::H,
        KeyCode::KeyI => Key::I,
        KeyCode::KeyJ => Key::J,
        KeyCode::KeyK => Key::K,
        KeyCode::KeyL => Key::L,
        KeyCode::KeyM => Key::M,
        KeyCode::KeyN => Key::N,
        KeyCode::KeyO => Key::O,
        KeyCode::KeyP => Key::P,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyR => Key::R,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyT => Key::T,
        KeyCode::KeyU => Key::U,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyW => Key::W,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,

        KeyCode::Digit0 => Key::Digit0,
        KeyCode::Digit1 => Key::Digit1,
        KeyCode::Digit2 => Key::Digit2,
        KeyCode::Digit3 => Key::Digit3,
        KeyCode::Digit4 => Key::Digit4,
        KeyCode::Digit5 => Key::Digit5,
        KeyCode::Digit6 => Key::Digit6,
        KeyCode::Digit7 => Key::Digit7,
        KeyCode::Digit8 => Key::Digit8,
        KeyCode::Digit9 => Key::Digit9,

        KeyCode::Minus => Key::Minus,
        KeyCode::Equal => Key::Equals,
        KeyCode::BracketLeft => Key::LeftBracket,
        KeyCode::BracketRight => Key::RightBracket,
        KeyCode::Backslash => Key::Backslash,
        KeyCode::Semicolon => Key::Semicolon,
        KeyCode::Quote => Key::Apostrophe,
        KeyCode::Backquote => Key::Grave,
        KeyCode::Comma => Key::Comma,
        KeyCode::Period => Key::Period,
        KeyCode::Slash => Key::Slash,

        KeyCode::Escape => Key::Escape,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Space => Key::Space,
        KeyCode::CapsLock => Key::CapsLock,
        KeyCode::PrintScreen => Key::PrintScreen,
        KeyCode::ScrollLock => Key::ScrollLock,
        KeyCode::Pause => Key::Pause,

        KeyCode::Insert => Key::Insert,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::ArrowUp => Key::Up,
        KeyCode::ArrowDown => Key::Down,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,

        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        KeyCode::F7 => Key::F7,
        KeyCode::F8 => Key::F8,
        KeyCode::F9 => Key::F9,
        KeyCode::F10 => Key::F10,
        KeyCode::F11 => Key::F11,
        KeyCode::F12 => Key::F12,

        KeyCode::NumLock => Key::NumLock,
        KeyCode::NumpadDivide => Key::KpDivide,
        KeyCode::NumpadMultiply => Key::KpMultiply,
        KeyCode::NumpadSubtract => Key::KpMinus,
        KeyCode::NumpadAdd => Key::KpPlus,
        KeyCode::NumpadEnter => Key::KpEnter,
        KeyCode::NumpadDecimal => Key::KpPeriod,
        KeyCode::Numpad0 => Key::Kp0,
        KeyCode::Numpad1 => Key::Kp1,
        KeyCode::Numpad2 => Key::Kp2,
        KeyCode::Numpad3 => Key::Kp3,
        KeyCode::Numpad4 => Key::Kp4,
        KeyCode::Numpad5 => Key::Kp5,
        KeyCode::Numpad6 => Key::Kp6,
        KeyCode::Numpad7 => Key::Kp7,
        KeyCode::Numpad8 => Key::Kp8,
        KeyCode::Numpad9 => Key::Kp9,

        KeyCode::ShiftLeft => Key::LeftShift,
        KeyCode::ShiftRight => Key::RightShift,
        KeyCode::ControlLeft => Key::LeftCtrl,
        KeyCode::ControlRight => Key::RightCtrl,
        KeyCode::AltLeft => Key::LeftAlt,
        KeyCode::AltRight => Key::RightAlt,
        KeyCode::SuperLeft => Key::LeftSuper,
        KeyCode::SuperRight => Key::RightSuper,
        KeyCode::ContextMenu => Key::Menu,

        other => Key::Unknown(other as u32),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;

    #[test]
    fn close_requested_maps_to_close() {
        let mut t = PointerTracker::new();
        let ev = translate_window_event(&mut t, 1.0, &WindowEvent::CloseRequested);
        assert_eq!(ev, Some(BackendEvent::CloseRequested));
    }

    #[test]
    fn resize_carries_physical_size() {
        let mut t = PointerTracker::new();
        let ev = translate_window_event(&mut t, 2.0, &WindowEvent::Resized(PhysicalSize::new(800, 600)));
        assert_eq!(
            ev,
            Some(BackendEvent::Input(Event::Resize(WindowResizeEvent { width: 800, height: 600 })))
        );
    }

    #[test]
    fn unrelated_events_are_dropped() {
        let mut t = PointerTracker::new();
        assert_eq!(translate_window_event(&mut t, 1.0, &WindowEvent::Focused(true)), None);
    }

    #[test]
    fn extra_mouse_buttons_are_not_forwarded() {
        assert_eq!(map_mouse_button(WinitMouseButton::Left), Some(MouseButton::Left));
        assert_eq!(map_mouse_button(WinitMouseButton::Back), None);
        assert_eq!(map_mouse_button(WinitMouseButton::Other(7)), None);
    }

    #[test]
    fn physical_keys_map_to_engine_keys() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Escape)), Key::Escape);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ArrowUp)), Key::Up);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Numpad5)), Key::Kp5);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::ShiftRight)), Key::RightShift);
    }

    #[test]
    fn cursor_position_is_scaled_to_logical() {
        let (x, y) = to_logical_f32(2.0, PhysicalPosition::new(200.0, 100.0));
        assert_eq!((x, y), (100.0, 50.0));
    }
}
