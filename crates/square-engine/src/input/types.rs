use std::fmt;

/// Physical keyboard key.
///
/// Backends map platform scancodes into these variants. Keys without a
/// dedicated variant are reported as `Key::Unknown(code)` with the platform code.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digit row
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Punctuation
    Minus,
    Equals,
    LeftBracket,
    RightBracket,
    Backslash,
    Semicolon,
    Apostrophe,
    Grave,
    Comma,
    Period,
    Slash,

    // Editing and control
    Escape,
    Enter,
    Tab,
    Backspace,
    Space,
    CapsLock,
    PrintScreen,
    ScrollLock,
    Pause,

    // Navigation
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,

    // Function keys
    F1, F2, F3, F4, F5, F6,
    F7, F8, F9, F10, F11, F12,

    // Keypad
    NumLock,
    KpDivide,
    KpMultiply,
    KpMinus,
    KpPlus,
    KpEnter,
    KpPeriod,
    Kp0, Kp1, Kp2, Kp3, Kp4,
    Kp5, Kp6, Kp7, Kp8, Kp9,

    // Modifiers
    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
    LeftAlt,
    RightAlt,
    LeftSuper,
    RightSuper,
    Menu,

    /// Platform key without a dedicated variant.
    Unknown(u32),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MouseButtonState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub state: KeyState,
}

impl KeyEvent {
    pub fn pressed(key: Key) -> Self {
        Self { key, state: KeyState::Pressed }
    }

    pub fn released(key: Key) -> Self {
        Self { key, state: KeyState::Released }
    }

    pub fn is_pressed(&self) -> bool {
        self.state == KeyState::Pressed
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MouseButtonEvent {
    pub button: MouseButton,
    pub state: MouseButtonState,
}

/// Pointer motion in window coordinates.
///
/// `xrel`/`yrel` hold the motion since the previous move event.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseMoveEvent {
    pub x: f32,
    pub y: f32,
    pub xrel: f32,
    pub yrel: f32,
}

/// Wheel motion. Positive `y` scrolls away from the user.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseScrollEvent {
    pub x: f32,
    pub y: f32,
}

/// New drawable size in pixels.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct WindowResizeEvent {
    pub width: u32,
    pub height: u32,
}

/// Closed set of events dispatched through the object tree.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Event {
    Key(KeyEvent),
    MouseButton(MouseButtonEvent),
    MouseMove(MouseMoveEvent),
    MouseWheel(MouseScrollEvent),
    Resize(WindowResizeEvent),
}

impl From<KeyEvent> for Event {
    fn from(e: KeyEvent) -> Self {
        Event::Key(e)
    }
}

impl From<MouseButtonEvent> for Event {
    fn from(e: MouseButtonEvent) -> Self {
        Event::MouseButton(e)
    }
}

impl From<MouseMoveEvent> for Event {
    fn from(e: MouseMoveEvent) -> Self {
        Event::MouseMove(e)
    }
}

impl From<MouseScrollEvent> for Event {
    fn from(e: MouseScrollEvent) -> Self {
        Event::MouseWheel(e)
    }
}

impl From<WindowResizeEvent> for Event {
    fn from(e: WindowResizeEvent) -> Self {
        Event::Resize(e)
    }
}
