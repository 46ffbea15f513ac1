//! Input subsystem.
//!
//! The event types are platform-agnostic and do not expose winit types.
//! Backends translate window-system events into `Event`s; see `platform`.

mod pointer;
mod types;

pub mod platform;

pub use pointer::PointerTracker;
pub use types::{
    Event,
    Key,
    KeyEvent,
    KeyState,
    MouseButton,
    MouseButtonEvent,
    MouseButtonState,
    MouseMoveEvent,
    MouseScrollEvent,
    WindowResizeEvent,
};
