//! Entities: objects with ordered render, physics and controls systems.

mod node;
mod system;

pub use node::Entity;
pub use system::{ControlsSystem, PhysicsSystem, RenderSystem};
