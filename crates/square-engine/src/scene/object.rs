use std::any::Any;

use anyhow::Result;

use super::ctx::Ctx;
use crate::input::Event;

/// Downcasting support for scene objects.
///
/// Implemented for every `'static` type; call it through `&dyn Object`, not
/// through the owning `Box`.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Behaviour attached to a scene node.
///
/// The hook set is closed; every hook defaults to a no-op. Hooks receive a
/// `Ctx` for the node being dispatched, which gives access to the scene and
/// to the renderer currently driving it.
///
/// Event handling is two-phase: `preview_event` runs before the node's
/// children see the event, `on_event` after all of them declined it.
pub trait Object: AsAny {
    /// Runs once when the node becomes part of a loaded scene, before its children.
    fn on_enter(&mut self, ctx: &mut Ctx<'_>) -> Result<()> {
        let _ = ctx;
        Ok(())
    }

    /// Runs once when the node leaves a loaded scene, after its children.
    fn on_exit(&mut self, ctx: &mut Ctx<'_>) {
        let _ = ctx;
    }

    fn update(&mut self, dt: f32, ctx: &mut Ctx<'_>) {
        let _ = (dt, ctx);
    }

    fn render(&mut self, dt: f32, ctx: &mut Ctx<'_>) {
        let _ = (dt, ctx);
    }

    /// First refusal on an event, ahead of the node's children.
    fn preview_event(&mut self, event: &Event, ctx: &mut Ctx<'_>) -> bool {
        let _ = (event, ctx);
        false
    }

    /// Default handling once every child declined the event.
    fn on_event(&mut self, event: &Event, ctx: &mut Ctx<'_>) -> bool {
        let _ = (event, ctx);
        false
    }
}

/// Node with no behaviour of its own; groups children.
#[derive(Debug, Default, Copy, Clone)]
pub struct Group;

impl Object for Group {}
