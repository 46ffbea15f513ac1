use crate::input::{Event, KeyEvent, MouseButtonEvent, MouseMoveEvent, MouseScrollEvent, WindowResizeEvent};
use crate::scene::Ctx;

/// Runs during the render pass of an `Entity<T>`, before the entity's own hook.
pub trait RenderSystem<T> {
    fn render(&self, dt: f32, entity: &mut T, ctx: &mut Ctx<'_>);
}

/// Runs during the update pass of an `Entity<T>`, before the entity's own hook.
pub trait PhysicsSystem<T> {
    fn update(&self, dt: f32, entity: &mut T, ctx: &mut Ctx<'_>);
}

/// Input handling for an `Entity<T>`. Every handler defaults to "not handled".
pub trait ControlsSystem<T> {
    fn on_key(&self, event: &KeyEvent, entity: &mut T, ctx: &mut Ctx<'_>) -> bool {
        let _ = (event, entity, ctx);
        false
    }

    fn on_mouse_button(&self, event: &MouseButtonEvent, entity: &mut T, ctx: &mut Ctx<'_>) -> bool {
        let _ = (event, entity, ctx);
        false
    }

    fn on_mouse_move(&self, event: &MouseMoveEvent, entity: &mut T, ctx: &mut Ctx<'_>) -> bool {
        let _ = (event, entity, ctx);
        false
    }

    fn on_mouse_wheel(&self, event: &MouseScrollEvent, entity: &mut T, ctx: &mut Ctx<'_>) -> bool {
        let _ = (event, entity, ctx);
        false
    }

    fn on_resize(&self, event: &WindowResizeEvent, entity: &mut T, ctx: &mut Ctx<'_>) -> bool {
        let _ = (event, entity, ctx);
        false
    }

    /// Routes `event` to the matching handler.
    fn handle(&self, event: &Event, entity: &mut T, ctx: &mut Ctx<'_>) -> bool {
        match event {
            Event::Key(e) => self.on_key(e, entity, ctx),
            Event::MouseButton(e) => self.on_mouse_button(e, entity, ctx),
            Event::MouseMove(e) => self.on_mouse_move(e, entity, ctx),
            Event::MouseWheel(e) => self.on_mouse_wheel(e, entity, ctx),
            Event::Resize(e) => self.on_resize(e, entity, ctx),
        }
    }
}
