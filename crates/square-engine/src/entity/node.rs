use std::ops::{Deref, DerefMut};

use anyhow::Result;

use super::system::{ControlsSystem, PhysicsSystem, RenderSystem};
use crate::input::Event;
use crate::scene::{Ctx, Object};

/// An object of concrete type `T` with systems bound to `T`.
///
/// Systems see `&mut T` directly, so each one can use the entity's full
/// interface. Order of a frame for one entity:
///
/// - update: physics systems in attachment order, `T::update`, then children
/// - render: render systems in attachment order, `T::render`, then children
/// - events: controls systems from the most recently attached backwards
///   (first `true` wins), `T::preview_event`, children, `T::on_event`
pub struct Entity<T: Object> {
    inner: T,
    render_systems: Vec<Box<dyn RenderSystem<T>>>,
    physics_systems: Vec<Box<dyn PhysicsSystem<T>>>,
    controls_systems: Vec<Box<dyn ControlsSystem<T>>>,
}

impl<T: Object> Entity<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            render_systems: Vec::new(),
            physics_systems: Vec::new(),
            controls_systems: Vec::new(),
        }
    }

    pub fn attach_render_system<S: RenderSystem<T> + 'static>(&mut self, system: S) {
        self.render_systems.push(Box::new(system));
    }

    pub fn attach_physics_system<S: PhysicsSystem<T> + 'static>(&mut self, system: S) {
        self.physics_systems.push(Box::new(system));
    }

    pub fn attach_controls_system<S: ControlsSystem<T> + 'static>(&mut self, system: S) {
        self.controls_systems.push(Box::new(system));
    }

    pub fn with_render_system<S: RenderSystem<T> + 'static>(mut self, system: S) -> Self {
        self.attach_render_system(system);
        self
    }

    pub fn with_physics_system<S: PhysicsSystem<T> + 'static>(mut self, system: S) -> Self {
        self.attach_physics_system(system);
        self
    }

    pub fn with_controls_system<S: ControlsSystem<T> + 'static>(mut self, system: S) -> Self {
        self.attach_controls_system(system);
        self
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Object> Deref for Entity<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T: Object> DerefMut for Entity<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

impl<T: Object> Object for Entity<T> {
    fn on_enter(&mut self, ctx: &mut Ctx<'_>) -> Result<()> {
        self.inner.on_enter(ctx)
    }

    fn on_exit(&mut self, ctx: &mut Ctx<'_>) {
        self.inner.on_exit(ctx);
    }

    fn update(&mut self, dt: f32, ctx: &mut Ctx<'_>) {
        for system in &self.physics_systems {
            system.update(dt, &mut self.inner, ctx);
        }
        self.inner.update(dt, ctx);
    }

    fn render(&mut self, dt: f32, ctx: &mut Ctx<'_>) {
        for system in &self.render_systems {
            system.render(dt, &mut self.inner, ctx);
        }
        self.inner.render(dt, ctx);
    }

    fn preview_event(&mut self, event: &Event, ctx: &mut Ctx<'_>) -> bool {
        let inner = &mut self.inner;
        let handled = self
            .controls_systems
            .iter()
            .rev()
            .any(|system| system.handle(event, inner, ctx));

        handled || self.inner.preview_event(event, ctx)
    }

    fn on_event(&mut self, event: &Event, ctx: &mut Ctx<'_>) -> bool {
        self.inner.on_event(event, ctx)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::backend::headless::HeadlessBackend;
    use crate::input::{Key, KeyEvent, WindowResizeEvent};
    use crate::scene::{Group, Scene};

    type Log = Rc<RefCell<Vec<String>>>;

    /// Entity payload that records its own hooks.
    struct Probe {
        name: &'static str,
        log: Log,
        counter: u32,
    }

    impl Probe {
        fn new(name: &'static str, log: &Log) -> Self {
            Self { name, log: log.clone(), counter: 0 }
        }
    }

    impl Object for Probe {
        fn update(&mut self, _dt: f32, _ctx: &mut Ctx<'_>) {
            self.log.borrow_mut().push(format!("{}.update", self.name));
        }

        fn render(&mut self, _dt: f32, _ctx: &mut Ctx<'_>) {
            self.log.borrow_mut().push(format!("{}.render", self.name));
        }

        fn on_event(&mut self, _event: &Event, _ctx: &mut Ctx<'_>) -> bool {
            self.log.borrow_mut().push(format!("{}.on_event", self.name));
            false
        }
    }

    struct Tag(&'static str);

    impl RenderSystem<Probe> for Tag {
        fn render(&self, _dt: f32, entity: &mut Probe, _ctx: &mut Ctx<'_>) {
            entity.log.borrow_mut().push(format!("{}.{}", entity.name, self.0));
        }
    }

    impl PhysicsSystem<Probe> for Tag {
        fn update(&self, _dt: f32, entity: &mut Probe, _ctx: &mut Ctx<'_>) {
            entity.counter += 1;
            entity.log.borrow_mut().push(format!("{}.{}", entity.name, self.0));
        }
    }

    /// Controls system that records key events and optionally consumes them.
    struct KeyTag {
        tag: &'static str,
        consume: bool,
    }

    impl ControlsSystem<Probe> for KeyTag {
        fn on_key(&self, _event: &KeyEvent, entity: &mut Probe, _ctx: &mut Ctx<'_>) -> bool {
            entity.log.borrow_mut().push(format!("{}.{}", entity.name, self.tag));
            self.consume
        }
    }

    fn loaded(scene: &mut Scene, backend: &mut HeadlessBackend) {
        scene.load(backend).unwrap();
    }

    // ── system ordering ──────────────────────────────────────────────────

    #[test]
    fn render_systems_run_in_order_before_children() {
        let log = Log::default();
        let mut backend = HeadlessBackend::new();
        let mut scene = Scene::new(Group);

        let e = scene.attach(
            scene.root(),
            Entity::new(Probe::new("e", &log))
                .with_render_system(Tag("r1"))
                .with_render_system(Tag("r2")),
        );
        scene.attach(e, Entity::new(Probe::new("child", &log)));
        loaded(&mut scene, &mut backend);

        scene.render(0.016, &mut backend);

        assert_eq!(*log.borrow(), vec!["e.r1", "e.r2", "e.render", "child.render"]);
    }

    #[test]
    fn physics_systems_run_before_own_update() {
        let log = Log::default();
        let mut backend = HeadlessBackend::new();
        let mut scene = Scene::new(Group);

        let e = scene.generate_retained(
            scene.root(),
            Entity::new(Probe::new("e", &log))
                .with_physics_system(Tag("p1"))
                .with_physics_system(Tag("p2")),
        );
        loaded(&mut scene, &mut backend);

        scene.update(1.0 / 60.0, &mut backend);
        scene.update(1.0 / 60.0, &mut backend);

        assert_eq!(&log.borrow()[..3], &["e.p1", "e.p2", "e.update"]);
        assert_eq!(scene.get(e).map(|e| e.counter), Some(4));
    }

    // ── controls ─────────────────────────────────────────────────────────

    #[test]
    fn later_controls_system_gets_first_refusal() {
        let log = Log::default();
        let mut backend = HeadlessBackend::new();
        let mut scene = Scene::new(Group);

        let mut entity = Entity::new(Probe::new("e", &log));
        entity.attach_controls_system(KeyTag { tag: "first", consume: false });
        entity.attach_controls_system(KeyTag { tag: "second", consume: true });
        scene.attach(scene.root(), entity);
        loaded(&mut scene, &mut backend);

        let handled = scene.on_key(&KeyEvent::pressed(Key::A), &mut backend);

        assert!(handled);
        assert_eq!(*log.borrow(), vec!["e.second"]);
    }

    #[test]
    fn unhandled_controls_fall_through_to_children_then_self() {
        let log = Log::default();
        let mut backend = HeadlessBackend::new();
        let mut scene = Scene::new(Group);

        let e = scene.attach(
            scene.root(),
            Entity::new(Probe::new("e", &log))
                .with_controls_system(KeyTag { tag: "first", consume: false })
                .with_controls_system(KeyTag { tag: "second", consume: false }),
        );
        scene.attach(e, Entity::new(Probe::new("child", &log)));
        loaded(&mut scene, &mut backend);

        let handled = scene.on_key(&KeyEvent::pressed(Key::A), &mut backend);

        assert!(!handled);
        assert_eq!(
            *log.borrow(),
            vec!["e.second", "e.first", "child.on_event", "e.on_event"]
        );
    }

    #[test]
    fn controls_ignore_other_event_kinds() {
        let log = Log::default();
        let mut backend = HeadlessBackend::new();
        let mut scene = Scene::new(Group);
        scene.attach(
            scene.root(),
            Entity::new(Probe::new("e", &log)).with_controls_system(KeyTag { tag: "keys", consume: true }),
        );
        loaded(&mut scene, &mut backend);

        let handled = scene.on_resize(&WindowResizeEvent { width: 1, height: 1 }, &mut backend);

        assert!(!handled);
        assert_eq!(*log.borrow(), vec!["e.on_event"]);
    }

    // ── disabled ─────────────────────────────────────────────────────────

    #[test]
    fn disabled_entity_runs_no_systems() {
        let log = Log::default();
        let mut backend = HeadlessBackend::new();
        let mut scene = Scene::new(Group);

        let e = scene.attach(
            scene.root(),
            Entity::new(Probe::new("e", &log))
                .with_render_system(Tag("r"))
                .with_physics_system(Tag("p"))
                .with_controls_system(KeyTag { tag: "k", consume: true }),
        );
        loaded(&mut scene, &mut backend);
        scene.set_disabled(e, true);

        scene.update(0.1, &mut backend);
        scene.render(0.1, &mut backend);
        let handled = scene.on_key(&KeyEvent::pressed(Key::A), &mut backend);

        assert!(!handled);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn entity_derefs_to_payload() {
        let log = Log::default();
        let mut e = Entity::new(Probe::new("e", &log));
        e.counter = 7;
        assert_eq!(e.counter, 7);
        assert_eq!(e.into_inner().counter, 7);
    }
}
