use anyhow::{Context, Result, bail};

use super::backend::{Backend, BackendEvent};
use super::properties::RendererProperties;
use crate::scene::Scene;
use crate::time::FrameClock;

/// Lifecycle of a renderer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum RendererState {
    Created,
    ContextActive,
    Running,
    ExitRequested,
    ContextDestroyed,
}

/// Drives one scene on one backend context.
///
/// A step runs `activate → prune → poll → update(fixed_dt) → render(dt) → swap`.
/// Physics always sees `properties.fixed_dt`; rendering sees the wall-clock
/// delta measured by this renderer's own clock.
pub struct Renderer<B: Backend> {
    backend: B,
    properties: RendererProperties,
    scene: Option<Scene>,
    clock: FrameClock,
    state: RendererState,
}

impl<B: Backend> Renderer<B> {
    pub fn new(backend: B, properties: RendererProperties) -> Self {
        let mut clock = FrameClock::new();
        clock.set_clamps(properties.render_dt_clamps);

        Self {
            backend,
            properties,
            scene: None,
            clock,
            state: RendererState::Created,
        }
    }

    pub fn properties(&self) -> &RendererProperties {
        &self.properties
    }

    pub fn state(&self) -> RendererState {
        self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    pub fn is_exit_requested(&self) -> bool {
        self.state == RendererState::ExitRequested
    }

    /// Creates the backend context and applies the initial render state.
    pub fn create_context(&mut self) -> Result<()> {
        if !matches!(self.state, RendererState::Created | RendererState::ContextDestroyed) {
            return Ok(());
        }

        self.backend
            .create_context(&self.properties)
            .with_context(|| format!("failed to create context for '{}'", self.properties.title))?;

        self.backend.wireframe_mode(self.properties.wireframe);
        self.backend.set_cursor(self.properties.cursor);
        self.state = RendererState::ContextActive;

        log::debug!(
            "renderer '{}' context created ({}x{})",
            self.properties.title,
            self.properties.width,
            self.properties.height
        );
        Ok(())
    }

    /// Makes `scene` the active tree, unloading and returning the previous one.
    ///
    /// The new scene is loaded with this renderer's context active. If loading
    /// fails the new scene is dropped and the renderer keeps no scene.
    /// Requires a live context: loading before `create_context`, after an exit
    /// request or after `teardown` is an error.
    pub fn load_object(&mut self, scene: Scene) -> Result<Option<Scene>> {
        if !matches!(self.state, RendererState::ContextActive | RendererState::Running) {
            bail!(
                "cannot load a scene into '{}' in state {:?}",
                self.properties.title,
                self.state
            );
        }
        self.backend.activate_context();
        let previous = self.unload_object()?;

        let mut scene = scene;
        scene
            .load(&mut self.backend)
            .with_context(|| format!("failed to load scene into '{}'", self.properties.title))?;

        self.scene = Some(scene);
        self.clock.reset();
        if self.state == RendererState::ContextActive {
            self.state = RendererState::Running;
        }
        Ok(previous)
    }

    /// Unloads and returns the active scene, if any.
    pub fn unload_object(&mut self) -> Result<Option<Scene>> {
        let Some(mut scene) = self.scene.take() else {
            return Ok(None);
        };
        if scene.is_loaded() {
            self.backend.activate_context();
            scene.unload(&mut self.backend)?;
        }
        Ok(Some(scene))
    }

    /// Runs one frame. No-op without a scene, with a disabled root, or after exit.
    pub fn run_step(&mut self) -> Result<()> {
        if self.state != RendererState::Running {
            return Ok(());
        }

        let Self {
            backend,
            properties,
            scene,
            clock,
            ..
        } = self;

        let Some(scene) = scene.as_mut() else {
            return Ok(());
        };
        if scene.is_disabled(scene.root()) {
            return Ok(());
        }

        backend.activate_context();
        scene.prune(backend).context("failed to prune scene")?;

        let mut close_requested = false;
        for event in backend.poll_events() {
            match event {
                BackendEvent::CloseRequested => close_requested = true,
                BackendEvent::Input(e) => {
                    scene.dispatch(&e, backend);
                }
            }
        }

        scene.update(properties.fixed_dt, backend);

        let frame = clock.tick();
        scene.render(frame.dt, backend);

        backend.swap_buffers();

        if scene.take_exit_request() || close_requested {
            self.exit();
        }
        Ok(())
    }

    /// Requests shutdown; the owner tears the renderer down at its next sweep.
    pub fn exit(&mut self) {
        if matches!(self.state, RendererState::ContextActive | RendererState::Running) {
            log::debug!("renderer '{}' exit requested", self.properties.title);
            self.state = RendererState::ExitRequested;
        }
    }

    /// Unloads the scene and destroys the context.
    pub fn teardown(&mut self) {
        if self.state == RendererState::ContextDestroyed {
            return;
        }
        if let Err(e) = self.unload_object() {
            log::error!("renderer '{}' failed to unload scene: {e:#}", self.properties.title);
        }
        if self.state != RendererState::Created {
            self.backend.destroy_context();
        }
        self.state = RendererState::ContextDestroyed;

        log::info!("renderer '{}' destroyed", self.properties.title);
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::backend::headless::{Command, HeadlessBackend};
    use crate::gfx::CursorMode;
    use crate::input::{Event, Key, KeyEvent};
    use crate::scene::{Ctx, Group, Object};

    type Trace = Rc<RefCell<Vec<String>>>;

    /// Records hooks; asks for exit on Escape.
    struct Recorder {
        trace: Trace,
    }

    impl Object for Recorder {
        fn on_enter(&mut self, _ctx: &mut Ctx<'_>) -> anyhow::Result<()> {
            self.trace.borrow_mut().push("enter".into());
            Ok(())
        }

        fn on_exit(&mut self, _ctx: &mut Ctx<'_>) {
            self.trace.borrow_mut().push("exit".into());
        }

        fn update(&mut self, dt: f32, _ctx: &mut Ctx<'_>) {
            self.trace.borrow_mut().push(format!("update {dt:.4}"));
        }

        fn render(&mut self, _dt: f32, _ctx: &mut Ctx<'_>) {
            self.trace.borrow_mut().push("render".into());
        }

        fn on_event(&mut self, event: &Event, ctx: &mut Ctx<'_>) -> bool {
            self.trace.borrow_mut().push("event".into());
            if let Event::Key(k) = event {
                if k.key == Key::Escape {
                    ctx.request_exit();
                    return true;
                }
            }
            false
        }
    }

    fn scene(trace: &Trace) -> Scene {
        let mut scene = Scene::new(Group);
        scene.attach(scene.root(), Recorder { trace: trace.clone() });
        scene
    }

    fn running(backend: HeadlessBackend, trace: &Trace) -> Renderer<HeadlessBackend> {
        let mut r = Renderer::new(backend, RendererProperties::default().with_title("test"));
        r.create_context().unwrap();
        r.load_object(scene(trace)).unwrap();
        r
    }

    fn is_frame_command(c: &Command) -> bool {
        matches!(c, Command::ActivateContext | Command::PollEvents | Command::SwapBuffers)
    }

    // ── lifecycle ────────────────────────────────────────────────────────

    #[test]
    fn create_context_applies_properties() {
        let backend = HeadlessBackend::new();
        let log = backend.log();
        let props = RendererProperties::default()
            .with_title("win")
            .with_size(640, 480)
            .with_wireframe(true)
            .with_cursor(CursorMode::Disabled);
        let mut r = Renderer::new(backend, props);

        r.create_context().unwrap();

        assert_eq!(r.state(), RendererState::ContextActive);
        assert_eq!(
            log.commands(),
            vec![
                Command::CreateContext { title: "win".into(), width: 640, height: 480 },
                Command::Wireframe(true),
                Command::Cursor(CursorMode::Disabled),
            ]
        );
    }

    #[test]
    fn load_object_returns_previous_scene_unloaded() {
        let trace = Trace::default();
        let mut r = running(HeadlessBackend::new(), &trace);
        assert_eq!(r.state(), RendererState::Running);

        let previous = r.load_object(scene(&trace)).unwrap().unwrap();

        assert!(!previous.is_loaded());
        assert!(r.scene().is_some_and(Scene::is_loaded));
        assert_eq!(*trace.borrow(), vec!["enter", "exit", "enter"]);
    }

    #[test]
    fn load_object_needs_a_context() {
        let trace = Trace::default();
        let mut r = Renderer::new(HeadlessBackend::new(), RendererProperties::default());

        assert!(r.load_object(scene(&trace)).is_err());

        assert_eq!(r.state(), RendererState::Created);
        assert!(r.scene().is_none());
        assert!(trace.borrow().is_empty());
    }

    #[test]
    fn load_object_after_teardown_is_rejected() {
        let trace = Trace::default();
        let backend = HeadlessBackend::new();
        let log = backend.log();
        let mut r = Renderer::new(backend, RendererProperties::default());
        r.create_context().unwrap();
        r.teardown();

        assert!(r.load_object(scene(&trace)).is_err());
        r.teardown();

        assert_eq!(r.state(), RendererState::ContextDestroyed);
        assert!(r.scene().is_none());
        assert!(trace.borrow().is_empty());
        assert_eq!(log.count(|c| *c == Command::DestroyContext), 1);
    }

    #[test]
    fn teardown_unloads_and_destroys_once() {
        let trace = Trace::default();
        let backend = HeadlessBackend::new();
        let log = backend.log();
        let mut r = running(backend, &trace);

        r.teardown();
        r.teardown();

        assert_eq!(r.state(), RendererState::ContextDestroyed);
        assert_eq!(trace.borrow().last().map(String::as_str), Some("exit"));
        assert_eq!(log.count(|c| *c == Command::DestroyContext), 1);
        assert!(!r.backend().has_context());
    }

    #[test]
    fn teardown_without_context_does_not_destroy() {
        let backend = HeadlessBackend::new();
        let log = backend.log();
        let mut r = Renderer::new(backend, RendererProperties::default());

        r.teardown();

        assert_eq!(log.count(|c| *c == Command::DestroyContext), 0);
    }

    // ── steps ────────────────────────────────────────────────────────────

    #[test]
    fn step_order_is_activate_poll_update_render_swap() {
        let trace = Trace::default();
        let backend = HeadlessBackend::new();
        let log = backend.log();
        let events = backend.events();
        let mut r = running(backend, &trace);
        log.clear();
        trace.borrow_mut().clear();

        events.push_input(KeyEvent::pressed(Key::A));
        r.run_step().unwrap();

        assert_eq!(
            log.filter(is_frame_command),
            vec![Command::ActivateContext, Command::PollEvents, Command::SwapBuffers]
        );
        assert_eq!(*trace.borrow(), vec!["event", "update 0.0167", "render"]);
    }

    #[test]
    fn update_sees_fixed_dt() {
        let trace = Trace::default();
        let mut r = Renderer::new(
            HeadlessBackend::new(),
            RendererProperties::default().with_fixed_dt(0.5),
        );
        r.create_context().unwrap();
        r.load_object(scene(&trace)).unwrap();

        r.run_step().unwrap();

        assert!(trace.borrow().contains(&"update 0.5000".to_owned()));
    }

    #[test]
    fn step_without_scene_is_a_no_op() {
        let backend = HeadlessBackend::new();
        let log = backend.log();
        let mut r = Renderer::new(backend, RendererProperties::default());
        r.create_context().unwrap();
        log.clear();

        r.run_step().unwrap();

        assert!(log.commands().is_empty());
    }

    #[test]
    fn disabled_root_skips_the_step() {
        let trace = Trace::default();
        let backend = HeadlessBackend::new();
        let log = backend.log();
        let mut r = running(backend, &trace);
        let scene = r.scene_mut().unwrap();
        let root = scene.root();
        scene.set_disabled(root, true);
        log.clear();

        r.run_step().unwrap();

        assert!(log.commands().is_empty());
        assert_eq!(r.backend().frames(), 0);
    }

    #[test]
    fn close_request_finishes_the_frame_then_exits() {
        let trace = Trace::default();
        let mut r = running(HeadlessBackend::new().close_after(0), &trace);

        r.run_step().unwrap();

        assert!(r.is_exit_requested());
        assert_eq!(r.backend().frames(), 1);
        assert!(trace.borrow().contains(&"render".to_owned()));

        // further steps do nothing
        r.run_step().unwrap();
        assert_eq!(r.backend().frames(), 1);
    }

    #[test]
    fn object_can_request_exit() {
        let trace = Trace::default();
        let backend = HeadlessBackend::new();
        let events = backend.events();
        let mut r = running(backend, &trace);

        r.run_step().unwrap();
        assert!(!r.is_exit_requested());

        events.push_input(KeyEvent::pressed(Key::Escape));
        r.run_step().unwrap();
        assert!(r.is_exit_requested());
    }

    #[test]
    fn marked_objects_are_gone_before_events() {
        let trace = Trace::default();
        let backend = HeadlessBackend::new();
        let events = backend.events();
        let mut r = running(backend, &trace);

        let scene = r.scene_mut().unwrap();
        let victim = scene.children(scene.root())[0];
        scene.mark_for_destruction(victim);
        trace.borrow_mut().clear();

        events.push_input(KeyEvent::pressed(Key::A));
        r.run_step().unwrap();

        assert_eq!(*trace.borrow(), vec!["exit"]);
        assert!(!r.scene().unwrap().contains(victim));
    }
}
