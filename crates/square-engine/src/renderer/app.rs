use anyhow::Result;

use super::backend::Backend;
use super::render_loop::Renderer;
use crate::scene::Scene;

/// Object-safe view of a `Renderer` over any backend.
pub trait Driver {
    fn title(&self) -> &str;
    fn create_context(&mut self) -> Result<()>;
    fn load_object(&mut self, scene: Scene) -> Result<Option<Scene>>;
    fn run_step(&mut self) -> Result<()>;
    fn is_exit_requested(&self) -> bool;
    fn exit(&mut self);
    fn teardown(&mut self);
}

impl<B: Backend> Driver for Renderer<B> {
    fn title(&self) -> &str {
        &self.properties().title
    }

    fn create_context(&mut self) -> Result<()> {
        Renderer::create_context(self)
    }

    fn load_object(&mut self, scene: Scene) -> Result<Option<Scene>> {
        Renderer::load_object(self, scene)
    }

    fn run_step(&mut self) -> Result<()> {
        Renderer::run_step(self)
    }

    fn is_exit_requested(&self) -> bool {
        Renderer::is_exit_requested(self)
    }

    fn exit(&mut self) {
        Renderer::exit(self)
    }

    fn teardown(&mut self) {
        Renderer::teardown(self)
    }
}

/// Identifies a renderer attached to an `App`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct RendererId(u64);

/// Owns every renderer and runs the main loop.
///
/// Renderers are stepped in attachment order. A renderer that asked to exit
/// (or whose step failed) is torn down after the sweep, never in the middle
/// of it.
#[derive(Default)]
pub struct App {
    renderers: Vec<(RendererId, Box<dyn Driver>)>,
    next_id: u64,
}

impl App {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the renderer's context and loads `scene` into it.
    ///
    /// On failure the context is destroyed again and the renderer is dropped.
    pub fn attach_renderer<B: Backend + 'static>(
        &mut self,
        renderer: Renderer<B>,
        scene: Scene,
    ) -> Result<RendererId> {
        let mut driver: Box<dyn Driver> = Box::new(renderer);

        if let Err(e) = driver.create_context() {
            driver.teardown();
            return Err(e);
        }
        if let Err(e) = driver.load_object(scene) {
            driver.teardown();
            return Err(e);
        }

        let id = RendererId(self.next_id);
        self.next_id += 1;

        log::debug!("renderer '{}' attached as {id:?}", driver.title());
        self.renderers.push((id, driver));
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    pub fn contains(&self, id: RendererId) -> bool {
        self.renderers.iter().any(|(rid, _)| *rid == id)
    }

    pub fn ids(&self) -> Vec<RendererId> {
        self.renderers.iter().map(|(id, _)| *id).collect()
    }

    /// Flags a renderer for teardown at the end of the next sweep.
    pub fn close(&mut self, id: RendererId) -> bool {
        match self.renderers.iter_mut().find(|(rid, _)| *rid == id) {
            Some((_, r)) => {
                r.exit();
                true
            }
            None => false,
        }
    }

    /// One sweep over every renderer, then removal of the ones that exited.
    pub fn tick(&mut self) {
        for (id, renderer) in self.renderers.iter_mut() {
            if renderer.is_exit_requested() {
                continue;
            }
            if let Err(e) = renderer.run_step() {
                log::error!("renderer '{}' ({id:?}) failed: {e:#}", renderer.title());
                renderer.exit();
            }
        }

        self.renderers.retain_mut(|(_, renderer)| {
            if renderer.is_exit_requested() {
                renderer.teardown();
                false
            } else {
                true
            }
        });
    }

    /// Ticks until no renderer is left.
    pub fn run(&mut self) {
        while !self.renderers.is_empty() {
            self.tick();
        }
        log::debug!("all renderers closed");
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use anyhow::bail;

    use super::*;
    use crate::backend::headless::{Command, HeadlessBackend};
    use crate::renderer::RendererProperties;
    use crate::scene::{Ctx, Group, Object};

    type Trace = Rc<RefCell<Vec<String>>>;

    struct Tagged {
        tag: &'static str,
        trace: Trace,
    }

    impl Object for Tagged {
        fn render(&mut self, _dt: f32, _ctx: &mut Ctx<'_>) {
            self.trace.borrow_mut().push(format!("{}.render", self.tag));
        }

        fn on_exit(&mut self, _ctx: &mut Ctx<'_>) {
            self.trace.borrow_mut().push(format!("{}.exit", self.tag));
        }
    }

    struct FailsToEnter;

    impl Object for FailsToEnter {
        fn on_enter(&mut self, _ctx: &mut Ctx<'_>) -> Result<()> {
            bail!("no resources")
        }
    }

    /// Attaches a child that cannot enter, so the next prune fails.
    struct SpawnsBroken;

    impl Object for SpawnsBroken {
        fn update(&mut self, _dt: f32, ctx: &mut Ctx<'_>) {
            ctx.attach(FailsToEnter);
        }
    }

    fn renderer(backend: HeadlessBackend, title: &str) -> Renderer<HeadlessBackend> {
        Renderer::new(backend, RendererProperties::default().with_title(title))
    }

    fn tagged(tag: &'static str, trace: &Trace) -> Scene {
        let mut scene = Scene::new(Group);
        scene.attach(scene.root(), Tagged { tag, trace: trace.clone() });
        scene
    }

    // ── attach ───────────────────────────────────────────────────────────

    #[test]
    fn attach_runs_renderer_and_assigns_ids() {
        let trace = Trace::default();
        let mut app = App::new();

        let a = app.attach_renderer(renderer(HeadlessBackend::new(), "a"), tagged("a", &trace)).unwrap();
        let b = app.attach_renderer(renderer(HeadlessBackend::new(), "b"), tagged("b", &trace)).unwrap();

        assert_ne!(a, b);
        assert_eq!(app.ids(), vec![a, b]);
        assert!(app.contains(a));
    }

    #[test]
    fn failed_context_is_reported_without_destroy() {
        let backend = HeadlessBackend::new().failing_context();
        let log = backend.log();
        let mut app = App::new();

        let result = app.attach_renderer(renderer(backend, "broken"), Scene::new(Group));

        assert!(result.is_err());
        assert!(app.is_empty());
        assert_eq!(log.count(|c| *c == Command::DestroyContext), 0);
    }

    #[test]
    fn failed_load_destroys_the_context() {
        let backend = HeadlessBackend::new();
        let log = backend.log();
        let mut scene = Scene::new(Group);
        scene.attach(scene.root(), FailsToEnter);
        let mut app = App::new();

        let err = app.attach_renderer(renderer(backend, "broken"), scene).unwrap_err();

        assert!(format!("{err:#}").contains("no resources"));
        assert!(app.is_empty());
        assert_eq!(log.count(|c| *c == Command::DestroyContext), 1);
    }

    // ── sweeps ───────────────────────────────────────────────────────────

    #[test]
    fn exited_renderers_are_torn_down_after_the_sweep() {
        let trace = Trace::default();
        let mut app = App::new();
        app.attach_renderer(renderer(HeadlessBackend::new().close_after(0), "a"), tagged("a", &trace))
            .unwrap();
        let b = app.attach_renderer(renderer(HeadlessBackend::new(), "b"), tagged("b", &trace)).unwrap();

        app.tick();

        assert_eq!(*trace.borrow(), vec!["a.render", "b.render", "a.exit"]);
        assert_eq!(app.ids(), vec![b]);
    }

    #[test]
    fn close_flags_for_the_next_sweep() {
        let trace = Trace::default();
        let mut app = App::new();
        let a = app.attach_renderer(renderer(HeadlessBackend::new(), "a"), tagged("a", &trace)).unwrap();

        assert!(app.close(a));
        assert!(app.contains(a));
        app.tick();

        assert!(app.is_empty());
        assert!(!app.close(a));
        assert_eq!(*trace.borrow(), vec!["a.exit"]);
    }

    #[test]
    fn failing_step_removes_only_that_renderer() {
        let trace = Trace::default();
        let mut app = App::new();
        let mut scene = Scene::new(Group);
        scene.attach(scene.root(), SpawnsBroken);
        app.attach_renderer(renderer(HeadlessBackend::new(), "broken"), scene).unwrap();
        let ok = app.attach_renderer(renderer(HeadlessBackend::new(), "ok"), tagged("ok", &trace)).unwrap();

        // first step attaches the child, second step fails to enter it
        app.tick();
        assert_eq!(app.len(), 2);
        app.tick();

        assert_eq!(app.ids(), vec![ok]);
    }

    #[test]
    fn run_returns_once_every_renderer_closed() {
        let a = HeadlessBackend::new().close_after(2);
        let b = HeadlessBackend::new().close_after(5);
        let (la, lb) = (a.log(), b.log());
        let mut app = App::new();
        app.attach_renderer(renderer(a, "a"), Scene::new(Group)).unwrap();
        app.attach_renderer(renderer(b, "b"), Scene::new(Group)).unwrap();

        app.run();

        assert!(app.is_empty());
        assert_eq!(la.count(|c| *c == Command::SwapBuffers), 3);
        assert_eq!(lb.count(|c| *c == Command::SwapBuffers), 6);
    }
}
