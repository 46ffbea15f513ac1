use anyhow::Result;
use slotmap::SlotMap;

use super::ctx::Ctx;
use super::error::SceneError;
use super::handle::Handle;
use super::object::{AsAny, Object};
use super::ObjectId;
use crate::gfx::RenderApi;
use crate::input::{Event, KeyEvent, MouseButtonEvent, MouseMoveEvent, MouseScrollEvent, WindowResizeEvent};

struct Slot {
    parent: Option<ObjectId>,
    children: Vec<ObjectId>,
    disabled: bool,
    pending_destruction: bool,
    destructible: bool,
    entered: bool,
    /// Checked out while one of the node's hooks runs.
    behavior: Option<Box<dyn Object>>,
}

impl Slot {
    fn new(parent: Option<ObjectId>, behavior: Box<dyn Object>, destructible: bool) -> Self {
        Self {
            parent,
            children: Vec::new(),
            disabled: false,
            pending_destruction: false,
            destructible,
            entered: false,
            behavior: Some(behavior),
        }
    }
}

/// Object tree driven by a renderer.
///
/// Nodes live in an arena and reference each other by `ObjectId`. Children
/// keep attachment order. Traversals snapshot child lists, so nodes attached
/// while a traversal is running take part from the next one.
///
/// Nodes attached to a loaded scene are entered at the next `prune`; until
/// then they are skipped by `update`, `render` and event dispatch.
pub struct Scene {
    slots: SlotMap<ObjectId, Slot>,
    root: ObjectId,
    loaded: bool,
    pending_enter: bool,
    exit_requested: bool,
}

impl Scene {
    pub fn new<R: Object>(root: R) -> Self {
        let mut slots = SlotMap::with_key();
        let root = slots.insert(Slot::new(None, Box::new(root), false));

        Self {
            slots,
            root,
            loaded: false,
            pending_enter: false,
            exit_requested: false,
        }
    }

    pub fn root(&self) -> ObjectId {
        self.root
    }

    /// Typed handle to the root node.
    pub fn root_handle<R: Object>(&self) -> Handle<R> {
        Handle::new(self.root)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Number of live nodes, root included.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, id: ObjectId) -> bool {
        self.slots.contains_key(id)
    }

    // ── structure ────────────────────────────────────────────────────────

    /// Appends a destructible child to `parent`.
    ///
    /// # Panics
    /// If `parent` is not in the scene.
    pub fn attach<U: Object>(&mut self, parent: ObjectId, child: U) -> ObjectId {
        self.insert_child(parent, Box::new(child), true)
    }

    /// Appends a non-destructible child and returns a typed handle to it.
    ///
    /// # Panics
    /// If `parent` is not in the scene.
    pub fn generate_retained<U: Object>(&mut self, parent: ObjectId, child: U) -> Handle<U> {
        Handle::new(self.insert_child(parent, Box::new(child), false))
    }

    fn insert_child(&mut self, parent: ObjectId, child: Box<dyn Object>, destructible: bool) -> ObjectId {
        assert!(self.slots.contains_key(parent), "attach to unknown parent {parent:?}");

        let id = self.slots.insert(Slot::new(Some(parent), child, destructible));
        if let Some(p) = self.slots.get_mut(parent) {
            p.children.push(id);
        }
        if self.loaded {
            self.pending_enter = true;
        }
        id
    }

    /// Snapshot of `id`'s children in attachment order.
    pub fn children(&self, id: ObjectId) -> Vec<ObjectId> {
        self.slots
            .get(id)
            .map(|s| s.children.clone())
            .unwrap_or_default()
    }

    pub fn parent(&self, id: ObjectId) -> Option<ObjectId> {
        self.slots.get(id).and_then(|s| s.parent)
    }

    pub fn get<U: Object>(&self, handle: Handle<U>) -> Option<&U> {
        let behavior = self.slots.get(handle.id())?.behavior.as_deref()?;
        AsAny::as_any(behavior).downcast_ref::<U>()
    }

    pub fn get_mut<U: Object>(&mut self, handle: Handle<U>) -> Option<&mut U> {
        let behavior = self.slots.get_mut(handle.id())?.behavior.as_deref_mut()?;
        AsAny::as_any_mut(behavior).downcast_mut::<U>()
    }

    // ── flags ────────────────────────────────────────────────────────────

    pub fn set_disabled(&mut self, id: ObjectId, disabled: bool) {
        if let Some(slot) = self.slots.get_mut(id) {
            slot.disabled = disabled;
        }
    }

    pub fn is_disabled(&self, id: ObjectId) -> bool {
        self.slots.get(id).is_some_and(|s| s.disabled)
    }

    /// Flags `id` for removal at the next `prune`. Nothing is removed here.
    ///
    /// # Panics
    /// If the node is non-destructible (the root and retained children).
    pub fn mark_for_destruction(&mut self, id: ObjectId) {
        let Some(slot) = self.slots.get_mut(id) else {
            log::debug!("mark_for_destruction on removed object {id:?}");
            return;
        };
        assert!(slot.destructible, "object {id:?} is not destructible");
        slot.pending_destruction = true;
    }

    pub fn is_pending_destruction(&self, id: ObjectId) -> bool {
        self.slots.get(id).is_some_and(|s| s.pending_destruction)
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Returns and clears an exit request raised by an object hook.
    pub fn take_exit_request(&mut self) -> bool {
        std::mem::take(&mut self.exit_requested)
    }

    // ── lifecycle ────────────────────────────────────────────────────────

    /// Enters every node, parents before children.
    ///
    /// A failing `on_enter` aborts the load: nodes entered so far are exited
    /// again and the error is returned.
    pub fn load(&mut self, api: &mut dyn RenderApi) -> Result<()> {
        if self.loaded {
            return Err(SceneError::AlreadyLoaded.into());
        }
        self.loaded = true;
        self.pending_enter = false;

        if let Err(e) = self.enter_subtree(self.root, api) {
            self.exit_subtree(self.root, api);
            self.loaded = false;
            return Err(e);
        }

        log::debug!("scene loaded ({} objects)", self.slots.len());
        Ok(())
    }

    /// Exits every entered node, children before parents.
    pub fn unload(&mut self, api: &mut dyn RenderApi) -> Result<()> {
        if !self.loaded {
            return Err(SceneError::NotLoaded.into());
        }
        self.exit_subtree(self.root, api);
        self.loaded = false;
        self.pending_enter = false;

        log::debug!("scene unloaded");
        Ok(())
    }

    /// Removes every subtree flagged for destruction, then enters nodes
    /// attached since the last sweep.
    ///
    /// Removed nodes get their exit hooks (post-order) before being erased.
    pub fn prune(&mut self, api: &mut dyn RenderApi) -> Result<()> {
        self.prune_node(self.root, api);

        if self.loaded && self.pending_enter {
            self.pending_enter = false;
            self.enter_subtree(self.root, api)?;
        }
        Ok(())
    }

    fn prune_node(&mut self, id: ObjectId, api: &mut dyn RenderApi) {
        let (doomed, survivors): (Vec<_>, Vec<_>) = self
            .children(id)
            .into_iter()
            .partition(|c| self.is_pending_destruction(*c));

        for child in doomed {
            self.exit_subtree(child, api);
            self.remove_subtree(child);
        }

        let live: Vec<ObjectId> = self
            .children(id)
            .into_iter()
            .filter(|c| self.slots.contains_key(*c))
            .collect();
        if let Some(slot) = self.slots.get_mut(id) {
            slot.children = live;
        }

        for child in survivors {
            self.prune_node(child, api);
        }
    }

    fn enter_subtree(&mut self, id: ObjectId, api: &mut dyn RenderApi) -> Result<()> {
        let needs_enter = self.slots.get(id).is_some_and(|s| !s.entered);
        if needs_enter {
            if let Some(result) = self.with_behavior(id, api, |b, ctx| b.on_enter(ctx)) {
                result?;
            }
            if let Some(slot) = self.slots.get_mut(id) {
                slot.entered = true;
            }
        }

        for child in self.children(id) {
            self.enter_subtree(child, api)?;
        }
        Ok(())
    }

    fn exit_subtree(&mut self, id: ObjectId, api: &mut dyn RenderApi) {
        for child in self.children(id) {
            self.exit_subtree(child, api);
        }

        let entered = self.slots.get(id).is_some_and(|s| s.entered);
        if entered {
            if let Some(slot) = self.slots.get_mut(id) {
                slot.entered = false;
            }
            self.with_behavior(id, api, |b, ctx| b.on_exit(ctx));
        }
    }

    fn remove_subtree(&mut self, id: ObjectId) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(slot) = self.slots.remove(next) {
                stack.extend(slot.children);
            }
        }
    }

    // ── per-frame traversal ──────────────────────────────────────────────

    pub fn update(&mut self, dt: f32, api: &mut dyn RenderApi) {
        self.update_node(self.root, dt, api);
    }

    fn update_node(&mut self, id: ObjectId, dt: f32, api: &mut dyn RenderApi) {
        if !self.is_active(id) {
            return;
        }
        self.with_behavior(id, api, |b, ctx| b.update(dt, ctx));

        for child in self.children(id) {
            self.update_node(child, dt, api);
        }
    }

    pub fn render(&mut self, dt: f32, api: &mut dyn RenderApi) {
        self.render_node(self.root, dt, api);
    }

    fn render_node(&mut self, id: ObjectId, dt: f32, api: &mut dyn RenderApi) {
        if !self.is_active(id) {
            return;
        }
        self.with_behavior(id, api, |b, ctx| b.render(dt, ctx));

        for child in self.children(id) {
            self.render_node(child, dt, api);
        }
    }

    /// Offers `event` to the tree; returns whether some node consumed it.
    ///
    /// Per node: `preview_event`, then children from the most recently
    /// attached backwards, then `on_event`. The first `true` stops the walk.
    pub fn dispatch(&mut self, event: &Event, api: &mut dyn RenderApi) -> bool {
        self.dispatch_node(self.root, event, api)
    }

    fn dispatch_node(&mut self, id: ObjectId, event: &Event, api: &mut dyn RenderApi) -> bool {
        if !self.is_active(id) {
            return false;
        }
        if self
            .with_behavior(id, api, |b, ctx| b.preview_event(event, ctx))
            .unwrap_or(false)
        {
            return true;
        }

        for child in self.children(id).into_iter().rev() {
            if self.dispatch_node(child, event, api) {
                return true;
            }
        }

        self.with_behavior(id, api, |b, ctx| b.on_event(event, ctx))
            .unwrap_or(false)
    }

    pub fn on_key(&mut self, event: &KeyEvent, api: &mut dyn RenderApi) -> bool {
        self.dispatch(&Event::Key(*event), api)
    }

    pub fn on_mouse_button(&mut self, event: &MouseButtonEvent, api: &mut dyn RenderApi) -> bool {
        self.dispatch(&Event::MouseButton(*event), api)
    }

    pub fn on_mouse_move(&mut self, event: &MouseMoveEvent, api: &mut dyn RenderApi) -> bool {
        self.dispatch(&Event::MouseMove(*event), api)
    }

    pub fn on_mouse_wheel(&mut self, event: &MouseScrollEvent, api: &mut dyn RenderApi) -> bool {
        self.dispatch(&Event::MouseWheel(*event), api)
    }

    pub fn on_resize(&mut self, event: &WindowResizeEvent, api: &mut dyn RenderApi) -> bool {
        self.dispatch(&Event::Resize(*event), api)
    }

    // ── dispatch plumbing ────────────────────────────────────────────────

    /// Enabled and entered.
    fn is_active(&self, id: ObjectId) -> bool {
        self.slots.get(id).is_some_and(|s| s.entered && !s.disabled)
    }

    /// Checks out the node's behaviour and runs `f` with a context for it.
    ///
    /// Returns `None` when the node is gone or already checked out.
    fn with_behavior<R>(
        &mut self,
        id: ObjectId,
        api: &mut dyn RenderApi,
        f: impl FnOnce(&mut dyn Object, &mut Ctx<'_>) -> R,
    ) -> Option<R> {
        let mut behavior = self.slots.get_mut(id)?.behavior.take()?;

        let out = {
            let mut ctx = Ctx::new(id, self, api);
            f(&mut *behavior, &mut ctx)
        };

        if let Some(slot) = self.slots.get_mut(id) {
            slot.behavior = Some(behavior);
        }
        Some(out)
    }
}
