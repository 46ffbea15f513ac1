use super::handle::Handle;
use super::object::Object;
use super::tree::Scene;
use super::ObjectId;
use crate::gfx::RenderApi;

/// Context handed to every object hook.
///
/// Carries the id of the node being dispatched, the scene it lives in and the
/// render API of the renderer driving the scene. The node's own behaviour is
/// checked out while its hook runs, so `get`/`get_mut` on `ctx.id()` return
/// `None`.
pub struct Ctx<'a> {
    id: ObjectId,
    scene: &'a mut Scene,
    api: &'a mut dyn RenderApi,
}

impl<'a> Ctx<'a> {
    pub(crate) fn new(id: ObjectId, scene: &'a mut Scene, api: &'a mut dyn RenderApi) -> Self {
        Self { id, scene, api }
    }

    /// Node currently being dispatched.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The active renderer.
    pub fn api(&mut self) -> &mut dyn RenderApi {
        &mut *self.api
    }

    pub fn scene(&self) -> &Scene {
        &*self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut *self.scene
    }

    /// Scene and render API at the same time.
    pub fn split(&mut self) -> (&mut Scene, &mut dyn RenderApi) {
        (&mut *self.scene, &mut *self.api)
    }

    /// Attaches a destructible child to the current node.
    pub fn attach<U: Object>(&mut self, child: U) -> ObjectId {
        self.scene.attach(self.id, child)
    }

    pub fn attach_to<U: Object>(&mut self, parent: ObjectId, child: U) -> ObjectId {
        self.scene.attach(parent, child)
    }

    /// Attaches a non-destructible child to the current node and keeps a handle to it.
    pub fn generate_retained<U: Object>(&mut self, child: U) -> Handle<U> {
        self.scene.generate_retained(self.id, child)
    }

    pub fn get<U: Object>(&self, handle: Handle<U>) -> Option<&U> {
        self.scene.get(handle)
    }

    pub fn get_mut<U: Object>(&mut self, handle: Handle<U>) -> Option<&mut U> {
        self.scene.get_mut(handle)
    }

    pub fn children(&self) -> Vec<ObjectId> {
        self.scene.children(self.id)
    }

    pub fn parent(&self) -> Option<ObjectId> {
        self.scene.parent(self.id)
    }

    /// See `Scene::mark_for_destruction`.
    pub fn mark_for_destruction(&mut self, id: ObjectId) {
        self.scene.mark_for_destruction(id);
    }

    /// Flags the current node for removal at the next prune.
    pub fn destroy(&mut self) {
        self.scene.mark_for_destruction(self.id);
    }

    pub fn set_disabled(&mut self, id: ObjectId, disabled: bool) {
        self.scene.set_disabled(id, disabled);
    }

    /// Asks the renderer driving this scene to shut down after the current step.
    pub fn request_exit(&mut self) {
        self.scene.request_exit();
    }
}
