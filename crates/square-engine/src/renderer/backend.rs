use anyhow::Result;

use super::properties::RendererProperties;
use crate::gfx::RenderApi;
use crate::input::Event;

/// Event surfaced by a backend's poll.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BackendEvent {
    Input(Event),
    /// The window (or equivalent) asked to close.
    CloseRequested,
}

/// Window/context side of a renderer.
///
/// The renderer calls these at fixed points of a step:
/// `activate_context`, then `poll_events`, then `swap_buffers` at the end.
pub trait Backend: RenderApi {
    fn create_context(&mut self, properties: &RendererProperties) -> Result<()>;

    fn destroy_context(&mut self);

    /// Makes this backend's context current.
    fn activate_context(&mut self);

    fn poll_events(&mut self) -> Vec<BackendEvent>;

    fn swap_buffers(&mut self);
}
