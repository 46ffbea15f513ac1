//! Renderers and the application loop.

mod app;
mod backend;
mod properties;
mod render_loop;

pub use app::{App, Driver, RendererId};
pub use backend::{Backend, BackendEvent};
pub use properties::RendererProperties;
pub use render_loop::{Renderer, RendererState};
