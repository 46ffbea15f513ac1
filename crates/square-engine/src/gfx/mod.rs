//! Render-resource abstraction.
//!
//! Backends implement `RenderApi` and the resource traits; meshes and
//! materials only ever see these interfaces.

mod api;
mod buffer;
mod error;
mod format;
mod shader;
mod shader_source;
mod texture;
mod vertex_input;

pub use api::{CursorMode, DebugMode, RenderApi};
pub use buffer::Buffer;
pub use error::GfxError;
pub use format::{AttributeType, BufferAccess, BufferAttribute, BufferFormat, DrawMethod, IndexType};
pub use shader::{warn_missing_uniform, Shader, UniformCache};
pub use shader_source::{read_shader_dir, ShaderSource, ShaderStage};
pub use texture::{Texture, TextureFormat};
pub use vertex_input::{attribute_bindings, AttributeBinding, VertexInputAssembly, VertexInputs};
