use std::path::Path;

use anyhow::{Context, Result};
use bytemuck::Pod;
use glam::Vec4;

use super::buffer::Buffer;
use super::format::{BufferAccess, BufferFormat, DrawMethod, IndexType};
use super::shader::Shader;
use super::shader_source::{read_shader_dir, ShaderSource};
use super::texture::Texture;
use super::vertex_input::VertexInputAssembly;

/// Cursor visibility.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum CursorMode {
    /// Hidden; motion events still report relative movement.
    Disabled,
    #[default]
    Enabled,
}

/// Minimum severity of backend debug messages that get logged.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum DebugMode {
    Off,
    High,
    Med,
    Low,
    #[default]
    Notification,
}

/// Commands and resource factories of the renderer currently dispatching.
///
/// Object hooks reach this through `Ctx::api`.
pub trait RenderApi {
    fn clear_color_buffer(&mut self, color: Vec4);

    fn clear_depth_buffer(&mut self);

    fn wireframe_mode(&mut self, enable: bool);

    fn enable_face_culling(&mut self, enable: bool);

    fn enable_depth_testing(&mut self, enable: bool);

    fn enable_blending(&mut self, enable: bool);

    fn set_viewport(&mut self, x: u32, y: u32, width: u32, height: u32);

    fn set_cursor(&mut self, mode: CursorMode);

    /// Compiles and links a program from stage sources.
    fn gen_shader(&mut self, name: &str, sources: &[ShaderSource]) -> Result<Box<dyn Shader>>;

    fn gen_buffer(&mut self, data: &[u8], format: &BufferFormat, access: BufferAccess) -> Result<Box<dyn Buffer>>;

    fn gen_texture(&mut self, path: &Path) -> Result<Box<dyn Texture>>;

    fn gen_vertex_input_assembly(&mut self, index_type: IndexType) -> Result<Box<dyn VertexInputAssembly>>;

    /// Draws the assembly's elements `instances` times.
    fn draw(&mut self, via: &mut dyn VertexInputAssembly, method: DrawMethod, instances: u32);

    /// Compiles every stage source found in `dir` (see `read_shader_dir`).
    fn gen_shader_from_dir(&mut self, name: &str, dir: &Path) -> Result<Box<dyn Shader>> {
        let sources = read_shader_dir(dir)?;
        self.gen_shader(name, &sources)
            .with_context(|| format!("failed to build shader from {}", dir.display()))
    }
}

impl<'a> dyn RenderApi + 'a {
    /// Typed front-end for `gen_buffer`.
    pub fn gen_buffer_from<T: Pod>(
        &mut self,
        data: &[T],
        format: &BufferFormat,
        access: BufferAccess,
    ) -> Result<Box<dyn Buffer>> {
        self.gen_buffer(bytemuck::cast_slice(data), format, access)
    }

    /// Zero-initialized buffer of `elements` format elements.
    pub fn gen_zeroed_buffer(
        &mut self,
        elements: usize,
        format: &BufferFormat,
        access: BufferAccess,
    ) -> Result<Box<dyn Buffer>> {
        let bytes = vec![0u8; elements * format.stride()];
        self.gen_buffer(&bytes, format, access)
    }
}
