use std::path::Path;

use glam::{Mat4, Vec4};

use super::command_log::{Command, HeadlessLog, ResourceKind, UniformValue};
use super::reflect::Reflection;
use crate::gfx::{
    attribute_bindings, warn_missing_uniform, AttributeBinding, Buffer, BufferAccess, BufferFormat,
    GfxError, Shader, Texture, TextureFormat, UniformCache, VertexInputAssembly, VertexInputs,
};

pub struct HeadlessBuffer {
    id: u32,
    format: BufferFormat,
    access: BufferAccess,
    bytes: Vec<u8>,
    log: HeadlessLog,
}

impl HeadlessBuffer {
    pub(crate) fn new(log: &HeadlessLog, data: &[u8], format: &BufferFormat, access: BufferAccess) -> Self {
        Self {
            id: log.acquire(ResourceKind::Buffer),
            format: format.clone(),
            access,
            bytes: data.to_vec(),
            log: log.clone(),
        }
    }
}

impl Buffer for HeadlessBuffer {
    fn id(&self) -> u32 {
        self.id
    }

    fn format(&self) -> &BufferFormat {
        &self.format
    }

    fn access(&self) -> BufferAccess {
        self.access
    }

    fn size_in_bytes(&self) -> usize {
        self.bytes.len()
    }

    fn mapped(&self) -> Option<&[u8]> {
        self.access.is_mapped().then_some(self.bytes.as_slice())
    }

    fn mapped_mut(&mut self) -> Option<&mut [u8]> {
        self.access.is_mapped().then_some(self.bytes.as_mut_slice())
    }
}

impl Drop for HeadlessBuffer {
    fn drop(&mut self) {
        self.log.release(ResourceKind::Buffer, self.id);
    }
}

pub struct HeadlessShader {
    id: u32,
    name: String,
    reflection: Reflection,
    cache: UniformCache,
    log: HeadlessLog,
}

impl HeadlessShader {
    pub(crate) fn new(log: &HeadlessLog, name: &str, reflection: Reflection) -> Self {
        Self {
            id: log.acquire(ResourceKind::Shader),
            name: name.to_owned(),
            reflection,
            cache: UniformCache::new(),
            log: log.clone(),
        }
    }

    fn uniform_location(&mut self, name: &str, suppress_warnings: bool) -> Option<u32> {
        let uniforms = &self.reflection.uniforms;
        let loc = self.cache.location(name, |n| uniforms.get(n).copied());
        if loc.is_none() {
            warn_missing_uniform(&self.name, name, suppress_warnings);
        }
        loc
    }

    fn record(&self, name: &str, value: UniformValue) {
        self.log.record(Command::Uniform {
            shader: self.id,
            name: name.to_owned(),
            value,
        });
    }
}

impl Shader for HeadlessShader {
    fn name(&self) -> &str {
        &self.name
    }

    fn id(&self) -> u32 {
        self.id
    }

    fn activate(&mut self) {
        self.log.record(Command::ActivateShader(self.id));
    }

    fn attribute_location(&self, name: &str) -> Option<u32> {
        self.reflection.attributes.get(name).copied()
    }

    fn upload_mat4(&mut self, name: &str, value: &Mat4, suppress_warnings: bool) {
        if self.uniform_location(name, suppress_warnings).is_some() {
            self.record(name, UniformValue::Mat4(*value));
        }
    }

    fn upload_vec4(&mut self, name: &str, value: Vec4, suppress_warnings: bool) {
        if self.uniform_location(name, suppress_warnings).is_some() {
            self.record(name, UniformValue::Vec4(value));
        }
    }

    fn upload_f32(&mut self, name: &str, value: f32, suppress_warnings: bool) {
        if self.uniform_location(name, suppress_warnings).is_some() {
            self.record(name, UniformValue::F32(value));
        }
    }

    fn upload_texture(&mut self, name: &str, texture: Option<&dyn Texture>, suppress_warnings: bool) {
        let Some(texture) = texture else {
            return;
        };
        if self.uniform_location(name, suppress_warnings).is_none() {
            return;
        }
        let unit = self.cache.texture_unit(name);
        self.record(name, UniformValue::Texture { id: texture.id(), unit });
    }

    fn upload_storage_buffer(&mut self, name: &str, buffer: Option<&dyn Buffer>, suppress_warnings: bool) {
        let Some(buffer) = buffer else {
            return;
        };
        let blocks = &self.reflection.storage_blocks;
        if self.cache.location(name, |n| blocks.get(n).copied()).is_none() {
            warn_missing_uniform(&self.name, name, suppress_warnings);
            return;
        }
        let binding = self.cache.storage_binding(name);
        self.record(name, UniformValue::Storage { id: buffer.id(), binding });
    }
}

impl Drop for HeadlessShader {
    fn drop(&mut self) {
        self.log.release(ResourceKind::Shader, self.id);
    }
}

pub struct HeadlessTexture {
    id: u32,
    width: u32,
    height: u32,
    format: TextureFormat,
    log: HeadlessLog,
}

impl HeadlessTexture {
    pub(crate) fn load(log: &HeadlessLog, path: &Path) -> Result<Self, GfxError> {
        let image = image::open(path).map_err(|source| GfxError::ImageDecode {
            path: path.to_path_buf(),
            source,
        })?;

        let format = match image.color() {
            image::ColorType::L8 => TextureFormat::R8,
            image::ColorType::La8 => TextureFormat::Rg8,
            image::ColorType::Rgb8 => TextureFormat::Rgb8,
            image::ColorType::Rgb32F => TextureFormat::Rgb32f,
            image::ColorType::Rgba32F => TextureFormat::Rgba32f,
            _ => TextureFormat::Rgba8,
        };

        Ok(Self {
            id: log.acquire(ResourceKind::Texture),
            width: image.width(),
            height: image.height(),
            format,
            log: log.clone(),
        })
    }
}

impl Texture for HeadlessTexture {
    fn id(&self) -> u32 {
        self.id
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn format(&self) -> TextureFormat {
        self.format
    }
}

impl Drop for HeadlessTexture {
    fn drop(&mut self) {
        self.log.release(ResourceKind::Texture, self.id);
    }
}

pub struct HeadlessVertexInputAssembly {
    id: u32,
    inputs: VertexInputs,
    bindings: Vec<AttributeBinding>,
    log: HeadlessLog,
}

impl HeadlessVertexInputAssembly {
    pub(crate) fn new(log: &HeadlessLog, inputs: VertexInputs) -> Self {
        Self {
            id: log.acquire(ResourceKind::VertexInputAssembly),
            inputs,
            bindings: Vec::new(),
            log: log.clone(),
        }
    }

    pub fn bindings(&self) -> &[AttributeBinding] {
        &self.bindings
    }
}

impl VertexInputAssembly for HeadlessVertexInputAssembly {
    fn id(&self) -> u32 {
        self.id
    }

    fn inputs(&self) -> &VertexInputs {
        &self.inputs
    }

    fn inputs_mut(&mut self) -> &mut VertexInputs {
        &mut self.inputs
    }

    fn bind_shader(&mut self, shader: &dyn Shader) {
        self.bindings = attribute_bindings(self.inputs.vertex_buffers(), shader);
        self.log.record(Command::BindShader {
            via: self.id,
            shader: shader.id(),
            bindings: self.bindings.clone(),
        });
    }

    fn activate(&mut self) {
        self.log.record(Command::ActivateVia(self.id));
    }
}

impl Drop for HeadlessVertexInputAssembly {
    fn drop(&mut self) {
        self.log.release(ResourceKind::VertexInputAssembly, self.id);
    }
}
