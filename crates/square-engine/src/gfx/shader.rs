use std::collections::HashMap;

use glam::{Mat4, Vec4};

use super::buffer::Buffer;
use super::texture::Texture;

/// Compiled shader program.
///
/// Uniforms are addressed by name. Implementations resolve names lazily and
/// cache the result with a `UniformCache`.
///
/// `suppress_warnings` silences the diagnostic for names the program does not
/// declare. Passing `None` for a texture or storage buffer is a no-op.
pub trait Shader {
    fn name(&self) -> &str;

    fn id(&self) -> u32;

    fn activate(&mut self);

    /// Input location of a vertex attribute, if the program declares it.
    fn attribute_location(&self, name: &str) -> Option<u32>;

    fn upload_mat4(&mut self, name: &str, value: &Mat4, suppress_warnings: bool);

    fn upload_vec4(&mut self, name: &str, value: Vec4, suppress_warnings: bool);

    fn upload_f32(&mut self, name: &str, value: f32, suppress_warnings: bool);

    fn upload_texture(&mut self, name: &str, texture: Option<&dyn Texture>, suppress_warnings: bool);

    fn upload_storage_buffer(&mut self, name: &str, buffer: Option<&dyn Buffer>, suppress_warnings: bool);
}

/// Per-program name resolution cache.
///
/// Locations (including misses) are resolved once per name. Texture units
/// and storage bindings are handed out in first-use order.
#[derive(Debug, Default)]
pub struct UniformCache {
    locations: HashMap<String, Option<u32>>,
    texture_units: HashMap<String, u32>,
    storage_bindings: HashMap<String, u32>,
}

impl UniformCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached location for `name`, calling `resolve` on first use only.
    pub fn location(&mut self, name: &str, resolve: impl FnOnce(&str) -> Option<u32>) -> Option<u32> {
        if let Some(loc) = self.locations.get(name) {
            return *loc;
        }
        let loc = resolve(name);
        self.locations.insert(name.to_owned(), loc);
        loc
    }

    pub fn texture_unit(&mut self, name: &str) -> u32 {
        next_slot(&mut self.texture_units, name)
    }

    pub fn storage_binding(&mut self, name: &str) -> u32 {
        next_slot(&mut self.storage_bindings, name)
    }

    /// Number of distinct names resolved so far.
    pub fn resolved(&self) -> usize {
        self.locations.len()
    }
}

fn next_slot(slots: &mut HashMap<String, u32>, name: &str) -> u32 {
    let next = slots.len() as u32;
    *slots.entry(name.to_owned()).or_insert(next)
}

/// Emits the missing-uniform diagnostic unless suppressed.
pub fn warn_missing_uniform(shader: &str, name: &str, suppress_warnings: bool) {
    if !suppress_warnings {
        log::warn!("No uniform '{name}' exists in the shader '{shader}'");
    }
}
