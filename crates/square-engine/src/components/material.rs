use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use glam::{Mat4, Vec4};

use super::camera::{Camera, Projectable};
use super::mesh::{InstancedMesh, Mesh, MeshData};
use crate::entity::{Entity, RenderSystem};
use crate::gfx::{RenderApi, Shader, ShaderSource, Texture};
use crate::scene::{Ctx, Handle, Object};

pub const COLOR_UNIFORM: &str = "u_color";
pub const TEXTURE_UNIFORM: &str = "u_texture";

/// Borrowed view of a built material, handed to `MaterialRenderSystem`.
pub struct MaterialParts<'a> {
    pub shader: &'a mut dyn Shader,
    pub color: Option<Vec4>,
    pub texture: Option<&'a dyn Texture>,
    pub meshes: &'a mut [Mesh],
    pub instanced: &'a mut [InstancedMesh],
}

/// Something drawable with a shader through a camera.
pub trait MaterialLike {
    fn camera(&self) -> Option<Handle<Entity<Camera>>>;

    /// `None` until the material has been built.
    fn parts(&mut self) -> Option<MaterialParts<'_>>;
}

/// Activates the material's shader, uploads the camera matrices and material
/// uniforms, then draws every mesh.
///
/// Skips the material when it has no camera, the camera is gone, or the
/// material is not built.
#[derive(Debug, Copy, Clone, Default)]
pub struct MaterialRenderSystem;

impl<T: MaterialLike> RenderSystem<T> for MaterialRenderSystem {
    fn render(&self, _dt: f32, material: &mut T, ctx: &mut Ctx<'_>) {
        let Some(camera) = material.camera() else {
            return;
        };
        let Some((projection, view)) = ctx
            .get(camera)
            .map(|c| (c.projection_matrix(), c.view_matrix()))
        else {
            return;
        };
        let Some(parts) = material.parts() else {
            return;
        };

        parts.shader.activate();
        parts.shader.upload_mat4("projection", &projection, false);
        parts.shader.upload_mat4("view", &view, false);
        if let Some(color) = parts.color {
            parts.shader.upload_vec4(COLOR_UNIFORM, color, false);
        }
        parts.shader.upload_texture(TEXTURE_UNIFORM, parts.texture, true);

        let api = ctx.api();
        for mesh in parts.meshes.iter_mut() {
            mesh.draw(&mut *parts.shader, &mut *api, &Mat4::IDENTITY);
        }
        for mesh in parts.instanced.iter_mut() {
            mesh.draw(&mut *parts.shader, &mut *api, &Mat4::IDENTITY);
        }
    }
}

enum MeshSpec {
    Single(MeshData),
    Instanced { data: MeshData, instances: Vec<Mat4>, capacity: usize },
}

/// Shader program plus the meshes drawn with it.
///
/// Holds only descriptions until it enters a loaded scene: the shader is
/// compiled, the texture loaded and the meshes built in `on_enter`, and all
/// of it is released in `on_exit`.
pub struct Material {
    name: String,
    camera: Option<Handle<Entity<Camera>>>,
    sources: Vec<ShaderSource>,
    color: Option<Vec4>,
    texture_path: Option<PathBuf>,
    specs: Vec<MeshSpec>,

    shader: Option<Box<dyn Shader>>,
    texture: Option<Box<dyn Texture>>,
    meshes: Vec<Mesh>,
    instanced: Vec<InstancedMesh>,
}

impl Material {
    pub fn new(name: impl Into<String>, sources: Vec<ShaderSource>) -> Self {
        Self {
            name: name.into(),
            camera: None,
            sources,
            color: None,
            texture_path: None,
            specs: Vec::new(),
            shader: None,
            texture: None,
            meshes: Vec::new(),
            instanced: Vec::new(),
        }
    }

    /// Entity drawing this material every frame.
    pub fn entity(self) -> Entity<Material> {
        Entity::new(self).with_render_system(MaterialRenderSystem)
    }

    pub fn with_camera(mut self, camera: Handle<Entity<Camera>>) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn with_color(mut self, color: Vec4) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_texture(mut self, path: impl Into<PathBuf>) -> Self {
        self.texture_path = Some(path.into());
        self
    }

    pub fn with_mesh(mut self, data: MeshData) -> Self {
        self.specs.push(MeshSpec::Single(data));
        self
    }

    /// Adds an instanced mesh with room for `capacity` instances, starting with `instances`.
    pub fn with_instanced_mesh(mut self, data: MeshData, instances: Vec<Mat4>, capacity: usize) -> Self {
        self.specs.push(MeshSpec::Instanced { data, instances, capacity });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_camera(&mut self, camera: Handle<Entity<Camera>>) {
        self.camera = Some(camera);
    }

    pub fn color(&self) -> Option<Vec4> {
        self.color
    }

    pub fn set_color(&mut self, color: Vec4) {
        self.color = Some(color);
    }

    pub fn is_built(&self) -> bool {
        self.shader.is_some()
    }

    pub fn shader(&self) -> Option<&dyn Shader> {
        self.shader.as_deref()
    }

    pub fn meshes_mut(&mut self) -> &mut [Mesh] {
        &mut self.meshes
    }

    pub fn instanced_mut(&mut self) -> &mut [InstancedMesh] {
        &mut self.instanced
    }

    fn release(&mut self) {
        self.meshes.clear();
        self.instanced.clear();
        self.texture = None;
        self.shader = None;
    }
}

impl MaterialLike for Material {
    fn camera(&self) -> Option<Handle<Entity<Camera>>> {
        self.camera
    }

    fn parts(&mut self) -> Option<MaterialParts<'_>> {
        let shader = self.shader.as_deref_mut()?;
        Some(MaterialParts {
            shader,
            color: self.color,
            texture: self.texture.as_deref(),
            meshes: &mut self.meshes,
            instanced: &mut self.instanced,
        })
    }
}

impl Material {
    fn build(&mut self, api: &mut dyn RenderApi) -> Result<()> {
        let shader = api
            .gen_shader(&self.name, &self.sources)
            .with_context(|| format!("material '{}'", self.name))?;

        if let Some(path) = &self.texture_path {
            let texture = api
                .gen_texture(path)
                .with_context(|| format!("material '{}'", self.name))?;
            self.texture = Some(texture);
        }

        for spec in &self.specs {
            match spec {
                MeshSpec::Single(data) => {
                    let mut mesh = data.build(api)?;
                    mesh.bind_shader(shader.as_ref());
                    self.meshes.push(mesh);
                }
                MeshSpec::Instanced { data, instances, capacity } => {
                    if instances.len() > *capacity {
                        bail!(
                            "material '{}': {} instances exceed capacity {}",
                            self.name,
                            instances.len(),
                            capacity
                        );
                    }
                    let base = data.build(api)?;
                    let mut mesh = InstancedMesh::new(api, base, *capacity)?;
                    for model in instances {
                        mesh.push_instance(*model);
                    }
                    mesh.bind_shader(shader.as_ref());
                    self.instanced.push(mesh);
                }
            }
        }

        self.shader = Some(shader);
        Ok(())
    }
}

impl Object for Material {
    fn on_enter(&mut self, ctx: &mut Ctx<'_>) -> Result<()> {
        if let Err(e) = self.build(ctx.api()) {
            self.release();
            return Err(e);
        }
        log::debug!(
            "material '{}' built ({} meshes, {} instanced)",
            self.name,
            self.meshes.len(),
            self.instanced.len()
        );
        Ok(())
    }

    fn on_exit(&mut self, _ctx: &mut Ctx<'_>) {
        self.release();
    }
}
