use anyhow::{Context, Result};
use bytemuck::Pod;
use glam::Mat4;

use super::transform::{Transform, Transformable};
use crate::gfx::{
    AttributeType, Buffer, BufferAccess, BufferAttribute, BufferFormat, DrawMethod, IndexType,
    RenderApi, Shader, VertexInputAssembly,
};

/// Name of the per-draw model matrix uniform.
pub const MODEL_UNIFORM: &str = "model";
/// Name of the storage block holding per-instance model matrices.
pub const INSTANCES_BLOCK: &str = "model_instances";

/// CPU-side description of a mesh, turned into GPU resources by `build`.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub format: BufferFormat,
    pub vertices: Vec<u8>,
    pub index_type: IndexType,
    pub indices: Vec<u8>,
    pub method: DrawMethod,
    pub transform: Transform,
}

impl MeshData {
    pub fn new<V: Pod>(format: BufferFormat, vertices: &[V], method: DrawMethod) -> Self {
        Self {
            format,
            vertices: bytemuck::cast_slice(vertices).to_vec(),
            index_type: IndexType::None,
            indices: Vec::new(),
            method,
            transform: Transform::new(),
        }
    }

    pub fn with_indices<I: Pod>(mut self, index_type: IndexType, indices: &[I]) -> Self {
        self.index_type = index_type;
        self.indices = bytemuck::cast_slice(indices).to_vec();
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Uploads the data into static buffers behind a new vertex input assembly.
    pub fn build(&self, api: &mut dyn RenderApi) -> Result<Mesh> {
        let mut via = api
            .gen_vertex_input_assembly(self.index_type)
            .context("failed to create vertex input assembly")?;

        let vertices = api
            .gen_buffer(&self.vertices, &self.format, BufferAccess::Static)
            .context("failed to create vertex buffer")?;
        via.add_vertex_buffer(vertices);

        if let Some(format) = self.index_type.format() {
            let indices = api
                .gen_buffer(&self.indices, &format, BufferAccess::Static)
                .context("failed to create index buffer")?;
            via.set_index_buffer(indices);
        }

        Ok(Mesh {
            via,
            method: self.method,
            transform: self.transform,
        })
    }
}

/// Vertex input assembly with a draw method and a model transform.
///
/// The assembly must be bound to the shader that is active when `draw` runs.
pub struct Mesh {
    via: Box<dyn VertexInputAssembly>,
    method: DrawMethod,
    transform: Transform,
}

impl Mesh {
    pub fn new(via: Box<dyn VertexInputAssembly>, method: DrawMethod) -> Self {
        Self {
            via,
            method,
            transform: Transform::new(),
        }
    }

    pub fn method(&self) -> DrawMethod {
        self.method
    }

    pub fn input_assembly(&self) -> &dyn VertexInputAssembly {
        self.via.as_ref()
    }

    pub fn input_assembly_mut(&mut self) -> &mut dyn VertexInputAssembly {
        self.via.as_mut()
    }

    pub fn bind_shader(&mut self, shader: &dyn Shader) {
        self.via.bind_shader(shader);
    }

    /// Uploads `parent * transform` as the model matrix and draws once.
    pub fn draw(&mut self, shader: &mut dyn Shader, api: &mut dyn RenderApi, parent: &Mat4) {
        let model = *parent * *self.transform.matrix();
        shader.upload_mat4(MODEL_UNIFORM, &model, false);
        api.draw(self.via.as_mut(), self.method, 1);
    }

    fn draw_instances(&mut self, api: &mut dyn RenderApi, instances: u32) {
        api.draw(self.via.as_mut(), self.method, instances);
    }
}

impl Transformable for Mesh {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

/// A base mesh drawn once per pushed instance transform.
///
/// Instance matrices live in a persistently mapped storage buffer of fixed
/// capacity.
pub struct InstancedMesh {
    base: Mesh,
    transform: Transform,
    instances: Box<dyn Buffer>,
    capacity: usize,
    count: usize,
}

impl InstancedMesh {
    pub fn new(api: &mut dyn RenderApi, base: Mesh, capacity: usize) -> Result<Self> {
        let format = BufferFormat::new([BufferAttribute::new(AttributeType::Storage, INSTANCES_BLOCK)]);
        let bytes = vec![0u8; capacity * std::mem::size_of::<Mat4>()];
        let instances = api
            .gen_buffer(&bytes, &format, BufferAccess::ReadWrite)
            .context("failed to create instance buffer")?;

        Ok(Self {
            base,
            transform: Transform::new(),
            instances,
            capacity,
            count: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn instance_count(&self) -> usize {
        self.count
    }

    pub fn base(&self) -> &Mesh {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut Mesh {
        &mut self.base
    }

    /// # Panics
    /// If the mesh is already at capacity.
    pub fn push_instance(&mut self, model: Mat4) {
        assert!(
            self.count < self.capacity,
            "instance capacity {} exceeded",
            self.capacity
        );
        self.count += 1;
        self.set_instance_transform(self.count - 1, model);
    }

    pub fn pop_instance(&mut self) {
        self.count = self.count.saturating_sub(1);
    }

    pub fn clear_instances(&mut self) {
        self.count = 0;
    }

    /// # Panics
    /// If `index` is not below the instance count.
    pub fn instance_transform(&self, index: usize) -> Mat4 {
        self.check_instance(index);
        self.instances.get::<Mat4>(index)
    }

    /// # Panics
    /// If `index` is not below the instance count.
    pub fn set_instance_transform(&mut self, index: usize, model: Mat4) {
        self.check_instance(index);
        self.instances.set::<Mat4>(index, model);
    }

    fn check_instance(&self, index: usize) {
        assert!(
            index < self.count,
            "instance {index} out of range ({} instances)",
            self.count
        );
    }

    pub fn bind_shader(&mut self, shader: &dyn Shader) {
        self.base.bind_shader(shader);
    }

    /// Draws every live instance in one call. Nothing is drawn without instances.
    pub fn draw(&mut self, shader: &mut dyn Shader, api: &mut dyn RenderApi, parent: &Mat4) {
        if self.count == 0 {
            return;
        }
        let model = *parent * *self.transform.matrix() * *self.base.transform.matrix();
        shader.upload_mat4(MODEL_UNIFORM, &model, false);
        shader.upload_storage_buffer(INSTANCES_BLOCK, Some(self.instances.as_ref()), false);
        self.base.draw_instances(api, self.count as u32);
    }
}

impl Transformable for InstancedMesh {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}
