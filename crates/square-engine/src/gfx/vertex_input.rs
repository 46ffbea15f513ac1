use super::buffer::Buffer;
use super::format::IndexType;
use super::shader::Shader;

/// One vertex attribute wired to a shader input.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct AttributeBinding {
    /// Shader input location.
    pub location: u32,
    /// Vertex buffer slot; the buffer's index in the assembly.
    pub binding: u32,
    pub components: usize,
    /// Byte offset of the attribute within one element.
    pub offset: usize,
    /// Byte stride of the owning buffer.
    pub stride: usize,
}

/// Matches every attribute of every buffer against the shader's inputs by name.
///
/// Attributes without a matching input are skipped; a shader may consume a
/// subset of the available vertex data.
pub fn attribute_bindings(buffers: &[Box<dyn Buffer>], shader: &dyn Shader) -> Vec<AttributeBinding> {
    let mut out = Vec::new();

    for (binding, buffer) in buffers.iter().enumerate() {
        let format = buffer.format();
        for attr in format.attributes() {
            let Some(location) = shader.attribute_location(&attr.name) else {
                continue;
            };
            out.push(AttributeBinding {
                location,
                binding: binding as u32,
                components: attr.component_count(),
                offset: attr.offset,
                stride: format.stride(),
            });
        }
    }

    out
}

/// Buffers held by a vertex input assembly.
pub struct VertexInputs {
    index_type: IndexType,
    vertex_buffers: Vec<Box<dyn Buffer>>,
    index_buffer: Option<Box<dyn Buffer>>,
}

impl VertexInputs {
    pub fn new(index_type: IndexType) -> Self {
        Self {
            index_type,
            vertex_buffers: Vec::new(),
            index_buffer: None,
        }
    }

    pub fn index_type(&self) -> IndexType {
        self.index_type
    }

    pub fn vertex_buffers(&self) -> &[Box<dyn Buffer>] {
        &self.vertex_buffers
    }

    pub fn vertex_buffers_mut(&mut self) -> &mut [Box<dyn Buffer>] {
        &mut self.vertex_buffers
    }

    pub fn index_buffer(&self) -> Option<&dyn Buffer> {
        self.index_buffer.as_deref()
    }

    pub fn push_vertex_buffer(&mut self, buffer: Box<dyn Buffer>) {
        self.vertex_buffers.push(buffer);
    }

    /// Replaces the index buffer, returning the previous one.
    pub fn set_index_buffer(&mut self, buffer: Box<dyn Buffer>) -> Option<Box<dyn Buffer>> {
        assert!(
            self.index_type != IndexType::None,
            "index buffer set on an assembly created with IndexType::None"
        );
        self.index_buffer.replace(buffer)
    }

    /// Elements a draw call consumes: indices when indexed, else vertices of the first buffer.
    pub fn element_count(&self) -> usize {
        match (&self.index_buffer, self.vertex_buffers.first()) {
            (Some(ib), _) => ib.count(),
            (None, Some(vb)) => vb.count(),
            (None, None) => 0,
        }
    }
}

/// Ordered vertex buffers plus an optional index buffer, bound to a shader.
pub trait VertexInputAssembly {
    fn id(&self) -> u32;

    fn inputs(&self) -> &VertexInputs;

    fn inputs_mut(&mut self) -> &mut VertexInputs;

    /// Wires buffer attributes to `shader`'s inputs. See `attribute_bindings`.
    fn bind_shader(&mut self, shader: &dyn Shader);

    fn activate(&mut self);

    fn add_vertex_buffer(&mut self, buffer: Box<dyn Buffer>) {
        self.inputs_mut().push_vertex_buffer(buffer);
    }

    fn set_index_buffer(&mut self, buffer: Box<dyn Buffer>) {
        self.inputs_mut().set_index_buffer(buffer);
    }

    fn index_type(&self) -> IndexType {
        self.inputs().index_type()
    }

    fn element_count(&self) -> usize {
        self.inputs().element_count()
    }
}
